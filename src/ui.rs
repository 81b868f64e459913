// UI layer: runs one operation over a list of entries and reports each
// result on the terminal. Entries are processed one after the other; a
// failing entry is reported on stderr and the loop moves on.

use crate::api::{Download, IoClient};
use crate::archive::ARCHIVE_PASSWORD;
use crate::credentials;
use anyhow::Result;
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Check,
    Download { extract: bool },
    Upload,
}

/// Per-run tally, used for the exit status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub not_found: usize,
    pub failed: usize,
}

enum Outcome {
    Done,
    NotFound,
}

/// Process every entry with `op`. `apikey` is passed to each call as the
/// explicit key.
pub fn run_batch(
    client: &IoClient,
    op: Operation,
    entries: &[String],
    apikey: Option<&str>,
) -> BatchSummary {
    log::info!("Mode: {:?}", op);
    log::info!("Processing {} entries", entries.len());

    let mut summary = BatchSummary::default();
    for entry in entries {
        let result = match op {
            Operation::Check => check_entry(client, entry, apikey),
            Operation::Download { extract } => download_entry(client, entry, apikey, extract),
            Operation::Upload => upload_entry(client, entry, apikey),
        };
        match result {
            Ok(Outcome::Done) => summary.succeeded += 1,
            Ok(Outcome::NotFound) => summary.not_found += 1,
            Err(e) => {
                summary.failed += 1;
                eprintln!("{}: {:?}", entry, e);
            }
        }
    }
    log::debug!("Summary: {:?}", summary);
    summary
}

fn check_entry(client: &IoClient, hash: &str, apikey: Option<&str>) -> Result<Outcome> {
    let result = client.check(hash, apikey)?;
    println!("{}: {}", hash, pretty_sorted(&result)?);
    Ok(Outcome::Done)
}

fn download_entry(
    client: &IoClient,
    hash: &str,
    apikey: Option<&str>,
    extract: bool,
) -> Result<Outcome> {
    let spinner = spinner(format!("Downloading {}...", hash));
    let result = client.download(hash, apikey, extract);
    spinner.finish_and_clear();

    match result? {
        Some(Download::Present(path)) => {
            println!("{}: already present at {}", hash, path.display());
        }
        Some(Download::Extracted(path)) => {
            println!("{}: downloaded to {}", hash, path.display());
        }
        Some(Download::Archive(path)) => {
            println!(
                "{}: downloaded to {} (password: \"{}\")",
                hash,
                path.display(),
                ARCHIVE_PASSWORD
            );
        }
        None => {
            println!("{}: NOT found", hash);
            return Ok(Outcome::NotFound);
        }
    }
    Ok(Outcome::Done)
}

fn upload_entry(client: &IoClient, file_path: &str, apikey: Option<&str>) -> Result<Outcome> {
    let spinner = spinner(format!("Uploading {}...", file_path));
    let result = client.upload(Path::new(file_path), apikey);
    spinner.finish_and_clear();

    println!("{}: {}", file_path, pretty_sorted(&result?)?);
    Ok(Outcome::Done)
}

/// Pretty JSON with object keys in sorted order.
fn pretty_sorted<T: Serialize>(value: &T) -> Result<String> {
    // serde_json::Map is a BTreeMap, so going through Value sorts the keys.
    let value = serde_json::to_value(value)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

// Drawn on stderr and hidden when stderr is not a terminal.
fn spinner(msg: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Prompt for an API key and save it as the default key.
pub fn configure() -> Result<()> {
    let key: String = Password::new().with_prompt("JEB.IO API key").interact()?;
    let path = credentials::persist_default_key(&key)?;
    println!("API key saved to {}", path.display());
    Ok(())
}
