// Command-line surface: argument model and the list of entries to process.

use crate::ui::Operation;
use clap::{Parser, ValueEnum};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// JEB.IO "Malware Sharing Network" client: check file hashes, download
/// samples and upload files.
#[derive(Parser, Debug)]
#[command(
    name = "jebio",
    version,
    after_help = "Example:\n  jebio check 42aaa93a894a69bfcbc21823b09e4ea9f723c428"
)]
pub struct Args {
    /// What to do with the entries
    #[arg(value_enum, ignore_case = true)]
    pub mode: Mode,

    /// Extra verbose: print each request URL and a run summary
    #[arg(short, long)]
    pub verbose: bool,

    /// Extract downloaded files (only in `download` mode)
    #[arg(short = 'x', long)]
    pub extract: bool,

    /// Text file with one hash or file path per line; `#` lines are ignored
    #[arg(short = 'f', long = "file", value_name = "LISTFILE")]
    pub list_files: Vec<PathBuf>,

    /// API key; falls back to JEBIO_APIKEY, then to the saved key
    #[arg(long)]
    pub apikey: Option<String>,

    /// Service base URL; falls back to JEBIO_BASE_URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// File hashes (check, download) or file paths (upload), comma-separated lists allowed
    #[arg(value_name = "HASH|PATH")]
    pub entries: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Check,
    Download,
    Upload,
    /// Save a default API key to the home directory
    Configure,
}

impl Mode {
    /// The batch operation for this mode, `None` for `configure`.
    pub fn operation(self, extract: bool) -> Option<Operation> {
        match self {
            Mode::Check => Some(Operation::Check),
            Mode::Download => Some(Operation::Download { extract }),
            Mode::Upload => Some(Operation::Upload),
            Mode::Configure => None,
        }
    }
}

/// Entries of a list file: trimmed, without blanks and `#` comments.
pub fn parse_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_list_file(path: &Path) -> io::Result<Vec<String>> {
    Ok(parse_list(&std::fs::read_to_string(path)?))
}

/// Merge list-file entries with comma-split positional arguments and drop
/// duplicates, keeping the first occurrence.
pub fn merge_entries(listed: Vec<String>, positional: &[String]) -> Vec<String> {
    let split = positional
        .iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    let mut seen = HashSet::new();
    listed
        .into_iter()
        .chain(split)
        .filter(|e| seen.insert(e.clone()))
        .collect()
}

/// All entries named on the command line, list files included.
pub fn collect_entries(args: &Args) -> io::Result<Vec<String>> {
    let mut listed = Vec::new();
    for path in &args.list_files {
        listed.extend(read_list_file(path)?);
    }
    Ok(merge_entries(listed, &args.entries))
}
