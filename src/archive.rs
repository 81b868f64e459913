// Extraction of the password-protected sample archives served by the
// download endpoint. Only the first file entry is extracted: the service
// packs one sample per archive. Directory entries are skipped.

use crate::error::{ClientError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Password used by the service for every sample archive.
pub const ARCHIVE_PASSWORD: &str = "infected";

/// Extract the first file entry of `archive_path` into `dest_dir` and
/// return the path of the written file.
pub fn extract_first_entry(archive_path: &Path, dest_dir: &Path, password: &str) -> Result<PathBuf> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut first_file = None;
    for i in 0..archive.len() {
        if !archive.by_index_raw(i)?.is_dir() {
            first_file = Some(i);
            break;
        }
    }
    let index = first_file.ok_or(ClientError::EmptyArchive)?;

    let mut entry = archive.by_index_decrypt(index, password.as_bytes())?;
    let relative = entry
        .enclosed_name()
        .ok_or_else(|| ClientError::UnsafeEntry(entry.name().to_string()))?;
    let out_path = dest_dir.join(relative);

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = fs::File::create(&out_path)?;
    io::copy(&mut entry, &mut out)?;
    log::debug!("extracted {} to {}", entry.name(), out_path.display());
    Ok(out_path)
}
