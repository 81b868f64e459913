// API key resolution and the on-disk default key.
//
// Precedence is explicit argument, then the `JEBIO_APIKEY` environment
// variable, then whatever default the client was configured with. Empty
// strings are treated as absent at every level.

use crate::error::{ClientError, Result};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no explicit key is given.
pub const APIKEY_ENV: &str = "JEBIO_APIKEY";

const KEY_FILE_NAME: &str = ".jebio_apikey";

/// Pick the first non-empty key out of the three sources.
pub fn resolve(
    explicit: Option<&str>,
    env: Option<&str>,
    configured: Option<&str>,
) -> Result<String> {
    [explicit, env, configured]
        .into_iter()
        .flatten()
        .find(|k| !k.is_empty())
        .map(str::to_string)
        .ok_or(ClientError::MissingCredential)
}

/// Like [`resolve`], reading the environment source from `JEBIO_APIKEY`.
pub fn resolve_with_env(explicit: Option<&str>, configured: Option<&str>) -> Result<String> {
    let env = std::env::var(APIKEY_ENV).ok();
    resolve(explicit, env.as_deref(), configured)
}

/// Location of the default key file in the user's home directory.
pub fn key_file_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(KEY_FILE_NAME)
}

/// Read a key file. Missing or blank files yield `None`.
pub fn load_key_from(path: &Path) -> Option<String> {
    let data = std::fs::read_to_string(path).ok()?;
    let key = data.trim();
    (!key.is_empty()).then(|| key.to_string())
}

/// Write `key` to `path`, replacing any previous content.
pub fn persist_key_to(path: &Path, key: &str) -> Result<()> {
    std::fs::write(path, format!("{}\n", key.trim()))?;
    Ok(())
}

pub fn load_default_key() -> Option<String> {
    load_key_from(&key_file_path())
}

pub fn persist_default_key(key: &str) -> Result<PathBuf> {
    let path = key_file_path();
    persist_key_to(&path, key)?;
    Ok(path)
}
