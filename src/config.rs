// Client configuration. Built once and handed to `IoClient::new`; nothing
// here is global.

use crate::credentials;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://www.pnfsoftware.com/io/api";

/// Environment variable that overrides the service base URL.
pub const BASE_URL_ENV: &str = "JEBIO_BASE_URL";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Service root, without a trailing slash.
    pub base_url: String,
    /// Default API key, used when neither an explicit key nor
    /// `JEBIO_APIKEY` is available.
    pub api_key: Option<String>,
    /// Where archives are saved and extracted, and where already
    /// downloaded samples are looked up.
    pub work_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            work_dir: PathBuf::from("."),
        }
    }
}

impl ClientConfig {
    /// Configuration from `JEBIO_BASE_URL` (or the public service) and the
    /// key saved by `jebio configure`, if any.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: trim_base(&base_url),
            api_key: credentials::load_default_key(),
            work_dir: PathBuf::from("."),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = trim_base(base_url);
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
