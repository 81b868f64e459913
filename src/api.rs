// API client module: a small blocking HTTP client for the JEB.IO malware
// sharing service. Three endpoints are wrapped: `file/check`,
// `file/download` and `file/upload`. Every call resolves the API key
// lazily (explicit > JEBIO_APIKEY > configured default).

use crate::archive::{self, ARCHIVE_PASSWORD};
use crate::config::ClientConfig;
use crate::credentials;
use crate::error::{ClientError, Result};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Blocking client for the sample sharing service. Holds the HTTP client
/// and the configuration it was built with.
#[derive(Clone)]
pub struct IoClient {
    client: Client,
    config: ClientConfig,
}

/// Response of `file/check`. `code == 0` means the sample is known; the
/// remaining fields vary between service versions and are kept verbatim in
/// `extra`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CheckResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256hash: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CheckResult {
    pub fn is_found(&self) -> bool {
        self.code == Some(0)
    }
}

/// Response of `file/upload`, passed through mostly untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UploadResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256hash: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
    /// The canonical file was already on disk with a matching hash.
    Present(PathBuf),
    /// The archive as served, encrypted with [`ARCHIVE_PASSWORD`].
    Archive(PathBuf),
    /// The sample extracted from the archive; the archive was removed.
    Extracted(PathBuf),
}

impl Download {
    pub fn path(&self) -> &Path {
        match self {
            Download::Present(p) | Download::Archive(p) | Download::Extracted(p) => p,
        }
    }
}

impl IoClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("jebio/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(IoClient { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve the key to use for one call.
    pub fn api_key(&self, explicit: Option<&str>) -> Result<String> {
        credentials::resolve_with_env(explicit, self.config.api_key.as_deref())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    fn send(&self, req: RequestBuilder) -> Result<Response> {
        let request = req.build()?;
        log::debug!("Query: {}...", request.url());
        Ok(self.client.execute(request)?)
    }

    fn read_json<T: DeserializeOwned>(res: Response) -> Result<T> {
        let status = res.status();
        let body = res.text()?;
        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Ask the service whether it knows the sample identified by `hash`.
    pub fn check(&self, hash: &str, apikey: Option<&str>) -> Result<CheckResult> {
        let key = self.api_key(apikey)?;
        let req = self
            .client
            .get(self.endpoint("file/check"))
            .query(&[("apikey", key.as_str()), ("h", hash)]);
        Self::read_json(self.send(req)?)
    }

    /// Fetch the sample identified by `hash` into the working directory.
    ///
    /// Returns `Ok(None)` when the service does not know the sample or
    /// refuses to serve it. When `extract` is set the archive is unpacked
    /// and removed.
    pub fn download(
        &self,
        hash: &str,
        apikey: Option<&str>,
        extract: bool,
    ) -> Result<Option<Download>> {
        if hash.is_empty() {
            return Err(ClientError::EmptyHash);
        }
        let key = self.api_key(apikey)?;

        let entry = self.check(hash, Some(&key))?;
        if !entry.is_found() {
            return Ok(None);
        }
        log::debug!("File entry: {:?}", entry);

        let canonical = entry.sha256hash.as_deref().filter(|h| !h.is_empty());
        if let Some(h0) = canonical {
            if let Some(path) = self.already_downloaded(h0)? {
                log::info!("{} already downloaded", h0);
                return Ok(Some(Download::Present(path)));
            }
        }

        // Request and file name use the same identifier.
        let id = canonical.unwrap_or(hash);
        if !is_plain_name(id) {
            return Err(ClientError::InvalidIdentifier(id.to_string()));
        }

        let req = self
            .client
            .get(self.endpoint("file/download"))
            .query(&[("apikey", key.as_str()), ("h", id)]);
        let body = match self.send(req).and_then(|res| {
            if !res.status().is_success() {
                log::debug!("download of {} returned {}", id, res.status());
                return Ok(None);
            }
            Ok(Some(res.bytes()?))
        }) {
            Ok(Some(body)) if !body.is_empty() => body,
            Ok(_) => return Ok(None),
            Err(e) => {
                log::warn!("download of {} failed: {}", id, e);
                return Ok(None);
            }
        };

        let zip_path = self.config.work_dir.join(format!("{}.zip", id));
        std::fs::write(&zip_path, &body)?;

        if !extract {
            return Ok(Some(Download::Archive(zip_path)));
        }
        log::info!("Extracting {}...", zip_path.display());
        let extracted = archive::extract_first_entry(&zip_path, &self.config.work_dir, ARCHIVE_PASSWORD)?;
        std::fs::remove_file(&zip_path)?;
        Ok(Some(Download::Extracted(extracted)))
    }

    /// `Some(path)` if `<work_dir>/<h0>` exists and hashes to `h0`.
    fn already_downloaded(&self, h0: &str) -> Result<Option<PathBuf>> {
        if !is_plain_name(h0) {
            return Ok(None);
        }
        let path = self.config.work_dir.join(h0);
        if !path.is_file() {
            return Ok(None);
        }
        let actual = sha256_file(&path)?;
        Ok(actual.eq_ignore_ascii_case(h0).then_some(path))
    }

    /// Upload a local file as multipart field `ufile`.
    pub fn upload(&self, file_path: &Path, apikey: Option<&str>) -> Result<UploadResult> {
        let key = self.api_key(apikey)?;
        let form = multipart::Form::new().file("ufile", file_path)?;
        let req = self
            .client
            .post(self.endpoint("file/upload"))
            .query(&[("apikey", key.as_str())])
            .multipart(form);
        Self::read_json(self.send(req)?)
    }
}

/// Lowercase hex SHA-256 of a file's content.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

// Identifiers become file names in the working directory.
fn is_plain_name(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}
