// Error taxonomy for the library surface. The binary wraps these in
// `anyhow` so it can attach context; library callers can match on the
// variants (for example to tell a missing API key from a network error).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// No API key from the explicit argument, `JEBIO_APIKEY` or the
    /// configured default.
    #[error("a JEB.IO API key is required: pass one explicitly, set JEBIO_APIKEY or run `jebio configure`")]
    MissingCredential,

    #[error("a hash must be provided")]
    EmptyHash,

    /// A sample identifier that cannot be used as a file name.
    #[error("`{0}` is not a usable sample identifier")]
    InvalidIdentifier(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive contains no entries")]
    EmptyArchive,

    #[error("archive entry `{0}` would be written outside the destination")]
    UnsafeEntry(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
