// Library root
// -----------
// Client for the JEB.IO "Malware Sharing Network" API, usable as a library
// or through the `jebio` binary.
//
// Module responsibilities:
// - `api`: `IoClient`, wrapping the check / download / upload endpoints.
// - `archive`: extraction of the password-protected sample archives.
// - `config`: `ClientConfig` (base URL, default key, working directory).
// - `credentials`: API key precedence and the saved default key.
// - `error`: `ClientError`, the library error type.
// - `cli` / `ui`: argument parsing and the batch loop used by `main.rs`.
pub mod api;
pub mod archive;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod ui;

pub use api::{CheckResult, Download, IoClient, UploadResult};
pub use config::ClientConfig;
pub use error::ClientError;
