#![allow(dead_code)] // Not every test file uses every helper

use httpmock::MockServer;
use jebio::{ClientConfig, IoClient};
use std::fs;
use std::io::Write;
use std::net::TcpListener;
use std::path::Path;

pub const API_PATH: &str = "/io/api";
pub const KEY: &str = "test-key";

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn endpoint(name: &str) -> String {
    format!("{}/file/{}", API_PATH, name)
}

/// Client pointed at `server`, saving files into `work_dir`.
pub fn client(server: &MockServer, work_dir: &Path) -> IoClient {
    let config = ClientConfig::default()
        .with_base_url(&server.url(API_PATH))
        .with_work_dir(work_dir);
    IoClient::new(config).unwrap()
}

pub fn encrypted_zip(password: &str, files: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::unstable::write::FileOptionsExt;
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .with_deprecated_encryption(password.as_bytes());
    for (name, content) in files {
        if name.ends_with('/') {
            writer
                .add_directory(name.to_string(), zip::write::SimpleFileOptions::default())
                .unwrap();
            continue;
        }
        writer.start_file(name.to_string(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn sha256_hex(data: &[u8]) -> String {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("blob");
    fs::write(&path, data).unwrap();
    jebio::api::sha256_file(&path).unwrap()
}
