use super::mocks::MockGenerativeClient;
use axum::{Router, body::Body, http::Request};
use bookshelf_relay::{
    relay::ImageRelay,
    server::{self, AppState},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const BOUNDARY: &str = "------------------------bookshelf0boundary";
pub const TEST_MODEL: &str = "gemini-2.0-flash";
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Smallest useful JPEG header; the relay never looks inside.
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

pub enum FormPart<'a> {
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

impl<'a> FormPart<'a> {
    pub fn image(file_name: &'a str, bytes: &'a [u8]) -> Self {
        Self::File {
            name: "image",
            file_name,
            content_type: "image/jpeg",
            bytes,
        }
    }
}

/// Encode `parts` as a multipart/form-data body.
pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            FormPart::Text { name, value } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}",
                        name, value
                    )
                    .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[FormPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Router wired to `client` with a [`MAX_UPLOAD_BYTES`] body cap, staging into a fresh temp dir.
pub fn create_test_app(client: Arc<MockGenerativeClient>) -> (Router, TempDir) {
    create_test_app_with_limit(client, Some(MAX_UPLOAD_BYTES))
}

pub fn create_test_app_with_limit(
    client: Arc<MockGenerativeClient>,
    max_upload_bytes: Option<usize>,
) -> (Router, TempDir) {
    let staging_dir = TempDir::new().unwrap();
    let relay = ImageRelay::new(client, TEST_MODEL, staging_dir.path());

    let app_state = AppState {
        relay: Arc::new(relay),
    };

    (server::router(app_state, max_upload_bytes), staging_dir)
}

/// Files currently present in the staging dir.
pub fn staged_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}
