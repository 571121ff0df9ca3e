use crate::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const FALLBACK_FILE_NAME: &str = "image";

/// An image as received from the caller.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// One upload written to disk for the duration of a request.
///
/// The file is removed when the guard is dropped, whichever way the request
/// ends (success, error, panic or a dropped future).
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    pub async fn write(dir: &Path, upload: &UploadedImage) -> Result<Self> {
        let path = dir.join(staged_name(&upload.file_name));
        let staged = Self { path };

        tokio::fs::write(&staged.path, &upload.bytes)
            .await
            .map_err(|e| Error::staging(staged.path.display().to_string(), e))?;

        debug!(
            "Staged {} bytes at {}",
            upload.bytes.len(),
            staged.path.display()
        );

        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed staged file {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove staged file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// `<uuid>-<basename>`: unique per request, keeps the extension for MIME detection.
fn staged_name(client_name: &str) -> String {
    // Clients may send either separator regardless of our platform
    let base = client_name
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|b| !b.is_empty() && *b != "." && *b != "..")
        .unwrap_or(FALLBACK_FILE_NAME);

    format!("{}-{}", Uuid::new_v4(), base)
}
