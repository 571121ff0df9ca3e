use async_trait::async_trait;
use bookshelf_relay::{
    Error, Result,
    gemini::{FileHandle, GenerateContentResponse, GenerativeClient, Part},
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What the mock saw when asked to upload a file.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub handle: FileHandle,
}

#[derive(Debug, Clone)]
pub struct RecordedGeneration {
    pub model: String,
    pub parts: Vec<Part>,
}

/// Mock generative client for testing
#[derive(Debug, Default)]
pub struct MockGenerativeClient {
    pub uploads: Mutex<Vec<RecordedUpload>>,
    pub generations: Mutex<Vec<RecordedGeneration>>,
    pub response: Option<GenerateContentResponse>,
    pub upload_error: Option<String>,
    pub generate_error: Option<String>,
    /// Held between staging and reading the file, to let concurrent requests interleave.
    pub upload_delay: Option<Duration>,
    counter: AtomicUsize,
}

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.response = Some(text_response(text));
        self
    }

    pub fn with_response(mut self, response: GenerateContentResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_upload_error(mut self, error: &str) -> Self {
        self.upload_error = Some(error.to_string());
        self
    }

    pub fn with_generate_error(mut self, error: &str) -> Self {
        self.generate_error = Some(error.to_string());
        self
    }

    pub fn with_upload_delay(mut self, delay: Duration) -> Self {
        self.upload_delay = Some(delay);
        self
    }

    pub fn get_uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn get_generations(&self) -> Vec<RecordedGeneration> {
        self.generations.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    async fn upload_file(&self, path: &Path) -> Result<FileHandle> {
        if let Some(delay) = self.upload_delay {
            tokio::time::sleep(delay).await;
        }

        let bytes = tokio::fs::read(path).await?;
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        let handle = FileHandle {
            name: format!("files/mock-{}", id),
            uri: format!("https://generativelanguage.googleapis.com/v1beta/files/mock-{}", id),
            mime_type: "image/jpeg".to_string(),
            display_name: None,
            state: Some("ACTIVE".to_string()),
        };

        self.uploads.lock().unwrap().push(RecordedUpload {
            path: path.to_path_buf(),
            bytes,
            handle: handle.clone(),
        });

        if let Some(ref error) = self.upload_error {
            return Err(Error::Gemini {
                status: 503,
                body: error.clone(),
            });
        }

        Ok(handle)
    }

    async fn generate_content(
        &self,
        model: &str,
        parts: Vec<Part>,
    ) -> Result<GenerateContentResponse> {
        self.generations.lock().unwrap().push(RecordedGeneration {
            model: model.to_string(),
            parts,
        });

        if let Some(ref error) = self.generate_error {
            return Err(Error::Gemini {
                status: 429,
                body: error.clone(),
            });
        }

        self.response
            .clone()
            .ok_or_else(|| Error::malformed("No mock response configured"))
    }
}

/// A generateContent response whose single candidate holds `text`.
pub fn text_response(text: &str) -> GenerateContentResponse {
    serde_json::from_value(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    }))
    .unwrap()
}
