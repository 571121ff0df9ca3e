use super::types::*;
use crate::{Error, Result, config::GeminiConfig};
use async_trait::async_trait;
use reqwest::{Client, Response, multipart};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// The two operations the relay needs from a generative service.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Upload a local file and return the service-side handle.
    async fn upload_file(&self, path: &Path) -> Result<FileHandle>;

    async fn generate_content(
        &self,
        model: &str,
        parts: Vec<Part>,
    ) -> Result<GenerateContentResponse>;
}

/// Gemini Generative Language REST client.
///
/// Holds one pooled `reqwest::Client`; build it once and share it across requests.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/upload/{}/files", self.base_url, API_VERSION)
    }

    fn generate_url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, API_VERSION, model
        )
    }

    async fn check_status(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(Error::Gemini { status, body })
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn upload_file(&self, path: &Path) -> Result<FileHandle> {
        let content = tokio::fs::read(path).await?;

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        debug!(
            "Uploading {} ({} bytes, {}) to Gemini Files API",
            file_name,
            content.len(),
            mime_type
        );

        let metadata = serde_json::json!({
            "file": { "displayName": file_name }
        });

        let form = multipart::Form::new()
            .part(
                "metadata",
                multipart::Part::text(metadata.to_string()).mime_str("application/json")?,
            )
            .part(
                "file",
                multipart::Part::bytes(content)
                    .file_name(file_name)
                    .mime_str(&mime_type)?,
            );

        let response = self
            .http
            .post(self.upload_url())
            .header(API_KEY_HEADER, &self.api_key)
            .header("X-Goog-Upload-Protocol", "multipart")
            .multipart(form)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        let uploaded: UploadFileResponse = serde_json::from_str(&body)
            .map_err(|e| Error::malformed(format!("upload response: {}", e)))?;

        debug!("Uploaded file {} ({})", uploaded.file.name, uploaded.file.uri);

        Ok(uploaded.file)
    }

    async fn generate_content(
        &self,
        model: &str,
        parts: Vec<Part>,
    ) -> Result<GenerateContentResponse> {
        debug!("Generating content with {} using {} parts", model, parts.len());

        let request = GenerateContentRequest::user(parts);

        let response = self
            .http
            .post(self.generate_url(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        let generated: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| Error::malformed(format!("generateContent response: {}", e)))?;

        debug!(
            "Received generateContent response with {} candidates",
            generated.candidates.len()
        );

        Ok(generated)
    }
}
