use super::{EXPECTED_BOOKS, PROMPT, PROMPT_SEPARATOR, Recommendations, StagedFile, UploadedImage};
use crate::{
    Result,
    gemini::{GenerativeClient, Part},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Forwards an uploaded image plus the fixed prompt to a generative service
/// and hands back whatever text it produced.
pub struct ImageRelay {
    client: Arc<dyn GenerativeClient>,
    model: String,
    staging_dir: PathBuf,
}

impl ImageRelay {
    pub fn new(
        client: Arc<dyn GenerativeClient>,
        model: impl Into<String>,
        staging_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            staging_dir: staging_dir.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the generated text unchanged, or `None` when the reply had no
    /// text at all (e.g. the prompt was blocked).
    pub async fn analyze(&self, upload: UploadedImage) -> Result<Option<String>> {
        info!(
            "Analyzing image {} ({} bytes) with {}",
            upload.file_name,
            upload.bytes.len(),
            self.model
        );

        // Removed on drop, on every path out of this function
        let staged = StagedFile::write(&self.staging_dir, &upload).await?;

        let file = self.client.upload_file(staged.path()).await?;
        debug!("Staged image uploaded as {}", file.name);

        let parts = vec![
            Part::from(&file),
            Part::from(PROMPT_SEPARATOR),
            Part::from(PROMPT),
        ];
        let response = self.client.generate_content(&self.model, parts).await?;

        let Some(text) = response.text() else {
            warn!(
                "Response for {} carries no text ({})",
                upload.file_name,
                response.block_reason().unwrap_or("no block reason given")
            );
            return Ok(None);
        };

        let recommendations = Recommendations::parse(&text);
        if !recommendations.conforms() {
            warn!(
                "Response for {} does not follow the requested format ({} of {} book entries)",
                upload.file_name,
                recommendations.books.len(),
                EXPECTED_BOOKS
            );
        }

        drop(staged);
        Ok(Some(text))
    }
}
