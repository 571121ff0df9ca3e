use serde::{Deserialize, Serialize};

pub const NO_IMAGE_MESSAGE: &str = "No image uploaded";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
