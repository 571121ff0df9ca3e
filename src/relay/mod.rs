mod image_relay;
mod prompt;
mod recommendations;
mod staging;

pub use image_relay::ImageRelay;
pub use prompt::{PROMPT, PROMPT_SEPARATOR};
pub use recommendations::{BookEntry, EXPECTED_BOOKS, Recommendations};
pub use staging::{StagedFile, UploadedImage};
