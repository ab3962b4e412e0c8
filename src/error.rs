//! Structured error types for the dashprint renderer.
//!
//! Layout itself never fails: data misses render blank and negative sizes
//! clamp to zero. Errors only come from the boundary: parsing the document,
//! loading fonts, and reading or writing files.

use thiserror::Error;

/// The unified error type returned by the public dashprint API.
#[derive(Debug, Error)]
pub enum DashError {
    /// JSON input failed to parse as a valid document.
    #[error("Failed to parse document: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },
    /// A font could not be read or parsed.
    #[error("Font error: {0}")]
    Font(String),
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The rendered image could not be encoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for DashError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the document schema. Check `type` values and field names.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        DashError::Parse { source: e, hint }
    }
}
