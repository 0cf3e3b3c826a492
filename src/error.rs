/// Error types for image ingestion and report export
///
/// Every failure the user can see falls into one of three kinds.
/// Image failures only ever affect the row they were raised for;
/// export failures abort the whole export.

use thiserror::Error;

/// Failures raised while normalizing a photo or building the report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The selected file does not declare an `image/*` media type
    #[error("not an image: declared media type is {media_type:?}")]
    InvalidMediaType { media_type: String },

    /// The image bytes could not be read into (or written back out of) a pixel buffer
    #[error("failed to decode image: {0}")]
    DecodeFailure(String),

    /// Anything that went wrong while building or saving the document
    #[error("failed to create report: {0}")]
    AssemblyFailure(String),
}

impl ReportError {
    /// The single human-readable notification shown to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            ReportError::InvalidMediaType { .. } => "Please select an image file",
            ReportError::DecodeFailure(_) => "Could not read the selected image",
            ReportError::AssemblyFailure(_) => "Error creating document. Please try again.",
        }
    }
}

/// Failures while loading the optional configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
