/// Photo inspection report builder.
///
/// Photos picked for each row are normalized into identical, low-quality
/// JPEG thumbnails and embedded inline in a Word-compatible HTML document.

pub mod config;
pub mod error;
pub mod report;
pub mod state;
pub mod thumbnail;

pub use config::ReportConfig;
pub use error::{ConfigError, ReportError};
