/// Report generation module
///
/// - `assemble.rs` - builds the Word-compatible HTML table
/// - `export.rs` - names the file and writes it to disk atomically

pub mod assemble;
pub mod export;

pub use assemble::{assemble, ReportDocument, ReportRow};
pub use export::{suggested_file_name, write_export, ExportPayload};
