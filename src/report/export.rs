/// Download payload for an assembled report and its atomic write to disk
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::assemble::ReportDocument;
use crate::error::ReportError;

/// Legacy Word document content type
pub const CONTENT_TYPE: &str = "application/msword";

/// Everything the save step needs: name, type and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ExportPayload {
    pub fn new(document: ReportDocument, date: NaiveDate) -> Self {
        Self {
            file_name: suggested_file_name(date),
            content_type: CONTENT_TYPE,
            body: document.into_bytes(),
        }
    }
}

/// `inspection_report_YYYY-MM-DD.doc`
pub fn suggested_file_name(date: NaiveDate) -> String {
    format!("inspection_report_{}.doc", date.format("%Y-%m-%d"))
}

/// Write the payload to `dest`, never leaving a partial file behind
///
/// The body goes to `<dest>.part` first and is renamed into place once
/// fully written.
pub async fn write_export(payload: &ExportPayload, dest: &Path) -> Result<PathBuf, ReportError> {
    let mut part_name = dest.as_os_str().to_owned();
    part_name.push(".part");
    let part_path = PathBuf::from(part_name);

    let written: std::io::Result<()> = async {
        tokio::fs::write(&part_path, &payload.body).await?;
        tokio::fs::rename(&part_path, dest).await
    }
    .await;

    match written {
        Ok(()) => {
            tracing::info!(path = %dest.display(), bytes = payload.body.len(), "report exported");
            Ok(dest.to_path_buf())
        }
        Err(e) => {
            let _ = tokio::fs::remove_file(&part_path).await;
            tracing::error!(path = %dest.display(), error = %e, "report export failed");
            Err(ReportError::AssemblyFailure(format!("{}: {}", dest.display(), e)))
        }
    }
}
