/// Word-compatible HTML report assembly
///
/// Word opens HTML carrying the Office namespaces as a regular document.
/// Every size in the stylesheet is expressed in inches from the same
/// `ThumbnailGeometry` used to render the thumbnails, which keeps row
/// heights identical no matter how many photos a report embeds.

use crate::thumbnail::{NormalizedThumbnail, ThumbnailGeometry};

/// Fixed column titles
pub const COLUMN_TITLES: [&str; 3] = ["Functional Zone", "Photo Before", "Observation"];

/// Zone column width in inches
const ZONE_COLUMN_IN: f64 = 0.5;
/// Observation column width in inches
const OBSERVATION_COLUMN_IN: f64 = 1.5;
/// Header row height in inches
const HEADER_ROW_IN: f64 = 0.3;

/// One table row as captured from the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRow {
    /// Plain-text zone label
    pub zone: String,
    /// Committed thumbnail, if the user picked a photo
    pub thumbnail: Option<NormalizedThumbnail>,
    /// Free text; line breaks are preserved
    pub observation: String,
}

impl ReportRow {
    pub fn new(zone: impl Into<String>, thumbnail: Option<NormalizedThumbnail>, observation: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            thumbnail,
            observation: observation.into(),
        }
    }
}

/// A fully assembled report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    markup: String,
    rows: usize,
}

impl ReportDocument {
    pub fn as_str(&self) -> &str {
        &self.markup
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.markup.into_bytes()
    }
}

/// Build the report markup; always succeeds
pub fn assemble(rows: &[ReportRow], geometry: &ThumbnailGeometry) -> ReportDocument {
    let mut markup = document_head(geometry);

    markup.push_str("\n<tr>\n");
    for title in COLUMN_TITLES {
        markup.push_str(&format!("  <th>{}</th>\n", title));
    }
    markup.push_str("</tr>");

    for row in rows {
        let photo = row
            .thumbnail
            .as_ref()
            .map(|thumb| image_tag(thumb, geometry))
            .unwrap_or_default();

        markup.push_str(&format!(
            "\n<tr>\n  <td class=\"col1\">{}</td>\n  <td class=\"col2\">{}</td>\n  <td class=\"col3\">{}</td>\n</tr>",
            row.zone,
            photo,
            observation_markup(&row.observation),
        ));
    }

    markup.push_str("\n</table>\n</body>\n</html>\n");

    ReportDocument {
        markup,
        rows: rows.len(),
    }
}

/// Turn line breaks into `<br>`; nothing else is escaped
pub fn observation_markup(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br>")
}

fn image_tag(thumb: &NormalizedThumbnail, geometry: &ThumbnailGeometry) -> String {
    format!(
        "<img src=\"{}\" width=\"{}\" height=\"{}\" style=\"width:{};height:{};object-fit:cover;\">",
        thumb.data_uri(),
        thumb.width(),
        thumb.height(),
        inches(geometry.width_in),
        inches(geometry.height_in),
    )
}

fn document_head(geometry: &ThumbnailGeometry) -> String {
    let photo_width = inches(geometry.width_in);
    let photo_height = inches(geometry.height_in);

    format!(
        r#"<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word'>
<head>
<meta charset="utf-8">
<style>
@page {{ size: A4 portrait; margin: 1cm; }}
table {{ border-collapse: collapse; width: auto; }}
td, th {{ border: 0.5px solid #333; padding: 5px; font-size: 11px; vertical-align: middle; }}
th {{ background-color: #f2f2f2; height: {header}; }}
td {{ height: {photo_height}; padding: 0; }}
.col1 {{ width: {zone}; }}
.col2 {{ width: {photo_width}; }}
.col3 {{ width: {observation}; }}
img {{ width: {photo_width} !important; height: {photo_height} !important; display: block; object-fit: cover; }}
</style>
</head>
<body>
<table>"#,
        header = inches(HEADER_ROW_IN),
        zone = inches(ZONE_COLUMN_IN),
        observation = inches(OBSERVATION_COLUMN_IN),
    )
}

fn inches(value: f64) -> String {
    format!("{}in", value)
}
