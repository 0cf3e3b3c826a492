use chrono::Utc;
use iced::widget::image::Handle as ImageHandle;
use iced::widget::{button, column, container, row, scrollable, text, text_editor, Column};
use iced::{Element, Length, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inspection_report::report::{self, ExportPayload};
use inspection_report::state::{FormSession, RowId, SelectionOutcome};
use inspection_report::thumbnail::inline::{ensure_image_media_type, media_type_for_path};
use inspection_report::thumbnail::{self, NormalizedThumbnail, ThumbnailGeometry};
use inspection_report::{ReportConfig, ReportError};

mod ui;

/// Extensions offered in the photo picker
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// Main application state
struct InspectionReport {
    config: ReportConfig,
    /// Rows and their committed thumbnails
    session: FormSession,
    /// Observation editors, one per row
    editors: HashMap<RowId, text_editor::Content>,
    /// On-screen previews of committed thumbnails
    previews: HashMap<RowId, ImageHandle>,
    /// Status message to display to the user
    status: String,
    /// An export is being written to disk
    exporting: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    AddRow,
    RemoveRow(RowId),
    ZoneChanged(RowId, String),
    ObservationEdited(RowId, text_editor::Action),
    /// User clicked a photo cell
    PickImage(RowId),
    /// Background normalization finished for selection `seq` of `row`
    ImageNormalized {
        row: RowId,
        seq: u64,
        result: Result<NormalizedThumbnail, ReportError>,
    },
    /// User clicked "Export to Word"
    Export,
    /// Background write completed
    ExportComplete(Result<PathBuf, ReportError>),
}

impl InspectionReport {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = ReportConfig::load();
        let session = FormSession::new(config.zones.iter().cloned());
        let editors = session
            .rows()
            .iter()
            .map(|row| (row.id(), text_editor::Content::new()))
            .collect();

        let (width, height) = config.thumbnail.pixel_size();
        tracing::info!(rows = session.rows().len(), width, height, "inspection report ready");

        (
            InspectionReport {
                config,
                session,
                editors,
                previews: HashMap::new(),
                status: "Click a photo cell to add a picture.".to_string(),
                exporting: false,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AddRow => {
                let id = self.session.add_row("");
                self.editors.insert(id, text_editor::Content::new());
                Task::none()
            }
            Message::RemoveRow(id) => {
                self.session.remove_row(id);
                self.editors.remove(&id);
                self.previews.remove(&id);
                Task::none()
            }
            Message::ZoneChanged(id, zone) => {
                self.session.set_zone(id, zone);
                Task::none()
            }
            Message::ObservationEdited(id, action) => {
                if let Some(editor) = self.editors.get_mut(&id) {
                    let is_edit = action.is_edit();
                    editor.perform(action);
                    if is_edit {
                        self.session.set_observation(id, editor_text(editor));
                    }
                }
                Task::none()
            }
            Message::PickImage(id) => {
                let picked = FileDialog::new()
                    .set_title("Select Photo")
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_file();

                let Some(path) = picked else {
                    return Task::none();
                };

                // Reject before issuing a sequence number so an in-flight photo still lands
                if let Err(e) = ensure_image_media_type(media_type_for_path(&path)) {
                    self.notify(&e);
                    return Task::none();
                }

                let Some(seq) = self.session.begin_selection(id) else {
                    return Task::none();
                };

                self.status = format!("Processing {}...", path.display());
                tracing::info!(row = id, seq, path = %path.display(), "photo selected");

                Task::perform(
                    ingest_photo(path, self.config.thumbnail),
                    move |result| Message::ImageNormalized { row: id, seq, result },
                )
            }
            Message::ImageNormalized { row, seq, result } => {
                match self.session.commit(row, seq, result) {
                    SelectionOutcome::Applied => {
                        if let Some(thumb) = self.session.row(row).and_then(|r| r.thumbnail()) {
                            self.previews.insert(row, ImageHandle::from_bytes(thumb.bytes().to_vec()));
                            tracing::info!(row, seq, bytes = thumb.bytes().len(), "thumbnail stored");
                        }
                        self.status = "Photo added.".to_string();
                    }
                    SelectionOutcome::Rejected(e) => self.notify(&e),
                    SelectionOutcome::Stale | SelectionOutcome::UnknownRow => {}
                }
                Task::none()
            }
            Message::Export => {
                let pending = self.session.pending_count();
                if pending > 0 {
                    tracing::warn!(pending, "exporting without photos that are still processing");
                }

                let document = report::assemble(&self.session.report_rows(), &self.config.thumbnail);
                let payload = ExportPayload::new(document, Utc::now().date_naive());

                let dest = FileDialog::new()
                    .set_title("Save Report")
                    .set_file_name(&payload.file_name)
                    .add_filter("Word document", &["doc"])
                    .save_file();

                let Some(dest) = dest else {
                    return Task::none();
                };

                self.exporting = true;
                self.status = format!("Saving {}...", dest.display());

                Task::perform(
                    async move { report::write_export(&payload, &dest).await },
                    Message::ExportComplete,
                )
            }
            Message::ExportComplete(result) => {
                self.exporting = false;
                match result {
                    Ok(path) => self.status = format!("Report saved to {}", path.display()),
                    Err(e) => self.notify(&e),
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let geometry = &self.config.thumbnail;

        let rows: Vec<Element<Message>> = self
            .session
            .rows()
            .iter()
            .filter_map(|row| {
                let editor = self.editors.get(&row.id())?;
                Some(ui::table::row_view(row, editor, self.previews.get(&row.id()), geometry))
            })
            .collect();

        let actions = row![
            button("Add Row").on_press(Message::AddRow).padding(10),
            button("Export to Word")
                .on_press_maybe((!self.exporting).then_some(Message::Export))
                .padding(10),
        ]
        .spacing(10);

        let content = column![
            text("Inspection Report").size(32),
            ui::table::header(geometry),
            scrollable(Column::with_children(rows).spacing(8)).height(Length::Fill),
            actions,
            text(&self.status).size(16),
        ]
        .spacing(16)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }

    /// Surface a failure as a single human-readable notification
    fn notify(&mut self, error: &ReportError) {
        tracing::warn!(error = %error, "operation failed");
        self.status = error.user_message().to_string();

        MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Inspection Report")
            .set_description(error.user_message())
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Current observation text without the line terminator the editor always appends
fn editor_text(editor: &text_editor::Content) -> String {
    let mut text = editor.text();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

/// Read a picked photo and normalize it off the UI thread
async fn ingest_photo(
    path: PathBuf,
    geometry: ThumbnailGeometry,
) -> Result<NormalizedThumbnail, ReportError> {
    let raw = thumbnail::load_image_file(&path).await?;
    thumbnail::normalize_async(raw, geometry).await
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inspection_report=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    iced::application(
        "Inspection Report",
        InspectionReport::update,
        InspectionReport::view,
    )
    .theme(InspectionReport::theme)
    .centered()
    .run_with(InspectionReport::new)
}
