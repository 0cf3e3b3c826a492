/// Report table widgets: header row and one editable row per zone
///
/// The photo cell is drawn at the thumbnail's own pixel size so the
/// on-screen preview matches what ends up in the document.
use iced::widget::image::Handle as ImageHandle;
use iced::widget::{button, container, image, row, text, text_editor, text_input};
use iced::{Alignment, ContentFit, Element, Length};

use inspection_report::report::assemble::COLUMN_TITLES;
use inspection_report::state::FormRow;
use inspection_report::thumbnail::ThumbnailGeometry;

use crate::Message;

const ZONE_WIDTH: f32 = 140.0;
const OBSERVATION_WIDTH: f32 = 320.0;

/// Column titles, aligned with the row cells below
pub fn header<'a>(geometry: &ThumbnailGeometry) -> Element<'a, Message> {
    let (photo_width, _) = photo_size(geometry);

    row![
        text(COLUMN_TITLES[0]).width(ZONE_WIDTH),
        text(COLUMN_TITLES[1]).width(photo_width),
        text(COLUMN_TITLES[2]).width(OBSERVATION_WIDTH),
    ]
    .spacing(10)
    .into()
}

/// A single form row: zone label, clickable photo cell, observation editor
pub fn row_view<'a>(
    form_row: &'a FormRow,
    editor: &'a text_editor::Content,
    preview: Option<&ImageHandle>,
    geometry: &ThumbnailGeometry,
) -> Element<'a, Message> {
    let id = form_row.id();
    let (photo_width, photo_height) = photo_size(geometry);

    let zone = text_input("Zone", &form_row.zone)
        .on_input(move |zone| Message::ZoneChanged(id, zone))
        .width(ZONE_WIDTH);

    let photo: Element<'a, Message> = match preview {
        Some(handle) => image::<ImageHandle>(handle.clone())
            .width(photo_width)
            .height(photo_height)
            .content_fit(ContentFit::Cover)
            .into(),
        None if form_row.is_pending() => text("Processing...").size(12).into(),
        None => text("Click to add photo").size(12).into(),
    };

    let photo_cell = button(
        container(photo)
            .center_x(photo_width)
            .center_y(photo_height),
    )
    .on_press(Message::PickImage(id))
    .padding(0);

    let observation = container(
        text_editor(editor)
            .on_action(move |action| Message::ObservationEdited(id, action))
            .height(photo_height),
    )
    .width(OBSERVATION_WIDTH);

    row![
        zone,
        photo_cell,
        observation,
        button("Remove").on_press(Message::RemoveRow(id)),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

fn photo_size(geometry: &ThumbnailGeometry) -> (Length, Length) {
    let (width, height) = geometry.pixel_size();
    (Length::Fixed(width as f32), Length::Fixed(height as f32))
}
