/// In-memory form session: the ordered rows and their thumbnail slots
///
/// Each photo selection is tagged with a per-row sequence number. Only the
/// newest selection for a row may commit; anything older that resolves
/// afterwards is discarded. Export only ever reads committed state.

use crate::error::ReportError;
use crate::report::ReportRow;
use crate::thumbnail::NormalizedThumbnail;

/// Stable row identity; survives removal of other rows
pub type RowId = u64;

/// What happened to a resolved normalization
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Thumbnail stored in the row
    Applied,
    /// Latest selection failed; the row keeps its previous thumbnail
    Rejected(ReportError),
    /// A newer selection exists for this row; result discarded
    Stale,
    /// Row was removed while the image was being processed
    UnknownRow,
}

/// One editable row of the form
#[derive(Debug, Clone)]
pub struct FormRow {
    id: RowId,
    pub zone: String,
    pub observation: String,
    thumbnail: Option<NormalizedThumbnail>,
    /// Last sequence number handed out for this row
    latest_selection: u64,
    /// Last sequence number that resolved (applied or rejected)
    resolved_selection: u64,
}

impl FormRow {
    fn new(id: RowId, zone: String) -> Self {
        Self {
            id,
            zone,
            observation: String::new(),
            thumbnail: None,
            latest_selection: 0,
            resolved_selection: 0,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Last committed thumbnail
    pub fn thumbnail(&self) -> Option<&NormalizedThumbnail> {
        self.thumbnail.as_ref()
    }

    /// Whether the newest selection is still being normalized
    pub fn is_pending(&self) -> bool {
        self.latest_selection > self.resolved_selection
    }

    fn to_report_row(&self) -> ReportRow {
        ReportRow::new(self.zone.clone(), self.thumbnail.clone(), self.observation.clone())
    }
}

/// All rows of the form, in display order
#[derive(Debug, Default)]
pub struct FormSession {
    rows: Vec<FormRow>,
    next_row_id: RowId,
}

impl FormSession {
    /// Start a session with one row per zone label
    pub fn new<I, S>(zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut session = Self::default();
        for zone in zones {
            session.add_row(zone);
        }
        session
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&FormRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut FormRow> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    /// Append a row and return its id
    pub fn add_row(&mut self, zone: impl Into<String>) -> RowId {
        let id = self.next_row_id;
        self.next_row_id += 1;
        self.rows.push(FormRow::new(id, zone.into()));
        id
    }

    /// Remove a row; in-flight results for it will report `UnknownRow`
    pub fn remove_row(&mut self, id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    pub fn set_zone(&mut self, id: RowId, zone: String) -> bool {
        self.row_mut(id).map(|row| row.zone = zone).is_some()
    }

    pub fn set_observation(&mut self, id: RowId, observation: String) -> bool {
        self.row_mut(id).map(|row| row.observation = observation).is_some()
    }

    /// Register a new photo selection; returns the sequence number to tag its result with
    pub fn begin_selection(&mut self, id: RowId) -> Option<u64> {
        let row = self.row_mut(id)?;
        row.latest_selection += 1;
        Some(row.latest_selection)
    }

    /// Commit a resolved normalization if it belongs to the newest selection
    pub fn commit(
        &mut self,
        id: RowId,
        seq: u64,
        result: Result<NormalizedThumbnail, ReportError>,
    ) -> SelectionOutcome {
        let Some(row) = self.row_mut(id) else {
            tracing::debug!(row = id, seq, "discarding result for removed row");
            return SelectionOutcome::UnknownRow;
        };

        if seq != row.latest_selection {
            tracing::debug!(row = id, seq, latest = row.latest_selection, "discarding stale thumbnail");
            return SelectionOutcome::Stale;
        }

        row.resolved_selection = seq;
        match result {
            Ok(thumbnail) => {
                row.thumbnail = Some(thumbnail);
                SelectionOutcome::Applied
            }
            Err(e) => SelectionOutcome::Rejected(e),
        }
    }

    /// Number of rows with a normalization still in flight
    pub fn pending_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_pending()).count()
    }

    /// Snapshot of committed state for the assembler; never waits on in-flight work
    pub fn report_rows(&self) -> Vec<ReportRow> {
        self.rows.iter().map(FormRow::to_report_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::assemble;
    use crate::thumbnail::fixtures::thumbnail_of;
    use crate::thumbnail::{normalize, RawImage, ThumbnailGeometry};

    #[test]
    fn test_new_session_has_row_per_zone() {
        let session = FormSession::new(["Zone A", "Zone B"]);
        let zones: Vec<_> = session.rows().iter().map(|r| r.zone.as_str()).collect();
        assert_eq!(zones, ["Zone A", "Zone B"]);
        assert_ne!(session.rows()[0].id(), session.rows()[1].id());
    }

    #[test]
    fn test_latest_selection_wins_regardless_of_completion_order() {
        let mut session = FormSession::new(["Zone A"]);
        let id = session.rows()[0].id();

        let first = session.begin_selection(id).unwrap();
        let second = session.begin_selection(id).unwrap();
        assert!(second > first);

        let newer = thumbnail_of(400, 300);
        let older = thumbnail_of(300, 400);

        assert_eq!(session.commit(id, second, Ok(newer.clone())), SelectionOutcome::Applied);
        assert_eq!(session.commit(id, first, Ok(older)), SelectionOutcome::Stale);
        assert_eq!(session.row(id).unwrap().thumbnail(), Some(&newer));
    }

    #[test]
    fn test_stale_result_does_not_clear_pending() {
        let mut session = FormSession::new(["Zone A"]);
        let id = session.rows()[0].id();

        let first = session.begin_selection(id).unwrap();
        let _second = session.begin_selection(id).unwrap();

        session.commit(id, first, Ok(thumbnail_of(50, 50)));
        assert!(session.row(id).unwrap().is_pending());
        assert!(session.row(id).unwrap().thumbnail().is_none());
        assert_eq!(session.pending_count(), 1);
    }

    #[test]
    fn test_failed_selection_keeps_previous_thumbnail() {
        let mut session = FormSession::new(["Zone A"]);
        let id = session.rows()[0].id();

        let seq = session.begin_selection(id).unwrap();
        let thumb = thumbnail_of(640, 480);
        session.commit(id, seq, Ok(thumb.clone()));

        let seq = session.begin_selection(id).unwrap();
        let err = ReportError::DecodeFailure("truncated".into());
        assert_eq!(session.commit(id, seq, Err(err.clone())), SelectionOutcome::Rejected(err));

        let row = session.row(id).unwrap();
        assert_eq!(row.thumbnail(), Some(&thumb));
        assert!(!row.is_pending());
    }

    #[test]
    fn test_removed_row_results_are_discarded() {
        let mut session = FormSession::new(["Zone A", "Zone B"]);
        let id = session.rows()[0].id();
        let seq = session.begin_selection(id).unwrap();

        assert!(session.remove_row(id));
        assert!(!session.remove_row(id));
        assert_eq!(session.commit(id, seq, Ok(thumbnail_of(10, 10))), SelectionOutcome::UnknownRow);
        assert_eq!(session.rows().len(), 1);
    }

    #[test]
    fn test_row_ids_are_not_reused() {
        let mut session = FormSession::new(["Zone A"]);
        let first = session.rows()[0].id();
        session.remove_row(first);
        let next = session.add_row("Zone B");
        assert_ne!(first, next);
    }

    #[test]
    fn test_in_flight_rows_export_committed_state() {
        let mut session = FormSession::new(["Zone A"]);
        let id = session.rows()[0].id();
        session.set_observation(id, "pending photo".into());
        session.begin_selection(id);

        let rows = session.report_rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].thumbnail.is_none());
        assert_eq!(rows[0].observation, "pending photo");
    }

    #[test]
    fn test_decode_failure_does_not_block_other_rows() {
        let geometry = ThumbnailGeometry::default();
        let mut session = FormSession::new(["Zone A", "Zone B"]);
        let (a, b) = (session.rows()[0].id(), session.rows()[1].id());
        session.set_observation(a, "broken upload".into());
        session.set_observation(b, "fine".into());

        let seq_a = session.begin_selection(a).unwrap();
        let seq_b = session.begin_selection(b).unwrap();

        let corrupt = RawImage::new(b"garbage".to_vec(), "image/jpeg");
        let result_a = normalize(&corrupt, &geometry);
        assert!(matches!(result_a, Err(ReportError::DecodeFailure(_))));
        session.commit(a, seq_a, result_a);
        session.commit(b, seq_b, Ok(thumbnail_of(800, 600)));

        let doc = assemble(&session.report_rows(), &geometry);
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.as_str().matches("<img ").count(), 1);
        assert!(doc.as_str().contains("broken upload"));
        assert!(doc.as_str().contains("fine"));
    }

    #[test]
    fn test_edits_on_unknown_row_are_ignored() {
        let mut session = FormSession::new(["Zone A"]);
        assert!(!session.set_zone(99, "x".into()));
        assert!(!session.set_observation(99, "x".into()));
        assert_eq!(session.begin_selection(99), None);
    }
}
