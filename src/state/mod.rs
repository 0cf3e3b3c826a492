/// State management module
///
/// This module holds the live form state:
/// - Ordered report rows with stable ids (session.rs)
/// - Per-row thumbnail slots guarded by selection sequence numbers (session.rs)

pub mod session;

pub use session::{FormRow, FormSession, RowId, SelectionOutcome};
