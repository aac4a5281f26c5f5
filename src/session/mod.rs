//! Interaction sessions driven by pointer events.

mod delete;
mod drawing;
mod edit;

pub use delete::{Confirm, confirm_and_remove};
pub use drawing::{DrawingMode, DrawingSession, DrawingState, Preview};
pub use edit::{EditOutcome, EditSession, EditState};
