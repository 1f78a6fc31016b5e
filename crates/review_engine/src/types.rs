use review_core::{ItemId, LoadError, ReviewItem, SaveError};

use crate::export::ExportSummary;

/// Completion reports from the engine worker, one per command.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ItemsLoaded(Result<Vec<ReviewItem>, LoadError>),
    SaveCompleted {
        item_id: ItemId,
        result: Result<(), SaveError>,
    },
    ExportCompleted(Result<ExportSummary, String>),
}
