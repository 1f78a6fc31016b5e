use chrono::{DateTime, Utc};

use crate::{Decision, ItemId, LoadError, ReviewItem, SaveError, ZoomChange};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Rater edited the name / session label field.
    RaterLabelChanged(String),
    /// Rater asked to begin the session.
    StartClicked,
    /// Item source finished loading.
    ItemsLoaded(Result<Vec<ReviewItem>, LoadError>),
    /// Rater chose a verdict for the current item.
    DecisionMade {
        decision: Decision,
        at: DateTime<Utc>,
    },
    /// Remote save for `item_id` resolved.
    SaveCompleted {
        item_id: ItemId,
        result: Result<(), SaveError>,
    },
    /// Rater moved on to the next item (export mode).
    AdvanceClicked { at: DateTime<Utc> },
    /// Rater asked for the CSV export (export mode).
    ExportClicked { at: DateTime<Utc> },
    /// Export writer finished; `Ok` carries the written path.
    ExportCompleted(Result<String, String>),
    ZoomChanged(ZoomChange),
    /// Fallback for placeholder wiring.
    NoOp,
}
