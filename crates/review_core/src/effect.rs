use chrono::{DateTime, Utc};

use crate::{Decision, DecisionRecord, ReviewItem};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadItems,
    ShowItem {
        display_ref: String,
        zoom: f32,
    },
    SaveDecision {
        rater_label: String,
        item: ReviewItem,
        decision: Decision,
        at: DateTime<Utc>,
    },
    ExportDecisions {
        rater_label: String,
        records: Vec<DecisionRecord>,
        at: DateTime<Utc>,
    },
}
