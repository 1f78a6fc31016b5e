#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use review_core::{update, Effect, Msg, ReviewItem, ReviewState, SaveMode};

pub fn init_logging() {
    review_logging::initialize_for_tests();
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_767_225_600 + secs, 0).unwrap()
}

pub fn items(ids: &[&str]) -> Vec<ReviewItem> {
    ids.iter()
        .map(|id| ReviewItem::new(*id, format!("images/{id}")))
        .collect()
}

/// Enters a label, clicks start and delivers `loaded` as the item list.
pub fn started(mode: SaveMode, label: &str, loaded: Vec<ReviewItem>) -> (ReviewState, Vec<Effect>) {
    let (state, _) = update(ReviewState::new(mode), Msg::RaterLabelChanged(label.to_string()));
    let (state, effects) = update(state, Msg::StartClicked);
    assert_eq!(effects, vec![Effect::LoadItems]);
    update(state, Msg::ItemsLoaded(Ok(loaded)))
}
