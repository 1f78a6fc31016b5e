use chrono::{DateTime, Utc};
use review_logging::{review_debug, review_info, review_warn};

use crate::item::first_duplicate_id;
use crate::{
    Decision, Effect, ItemId, LoadError, Msg, Pending, ReviewItem, ReviewState, SaveError,
    SaveMode, SessionPhase, StatusLine, ValidationError, ZoomChange,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ReviewState, msg: Msg) -> (ReviewState, Vec<Effect>) {
    let effects = match msg {
        Msg::RaterLabelChanged(label) => {
            if state.phase == SessionPhase::NotStarted && state.pending.is_none() {
                state.rater_input = label;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StartClicked => start(&mut state),
        Msg::ItemsLoaded(result) => items_loaded(&mut state, result),
        Msg::DecisionMade { decision, at } => record_decision(&mut state, decision, at),
        Msg::SaveCompleted { item_id, result } => save_completed(&mut state, item_id, result),
        Msg::AdvanceClicked { at } => advance(&mut state, at),
        Msg::ExportClicked { at } => export_all(&mut state, at),
        Msg::ExportCompleted(result) => {
            if state.pending == Some(Pending::Export) {
                state.pending = None;
                state.status = match result {
                    Ok(path) => StatusLine::Exported(path),
                    Err(message) => StatusLine::Error(format!("Export failed: {message}")),
                };
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ZoomChanged(change) => zoom(&mut state, change),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start(state: &mut ReviewState) -> Vec<Effect> {
    if state.phase != SessionPhase::NotStarted || state.pending.is_some() {
        return Vec::new();
    }
    let label = state.rater_input.trim();
    if label.is_empty() {
        state.status = StatusLine::Error(ValidationError::MissingRaterLabel.to_string());
        state.mark_dirty();
        return Vec::new();
    }

    state.rater_label = label.to_string();
    state.pending = Some(Pending::Load);
    state.status = StatusLine::Loading;
    state.mark_dirty();
    review_info!("Session start requested by '{}'", state.rater_label);
    vec![Effect::LoadItems]
}

fn items_loaded(
    state: &mut ReviewState,
    result: Result<Vec<ReviewItem>, LoadError>,
) -> Vec<Effect> {
    if state.pending != Some(Pending::Load) {
        review_debug!("Ignoring item list that arrived without a pending load");
        return Vec::new();
    }
    state.pending = None;
    state.mark_dirty();

    match result.and_then(validate_items) {
        Ok(items) => {
            review_info!("Loaded {} items; session in progress", items.len());
            state.items = items;
            state.cursor = 0;
            state.ledger.clear();
            state.phase = SessionPhase::InProgress;
            state.status = StatusLine::Idle;
            show_current(state)
        }
        Err(err) => {
            review_warn!("Item load failed: {}", err);
            state.status = StatusLine::Error(err.to_string());
            Vec::new()
        }
    }
}

fn validate_items(items: Vec<ReviewItem>) -> Result<Vec<ReviewItem>, LoadError> {
    if items.is_empty() {
        return Err(LoadError::NoItems);
    }
    if let Some(id) = first_duplicate_id(&items) {
        return Err(LoadError::DuplicateIdentity(id.to_string()));
    }
    Ok(items)
}

fn record_decision(state: &mut ReviewState, decision: Decision, at: DateTime<Utc>) -> Vec<Effect> {
    if state.pending.is_some() {
        review_debug!("Decision ignored while a request is in flight");
        return Vec::new();
    }
    let Some(item) = state.current_item().cloned() else {
        return Vec::new();
    };

    state.ledger.upsert(item.id.clone(), decision, at);
    state.mark_dirty();

    match state.mode {
        SaveMode::Remote => {
            state.pending = Some(Pending::Save(item.id.clone()));
            state.status = StatusLine::Saving;
            vec![Effect::SaveDecision {
                rater_label: state.rater_label.clone(),
                item,
                decision,
                at,
            }]
        }
        SaveMode::Export => {
            state.status = StatusLine::Idle;
            Vec::new()
        }
    }
}

fn save_completed(
    state: &mut ReviewState,
    item_id: ItemId,
    result: Result<(), SaveError>,
) -> Vec<Effect> {
    if state.pending.as_ref() != Some(&Pending::Save(item_id.clone())) {
        review_debug!("Ignoring stale save completion for '{}'", item_id);
        return Vec::new();
    }
    state.pending = None;
    state.mark_dirty();

    match result {
        Ok(()) => advance_cursor(state),
        Err(err) => {
            review_warn!("Save failed for '{}': {}", item_id, err);
            state.status = StatusLine::Error(format!("{err}. Please try again."));
            Vec::new()
        }
    }
}

fn advance(state: &mut ReviewState, at: DateTime<Utc>) -> Vec<Effect> {
    if state.mode != SaveMode::Export || state.pending.is_some() {
        return Vec::new();
    }
    let Some(item_id) = state.current_item().map(|item| item.id.clone()) else {
        return Vec::new();
    };

    if !state.ledger.contains(&item_id) {
        state.ledger.upsert(item_id, Decision::Accept, at);
    }
    state.mark_dirty();
    advance_cursor(state)
}

fn advance_cursor(state: &mut ReviewState) -> Vec<Effect> {
    state.cursor = (state.cursor + 1).min(state.items.len());
    if state.cursor == state.items.len() {
        state.phase = SessionPhase::Complete;
        state.status = StatusLine::Complete;
        review_info!("Review complete after {} items", state.items.len());
        Vec::new()
    } else {
        state.status = StatusLine::Idle;
        show_current(state)
    }
}

fn export_all(state: &mut ReviewState, at: DateTime<Utc>) -> Vec<Effect> {
    if state.mode != SaveMode::Export
        || state.phase == SessionPhase::NotStarted
        || state.pending.is_some()
    {
        return Vec::new();
    }
    state.mark_dirty();

    let validation = if state.rater_label.trim().is_empty() {
        Some(ValidationError::MissingRaterLabel)
    } else if state.ledger.is_empty() {
        Some(ValidationError::NothingToExport)
    } else {
        None
    };
    if let Some(err) = validation {
        state.status = StatusLine::Error(err.to_string());
        return Vec::new();
    }

    state.pending = Some(Pending::Export);
    state.status = StatusLine::Exporting;
    vec![Effect::ExportDecisions {
        rater_label: state.rater_label.clone(),
        records: state.ledger.all_in_order(&state.items, at),
        at,
    }]
}

fn zoom(state: &mut ReviewState, change: ZoomChange) -> Vec<Effect> {
    if !state.zoom.apply(change) {
        return Vec::new();
    }
    state.mark_dirty();
    show_current(state)
}

fn show_current(state: &ReviewState) -> Vec<Effect> {
    state
        .current_item()
        .map(|item| Effect::ShowItem {
            display_ref: item.display_ref.clone(),
            zoom: state.zoom.factor(),
        })
        .into_iter()
        .collect()
}
