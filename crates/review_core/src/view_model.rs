use crate::{Decision, ItemId, SaveMode, SessionPhase, StatusLine};

/// Render-ready snapshot of a session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewViewModel {
    pub mode: SaveMode,
    pub phase: SessionPhase,
    pub rater_label: String,
    /// Zero-based cursor; equals `total` once the session is complete.
    pub position: usize,
    pub total: usize,
    pub current: Option<CurrentItemView>,
    pub decided: usize,
    pub status: StatusLine,
    pub busy: bool,
    pub can_start: bool,
    pub can_decide: bool,
    pub can_advance: bool,
    pub can_export: bool,
    pub zoom: f32,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentItemView {
    pub id: ItemId,
    pub display_ref: String,
    pub decision: Option<Decision>,
}
