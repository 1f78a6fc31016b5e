use crate::view_model::{CurrentItemView, ReviewViewModel};
use crate::{DecisionLedger, ItemId, ReviewItem};

/// How finalized decisions leave the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Every decision is saved remotely before the cursor may advance.
    #[default]
    Remote,
    /// Decisions stay local until the rater exports them as CSV.
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

/// The one outstanding request a session may have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Load,
    Save(ItemId),
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusLine {
    #[default]
    Idle,
    Loading,
    Saving,
    Exporting,
    Error(String),
    Complete,
    Exported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomChange {
    In,
    Out,
    Reset,
}

/// Display scale in quarter steps, 0.25x to 4.0x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zoom(u8);

impl Zoom {
    const MIN_QUARTERS: u8 = 1;
    const MAX_QUARTERS: u8 = 16;
    const DEFAULT_QUARTERS: u8 = 4;

    pub fn factor(self) -> f32 {
        f32::from(self.0) / 4.0
    }

    /// Returns true when the scale actually changed.
    pub(crate) fn apply(&mut self, change: ZoomChange) -> bool {
        let next = match change {
            ZoomChange::In => (self.0 + 1).min(Self::MAX_QUARTERS),
            ZoomChange::Out => self.0.saturating_sub(1).max(Self::MIN_QUARTERS),
            ZoomChange::Reset => Self::DEFAULT_QUARTERS,
        };
        let changed = next != self.0;
        self.0 = next;
        changed
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(Self::DEFAULT_QUARTERS)
    }
}

/// Everything one review session knows. Owned by a single driver and
/// advanced only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewState {
    pub(crate) mode: SaveMode,
    pub(crate) phase: SessionPhase,
    pub(crate) rater_input: String,
    pub(crate) rater_label: String,
    pub(crate) items: Vec<ReviewItem>,
    pub(crate) cursor: usize,
    pub(crate) ledger: DecisionLedger,
    pub(crate) pending: Option<Pending>,
    pub(crate) status: StatusLine,
    pub(crate) zoom: Zoom,
    dirty: bool,
}

impl ReviewState {
    pub fn new(mode: SaveMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SaveMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    pub fn ledger(&self) -> &DecisionLedger {
        &self.ledger
    }

    pub fn rater_label(&self) -> &str {
        &self.rater_label
    }

    pub fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    pub fn current_item(&self) -> Option<&ReviewItem> {
        match self.phase {
            SessionPhase::InProgress => self.items.get(self.cursor),
            SessionPhase::NotStarted | SessionPhase::Complete => None,
        }
    }

    pub fn view(&self) -> ReviewViewModel {
        let current = self.current_item().map(|item| CurrentItemView {
            id: item.id.clone(),
            display_ref: item.display_ref.clone(),
            decision: self.ledger.get(&item.id).map(|record| record.decision),
        });
        let idle_in_progress = self.phase == SessionPhase::InProgress && self.pending.is_none();
        let can_export = self.mode == SaveMode::Export
            && self.phase != SessionPhase::NotStarted
            && self.pending.is_none()
            && !self.ledger.is_empty();

        ReviewViewModel {
            mode: self.mode,
            phase: self.phase,
            rater_label: if self.rater_label.is_empty() {
                self.rater_input.trim().to_string()
            } else {
                self.rater_label.clone()
            },
            position: self.cursor,
            total: self.items.len(),
            current,
            decided: self.ledger.len(),
            status: self.status.clone(),
            busy: self.pending.is_some(),
            can_start: self.phase == SessionPhase::NotStarted && self.pending.is_none(),
            can_decide: idle_in_progress,
            can_advance: idle_in_progress && self.mode == SaveMode::Export,
            can_export,
            zoom: self.zoom.factor(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
