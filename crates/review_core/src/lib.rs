//! Review core: pure session state machine, decision ledger and view-model helpers.
mod effect;
mod error;
mod item;
mod ledger;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{LoadError, SaveError, ValidationError};
pub use item::{first_duplicate_id, Decision, ItemId, Metadata, ParseDecisionError, ReviewItem};
pub use ledger::{DecisionLedger, DecisionRecord};
pub use msg::Msg;
pub use state::{Pending, ReviewState, SaveMode, SessionPhase, StatusLine, Zoom, ZoomChange};
pub use update::update;
pub use view_model::{CurrentItemView, ReviewViewModel};
