use std::sync::{mpsc, Arc};

use review_core::{Effect, Msg};
use review_engine::{EngineConfig, EngineError, EngineEvent, EngineHandle, EventSink};
use review_logging::{review_info, review_warn};

use super::display::ItemDisplay;
use super::input::AppEvent;

/// Executes core effects: engine work goes to the background worker,
/// `ShowItem` goes straight to the display.
pub struct EffectRunner {
    engine: EngineHandle,
    display: Box<dyn ItemDisplay>,
}

impl EffectRunner {
    pub fn new(
        config: &EngineConfig,
        display: Box<dyn ItemDisplay>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(config, Arc::new(MsgForwarder { tx: event_tx }))?;
        Ok(Self { engine, display })
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadItems => {
                    review_info!("Loading items");
                    self.engine.load_items();
                }
                Effect::ShowItem { display_ref, zoom } => {
                    self.display.show(&display_ref, zoom);
                }
                Effect::SaveDecision {
                    rater_label,
                    item,
                    decision,
                    at,
                } => {
                    review_info!("Saving {} for {}", decision, item.id);
                    self.engine.save_decision(rater_label, item, decision, at);
                }
                Effect::ExportDecisions {
                    rater_label,
                    records,
                    at,
                } => {
                    review_info!("Exporting {} decisions", records.len());
                    self.engine.export(rater_label, records, at);
                }
            }
        }
    }
}

/// Feeds engine completions back into the app loop as messages.
struct MsgForwarder {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgForwarder {
    fn emit(&self, event: EngineEvent) {
        if self.tx.send(AppEvent::Msg(to_msg(event))).is_err() {
            review_warn!("App loop is gone; engine event dropped");
        }
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ItemsLoaded(result) => Msg::ItemsLoaded(result),
        EngineEvent::SaveCompleted { item_id, result } => {
            if let Err(err) = &result {
                review_warn!("Save for {} failed: {}", item_id, err);
            }
            Msg::SaveCompleted { item_id, result }
        }
        EngineEvent::ExportCompleted(result) => Msg::ExportCompleted(
            result.map(|summary| summary.output_path.display().to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use review_core::{ItemId, SaveError};
    use review_engine::ExportSummary;

    use super::*;

    #[test]
    fn export_summary_becomes_path_message() {
        let msg = to_msg(EngineEvent::ExportCompleted(Ok(ExportSummary {
            row_count: 2,
            output_path: PathBuf::from("output/image_review_alice.csv"),
        })));
        assert_eq!(
            msg,
            Msg::ExportCompleted(Ok("output/image_review_alice.csv".to_string()))
        );
    }

    #[test]
    fn save_failures_pass_through() {
        let msg = to_msg(EngineEvent::SaveCompleted {
            item_id: ItemId::new("a.png"),
            result: Err(SaveError::Rejected("quota".to_string())),
        });
        assert_eq!(
            msg,
            Msg::SaveCompleted {
                item_id: ItemId::new("a.png"),
                result: Err(SaveError::Rejected("quota".to_string())),
            }
        );
    }
}
