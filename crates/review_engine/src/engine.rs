use std::sync::{mpsc, Arc};
use std::thread;

use chrono::{DateTime, Utc};
use review_core::{Decision, DecisionRecord, ItemId, LoadError, ReviewItem, SaveError};
use review_logging::{review_debug, review_error, review_warn};

use crate::config::{EngineConfig, EngineError};
use crate::sink::ResultSink;
use crate::source::ItemSource;
use crate::EngineEvent;

/// Receives engine completions. Implementations must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    LoadItems,
    SaveDecision {
        rater_label: String,
        item: ReviewItem,
        decision: Decision,
        at: DateTime<Utc>,
    },
    Export {
        rater_label: String,
        records: Vec<DecisionRecord>,
        at: DateTime<Utc>,
    },
}

/// What to report when a command's task dies before producing an event, so
/// the session never waits on a completion that will not come.
enum FailedCommand {
    Load,
    Save(ItemId),
    Export,
}

impl FailedCommand {
    fn of(command: &EngineCommand) -> Self {
        match command {
            EngineCommand::LoadItems => FailedCommand::Load,
            EngineCommand::SaveDecision { item, .. } => FailedCommand::Save(item.id.clone()),
            EngineCommand::Export { .. } => FailedCommand::Export,
        }
    }

    fn into_event(self, message: String) -> EngineEvent {
        match self {
            FailedCommand::Load => {
                EngineEvent::ItemsLoaded(Err(LoadError::Interrupted(message)))
            }
            FailedCommand::Save(item_id) => EngineEvent::SaveCompleted {
                item_id,
                result: Err(SaveError::Transport(format!("Save failed: {message}"))),
            },
            FailedCommand::Export => {
                EngineEvent::ExportCompleted(Err(format!("export task failed: {message}")))
            }
        }
    }
}

/// Front end of the background worker that runs item loads, saves and
/// exports on a tokio runtime. Dropping the handle stops the worker.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: &EngineConfig, events: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let sink = config.build_sink()?;
        Self::with_parts(config.build_source(), sink, events)
    }

    pub fn with_parts(
        source: Arc<dyn ItemSource>,
        sink: Arc<dyn ResultSink>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let sink = sink.clone();
                let events = events.clone();
                let failure = FailedCommand::of(&command);
                let task = runtime.spawn(async move {
                    handle_command(source.as_ref(), sink.as_ref(), command).await
                });
                runtime.spawn(async move {
                    let event = match task.await {
                        Ok(event) => event,
                        Err(err) => {
                            review_error!("Engine task failed: {}", err);
                            failure.into_event(err.to_string())
                        }
                    };
                    events.emit(event);
                });
            }
            review_debug!("Engine command channel closed; worker exiting");
        });

        Ok(Self { cmd_tx })
    }

    pub fn load_items(&self) {
        self.send(EngineCommand::LoadItems);
    }

    pub fn save_decision(
        &self,
        rater_label: impl Into<String>,
        item: ReviewItem,
        decision: Decision,
        at: DateTime<Utc>,
    ) {
        self.send(EngineCommand::SaveDecision {
            rater_label: rater_label.into(),
            item,
            decision,
            at,
        });
    }

    pub fn export(
        &self,
        rater_label: impl Into<String>,
        records: Vec<DecisionRecord>,
        at: DateTime<Utc>,
    ) {
        self.send(EngineCommand::Export {
            rater_label: rater_label.into(),
            records,
            at,
        });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            review_warn!("Engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    source: &dyn ItemSource,
    sink: &dyn ResultSink,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::LoadItems => EngineEvent::ItemsLoaded(source.load().await),
        EngineCommand::SaveDecision {
            rater_label,
            item,
            decision,
            at,
        } => {
            let result = sink.save(&rater_label, &item, decision, at).await;
            EngineEvent::SaveCompleted {
                item_id: item.id,
                result,
            }
        }
        EngineCommand::Export {
            rater_label,
            records,
            at,
        } => EngineEvent::ExportCompleted(
            sink.export(&rater_label, &records, at)
                .await
                .map_err(|err| err.to_string()),
        ),
    }
}
