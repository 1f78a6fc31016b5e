use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use review_core::{Decision, DecisionRecord, Metadata, ReviewItem, SaveError};
use review_logging::{review_debug, review_info, review_warn};
use serde::{Deserialize, Serialize};

use crate::csv_text::format_timestamp;
use crate::export::{export_decisions, ExportError, ExportSummary};

/// Destination for finalized decisions.
#[async_trait::async_trait]
pub trait ResultSink: Send + Sync {
    async fn save(
        &self,
        rater_label: &str,
        item: &ReviewItem,
        decision: Decision,
        at: DateTime<Utc>,
    ) -> Result<(), SaveError>;

    /// Bulk output of the whole ledger. Only deferred sinks support it.
    async fn export(
        &self,
        _rater_label: &str,
        _records: &[DecisionRecord],
        _at: DateTime<Utc>,
    ) -> Result<ExportSummary, ExportError> {
        Err(ExportError::Unsupported)
    }
}

/// Payload keys that metadata columns may not shadow.
const RESERVED_KEYS: [&str; 5] = ["timestamp", "username", "image", "filename", "decision"];

/// JSON body posted for every decision.
#[derive(Debug, Serialize)]
pub struct SavePayload<'a> {
    pub timestamp: String,
    pub username: &'a str,
    pub image: &'a str,
    pub filename: &'a str,
    pub decision: &'static str,
    #[serde(flatten)]
    pub metadata: BTreeMap<&'a str, Option<f64>>,
}

impl<'a> SavePayload<'a> {
    pub fn new(
        rater_label: &'a str,
        item: &'a ReviewItem,
        decision: Decision,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: format_timestamp(at),
            username: rater_label,
            image: &item.display_ref,
            filename: item.id.as_str(),
            decision: decision.wire_label(),
            metadata: payload_metadata(&item.metadata),
        }
    }
}

/// Metadata columns to send, minus any whose name collides with a payload key.
fn payload_metadata(metadata: &Metadata) -> BTreeMap<&str, Option<f64>> {
    metadata
        .iter()
        .filter_map(|(name, value)| {
            if RESERVED_KEYS.contains(&name.as_str()) {
                review_warn!("Metadata column '{}' clashes with a payload field; not sent", name);
                None
            } else {
                Some((name.as_str(), *value))
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SaveAck {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Posts each decision to a remote endpoint and waits for `{"ok": true}`.
/// One client is shared by all saves so connections are pooled.
#[derive(Debug, Clone)]
pub struct RemoteSink {
    endpoint: String,
    // No request timeout: a save either resolves or the rater retries by hand.
    client: reqwest::Client,
}

impl RemoteSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl ResultSink for RemoteSink {
    async fn save(
        &self,
        rater_label: &str,
        item: &ReviewItem,
        decision: Decision,
        at: DateTime<Utc>,
    ) -> Result<(), SaveError> {
        let body = serde_json::to_vec(&SavePayload::new(rater_label, item, decision, at))
            .map_err(|err| SaveError::Transport(format!("Save failed: {err}")))?;

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| SaveError::Transport(format!("Save failed: {err}")))?;

        let status = response.status();
        let ack = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<SaveAck>(&bytes).ok(),
            Err(_) => None,
        };

        match ack {
            Some(SaveAck { ok: true, .. }) if status.is_success() => {
                review_debug!("Saved '{}' as {}", item.id, decision.wire_label());
                Ok(())
            }
            ack => Err(SaveError::Rejected(
                ack.and_then(|ack| ack.error)
                    .unwrap_or_else(|| format!("Save failed (HTTP {})", status.as_u16())),
            )),
        }
    }
}

/// Keeps decisions local; the ledger is written out only on export.
#[derive(Debug, Clone)]
pub struct DeferredSink {
    output_dir: PathBuf,
}

impl DeferredSink {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

#[async_trait::async_trait]
impl ResultSink for DeferredSink {
    async fn save(
        &self,
        _rater_label: &str,
        item: &ReviewItem,
        _decision: Decision,
        _at: DateTime<Utc>,
    ) -> Result<(), SaveError> {
        review_debug!("Deferred sink holds '{}' until export", item.id);
        Ok(())
    }

    async fn export(
        &self,
        rater_label: &str,
        records: &[DecisionRecord],
        at: DateTime<Utc>,
    ) -> Result<ExportSummary, ExportError> {
        review_info!("Exporting {} records for '{}'", records.len(), rater_label);
        let dir = self.output_dir.clone();
        let rater_label = rater_label.to_string();
        let records = records.to_vec();
        tokio::task::spawn_blocking(move || export_decisions(&dir, &rater_label, &records, at))
            .await
            .map_err(|err| ExportError::Worker(err.to_string()))?
    }
}
