use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{Decision, ItemId, ReviewItem};

/// Latest decision recorded for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRecord {
    pub item_id: ItemId,
    pub decision: Decision,
    pub recorded_at: DateTime<Utc>,
}

/// Per-session mapping of item identity to its latest decision.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecisionLedger {
    records: HashMap<ItemId, DecisionRecord>,
}

impl DecisionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the record for `item_id`.
    pub fn upsert(&mut self, item_id: ItemId, decision: Decision, at: DateTime<Utc>) {
        self.records.insert(
            item_id.clone(),
            DecisionRecord {
                item_id,
                decision,
                recorded_at: at,
            },
        );
    }

    pub fn get(&self, item_id: &ItemId) -> Option<&DecisionRecord> {
        self.records.get(item_id)
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.records.contains_key(item_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One record per item in `items` order. Items never decided get an
    /// `Accept` record stamped with `default_at`.
    pub fn all_in_order(
        &self,
        items: &[ReviewItem],
        default_at: DateTime<Utc>,
    ) -> Vec<DecisionRecord> {
        items
            .iter()
            .map(|item| {
                self.records
                    .get(&item.id)
                    .cloned()
                    .unwrap_or_else(|| DecisionRecord {
                        item_id: item.id.clone(),
                        decision: Decision::default(),
                        recorded_at: default_at,
                    })
            })
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}
