use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Stable identity of a reviewable item within one session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric attributes attached to an item. `None` marks a value that was
/// missing or could not be read as a number.
pub type Metadata = BTreeMap<String, Option<f64>>;

/// One unit of review: an image reference plus optional numeric metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub id: ItemId,
    pub display_ref: String,
    pub metadata: Metadata,
}

impl ReviewItem {
    pub fn new(id: impl Into<String>, display_ref: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            display_ref: display_ref.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Returns the first identity that occurs more than once, if any.
pub fn first_duplicate_id(items: &[ReviewItem]) -> Option<&ItemId> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().map(|item| &item.id).find(|id| !seen.insert(*id))
}

/// Binary verdict recorded by the rater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Decision {
    #[default]
    Accept,
    Deny,
}

impl Decision {
    /// Label sent to the remote decision endpoint.
    pub fn wire_label(self) -> &'static str {
        match self {
            Decision::Accept => "accept",
            Decision::Deny => "reposition",
        }
    }

    /// Label written to the exported CSV file.
    pub fn export_label(self) -> &'static str {
        match self {
            Decision::Accept => "accept",
            Decision::Deny => "deny",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.export_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown decision '{0}'")]
pub struct ParseDecisionError(String);

impl FromStr for Decision {
    type Err = ParseDecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" | "a" => Ok(Decision::Accept),
            "deny" | "d" | "reposition" | "r" => Ok(Decision::Deny),
            other => Err(ParseDecisionError(other.to_string())),
        }
    }
}
