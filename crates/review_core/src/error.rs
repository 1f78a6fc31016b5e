use thiserror::Error;

/// The rater must correct something before the action can proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your name first")]
    MissingRaterLabel,
    #[error("No decisions to export yet")]
    NothingToExport,
}

/// The item list could not be obtained, parsed or accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("could not fetch item list: {0}")]
    Fetch(String),
    #[error("could not parse item list: {0}")]
    Parse(String),
    #[error("item list has no '{0}' column")]
    MissingColumn(String),
    #[error("item '{0}' appears more than once")]
    DuplicateIdentity(String),
    #[error("item list is empty")]
    NoItems,
    #[error("item loading stopped unexpectedly: {0}")]
    Interrupted(String),
}

/// A decision could not be persisted. Always retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Rejected(String),
}
