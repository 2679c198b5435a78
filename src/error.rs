// src/error.rs
use crate::modal::ModalPhase;

/// Failures loading the data bundled into the binary.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("failed to parse project catalog: {0}")]
    Catalog(#[source] serde_json::Error),

    #[error("failed to parse site content: {0}")]
    Content(#[source] serde_json::Error),

    #[error("failed to parse motion config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("project '{0}' is defined more than once")]
    DuplicateProject(String),

    #[error("listing references unknown project '{0}'")]
    UnknownListing(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} a modal that is {from:?}")]
pub struct TransitionError {
    pub from: ModalPhase,
    pub action: &'static str,
}
