//! Error types for dashboard model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Dashboard is not a JSON object")]
    NotAnObject,

    #[error("Dashboard has no `panels` array")]
    MissingPanels,

    #[error("Malformed panel at index {index} ({title:?}): {reason}")]
    MalformedPanel {
        index: usize,
        title: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
