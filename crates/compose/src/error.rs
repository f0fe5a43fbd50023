//! Error types for composition

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Layout error: {0}")]
    Layout(#[from] layout_engine::LayoutError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Plan references unknown source {0:?}")]
    UnknownSource(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),
}

pub type Result<T> = std::result::Result<T, ComposeError>;
