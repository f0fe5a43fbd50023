//! Error types for layout engine

use dash_model::{PanelId, MAX_PANEL_ID};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid slot configuration for category {category:?}: {reason}")]
    InvalidSlot { category: String, reason: String },

    #[error(
        "Slot overflow in category {category:?}: tile {index} at x={x} with width {width} exceeds the grid width"
    )]
    SlotOverflow {
        category: String,
        index: usize,
        x: u32,
        width: u32,
    },

    #[error("No slot configuration for category {0:?}")]
    UnknownCategory(String),

    #[error("Panel {id} ({title:?}) is {width} units wide, wider than the grid")]
    PanelTooWide {
        id: PanelId,
        title: String,
        width: u32,
    },

    #[error("No panel ids left: next id {next} exceeds {MAX_PANEL_ID}")]
    IdsExhausted { next: PanelId },

    #[error("Invalid packer configuration: {0}")]
    InvalidPacker(String),

    #[error("Panel {id} ({title:?}) has an empty size {width}x{height}")]
    EmptyPanel {
        id: PanelId,
        title: String,
        width: u32,
        height: u32,
    },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
