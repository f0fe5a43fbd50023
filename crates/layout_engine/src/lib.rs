//! Layout Engine - Panel placement on the dashboard grid
//!
//! This crate assigns grid positions and identifiers to panels that are
//! being composed into a dashboard. Two strategies are provided:
//!
//! - fixed-slot placement, where each panel category has a static tile size
//!   and tiles fill rows left to right ([`SlotConfig`], [`CategoryLayout`])
//! - flowing placement, where panels keep their own size and are packed row
//!   by row in arrival order ([`FlowPacker`])
//!
//! All accumulation state (cursor, next identifier) lives in explicit values
//! that callers thread through, so every placement is a pure computation.

mod error;
mod geometry;
mod ids;
mod packer;
mod slots;

pub use error::*;
pub use geometry::*;
pub use ids::*;
pub use packer::*;
pub use slots::*;

pub use dash_model::{GRID_WIDTH, HEADER_HEIGHT};
