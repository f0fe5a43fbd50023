//! Dashboard Model - Panels, grid positions, and dashboard documents
//!
//! This crate wraps the dashboard JSON schema in typed values. Only the
//! fields the layout tooling reads (`id`, `gridPos`, `type`, `title`,
//! `panels`) are typed; everything else is carried as opaque JSON and
//! written back unchanged, in source key order.

mod dashboard;
mod error;
mod grid;
mod panel;

pub use dashboard::*;
pub use error::*;
pub use grid::*;
pub use panel::*;
