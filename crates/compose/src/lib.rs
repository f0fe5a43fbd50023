//! Compose - Building dashboards out of other dashboards
//!
//! Panels are selected from source dashboards, deep-copied, given fresh ids
//! and new grid positions, and appended to a single output dashboard. Source
//! dashboards are never modified. Each `compose_*`/`insert_*` function is a
//! pure in-memory transform; the `run_*` functions in [`pipeline`] add the
//! file I/O around them and write the result exactly once.

mod append;
mod demo;
mod error;
mod mega;
pub mod pipeline;
mod report;
mod selection;
mod sources;
mod status_codes;

pub use append::*;
pub use demo::*;
pub use error::*;
pub use mega::*;
pub use report::*;
pub use selection::*;
pub use sources::*;
pub use status_codes::*;
