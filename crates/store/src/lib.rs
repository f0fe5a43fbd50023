//! Store - Dashboard persistence and plan files
//!
//! This crate reads dashboard documents, serializes them the way
//! dashboards are conventionally written (4-space indentation), replaces
//! output files atomically, and loads JSON plan files.

mod error;
mod file_io;
mod plan;
mod serializer;

pub use error::*;
pub use file_io::*;
pub use plan::*;
pub use serializer::*;
