//! Common types and utilities shared across the crate.

// Submodule declarations
pub mod bom;
pub mod error;

// Re-exports for convenience
pub use bom::{BomKind, detect_bom};
pub use error::{Error, Result};
