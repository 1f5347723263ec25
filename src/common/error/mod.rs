//! Unified error types for beach-kml.
//!
//! This module provides a single error type covering input decoding,
//! markup parsing and report rendering.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
