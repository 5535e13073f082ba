// In: src/error.rs

//! This module defines the single, unified error type for the entire fluxres library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FluxresError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// A wavelength grid cannot define bin geometry (e.g. fewer than two centers).
    #[error("Wavelength grid error: {0}")]
    GridError(String),

    /// The target wavelength range has no usable overlap with the source range,
    /// or extends beyond it while strict coverage is requested.
    #[error("Range mismatch: {0}")]
    RangeMismatch(String),

    /// An input array's shape is inconsistent with the grids or with the flux array.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error from the Serde JSON library, typically during config deserialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
