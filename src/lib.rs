//! This file is the root of the `fluxres` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`bridge`, `kernels`,
//!     `rebin_pipeline`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the small public surface: the `resample` entry points, the
//!     configurable `Resampler`, and the shared config/error types.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;

mod rebin_pipeline;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use bridge::{
    enable_verbose_logging, resample, resample_with_errs, ResampledSpectra, Resampler,
};
pub use config::{BackendKind, CoveragePolicy, ResampleConfig};
pub use error::FluxresError;
