// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the sole public-facing API of the fluxres library. It provides a
// stable, user-friendly interface that completely encapsulates the pure rebinning
// engine. It is the authoritative boundary between the outside world (caller
// arrays and configuration) and the internal resampling logic.
//
// Data Flow:
//
//   1. [Stateless API (resample / resample_with_errs)]  -> Receives grids + flux views
//         |
//         `-> constructs a default-config `Resampler` and delegates
//
//   2. [Configurable Facade (Resampler)]                -> Receives Arc<ResampleConfig>
//         |
//         `-> a. Validates shapes against the grids
//         |
//         `-> b. Calls the pure engine (rebin_pipeline): plan -> backend -> lanes
//
//   3. [Rebinning Engine (rebin_pipeline)]              -> Returns `ResampledSpectra`
//
// Anything below the bridge is free to change; the signatures re-exported here
// are the compatibility contract.
// ====================================================================================

pub mod stateless_api;

// --- High-Level Configurable API ---
pub use crate::rebin_pipeline::orchestrator::{ResampledSpectra, Resampler};

// --- Low-Level Stateless API ---
pub use stateless_api::{enable_verbose_logging, resample, resample_with_errs};
