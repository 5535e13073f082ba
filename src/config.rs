// In: src/config.rs

//! The single source of truth for all fluxres resampling configuration.
//!
//! This module defines the unified `ResampleConfig` struct, which is designed to
//! be created once at the application boundary (e.g., from a user's JSON file or
//! command-line flags) and then passed down through the system via a shared,
//! read-only `Arc<ResampleConfig>`.
//!
//! This approach centralizes all settings, eliminates "prop drilling," and keeps
//! the coverage policy, fill behavior, and backend selection in one place.

use serde::{Deserialize, Serialize};

use crate::error::FluxresError;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Defines how the resampler reacts when the target grid extends beyond the
/// wavelength coverage of the source grid.
///
/// A fully disjoint target range is always fatal, regardless of this policy.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// **Default:** target bins with no source overlap are written as
    /// `fill_value`, and a warning is logged once per call (unless silenced).
    #[default]
    Fill,

    /// Any partial out-of-range coverage is treated as fatal. Use this when a
    /// silently padded spectrum would corrupt downstream fits.
    Strict,
}

/// Selects the execution strategy for the rebinning engine.
///
/// Both backends implement the identical numerical contract and produce
/// identical output; they differ only in how the per-bin overlap weights are
/// evaluated across a batch of spectra.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// **Default:** straightforward per-bin evaluation. No per-call scratch
    /// memory; the right choice for single spectra or small grids.
    #[default]
    Reference,

    /// Precomputes every target bin's effective overlap weights once per call
    /// and reuses them across all batched spectra. Wins when the flux array
    /// carries many leading-dimension spectra over the same grids.
    Vectorized,
}

//==================================================================================
// II. The Unified ResampleConfig
//==================================================================================

/// The single, unified configuration for a resampling operation.
/// This struct is created once and shared throughout the system via an `Arc`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct ResampleConfig {
    /// Policy for target bins outside the source wavelength coverage.
    #[serde(default)]
    pub coverage: CoveragePolicy,

    /// Value written to target bins with no source overlap under
    /// `CoveragePolicy::Fill`. Ignored in strict mode.
    #[serde(default)]
    pub fill_value: f64,

    /// If true, the once-per-call partial-coverage warning is suppressed.
    /// Fatal conditions are never suppressed.
    #[serde(default)]
    pub silence_warnings: bool,

    /// The execution strategy for the rebinning engine.
    #[serde(default)]
    pub backend: BackendKind,
}

// Default implementation to make constructing the config easier.
impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            coverage: CoveragePolicy::default(),
            fill_value: 0.0,
            silence_warnings: false,
            backend: BackendKind::default(),
        }
    }
}

impl ResampleConfig {
    /// Deserializes a config from a JSON string, as received at the
    /// application boundary. Missing fields take their documented defaults.
    pub fn from_json(json: &str) -> Result<Self, FluxresError> {
        Ok(serde_json::from_str(json)?)
    }
}
