// In: src/kernels/mod.rs

//! The pure, stateless numerical kernels of the fluxres library.
//!
//! Each kernel owns exactly one concern of the rebinning algorithm:
//! - `geometry`: center wavelengths -> contiguous bin edges and widths.
//! - `coverage`: classification of target-vs-source wavelength coverage.
//! - `sweep`: the forward-only two-pointer overlap sweep.
//! - `aggregate`: overlap fractions, weighted flux means, and quadrature
//!   uncertainty combination.
//!
//! Kernels never allocate per-bin, never log, and never touch configuration;
//! policy lives in the `rebin_pipeline` engine above them.

pub mod aggregate;
pub mod coverage;
pub mod geometry;
pub mod sweep;

pub use geometry::BinGrid;
