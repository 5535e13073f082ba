// In: src/rebin_pipeline/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Rebinning Engine
// ====================================================================================
//
// The `rebin_pipeline` is the pure engine behind the public `bridge` API. It is
// organized plan-then-execute:
//
//   1. [Planner (plan::ResamplePlan::build)]
//         |-> builds bin geometry for both grids   (kernels::geometry)
//         |-> gates on wavelength coverage         (kernels::coverage)
//         |-> sweeps overlap runs per target bin   (kernels::sweep)
//         `-> emits one declarative `BinTask` per target bin:
//             Fill (no coverage) / Copy (single source bin) / Blend (weighted run)
//
//   2. [Backend (traits::RebinBackend)]
//         |-> ReferenceBackend:  evaluates each task directly, no scratch
//         `-> VectorizedBackend: precomputes blend weights into an arena,
//                                reuses them across every batched spectrum
//
//   3. [Orchestrator (orchestrator::Resampler)]
//         |-> validates array shapes against the grids
//         |-> applies the coverage policy (strict vs. fill) and warns once
//         `-> drives the chosen backend over each trailing-axis lane
//
// The plan depends only on wavelength geometry, never on flux values, so a
// single plan serves every spectrum in a batch and every backend.
// ====================================================================================

pub(crate) mod plan;
pub(crate) mod reference;
pub(crate) mod traits;
pub(crate) mod vectorized;

pub mod orchestrator;

#[cfg(test)]
mod orchestrator_tests;
