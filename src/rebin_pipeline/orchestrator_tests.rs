// In: src/rebin_pipeline/orchestrator_tests.rs

//! Engine-level tests for the resampling orchestrator: coverage policies,
//! shape gating, batching, and the conservation property itself.

use std::cell::Cell;
use std::sync::{Arc, Once};

use ndarray::{array, Array1, Array2};

use crate::config::{BackendKind, CoveragePolicy, ResampleConfig};
use crate::error::FluxresError;
use crate::kernels::geometry::BinGrid;
use crate::rebin_pipeline::orchestrator::Resampler;

fn resampler(config: ResampleConfig) -> Resampler {
    Resampler::new(Arc::new(config))
}

/// Integral of a piecewise-constant spectrum over `[a, b]`.
fn integrate(grid: &BinGrid<f64>, flux: &[f64], a: f64, b: f64) -> f64 {
    let mut total = 0.0;
    for i in 0..grid.len() {
        let lo = a.max(grid.left_edge(i));
        let hi = b.min(grid.right_edge(i));
        if hi > lo {
            total += flux[i] * (hi - lo);
        }
    }
    total
}

#[test]
fn test_identity_resampling_returns_inputs_unchanged() {
    let wavs = [1.0, 2.5, 3.0, 4.7, 5.0];
    let flux = array![3.0, 1.0, 4.0, 1.0, 5.0];
    let errs = array![0.3, 0.1, 0.4, 0.1, 0.5];

    let out = Resampler::with_defaults()
        .resample(&wavs, &wavs, flux.view(), Some(errs.view()))
        .unwrap();

    assert_eq!(out.fluxes, flux);
    assert_eq!(out.errs.unwrap(), errs);
}

#[test]
fn test_uniform_flux_resamples_to_itself() {
    // spec_wavs [1..5] with unit flux, target [2,3,4]: every target bin
    // matches a source bin exactly.
    let out = Resampler::with_defaults()
        .resample(
            &[2.0, 3.0, 4.0],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            array![1.0, 1.0, 1.0, 1.0, 1.0].view(),
            None,
        )
        .unwrap();
    assert_eq!(out.fluxes, array![1.0, 1.0, 1.0]);
    assert!(out.errs.is_none());
}

#[test]
fn test_straddling_bins_split_the_flux() {
    // Source [1,2,3] with flux [0,10,0]; target [1.5, 2.5] straddles the
    // central bin and captures half of it on each side.
    let out = Resampler::with_defaults()
        .resample(
            &[1.5f64, 2.5],
            &[1.0, 2.0, 3.0],
            array![0.0, 10.0, 0.0].view(),
            None,
        )
        .unwrap();
    assert!((out.fluxes[0] - 5.0).abs() < 1e-12);
    assert!((out.fluxes[1] - 5.0).abs() < 1e-12);
}

#[test]
fn test_integrated_flux_is_conserved_per_target_bin() {
    let spec_wavs = [1.0, 1.7, 2.2, 3.0, 4.5, 5.0, 6.3];
    let new_wavs = [2.0, 2.6, 3.4, 4.9];
    let flux = array![2.0, 7.0, 3.5, 0.5, 4.0, 1.0, 6.0];

    let out = Resampler::with_defaults()
        .resample(&new_wavs, &spec_wavs, flux.view(), None)
        .unwrap();

    let source = BinGrid::from_centers(&spec_wavs).unwrap();
    let target = BinGrid::from_centers(&new_wavs).unwrap();
    for j in 0..target.len() {
        let expected =
            integrate(&source, flux.as_slice().unwrap(), target.left_edge(j), target.right_edge(j));
        let got = out.fluxes[j] * target.width(j);
        assert!(
            (got - expected).abs() < 1e-12,
            "bin {j}: integral {got} != {expected}"
        );
    }
}

#[test]
fn test_batched_spectra_share_one_plan_and_keep_leading_shape() {
    // Two spectra over the same grid; row 1 is 10x row 0, so the outputs
    // must scale the same way.
    let spec_wavs = [1.0, 2.0, 3.0, 4.0];
    let new_wavs = [1.5, 2.5, 3.5];
    let flux: Array2<f64> = array![[1.0, 2.0, 3.0, 4.0], [10.0, 20.0, 30.0, 40.0]];

    let out = Resampler::with_defaults()
        .resample(&new_wavs, &spec_wavs, flux.view(), None)
        .unwrap();

    assert_eq!(out.fluxes.shape(), &[2, 3]);
    for j in 0..3 {
        assert!((out.fluxes[[1, j]] - 10.0 * out.fluxes[[0, j]]).abs() < 1e-12);
    }
}

#[test]
fn test_fill_mode_pads_bins_beyond_coverage() {
    // Source covers [0.5, 5.5]; target bins [5.5,6.5] and [6.5,7.5] lie
    // fully outside and take the fill value.
    let config = ResampleConfig {
        fill_value: -1.0,
        ..ResampleConfig::default()
    };
    let out = resampler(config)
        .resample(
            &[4.0, 5.0, 6.0, 7.0],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            array![1.0, 1.0, 1.0, 1.0, 1.0].view(),
            None,
        )
        .unwrap();
    assert_eq!(out.fluxes[0], 1.0);
    assert_eq!(out.fluxes[1], 1.0);
    assert_eq!(out.fluxes[2], -1.0);
    assert_eq!(out.fluxes[3], -1.0);
}

#[test]
fn test_fill_applies_to_errs_as_well() {
    let config = ResampleConfig {
        fill_value: -1.0,
        ..ResampleConfig::default()
    };
    let out = resampler(config)
        .resample(
            &[4.0, 5.0, 6.0],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            array![1.0, 1.0, 1.0, 1.0, 1.0].view(),
            Some(array![0.1, 0.1, 0.1, 0.1, 0.1].view()),
        )
        .unwrap();
    let errs = out.errs.unwrap();
    assert_eq!(errs[2], -1.0);
}

#[test]
fn test_strict_mode_rejects_partial_coverage() {
    let config = ResampleConfig {
        coverage: CoveragePolicy::Strict,
        ..ResampleConfig::default()
    };
    let result = resampler(config).resample(
        &[4.0, 5.0, 6.0],
        &[1.0, 2.0, 3.0, 4.0, 5.0],
        array![1.0, 1.0, 1.0, 1.0, 1.0].view(),
        None,
    );
    assert!(matches!(result, Err(FluxresError::RangeMismatch(_))));
}

#[test]
fn test_disjoint_grids_always_fail() {
    let result = Resampler::with_defaults().resample(
        &[20.0, 21.0],
        &[1.0, 2.0, 3.0],
        array![1.0, 1.0, 1.0].view(),
        None,
    );
    assert!(matches!(result, Err(FluxresError::RangeMismatch(_))));
}

#[test]
fn test_errs_shape_mismatch_is_rejected() {
    // Flux (2, 3) with errs (3,): the caller flattened their uncertainties.
    let flux: Array2<f64> = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let errs: Array2<f64> = array![[0.1, 0.2, 0.3]];
    let result = Resampler::with_defaults().resample(
        &[1.5, 2.5],
        &[1.0, 2.0, 3.0],
        flux.view(),
        Some(errs.view()),
    );
    assert!(matches!(result, Err(FluxresError::ShapeMismatch(_))));
}

#[test]
fn test_flux_trailing_axis_must_match_source_grid() {
    let result = Resampler::with_defaults().resample(
        &[1.5, 2.5],
        &[1.0, 2.0, 3.0],
        array![1.0, 1.0].view(),
        None,
    );
    assert!(matches!(result, Err(FluxresError::ShapeMismatch(_))));
}

#[test]
fn test_propagated_errs_are_nonnegative() {
    let out = Resampler::with_defaults()
        .resample(
            &[1.3, 2.0, 2.9, 4.4],
            &[0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0],
            array![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0].view(),
            Some(array![0.3, 0.1, 0.4, 0.1, 0.5, 0.9, 0.2, 0.6, 0.5, 0.3].view()),
        )
        .unwrap();
    for &e in out.errs.unwrap().iter() {
        assert!(e >= 0.0);
    }
}

#[test]
fn test_vectorized_backend_matches_reference_end_to_end() {
    let spec_wavs: Vec<f64> = (0..50).map(|i| 1.0 + 0.1 * i as f64).collect();
    let new_wavs: Vec<f64> = (0..20).map(|i| 1.2 + 0.23 * i as f64).collect();
    let flux: Array1<f64> = Array1::from_iter((0..50).map(|i| ((i * 7) % 13) as f64));
    let errs: Array1<f64> = Array1::from_iter((0..50).map(|i| 0.1 + ((i * 3) % 5) as f64 * 0.01));

    let reference = Resampler::with_defaults()
        .resample(&new_wavs, &spec_wavs, flux.view(), Some(errs.view()))
        .unwrap();
    let config = ResampleConfig {
        backend: BackendKind::Vectorized,
        ..ResampleConfig::default()
    };
    let vectorized = resampler(config)
        .resample(&new_wavs, &spec_wavs, flux.view(), Some(errs.view()))
        .unwrap();

    assert_eq!(reference.fluxes, vectorized.fluxes);
    assert_eq!(reference.errs.unwrap(), vectorized.errs.unwrap());
}

// Counts `warn!` records per thread. The test harness gives every test its
// own thread and the orchestrator logs synchronously on the calling thread,
// so the counter only ever sees this test's own records.
thread_local! {
    static WARN_COUNT: Cell<usize> = const { Cell::new(0) };
}

struct WarnCounter;

impl log::Log for WarnCounter {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::Level::Warn
    }

    fn log(&self, record: &log::Record<'_>) {
        if record.level() == log::Level::Warn {
            WARN_COUNT.with(|c| c.set(c.get() + 1));
        }
    }

    fn flush(&self) {}
}

fn install_warn_counter() {
    static LOGGER: WarnCounter = WarnCounter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Warn);
    });
}

fn warn_count() -> usize {
    WARN_COUNT.with(|c| c.get())
}

#[test]
fn test_partial_coverage_warns_once_per_call_and_can_be_silenced() {
    install_warn_counter();

    // Source covers [0.5, 5.5]; two target bins stick out past the red end,
    // which must produce exactly one warning for the whole call.
    let spec_wavs = [1.0f64, 2.0, 3.0, 4.0, 5.0];
    let flux = array![1.0, 1.0, 1.0, 1.0, 1.0];

    let before = warn_count();
    Resampler::with_defaults()
        .resample(&[4.0, 5.0, 6.0, 7.0], &spec_wavs, flux.view(), None)
        .unwrap();
    assert_eq!(warn_count() - before, 1, "expected exactly one warning");

    let config = ResampleConfig {
        silence_warnings: true,
        ..ResampleConfig::default()
    };
    let before = warn_count();
    resampler(config)
        .resample(&[4.0, 5.0, 6.0, 7.0], &spec_wavs, flux.view(), None)
        .unwrap();
    assert_eq!(warn_count(), before, "silenced call must not warn");
}

#[test]
fn test_f32_spectra_resample() {
    let out = Resampler::with_defaults()
        .resample(
            &[1.5f32, 2.5],
            &[1.0f32, 2.0, 3.0],
            array![0.0f32, 10.0, 0.0].view(),
            None,
        )
        .unwrap();
    assert!((out.fluxes[0] - 5.0).abs() < 1e-6);
    assert!((out.fluxes[1] - 5.0).abs() < 1e-6);
}
