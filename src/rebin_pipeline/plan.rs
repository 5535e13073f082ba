// In: src/rebin_pipeline/plan.rs

//! The resampling planner: grids in, declarative per-bin work orders out.
//!
//! Planning is separated from execution so that the (purely geometric) overlap
//! analysis happens exactly once per call, regardless of how many spectra are
//! batched through it or which backend executes it.

use std::fmt::Debug;

use num_traits::Float;

use crate::config::CoveragePolicy;
use crate::error::FluxresError;
use crate::kernels::aggregate::{boundary_factors, BoundaryFactors};
use crate::kernels::coverage::{self, Coverage};
use crate::kernels::geometry::BinGrid;
use crate::kernels::sweep::{OverlapRun, OverlapSweeper};

/// The work order for one target bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BinTask<F> {
    /// No source coverage: write the configured fill value.
    Fill,
    /// The target bin lies entirely inside source bin `src`: direct copy,
    /// no averaging (uncertainties pass through unchanged).
    Copy { src: usize },
    /// The target bin spans several source bins: width-weighted blend.
    Blend {
        run: OverlapRun,
        factors: BoundaryFactors<F>,
    },
}

/// Everything a backend needs to resample one batch: both bin geometries,
/// the coverage verdict, and one task per target bin.
#[derive(Debug)]
pub(crate) struct ResamplePlan<F> {
    pub source: BinGrid<F>,
    pub target: BinGrid<F>,
    pub coverage: Coverage,
    pub fill_value: F,
    pub tasks: Vec<BinTask<F>>,
}

impl<F: Float + Debug> ResamplePlan<F> {
    /// Builds the plan, enforcing the coverage policy.
    ///
    /// Fails with `RangeMismatch` when the grids are disjoint (always fatal)
    /// or when coverage is partial under `CoveragePolicy::Strict`.
    pub fn build(
        new_wavs: &[F],
        spec_wavs: &[F],
        policy: CoveragePolicy,
        fill_value: F,
    ) -> Result<Self, FluxresError> {
        // 1. Bin geometry for both grids.
        let target = BinGrid::from_centers(new_wavs)?;
        let source = BinGrid::from_centers(spec_wavs)?;

        // 2. Coverage gate.
        let cov = coverage::classify(&target, &source);
        match cov {
            Coverage::Disjoint => {
                return Err(FluxresError::RangeMismatch(format!(
                    "target grid spans {:?} but source grid spans {:?}: no overlap",
                    target.span(),
                    source.span()
                )));
            }
            Coverage::PartiallyOutside { .. } if policy == CoveragePolicy::Strict => {
                return Err(FluxresError::RangeMismatch(format!(
                    "target grid spans {:?}, outside source coverage {:?}, \
                     and strict coverage is requested",
                    target.span(),
                    source.span()
                )));
            }
            _ => {}
        }

        // 3. One task per target bin. Bins outside the overlap span are
        // filled without entering the sweep.
        let span = coverage::overlapping_span(&target, &source);
        let mut sweeper = OverlapSweeper::new(&source);
        let mut tasks = Vec::with_capacity(target.len());
        for j in 0..target.len() {
            if !span.contains(&j) {
                tasks.push(BinTask::Fill);
                continue;
            }
            let run = sweeper.run_for(target.left_edge(j), target.right_edge(j));
            if run.start == run.stop {
                tasks.push(BinTask::Copy { src: run.start });
            } else {
                let factors =
                    boundary_factors(&source, &run, target.left_edge(j), target.right_edge(j));
                tasks.push(BinTask::Blend { run, factors });
            }
        }

        Ok(Self {
            source,
            target,
            coverage: cov,
            fill_value,
            tasks,
        })
    }

    /// The number of target bins that will be written as fill.
    pub fn filled_bins(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| matches!(task, BinTask::Fill))
            .count()
    }
}
