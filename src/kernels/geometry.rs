// In: src/kernels/geometry.rs

//! Bin geometry construction: center wavelengths to contiguous bin edges.
//!
//! A sampled spectrum gives flux per *bin*, not per point. This kernel derives
//! the implicit bins from the sample centers using the midpoint convention:
//! each interior edge sits halfway between neighboring centers, and the two
//! outer edges extrapolate half the nearest gap outward. The resulting bins
//! tile the wavelength axis exactly, with no gaps or overlaps.

use num_traits::Float;

use crate::error::FluxresError;

/// The bin geometry of one wavelength grid, stored as `n + 1` edges for
/// `n` bins. Edge storage makes the contiguity invariant
/// (`left_edge[i] + width[i] == left_edge[i + 1]`) hold by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BinGrid<F> {
    edges: Vec<F>,
}

impl<F: Float> BinGrid<F> {
    /// Builds bin edges from strictly increasing center wavelengths.
    ///
    /// Edge formulas:
    /// - `edges[0]     = w[0]   - (w[1]   - w[0])   / 2`
    /// - `edges[i]     = (w[i]  + w[i-1]) / 2` for interior `i`
    /// - `edges[n]     = w[n-1] + (w[n-1] - w[n-2]) / 2`
    ///
    /// # Preconditions
    ///
    /// `centers` must be strictly increasing. This is a caller contract: it is
    /// checked only under `debug_assert!`, and violating it produces garbage
    /// geometry rather than an error.
    pub fn from_centers(centers: &[F]) -> Result<Self, FluxresError> {
        let n = centers.len();
        if n < 2 {
            return Err(FluxresError::GridError(format!(
                "a wavelength grid needs at least 2 centers to define bins, got {}",
                n
            )));
        }
        debug_assert!(
            centers.windows(2).all(|pair| pair[0] < pair[1]),
            "center wavelengths must be strictly increasing"
        );

        let two = F::one() + F::one();
        let mut edges = Vec::with_capacity(n + 1);
        edges.push(centers[0] - (centers[1] - centers[0]) / two);
        for i in 1..n {
            edges.push((centers[i] + centers[i - 1]) / two);
        }
        edges.push(centers[n - 1] + (centers[n - 1] - centers[n - 2]) / two);

        Ok(Self { edges })
    }

    /// The number of bins (one per input center).
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    /// Always false: a constructed grid has at least 2 bins.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn left_edge(&self, i: usize) -> F {
        self.edges[i]
    }

    #[inline]
    pub fn right_edge(&self, i: usize) -> F {
        self.edges[i + 1]
    }

    #[inline]
    pub fn width(&self, i: usize) -> F {
        self.edges[i + 1] - self.edges[i]
    }

    /// The outer wavelength interval `[first_left_edge, last_right_edge]`
    /// covered by this grid.
    pub fn span(&self) -> (F, F) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    /// All `n + 1` edges, ascending.
    pub fn edges(&self) -> &[F] {
        &self.edges
    }
}
