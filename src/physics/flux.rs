//! Staggered flux / divergence kernel
//!
//! One explicit diffusion update is assembled per axis in two passes:
//!
//! 1. **Flux pass**: first differences of the concentration field, scaled by
//!    `-D / dx`, written into a padded staggered array with one extra entry
//!    along the axis. The two outer entries (and an interior offset) come
//!    from the [`BoundaryRule`].
//! 2. **Divergence pass**: adjacent flux entries are differenced and divided
//!    by the cell spacing, folding the padded array back to the field shape.
//!
//! The row-axis and column-axis contributions are independent and summed.
//! Because every interior flux entry appears in exactly two divergence terms
//! with opposite signs, the sum of the rate field telescopes to the
//! difference of the two padded edge entries per row/column, which are equal
//! under either rule: total concentration is conserved.

use nalgebra::DMatrix;

use super::parameters::{BoundaryRule, DiffusionParameters};

// =================================================================================================
// Axis
// =================================================================================================

/// Which lattice direction a flux array staggers along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    /// Differences between vertically adjacent cells (padded to (n+1) x n)
    Row,
    /// Differences between horizontally adjacent cells (padded to n x (n+1))
    Column,
}

// =================================================================================================
// Flux pass
// =================================================================================================

/// Build the padded staggered flux array along one axis
///
/// `field` must be square (the grid enforces this at construction). For a
/// mesh of `n` cells the result has `n + 1` entries along `axis`: entry `k`
/// sits on the face between cells `k - 1` and `k`, entries `0` and `n` sit
/// on the domain edge.
pub(crate) fn axis_flux(
    field: &DMatrix<f64>,
    axis: Axis,
    params: &DiffusionParameters,
    rule: BoundaryRule,
) -> DMatrix<f64> {
    let n = field.nrows();
    let scale = -params.diffusion_coefficient / params.cell_spacing;

    // Under the sentinel rule the edge entries hold the sentinel itself and
    // every interior gradient is shifted by it. The shift cancels in the
    // divergence pass except in the cells adjacent to an edge.
    let (edge, shift) = match rule {
        BoundaryRule::FluxSentinel { value } => (scale * value, value),
        BoundaryRule::NoFlux => (0.0, 0.0),
    };

    match axis {
        Axis::Row => DMatrix::from_fn(n + 1, n, |i, j| {
            if i == 0 || i == n {
                edge
            } else {
                scale * (field[(i, j)] - field[(i - 1, j)] - shift)
            }
        }),
        Axis::Column => DMatrix::from_fn(n, n + 1, |i, j| {
            if j == 0 || j == n {
                edge
            } else {
                scale * (field[(i, j)] - field[(i, j - 1)] - shift)
            }
        }),
    }
}

// =================================================================================================
// Divergence pass
// =================================================================================================

/// Fold a padded flux array back to an n x n rate contribution
///
/// `dC_k = -(flux[k+1] - flux[k]) / dx` along `axis`.
pub(crate) fn divergence(flux: &DMatrix<f64>, axis: Axis, cell_spacing: f64) -> DMatrix<f64> {
    match axis {
        Axis::Row => {
            let n = flux.ncols();
            DMatrix::from_fn(n, n, |i, j| {
                -(flux[(i + 1, j)] - flux[(i, j)]) / cell_spacing
            })
        }
        Axis::Column => {
            let n = flux.nrows();
            DMatrix::from_fn(n, n, |i, j| {
                -(flux[(i, j + 1)] - flux[(i, j)]) / cell_spacing
            })
        }
    }
}

// =================================================================================================
// Combined rate of change
// =================================================================================================

/// Rate of change of the concentration field, both axes summed
///
/// This is the pure kernel behind `DiffusionGrid::step()`: the caller owns
/// the `field += rate * dt` update.
pub fn rate_of_change(
    field: &DMatrix<f64>,
    params: &DiffusionParameters,
    rule: BoundaryRule,
) -> DMatrix<f64> {
    let dx = params.cell_spacing;
    let row = divergence(&axis_flux(field, Axis::Row, params, rule), Axis::Row, dx);
    let col = divergence(&axis_flux(field, Axis::Column, params, rule), Axis::Column, dx);
    row + col
}

// =================================================================================================
// Tests
// =================================================================================================
