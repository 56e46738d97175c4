//! The diffusion grid: a square concentration field plus fixed parameters
//!
//! `DiffusionGrid` owns the field and exposes exactly one mutation,
//! `step()`. Everything about *when* to step and what to do with the result
//! lives in [`crate::sim`]; everything about drawing lives in
//! [`crate::output`].

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::flux::rate_of_change;
use super::parameters::{BoundaryRule, DiffusionParameters, GridError};

// =================================================================================================
// Field Initialization
// =================================================================================================

/// How the concentration field is filled at construction
#[derive(Debug, Clone)]
pub enum FieldInit {
    /// Every cell holds the same value
    Uniform(f64),

    /// Every cell drawn independently from `[0, 1)`
    ///
    /// `seed: None` draws from OS entropy; `Some(seed)` gives a reproducible
    /// field (cells are filled in column-major order).
    UniformRandom { seed: Option<u64> },

    /// Caller-supplied field, must be `mesh_size x mesh_size`
    Explicit(DMatrix<f64>),
}

impl FieldInit {
    fn materialize(self, mesh_size: usize) -> Result<DMatrix<f64>, GridError> {
        match self {
            FieldInit::Uniform(value) => Ok(DMatrix::from_element(mesh_size, mesh_size, value)),
            FieldInit::UniformRandom { seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                Ok(DMatrix::from_fn(mesh_size, mesh_size, |_, _| {
                    rng.random::<f64>()
                }))
            }
            FieldInit::Explicit(field) => {
                if field.shape() != (mesh_size, mesh_size) {
                    return Err(GridError::ShapeMismatch {
                        expected: (mesh_size, mesh_size),
                        found: field.shape(),
                    });
                }
                Ok(field)
            }
        }
    }
}

// =================================================================================================
// Snapshot
// =================================================================================================

/// An owned copy of the field at a checkpoint
///
/// Snapshots are the only data that crosses the boundary to rendering
/// collaborators, so mutating the grid afterwards never invalidates them.
#[derive(Debug, Clone)]
pub struct GridSnapshot {
    /// The concentration field at the checkpoint
    pub values: DMatrix<f64>,

    /// Timestep index the snapshot was taken at
    pub step: usize,

    /// Physical time, `step * time_step`
    pub time: f64,
}

// =================================================================================================
// Diffusion Grid
// =================================================================================================

/// Square lattice of concentration values with an explicit diffusion update
///
/// # Example
///
/// ```rust
/// use lattice_rs::physics::{DiffusionGrid, DiffusionParameters, FieldInit};
///
/// let params = DiffusionParameters::from_domain(10.0, 100.0, 20, 0.1);
/// let mut grid = DiffusionGrid::new(20, params, FieldInit::UniformRandom { seed: Some(1) })
///     .unwrap();
///
/// let before = grid.total_mass();
/// grid.step();
/// assert!((grid.total_mass() - before).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct DiffusionGrid {
    field: DMatrix<f64>,
    params: DiffusionParameters,
    rule: BoundaryRule,
}

impl DiffusionGrid {
    /// Create a grid with `mesh_size x mesh_size` cells
    ///
    /// Fails with [`GridError::InvalidDimension`] for a zero mesh and
    /// [`GridError::ShapeMismatch`] for an explicit field of the wrong
    /// shape. Parameter values are never rejected here, see
    /// [`DiffusionParameters::validate`].
    pub fn new(
        mesh_size: usize,
        params: DiffusionParameters,
        init: FieldInit,
    ) -> Result<Self, GridError> {
        if mesh_size < 1 {
            return Err(GridError::InvalidDimension { mesh_size });
        }
        Ok(Self {
            field: init.materialize(mesh_size)?,
            params,
            rule: BoundaryRule::default(),
        })
    }

    /// Replace the default boundary rule (builder style)
    pub fn with_boundary_rule(mut self, rule: BoundaryRule) -> Self {
        self.rule = rule;
        self
    }

    /// Advance the field by one timestep, in place
    ///
    /// Deterministic, shape-preserving, no renormalization: the full
    /// flux-divergence rate is computed from the pre-step field and applied
    /// as `field += rate * dt`.
    pub fn step(&mut self) {
        let rate = rate_of_change(&self.field, &self.params, self.rule);
        let dt = self.params.time_step;

        #[cfg(feature = "parallel")]
        {
            if self.field.len() >= crate::sim::parallel_threshold() {
                use rayon::prelude::*;
                // both matrices share the same column-major layout
                self.field
                    .as_mut_slice()
                    .par_iter_mut()
                    .zip(rate.as_slice().par_iter())
                    .for_each(|(cell, rate)| *cell += rate * dt);
                return;
            }
        }

        self.field.zip_apply(&rate, |cell, rate| *cell += rate * dt);
    }

    /// The concentration field (row index i, column index j)
    pub fn field(&self) -> &DMatrix<f64> {
        &self.field
    }

    /// Cells per side
    pub fn mesh_size(&self) -> usize {
        self.field.nrows()
    }

    pub fn params(&self) -> &DiffusionParameters {
        &self.params
    }

    pub fn boundary_rule(&self) -> BoundaryRule {
        self.rule
    }

    /// Sum of all cell values
    ///
    /// Diagnostic only: `step()` never reads or renormalizes it.
    pub fn total_mass(&self) -> f64 {
        self.field.sum()
    }

    /// Owned copy of the current field, tagged with a timestep index
    pub fn snapshot(&self, step: usize) -> GridSnapshot {
        GridSnapshot {
            values: self.field.clone(),
            step,
            time: step as f64 * self.params.time_step,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp_grid() -> DiffusionGrid {
        let params = DiffusionParameters::new(2.0, 4.0, 0.5);
        let field =
            DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        DiffusionGrid::new(3, params, FieldInit::Explicit(field)).unwrap()
    }

    // ====== Construction ======

    #[test]
    fn test_zero_mesh_is_rejected() {
        let params = DiffusionParameters::new(1.0, 1.0, 0.1);
        let result = DiffusionGrid::new(0, params, FieldInit::Uniform(0.0));
        assert_eq!(result.unwrap_err(), GridError::InvalidDimension { mesh_size: 0 });
    }

    #[test]
    fn test_single_cell_mesh_is_allowed() {
        let params = DiffusionParameters::new(1.0, 1.0, 0.1);
        let grid = DiffusionGrid::new(1, params, FieldInit::Uniform(0.5)).unwrap();
        assert_eq!(grid.mesh_size(), 1);
    }

    #[test]
    fn test_explicit_field_shape_is_checked() {
        let params = DiffusionParameters::new(1.0, 1.0, 0.1);
        let wrong = DMatrix::from_element(2, 3, 0.0);
        let result = DiffusionGrid::new(3, params, FieldInit::Explicit(wrong));
        assert_eq!(
            result.unwrap_err(),
            GridError::ShapeMismatch { expected: (3, 3), found: (2, 3) }
        );
    }

    #[test]
    fn test_uniform_init_fills_every_cell() {
        let params = DiffusionParameters::new(1.0, 1.0, 0.1);
        let grid = DiffusionGrid::new(4, params, FieldInit::Uniform(0.25)).unwrap();
        assert!(grid.field().iter().all(|&v| v == 0.25));
    }

    #[test]
    fn test_random_init_is_in_unit_interval() {
        let params = DiffusionParameters::new(1.0, 1.0, 0.1);
        let grid =
            DiffusionGrid::new(8, params, FieldInit::UniformRandom { seed: Some(3) }).unwrap();
        assert!(grid.field().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_seeded_random_init_is_reproducible() {
        let params = DiffusionParameters::new(1.0, 1.0, 0.1);
        let a = DiffusionGrid::new(6, params, FieldInit::UniformRandom { seed: Some(9) }).unwrap();
        let b = DiffusionGrid::new(6, params, FieldInit::UniformRandom { seed: Some(9) }).unwrap();
        assert_eq!(a.field(), b.field());
    }

    // ====== Stepping ======

    #[test]
    fn test_single_step_matches_hand_computation() {
        let mut grid = ramp_grid();
        grid.step();

        let expected = [
            [1.0, 2.0625, 3.125],
            [3.9375, 5.0, 6.0625],
            [6.875, 7.9375, 9.0],
        ];
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(grid.field()[(i, j)], expected[i][j], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_step_preserves_shape() {
        let mut grid = ramp_grid();
        for _ in 0..10 {
            grid.step();
        }
        assert_eq!(grid.field().shape(), (3, 3));
    }

    #[test]
    fn test_step_conserves_total_mass() {
        let mut grid = ramp_grid();
        let before = grid.total_mass();
        for _ in 0..100 {
            grid.step();
        }
        assert_relative_eq!(grid.total_mass(), before, epsilon = 1e-9);
    }

    #[test]
    fn test_uniform_field_drifts_under_sentinel_but_not_no_flux() {
        // D = 10, dx = 10, dt = 0.1 → per-axis edge delta 2sD·dt/dx² = 0.02
        let params = DiffusionParameters::new(10.0, 10.0, 0.1);

        let mut sentinel = DiffusionGrid::new(4, params, FieldInit::Uniform(2.0)).unwrap();
        sentinel.step();
        assert_relative_eq!(sentinel.field()[(0, 0)], 2.0 - 0.04, epsilon = 1e-12);
        assert_relative_eq!(sentinel.field()[(3, 3)], 2.0 + 0.04, epsilon = 1e-12);
        assert_relative_eq!(sentinel.field()[(1, 1)], 2.0);

        let mut sealed = DiffusionGrid::new(4, params, FieldInit::Uniform(2.0))
            .unwrap()
            .with_boundary_rule(BoundaryRule::NoFlux);
        sealed.step();
        assert!(sealed.field().iter().all(|&v| v == 2.0));
    }

    #[test]
    fn test_stepping_is_deterministic() {
        let params = DiffusionParameters::from_domain(10.0, 100.0, 12, 0.1);
        let mut a =
            DiffusionGrid::new(12, params, FieldInit::UniformRandom { seed: Some(5) }).unwrap();
        let mut b =
            DiffusionGrid::new(12, params, FieldInit::UniformRandom { seed: Some(5) }).unwrap();
        for _ in 0..50 {
            a.step();
            b.step();
        }
        assert_eq!(a.field(), b.field());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_update_matches_sequential() {
        let params = DiffusionParameters::from_domain(10.0, 100.0, 16, 0.1);
        let init = FieldInit::UniformRandom { seed: Some(11) };
        let mut sequential = DiffusionGrid::new(16, params, init.clone()).unwrap();
        let mut parallel = DiffusionGrid::new(16, params, init).unwrap();

        let _guard = crate::sim::ThresholdGuard::set(1);
        for _ in 0..20 {
            parallel.step();
        }
        drop(_guard);
        for _ in 0..20 {
            sequential.step();
        }
        assert_eq!(sequential.field(), parallel.field());
    }

    // ====== Snapshots ======

    #[test]
    fn test_snapshot_is_decoupled_from_grid() {
        let mut grid = ramp_grid();
        let snap = grid.snapshot(0);
        grid.step();
        assert_eq!(snap.values[(0, 1)], 2.0);
        assert_ne!(grid.field()[(0, 1)], 2.0);
    }

    #[test]
    fn test_snapshot_time_uses_timestep() {
        let grid = ramp_grid(); // dt = 0.5
        let snap = grid.snapshot(40);
        assert_eq!(snap.step, 40);
        assert_relative_eq!(snap.time, 20.0);
    }
}
