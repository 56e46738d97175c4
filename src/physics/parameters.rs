//! Diffusion parameters, boundary rule and construction errors
//!
//! This module defines the value types shared by the grid and the kernel:
//! - `DiffusionParameters`: coefficient, cell spacing and timestep
//! - `BoundaryRule`: what the padded edge flux entries hold
//! - `GridError`: the (deliberately small) construction error taxonomy

use std::fmt;

// =================================================================================================
// Diffusion Parameters
// =================================================================================================

/// Physical parameters of a diffusion grid
///
/// All three values are fixed at construction and immutable for the lifetime
/// of a [`DiffusionGrid`](crate::physics::DiffusionGrid).
///
/// # Degenerate Values
///
/// Construction never rejects parameter values: a zero `cell_spacing` or a
/// non-finite coefficient produces NaN/Inf fields that propagate silently,
/// which is the documented behaviour of this kernel. Callers that want a
/// guard can use [`DiffusionParameters::validate`].
///
/// # Example
///
/// ```rust
/// use lattice_rs::physics::DiffusionParameters;
///
/// // 20 cells across a [-100, 100] micron domain: dx = 10
/// let params = DiffusionParameters::from_domain(10.0, 100.0, 20, 0.1);
/// assert_eq!(params.cell_spacing, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionParameters {
    /// Diffusion coefficient (length² per unit time, > 0 expected)
    pub diffusion_coefficient: f64,

    /// Physical thickness of one lattice cell (> 0 expected)
    pub cell_spacing: f64,

    /// Timestep of the explicit update (> 0 expected)
    pub time_step: f64,
}

impl DiffusionParameters {
    /// Create parameters from explicit values
    pub fn new(diffusion_coefficient: f64, cell_spacing: f64, time_step: f64) -> Self {
        Self {
            diffusion_coefficient,
            cell_spacing,
            time_step,
        }
    }

    /// Create parameters from a symmetric physical domain
    ///
    /// The domain spans `[-half_extent, half_extent]` in both directions, so
    /// the cell spacing is `2 * half_extent / mesh_size`.
    pub fn from_domain(
        diffusion_coefficient: f64,
        half_extent: f64,
        mesh_size: usize,
        time_step: f64,
    ) -> Self {
        Self::new(
            diffusion_coefficient,
            (2.0 * half_extent) / mesh_size as f64,
            time_step,
        )
    }

    /// Advisory validation of parameter values
    ///
    /// The grid itself never calls this: the kernel's propagation policy for
    /// pathological parameters is "let it happen" (non-finite values flow
    /// through untouched). Drivers that prefer failing early can call it
    /// once at setup.
    pub fn validate(&self) -> Result<(), String> {
        if !self.diffusion_coefficient.is_finite() || self.diffusion_coefficient <= 0.0 {
            return Err(format!(
                "Diffusion coefficient must be positive and finite, got {}",
                self.diffusion_coefficient
            ));
        }
        if !self.cell_spacing.is_finite() || self.cell_spacing <= 0.0 {
            return Err(format!(
                "Cell spacing must be positive and finite, got {}",
                self.cell_spacing
            ));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(format!(
                "Time step must be positive and finite, got {}",
                self.time_step
            ));
        }
        Ok(())
    }
}

// =================================================================================================
// Boundary Rule
// =================================================================================================

/// Handling of the padded flux entries at the domain edge
///
/// The kernel computes fluxes on a staggered grid with one more entry per
/// axis than the concentration field. The two outer entries of each padded
/// axis are not backed by a neighbouring cell; this enum decides what they
/// hold.
///
/// # Variants
///
/// - `FluxSentinel`: the historical rule. Edge entries hold a fixed sentinel
///   and interior entries carry `gradient - sentinel`. The interior offset
///   cancels when the flux field is differenced, so interior cells see a
///   plain Laplacian; the first and last row/column of each axis pick up a
///   constant rate offset of `∓2 · sentinel · D / dx²`. Mass still balances
///   globally because the divergence telescopes between two equal edge
///   entries.
/// - `NoFlux`: textbook sealed edges. Edge flux is zero, interior flux is
///   the plain gradient, a uniform field is an exact fixed point.
///
/// The default is `FluxSentinel { value: 1.0 }`, preserving the observed
/// behaviour of the model this crate reimplements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryRule {
    /// Padded edge entries hold `value`; interior entries carry
    /// `gradient - value`
    FluxSentinel { value: f64 },

    /// Sealed edges: zero boundary flux, unshifted interior gradients
    NoFlux,
}

impl Default for BoundaryRule {
    fn default() -> Self {
        BoundaryRule::FluxSentinel { value: 1.0 }
    }
}

impl fmt::Display for BoundaryRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundaryRule::FluxSentinel { value } => write!(f, "FluxSentinel ({})", value),
            BoundaryRule::NoFlux => write!(f, "NoFlux"),
        }
    }
}

// =================================================================================================
// Grid Errors
// =================================================================================================

/// Errors raised at grid construction
///
/// The taxonomy is intentionally minimal: once a grid exists, `step()` has
/// no failure modes (numeric degeneracy propagates silently, see
/// [`DiffusionParameters`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Mesh size below the minimum of one cell
    InvalidDimension { mesh_size: usize },

    /// An explicit initial field whose shape is not `mesh_size × mesh_size`
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::InvalidDimension { mesh_size } => {
                write!(f, "Invalid mesh size {}: a grid needs at least one cell", mesh_size)
            }
            GridError::ShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Initial field shape {} x {} does not match mesh {} x {}",
                    found.0, found.1, expected.0, expected.1
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ====== Parameter construction ======

    #[test]
    fn test_parameters_new() {
        let params = DiffusionParameters::new(10.0, 10.0, 0.1);
        assert_eq!(params.diffusion_coefficient, 10.0);
        assert_eq!(params.cell_spacing, 10.0);
        assert_eq!(params.time_step, 0.1);
    }

    #[test]
    fn test_parameters_from_domain() {
        // posLim = 100, negLim = -100, mesh = 20 → dx = 200 / 20 = 10
        let params = DiffusionParameters::from_domain(10.0, 100.0, 20, 0.1);
        assert_eq!(params.cell_spacing, 10.0);
    }

    #[test]
    fn test_parameters_validate_ok() {
        let params = DiffusionParameters::new(1.0, 0.5, 0.01);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_parameters_validate_zero_spacing() {
        let params = DiffusionParameters::new(1.0, 0.0, 0.01);
        let result = params.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Cell spacing"));
    }

    #[test]
    fn test_parameters_validate_negative_coefficient() {
        let params = DiffusionParameters::new(-1.0, 1.0, 0.01);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_parameters_validate_nan_timestep() {
        let params = DiffusionParameters::new(1.0, 1.0, f64::NAN);
        assert!(params.validate().is_err());
    }

    // ====== Boundary rule ======

    #[test]
    fn test_default_boundary_rule_is_legacy_sentinel() {
        assert_eq!(BoundaryRule::default(), BoundaryRule::FluxSentinel { value: 1.0 });
    }

    #[test]
    fn test_boundary_rule_display() {
        assert_eq!(format!("{}", BoundaryRule::NoFlux), "NoFlux");
        assert_eq!(
            format!("{}", BoundaryRule::FluxSentinel { value: 1.0 }),
            "FluxSentinel (1)"
        );
    }

    // ====== Errors ======

    #[test]
    fn test_invalid_dimension_display() {
        let err = GridError::InvalidDimension { mesh_size: 0 };
        assert!(format!("{}", err).contains("mesh size 0"));
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = GridError::ShapeMismatch {
            expected: (3, 3),
            found: (2, 3),
        };
        let text = format!("{}", err);
        assert!(text.contains("2 x 3"));
        assert!(text.contains("3 x 3"));
    }
}
