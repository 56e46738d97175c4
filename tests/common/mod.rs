//! Shared helpers for the integration suites

// not every suite uses every helper
#![allow(dead_code)]

use lattice_rs::physics::{DiffusionGrid, DiffusionParameters, FieldInit};
use nalgebra::DMatrix;

/// The kernel's reference case: a 3x3 ramp with round-number parameters
/// (D = 2, dx = 4, dt = 0.5, so D·dt/dx² = 1/16)
pub fn ramp_grid() -> DiffusionGrid {
    let params = DiffusionParameters::new(2.0, 4.0, 0.5);
    let field = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    DiffusionGrid::new(3, params, FieldInit::Explicit(field))
        .expect("reference grid construction")
}

/// A seeded random grid with the original model's parameters
/// (20 cells, D = 10, domain half-extent 100, dt = 0.1)
pub fn seeded_grid(seed: u64) -> DiffusionGrid {
    let params = DiffusionParameters::from_domain(10.0, 100.0, 20, 0.1);
    DiffusionGrid::new(20, params, FieldInit::UniformRandom { seed: Some(seed) })
        .expect("seeded grid construction")
}

/// Assert two fields agree element-wise within `epsilon`
pub fn assert_fields_close(a: &DMatrix<f64>, b: &DMatrix<f64>, epsilon: f64) {
    assert_eq!(a.shape(), b.shape(), "field shapes differ");
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            let (va, vb) = (a[(i, j)], b[(i, j)]);
            assert!(
                (va - vb).abs() <= epsilon,
                "fields differ at ({}, {}): {} vs {}",
                i,
                j,
                va,
                vb
            );
        }
    }
}
