//! Diffusion physics
//!
//! This module provides the diffusion grid and its numerical kernel.
//!
//! # Core Concepts
//!
//! - **Diffusion Grid**: owns the square concentration field and the
//!   parameters that are fixed for its lifetime
//! - **Flux Kernel**: the two-pass staggered flux / divergence scheme that
//!   turns a field into a rate-of-change field
//! - **Boundary Rule**: what the padded flux entries at the domain edge hold
//!
//! # Architecture
//!
//! The grid is **separate from the driving loop**:
//! - The grid provides `step()` (one explicit update, in place)
//! - The runner in [`crate::sim`] decides how many steps to take and when to
//!   hand a snapshot to a rendering collaborator
//!
//! This separation keeps the kernel testable without any I/O.
//!
//! # Example
//!
//! ```rust
//! use lattice_rs::physics::{DiffusionGrid, DiffusionParameters, FieldInit};
//!
//! let params = DiffusionParameters::new(10.0, 10.0, 0.1);
//! let mut grid = DiffusionGrid::new(20, params, FieldInit::Uniform(0.5)).unwrap();
//!
//! grid.step();
//!
//! assert_eq!(grid.mesh_size(), 20);
//! ```

// module declaration
pub mod parameters;
pub mod grid;
mod flux;

// re-export commonly used types for convenience
pub use parameters::{BoundaryRule, DiffusionParameters, GridError};
pub use grid::{DiffusionGrid, FieldInit, GridSnapshot};
pub use flux::rate_of_change;
