//! lattice-rs: On-Lattice Diffusion Framework
//!
//! A small framework for simulating 2-D Fickian diffusion of a scalar
//! concentration field on a fixed square lattice. It is intended as the
//! environmental layer (nutrient, antibiotic, public good) of a larger
//! agent-based simulation: the lattice owns the chemical field, and the
//! host simulation decides when to advance it and when to render it.
//!
//! # Architecture
//!
//! lattice-rs is built on two core principles:
//!
//! 1. **Separation of Kernel and Driver**
//!    - The diffusion grid defines the numerics (what one step does)
//!    - The runner sequences steps and checkpoints (when steps happen)
//!
//! 2. **Rendering as a Collaborator**
//!    - Snapshots are plain data handed to a sink
//!    - Image generation is a pure function of a snapshot plus a color scale
//!
//! # Quick Start
//!
//! ```rust
//! use lattice_rs::physics::{DiffusionGrid, DiffusionParameters, FieldInit};
//! use lattice_rs::sim::{CheckpointSchedule, SimulationRunner, VecSink};
//!
//! # fn main() -> Result<(), String> {
//! // 1. Configure the lattice: 20x20 cells over a 200-micron domain
//! let params = DiffusionParameters::from_domain(10.0, 100.0, 20, 0.1);
//! let mut grid = DiffusionGrid::new(20, params, FieldInit::UniformRandom { seed: Some(7) })
//!     .map_err(|e| e.to_string())?;
//!
//! // 2. Advance it, snapshotting at chosen timesteps
//! let runner = SimulationRunner::new(CheckpointSchedule::from_steps(&[10, 50, 300]));
//! let mut sink = VecSink::new();
//! let report = runner.run(&mut grid, &mut sink)?;
//!
//! assert_eq!(report.steps_completed, 300);
//! assert_eq!(sink.snapshots().len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: The diffusion grid and its flux-divergence kernel
//! - [`sim`]: Checkpoint schedules and the driving loop
//! - [`output`]: Heatmap rendering and frame export (collaborator)

// Core modules
pub mod physics;

pub mod sim;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use lattice_rs::prelude::*;
    //! ```
    pub use crate::physics::{BoundaryRule,
                             DiffusionGrid,
                             DiffusionParameters,
                             FieldInit,
                             GridError,
                             GridSnapshot};
    pub use crate::sim::{CheckpointSchedule,
                         RunReport,
                         SimulationRunner,
                         SnapshotSink,
                         VecSink};
    pub use crate::output::visualization::{plot_heatmap,
                                           render_heatmap,
                                           ColorMap,
                                           HeatmapConfig,
                                           HeatmapWriter};
}
