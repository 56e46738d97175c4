//! Output and visualization
//!
//! Everything here is a collaborator of the simulation: it consumes
//! snapshots and produces images, and nothing in [`crate::physics`] or
//! [`crate::sim`] depends on it.

pub mod visualization;

pub use visualization::{plot_heatmap, render_heatmap, ColorMap, HeatmapConfig, HeatmapWriter};
