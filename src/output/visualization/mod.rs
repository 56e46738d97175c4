//! Heatmap rendering of concentration fields
//!
//! A frame is a pure function of a field, a timestamp and a
//! [`HeatmapConfig`]: the same snapshot always renders to the same pixels.
//! File output (PNG or SVG by extension) and the checkpoint-driven
//! [`HeatmapWriter`] sink are thin layers on top of that function.

pub mod config;
pub mod heatmap;

pub use config::{ColorMap, HeatmapConfig};
pub use heatmap::{plot_heatmap, render_heatmap, HeatmapWriter};
