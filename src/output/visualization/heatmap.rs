//! Heatmap rendering: pure buffer rendering, file output, checkpoint sink

use std::error::Error;
use std::path::{Path, PathBuf};

use nalgebra::DMatrix;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::physics::GridSnapshot;
use crate::sim::SnapshotSink;

use super::config::HeatmapConfig;

// =================================================================================================
// File output
// =================================================================================================

/// Render one frame to `path`, choosing the backend by extension
///
/// `.svg` goes through the vector backend, everything else through the
/// bitmap backend (plotters encodes PNG for `.png` paths).
pub fn plot_heatmap(
    field: &DMatrix<f64>,
    time: f64,
    path: &Path,
    config: &HeatmapConfig,
) -> Result<(), Box<dyn Error>> {
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if is_svg {
        let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
        heatmap_impl(&root, field, time, config)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        heatmap_impl(&root, field, time, config)?;
        root.present()?;
    }
    Ok(())
}

// =================================================================================================
// Pure rendering
// =================================================================================================

/// Render one frame into an RGB pixel buffer, no I/O
///
/// Returns `width * height * 3` bytes in row-major RGB order. Host
/// simulations that composite the layer into their own display use this
/// instead of [`plot_heatmap`].
pub fn render_heatmap(
    field: &DMatrix<f64>,
    time: f64,
    config: &HeatmapConfig,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut buffer = vec![0u8; (config.width * config.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (config.width, config.height))
            .into_drawing_area();
        heatmap_impl(&root, field, time, config)?;
        root.present()?;
    }
    Ok(buffer)
}

// =================================================================================================
// Shared implementation (generic over the backend)
// =================================================================================================

fn heatmap_impl<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    field: &DMatrix<f64>,
    time: f64,
    config: &HeatmapConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (plot_area, bar_area) = if config.show_colorbar {
        let (left, right) = root.split_horizontally(config.width as i32 - 90);
        (left, Some(right))
    } else {
        (root.clone(), None)
    };

    let caption = if config.timestamp_caption {
        format!("Discrete Time Simulation: {:.1} seconds", time)
    } else {
        config.title.clone()
    };

    let h = config.domain_half_extent;
    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(10);
    if config.show_axes {
        builder.x_label_area_size(40).y_label_area_size(50);
    }
    if !caption.is_empty() {
        builder.caption(&caption, ("sans-serif", 24));
    }
    let mut chart = builder.build_cartesian_2d(-h..h, -h..h)?;

    if config.show_axes {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .draw()?;
    }

    // one rectangle per cell, row 0 at the top of the frame
    let n = field.nrows();
    let cell = 2.0 * h / n as f64;
    let mut cells = Vec::with_capacity(n * field.ncols());
    for i in 0..n {
        for j in 0..field.ncols() {
            let color = config.colormap.sample(config.normalize(field[(i, j)]));
            let x0 = -h + j as f64 * cell;
            let y1 = h - i as f64 * cell;
            cells.push(Rectangle::new([(x0, y1 - cell), (x0 + cell, y1)], color.filled()));
        }
    }
    chart.draw_series(cells)?;

    if let Some(bar) = bar_area {
        draw_colorbar(&bar, config)?;
    }

    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    config: &HeatmapConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let mut builder = ChartBuilder::on(area);
    builder.margin(10).margin_top(40);
    if config.show_axes {
        builder.y_label_area_size(40);
    }
    let mut chart = builder.build_cartesian_2d(0.0..1.0, config.vmin..config.vmax)?;

    if config.show_axes {
        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .draw()?;
    }

    let bands = 64;
    let span = (config.vmax - config.vmin) / bands as f64;
    let swatches = (0..bands).map(|k| {
        let v0 = config.vmin + k as f64 * span;
        let color = config.colormap.sample(config.normalize(v0 + 0.5 * span));
        Rectangle::new([(0.0, v0), (1.0, v0 + span)], color.filled())
    });
    chart.draw_series(swatches)?;

    Ok(())
}

// =================================================================================================
// Checkpoint sink
// =================================================================================================

/// `SnapshotSink` writing one frame per checkpoint into a directory
///
/// Frames follow the `"After {n} timesteps.png"` naming scheme by default,
/// with `{n}` replaced by the checkpoint's timestep index. The writer keeps
/// the explicit list of files it produced; callers that assemble animations
/// or reports read it back instead of globbing the directory.
///
/// # Example
///
/// ```rust,no_run
/// use lattice_rs::output::visualization::{HeatmapConfig, HeatmapWriter};
///
/// let writer = HeatmapWriter::new("frames")
///     .with_config(HeatmapConfig::layer("Nutrient"))
///     .with_pattern("nutrient-{n}.png");
/// ```
#[derive(Debug)]
pub struct HeatmapWriter {
    directory: PathBuf,
    config: HeatmapConfig,
    pattern: String,
    written: Vec<PathBuf>,
}

impl HeatmapWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            config: HeatmapConfig::default(),
            pattern: "After {n} timesteps.png".to_string(),
            written: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: HeatmapConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the file name pattern; `{n}` expands to the timestep index
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Files written so far, in checkpoint order
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }

    fn frame_path(&self, step: usize) -> PathBuf {
        self.directory.join(self.pattern.replace("{n}", &step.to_string()))
    }
}

impl SnapshotSink for HeatmapWriter {
    fn on_checkpoint(&mut self, snapshot: &GridSnapshot) -> Result<(), String> {
        std::fs::create_dir_all(&self.directory)
            .map_err(|e| format!("Failed to create frame directory: {}", e))?;

        let path = self.frame_path(snapshot.step);
        plot_heatmap(&snapshot.values, snapshot.time, &path, &self.config)
            .map_err(|e| format!("Failed to render {}: {}", path.display(), e))?;

        self.written.push(path);
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
