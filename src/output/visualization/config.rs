//! Heatmap configuration: dimensions, labels, color scale

use plotters::style::RGBColor;

// =================================================================================================
// Color Maps
// =================================================================================================

/// Sequential color scales for concentration values
///
/// `sample(t)` linearly interpolates between fixed stops, `t` clamped to
/// `[0, 1]`. `Purples` matches the palette the original model rendered with
/// and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMap {
    /// Light lavender to deep purple (low to high)
    #[default]
    Purples,
    /// Dark violet through teal to yellow
    Viridis,
    /// White to black
    Greys,
}

impl ColorMap {
    fn stops(&self) -> &'static [(u8, u8, u8)] {
        match self {
            ColorMap::Purples => &[
                (252, 251, 253),
                (218, 218, 235),
                (158, 154, 200),
                (106, 81, 163),
                (63, 0, 125),
            ],
            ColorMap::Viridis => &[
                (68, 1, 84),
                (59, 82, 139),
                (33, 145, 140),
                (94, 201, 98),
                (253, 231, 37),
            ],
            ColorMap::Greys => &[(255, 255, 255), (0, 0, 0)],
        }
    }

    /// Color at position `t` along the scale, `t` clamped to `[0, 1]`
    pub fn sample(&self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = t.clamp(0.0, 1.0);

        let scaled = t * (stops.len() - 1) as f64;
        let lower = scaled.floor() as usize;
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = scaled - lower as f64;

        let (r0, g0, b0) = stops[lower];
        let (r1, g1, b1) = stops[upper];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;

        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }
}

// =================================================================================================
// Heatmap Configuration
// =================================================================================================

/// Appearance and scaling of a rendered heatmap frame
///
/// The display range is fixed at `vmin..vmax` rather than autoscaled, so
/// frames from different checkpoints are directly comparable.
#[derive(Debug, Clone)]
pub struct HeatmapConfig {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Caption; ignored when `timestamp_caption` is set
    pub title: String,

    pub x_label: String,
    pub y_label: String,

    pub colormap: ColorMap,

    /// Value mapped to the bottom of the color scale
    pub vmin: f64,

    /// Value mapped to the top of the color scale
    pub vmax: f64,

    /// Half-width of the physical domain; axes span `[-h, h]`
    pub domain_half_extent: f64,

    /// Draw a vertical color scale on the right edge
    pub show_colorbar: bool,

    /// Draw axis descriptions and tick labels
    ///
    /// Off gives a bare frame (no text at all), useful for embedding the
    /// layer into a host simulation's own display.
    pub show_axes: bool,

    /// Caption frames with "Discrete Time Simulation: {t:.1} seconds"
    pub timestamp_caption: bool,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 640,
            title: String::new(),
            x_label: "X Microns".to_string(),
            y_label: "Y Microns".to_string(),
            colormap: ColorMap::Purples,
            vmin: 0.0,
            vmax: 1.0,
            domain_half_extent: 100.0,
            show_colorbar: true,
            show_axes: true,
            timestamp_caption: true,
        }
    }
}

impl HeatmapConfig {
    /// Config for a named environmental layer with a fixed caption
    pub fn layer(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            timestamp_caption: false,
            ..Self::default()
        }
    }

    /// Normalize a concentration value into the display range
    pub(crate) fn normalize(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 {
            return 0.0;
        }
        ((value - self.vmin) / span).clamp(0.0, 1.0)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
