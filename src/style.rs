use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Plot style – passed explicitly to every renderer
// ---------------------------------------------------------------------------

/// Cosmetic settings shared by the interactive viewer and the file export.
///
/// Sizes follow print conventions: the figure is measured in inches and
/// fonts in points, so an exported image is `figure_size * dpi` pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Line width in points.
    pub line_width: f64,
    /// Figure `[width, height]` in inches.
    pub figure_size: [f64; 2],
    /// Resolution of saved bitmaps.
    pub dpi: u32,
    /// Preferred font family; `sans-serif` is used when it is not installed.
    pub font_family: String,
    pub title_font_size: f64,
    pub label_font_size: f64,
    pub tick_font_size: f64,
    /// Only every n-th gauge sample is drawn.
    pub gauge_stride: usize,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            figure_size: [10.0, 5.0],
            dpi: 300,
            font_family: "Liberation Sans".to_string(),
            title_font_size: 16.0,
            label_font_size: 15.0,
            tick_font_size: 13.0,
            gauge_stride: 3,
        }
    }
}

impl PlotStyle {
    /// Pixel dimensions of a saved figure.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.figure_size[0] * dpi).round().max(1.0) as u32,
            (self.figure_size[1] * dpi).round().max(1.0) as u32,
        )
    }

    /// Convert a size in points to pixels at the export resolution.
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    /// Gauge stride, never zero.
    pub fn stride(&self) -> usize {
        self.gauge_stride.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_export_is_ten_by_five_inches_at_300_dpi() {
        let style = PlotStyle::default();
        assert_eq!(style.pixel_size(), (3000, 1500));
        assert!((style.points_to_pixels(72.0) - 300.0).abs() < 1e-12);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let style: PlotStyle = serde_json::from_str(r#"{ "dpi": 150 }"#).unwrap();
        assert_eq!(style.dpi, 150);
        assert_eq!(style.gauge_stride, 3);
        assert_eq!(style.font_family, "Liberation Sans");
    }

    #[test]
    fn zero_stride_is_clamped() {
        let style = PlotStyle {
            gauge_stride: 0,
            ..PlotStyle::default()
        };
        assert_eq!(style.stride(), 1);
    }
}
