use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Backend-neutral line colour
// ---------------------------------------------------------------------------

/// An 8-bit sRGB colour shared by the interactive and file renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LineColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        LineColor { r, g, b }
    }
}

impl Default for LineColor {
    fn default() -> Self {
        GAUGE_COLOR
    }
}

impl From<LineColor> for Color32 {
    fn from(c: LineColor) -> Self {
        Color32::from_rgb(c.r, c.g, c.b)
    }
}

/// Observations are always drawn in near-black so they stand apart from the
/// simulated runs.
pub const GAUGE_COLOR: LineColor = LineColor::rgb(40, 40, 40);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<LineColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            LineColor::rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
