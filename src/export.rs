use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::data::model::{Figure, SeriesKind};
use crate::error::{Error, Result};
use crate::style::PlotStyle;

// ---------------------------------------------------------------------------
// Figure export (png / jpg / bmp / svg)
// ---------------------------------------------------------------------------

/// Render `figure` to `path`. Bitmaps are `figure_size * dpi` pixels; the
/// chart is drawn edge to edge with only a thin margin.
pub fn save_figure(figure: &Figure, style: &PlotStyle, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let size = style.pixel_size();

    let drawn = match ext.as_str() {
        "png" | "jpg" | "jpeg" | "bmp" => {
            draw(BitMapBackend::new(path, size).into_drawing_area(), figure, style)
        }
        "svg" => draw(SVGBackend::new(path, size).into_drawing_area(), figure, style),
        other => return Err(Error::UnsupportedFormat(other.to_string())),
    };

    drawn.map_err(|message| Error::Render {
        path: path.to_path_buf(),
        message,
    })
}

fn msg<E: std::fmt::Display>(e: E) -> String {
    e.to_string()
}

fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
    style: &PlotStyle,
) -> std::result::Result<(), String> {
    let px = |points: f64| style.points_to_pixels(points).round().max(1.0) as i32;
    let font = |points: f64| (style.font_family.as_str(), style.points_to_pixels(points));

    root.fill(&WHITE).map_err(msg)?;

    let (x0, x1, y0, y1) = figure.bounds().unwrap_or((0.0, 1.0, 0.0, 1.0));
    let (x0, x1) = padded(x0, x1);
    let (y0, y1) = padded(y0, y1);

    let mut chart = ChartBuilder::on(&root)
        .margin(px(6.0))
        .caption(&figure.title, font(style.title_font_size))
        .x_label_area_size(px(3.0 * style.label_font_size))
        .y_label_area_size(px(4.0 * style.label_font_size))
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(msg)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .axis_desc_style(font(style.label_font_size))
        .label_style(font(style.tick_font_size))
        .draw()
        .map_err(msg)?;

    let width = px(style.line_width) as u32;
    let (dash, gap) = (px(5.0), px(3.0));
    for line in &figure.lines {
        let stroke = RGBColor(line.color.r, line.color.g, line.color.b).stroke_width(width);
        let mut labelled = false;

        for segment in line.segments() {
            let xy = segment.iter().map(|p| (p[0], p[1]));
            let anno = match line.kind {
                SeriesKind::Simulation => chart.draw_series(LineSeries::new(xy, stroke)),
                SeriesKind::Gauge => {
                    chart.draw_series(DashedLineSeries::new(xy, dash, gap, stroke))
                }
            }
            .map_err(msg)?;

            if !labelled {
                let legend_len = px(20.0);
                anno.label(line.label.clone())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], stroke));
                labelled = true;
            }
        }
    }

    if figure.lines.iter().any(|l| !l.segments().is_empty()) {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.0).filled())
            .border_style(TRANSPARENT.stroke_width(0))
            .label_font(font(style.tick_font_size))
            .draw()
            .map_err(msg)?;
    }

    root.present().map_err(msg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.gif");
        let err = save_figure(&Figure::new("x"), &PlotStyle::default(), &path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref e) if e == "gif"));
        assert!(!path.exists());
    }

    #[test]
    fn flat_ranges_are_widened() {
        assert_eq!(padded(1.0, 1.0), (0.5, 1.5));
        let (lo, hi) = padded(0.0, 10.0);
        assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
    }
}
