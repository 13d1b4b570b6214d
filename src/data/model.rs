use std::fmt;

use crate::color::LineColor;

// ---------------------------------------------------------------------------
// TimeSeries – one station's water levels
// ---------------------------------------------------------------------------

/// A water-level record at one station.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    /// Elapsed time in days, uniform step, starting at zero.
    pub time: Vec<f64>,
    /// Surface elevation in metres – same length as `time`. Missing
    /// observations are `NaN`.
    pub elevation: Vec<f64>,
}

impl TimeSeries {
    /// Build a series on a uniform axis of `step_days` from `elevation`.
    pub fn uniform(step_days: f64, elevation: Vec<f64>) -> Self {
        let time = (0..elevation.len()).map(|i| i as f64 * step_days).collect();
        TimeSeries { time, elevation }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Add `delta` to every elevation.
    pub fn offset_by(&mut self, delta: f64) {
        for e in &mut self.elevation {
            *e += delta;
        }
    }
}

// ---------------------------------------------------------------------------
// ComparisonStats – simulation vs gauge
// ---------------------------------------------------------------------------

/// Residual statistics of a simulated series against the gauge record,
/// computed over the overlapping, non-missing samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonStats {
    /// Mean of (gauge − simulation), metres.
    pub bias: f64,
    /// Root-mean-square of (gauge − simulation), metres.
    pub rmse: f64,
    /// Number of samples the statistics were computed from.
    pub samples: usize,
}

impl fmt::Display for ComparisonStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bias {:.3} m, RMSE {:.3} m (n={})",
            self.bias, self.rmse, self.samples
        )
    }
}

// ---------------------------------------------------------------------------
// Figure – the product of one plot call
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Simulation,
    Gauge,
}

/// One line on a figure, already windowed and adjusted.
#[derive(Debug, Clone)]
pub struct SeriesLine {
    pub label: String,
    pub kind: SeriesKind,
    pub color: LineColor,
    /// `[time_days, elevation_m]` pairs.
    pub points: Vec<[f64; 2]>,
    /// Mean-bias correction added to the elevations, if one was applied.
    pub mean_adjustment: Option<f64>,
    /// Fixed shift added to the elevations.
    pub shift: f64,
    /// Statistics against the gauge before any correction.
    pub stats: Option<ComparisonStats>,
}

impl SeriesLine {
    /// Split the points into runs of finite values so missing samples show
    /// up as gaps rather than being bridged.
    pub fn segments(&self) -> Vec<&[[f64; 2]]> {
        self.points
            .split(|p| !p[1].is_finite() || !p[0].is_finite())
            .filter(|run| !run.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub lines: Vec<SeriesLine>,
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Figure {
            title: title.into(),
            x_label: "Time (days)".to_string(),
            y_label: "Surface elevation (m)".to_string(),
            lines: Vec::new(),
        }
    }

    /// Bounds of all finite points as `(x_min, x_max, y_min, y_max)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut finite = self
            .lines
            .iter()
            .flat_map(|l| l.points.iter())
            .filter(|p| p[0].is_finite() && p[1].is_finite());
        let first = finite.next()?;
        let init = (first[0], first[0], first[1], first[1]);
        Some(finite.fold(init, |(x0, x1, y0, y1), p| {
            (x0.min(p[0]), x1.max(p[0]), y0.min(p[1]), y1.max(p[1]))
        }))
    }

    pub fn has_gauge(&self) -> bool {
        self.lines.iter().any(|l| l.kind == SeriesKind::Gauge)
    }
}
