use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{generate_palette, GAUGE_COLOR};
use crate::data::align::{compare, window};
use crate::data::loader::{read_gauge, read_simulation, DEFAULT_OFFSET_HOURS};
use crate::data::model::{Figure, SeriesKind, SeriesLine, TimeSeries};
use crate::data::stations::{FuzzyMatch, StationList};
use crate::error::{Error, Result};
use crate::export;
use crate::style::PlotStyle;

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

/// One simulation output file (relative to the storm root) and its legend
/// label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub file: String,
    pub label: String,
}

impl SeriesSpec {
    pub fn new(file: impl Into<String>, label: impl Into<String>) -> Self {
        SeriesSpec {
            file: file.into(),
            label: label.into(),
        }
    }
}

/// Per-call plotting switches.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Overlay `<root>/gauge_<station>.csv` when it can be read.
    pub plot_gauge: bool,
    /// Shift each simulated series by its mean difference from the gauge.
    pub adjust_mean: bool,
    /// Fixed elevation shift (m) added to every simulated series.
    pub shift: f64,
    /// Hours trimmed from the start of the gauge record.
    pub offset_hours: f64,
    /// Restrict every series to the samples nearest `(t0, t1)` days.
    pub timeframe: Option<(f64, f64)>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            plot_gauge: true,
            adjust_mean: false,
            shift: 0.0,
            offset_hours: DEFAULT_OFFSET_HOURS,
            timeframe: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Storm – compare model runs with gauge records
// ---------------------------------------------------------------------------

/// A storm directory holding one or more simulation outputs and the gauge
/// records they are compared against.
pub struct Storm {
    root: PathBuf,
    series: Vec<SeriesSpec>,
    gauges: StationList,
    style: PlotStyle,
    /// Figure produced by the last `plot` call, kept for `save`.
    last_figure: Option<Figure>,
}

impl Storm {
    pub fn new(
        root: impl Into<PathBuf>,
        series: Vec<SeriesSpec>,
        gauges: StationList,
        style: PlotStyle,
    ) -> Self {
        Storm {
            root: root.into(),
            series,
            gauges,
            style,
            last_figure: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn series(&self) -> &[SeriesSpec] {
        &self.series
    }

    pub fn gauges(&self) -> &StationList {
        &self.gauges
    }

    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    pub fn last_figure(&self) -> Option<&Figure> {
        self.last_figure.as_ref()
    }

    /// Path of the gauge record for 1-based `station`.
    pub fn gauge_path(&self, station: usize) -> PathBuf {
        self.root.join(format!("gauge_{station}.csv"))
    }

    /// Build the comparison figure for `station`.
    ///
    /// `keys` selects simulation files by their configured file name; an
    /// empty slice plots all of them in configured order. A missing or
    /// unreadable gauge record only drops the gauge overlay. The figure is
    /// kept for [`Storm::save`].
    pub fn plot(&mut self, station: usize, keys: &[&str], options: &PlotOptions) -> Result<&Figure> {
        let title = self.gauges.gauge_name(station)?.to_string();
        let selected = self.select(keys)?;

        let gauge = if options.plot_gauge {
            let path = self.gauge_path(station);
            match read_gauge(&path, options.offset_hours) {
                Ok(ts) => {
                    log::info!("Loaded {} gauge samples from {}", ts.len(), path.display());
                    Some(ts)
                }
                Err(e) => {
                    log::warn!("Skipping gauge overlay: {e}");
                    None
                }
            }
        } else {
            None
        };

        let mut figure = Figure::new(title);

        if let Some(g) = &gauge {
            let range = clip(&g.time, options.timeframe);
            let points = g.time[range.clone()]
                .iter()
                .zip(&g.elevation[range])
                .step_by(self.style.stride())
                .map(|(&t, &e)| [t, e])
                .collect();
            figure.lines.push(SeriesLine {
                label: "Gauge data".to_string(),
                kind: SeriesKind::Gauge,
                color: GAUGE_COLOR,
                points,
                mean_adjustment: None,
                shift: 0.0,
                stats: None,
            });
        }

        let palette = generate_palette(selected.len());
        for (spec, color) in selected.iter().zip(palette) {
            let mut ts = read_simulation(&self.root.join(&spec.file), station)?;
            let mut label = spec.label.clone();

            let stats = gauge.as_ref().and_then(|g| compare(&ts, g));
            if let Some(s) = &stats {
                log::info!("{}: {s}", spec.label);
            }

            let mut mean_adjustment = None;
            if options.adjust_mean && gauge.is_some() {
                match stats {
                    Some(s) => {
                        ts.offset_by(s.bias);
                        log::info!("{}: adjustment {:.3} m", spec.label, s.bias);
                        label.push_str(&format!(", adjustment: {:.3} m", s.bias));
                        mean_adjustment = Some(s.bias);
                    }
                    None => log::warn!(
                        "{}: no overlap with the gauge record, mean not adjusted",
                        spec.label
                    ),
                }
            }

            if options.shift != 0.0 {
                ts.offset_by(options.shift);
                label.push_str(&format!(", shift: {:.3} m", options.shift));
            }

            figure.lines.push(SeriesLine {
                label,
                kind: SeriesKind::Simulation,
                color,
                points: points_in(&ts, options.timeframe),
                mean_adjustment,
                shift: options.shift,
                stats,
            });
        }

        Ok(self.last_figure.insert(figure))
    }

    /// Resolve `name` to the best-matching station and plot it.
    pub fn plot_fuzzy(
        &mut self,
        name: &str,
        keys: &[&str],
        options: &PlotOptions,
    ) -> Result<(FuzzyMatch, &Figure)> {
        let found = self.gauges.search_gauge(name)?;
        log::info!(
            "'{name}' resolved to station {} ({}, score {})",
            found.index,
            found.name,
            found.score
        );
        let figure = self.plot(found.index, keys, options)?;
        Ok((found, figure))
    }

    /// Write the last figure to `<root>/<name>`; the format follows the
    /// extension.
    pub fn save(&self, name: &str) -> Result<PathBuf> {
        let figure = self.last_figure.as_ref().ok_or(Error::NoFigure)?;
        let path = self.root.join(name);
        export::save_figure(figure, &self.style, &path)?;
        log::info!("Saved figure to {}", path.display());
        Ok(path)
    }

    fn select(&self, keys: &[&str]) -> Result<Vec<SeriesSpec>> {
        if keys.is_empty() {
            return Ok(self.series.clone());
        }
        keys.iter()
            .map(|key| {
                self.series
                    .iter()
                    .find(|s| s.file == *key)
                    .cloned()
                    .ok_or_else(|| Error::UnknownSeries(key.to_string()))
            })
            .collect()
    }
}

fn clip(time: &[f64], timeframe: Option<(f64, f64)>) -> std::ops::Range<usize> {
    match timeframe {
        Some((t0, t1)) => window(time, t0, t1),
        None => 0..time.len(),
    }
}

fn points_in(ts: &TimeSeries, timeframe: Option<(f64, f64)>) -> Vec<[f64; 2]> {
    let range = clip(&ts.time, timeframe);
    ts.time[range.clone()]
        .iter()
        .zip(&ts.elevation[range])
        .map(|(&t, &e)| [t, e])
        .collect()
}
