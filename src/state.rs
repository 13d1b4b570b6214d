use crate::data::model::Figure;
use crate::data::stations::{convert_gauge_name, FuzzyMatch};
use crate::storm::{PlotOptions, Storm};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    pub storm: Storm,

    /// 1-based station currently shown.
    pub station: usize,

    /// Text typed into the station search box.
    pub search_text: String,

    /// Outcome of the last fuzzy search.
    pub last_match: Option<FuzzyMatch>,

    /// One flag per configured simulation series.
    pub enabled: Vec<bool>,

    /// Plot switches; `options.timeframe` is rebuilt from the fields below.
    pub options: PlotOptions,
    pub use_timeframe: bool,
    pub timeframe: (f64, f64),

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Viewer state showing `station` with the series named in `keys`
    /// enabled (all of them when `keys` is empty).
    pub fn new(storm: Storm, station: usize, keys: &[String], options: PlotOptions) -> Self {
        let enabled = storm
            .series()
            .iter()
            .map(|s| keys.is_empty() || keys.contains(&s.file))
            .collect();
        let (use_timeframe, timeframe) = match options.timeframe {
            Some(tf) => (true, tf),
            None => (false, (0.0, 1.0)),
        };
        Self {
            storm,
            station,
            search_text: String::new(),
            last_match: None,
            enabled,
            options,
            use_timeframe,
            timeframe,
            status_message: None,
        }
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.storm.last_figure()
    }

    /// File names of the enabled series.
    pub fn selected_keys(&self) -> Vec<String> {
        self.storm
            .series()
            .iter()
            .zip(&self.enabled)
            .filter(|(_, on)| **on)
            .map(|(s, _)| s.file.clone())
            .collect()
    }

    /// Rebuild the figure from the current selections.
    pub fn replot(&mut self) {
        self.options.timeframe = self.use_timeframe.then_some(self.timeframe);
        let keys = self.selected_keys();
        if keys.is_empty() {
            self.status_message = Some("No simulation series selected".to_string());
            return;
        }
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        match self.storm.plot(self.station, &keys, &self.options) {
            Ok(fig) => {
                self.status_message = if fig.has_gauge() || !self.options.plot_gauge {
                    None
                } else {
                    Some(format!("No gauge record for station {}", self.station))
                };
            }
            Err(e) => {
                log::error!("Failed to plot station {}: {e:#}", self.station);
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Jump to the station best matching `search_text`.
    pub fn search(&mut self) {
        match self.storm.gauges().search_gauge(&self.search_text) {
            Ok(found) => {
                self.station = found.index;
                self.last_match = Some(found);
                self.replot();
            }
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
    }

    /// Suggested file name for saving the current figure.
    pub fn default_save_name(&self) -> String {
        let stem = self
            .figure()
            .map(|f| convert_gauge_name(&f.title))
            .unwrap_or_else(|| format!("station_{}", self.station));
        format!("{stem}.png")
    }

    /// Save the current figure as `<root>/<name>`.
    pub fn save(&mut self, name: &str) {
        match self.storm.save(name) {
            Ok(path) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to save figure: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stations::StationList;
    use crate::storm::SeriesSpec;
    use crate::style::PlotStyle;
    use std::fs;

    fn state(dir: &tempfile::TempDir) -> AppState {
        fs::write(
            dir.path().join("run.61"),
            "run\n2 2 3600.0 1 1\n3600.0 1\n1 0.1\n2 0.2\n3600.0 1\n1 0.3\n2 0.4\n",
        )
        .unwrap();
        let storm = Storm::new(
            dir.path(),
            vec![SeriesSpec::new("run.61", "Run"), SeriesSpec::new("other.61", "Other")],
            StationList::from_names(["Morgans Point", "Rollover Pass"]),
            PlotStyle::default(),
        );
        AppState::new(storm, 1, &["run.61".to_string()], PlotOptions::default())
    }

    #[test]
    fn test_keys_select_enabled_series() {
        let dir = tempfile::tempdir().unwrap();
        let st = state(&dir);
        assert_eq!(st.enabled, vec![true, false]);
        assert_eq!(st.selected_keys(), vec!["run.61".to_string()]);
    }

    #[test]
    fn test_search_moves_to_matched_station() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(&dir);
        st.search_text = "rollover".to_string();
        st.search();
        assert_eq!(st.station, 2);
        assert_eq!(st.last_match.as_ref().unwrap().name, "Rollover Pass");
        let fig = st.figure().unwrap();
        assert_eq!(fig.title, "Rollover Pass");
        assert_eq!(fig.lines[0].points[1][1], 0.4);
        assert_eq!(st.default_save_name(), "rollover_pass.png");
    }

    #[test]
    fn test_replot_errors_land_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(&dir);
        st.enabled = vec![true, true];
        st.replot();
        assert!(st.status_message.unwrap().starts_with("Error"));
    }

    #[test]
    fn test_timeframe_toggle_feeds_options() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(&dir);
        st.use_timeframe = true;
        st.timeframe = (0.0, 0.01);
        st.replot();
        assert_eq!(st.options.timeframe, Some((0.0, 0.01)));
        assert_eq!(st.figure().unwrap().lines[0].points.len(), 1);
    }
}
