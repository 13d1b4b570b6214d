//! Storm configuration file.
//!
//! ```json
//! {
//!   "root": "ike",
//!   "station_list": "stations.txt",
//!   "series": [
//!     { "file": "fort.61", "label": "ADCIRC" },
//!     { "file": "fort.61.nowave", "label": "ADCIRC, no waves" }
//!   ],
//!   "style": { "dpi": 200 }
//! }
//! ```
//!
//! A relative `root` is taken from the config file's directory and a relative
//! `station_list` from `root`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::stations::StationList;
use crate::error::{Error, Result};
use crate::storm::{SeriesSpec, Storm};
use crate::style::PlotStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormConfig {
    pub root: PathBuf,
    pub station_list: PathBuf,
    pub series: Vec<SeriesSpec>,
    #[serde(default)]
    pub style: PlotStyle,
}

impl StormConfig {
    /// Parse the config at `path` and resolve its relative paths.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config: StormConfig = serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;

        if config.root.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.root = base.join(&config.root);
        }
        Ok(config)
    }

    pub fn station_list_path(&self) -> PathBuf {
        if self.station_list.is_absolute() {
            self.station_list.clone()
        } else {
            self.root.join(&self.station_list)
        }
    }

    /// Read the station list and assemble the storm.
    pub fn into_storm(self) -> Result<Storm> {
        let gauges = StationList::read(self.station_list_path())?;
        Ok(Storm::new(self.root, self.series, gauges, self.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storm_dir = dir.path().join("ike");
        fs::create_dir(&storm_dir).unwrap();
        fs::write(storm_dir.join("stations.txt"), "NSTAE 1\n1 ! a ! Galveston Pier 21\n").unwrap();
        let config_path = dir.path().join("storm.json");
        fs::write(
            &config_path,
            r#"{
                "root": "ike",
                "station_list": "stations.txt",
                "series": [{ "file": "fort.61", "label": "ADCIRC" }]
            }"#,
        )
        .unwrap();

        let config = StormConfig::load(&config_path).unwrap();
        assert_eq!(config.root, storm_dir);
        assert_eq!(config.station_list_path(), storm_dir.join("stations.txt"));
        assert_eq!(config.style, PlotStyle::default());

        let storm = config.into_storm().unwrap();
        assert_eq!(storm.gauges().gauge_name(1).unwrap(), "Galveston Pier 21");
        assert_eq!(storm.series()[0], SeriesSpec::new("fort.61", "ADCIRC"));
    }

    #[test]
    fn test_malformed_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("storm.json");
        fs::write(&config_path, "{ \"root\": 3 }").unwrap();
        assert!(matches!(
            StormConfig::load(&config_path),
            Err(Error::Config { .. })
        ));
    }
}
