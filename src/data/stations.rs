/// Station registry loaded from a fixed-format station list.
///
/// The file starts with a header whose second token is the station count,
/// followed by one line per station with `!`-separated fields:
///
/// ```text
/// NSTAE   3
/// 1   - 94.985000 29.681667 ! 8770613  ! NOAA_NOS ! Morgans Point
/// 2   - 95.266667 29.720000 ! 8770777  ! NOAA_NOS ! Manchester
/// 3   - 94.513333 29.515000 ! 8770971  ! NOAA_NOS ! Rollover Pass
/// ```
///
/// Stations are numbered from 1, matching the station ids written by the
/// surge model.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::fuzzy::weighted_ratio;
use crate::error::{Error, Result};

/// Result of a fuzzy station lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    /// 1-based station index.
    pub index: usize,
    /// Display name of the matched station.
    pub name: String,
    /// Similarity on a 0–100 scale. There is no acceptance threshold; a low
    /// score means the best available candidate is still a poor fit.
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationList {
    names: Vec<String>,
}

impl StationList {
    /// Read the station list at `path`.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line.map_err(|e| Error::io(path, e))?,
            None => return Err(Error::parse(path, 1, "missing header line")),
        };
        let count_token = header
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| Error::parse(path, 1, "header has no station count"))?;
        let count: usize = count_token.parse().map_err(|_| {
            Error::parse(path, 1, format!("station count '{count_token}' is not an integer"))
        })?;

        let mut names = Vec::with_capacity(count);
        for i in 0..count {
            let line_no = i + 2;
            let line = match lines.next() {
                Some(line) => line.map_err(|e| Error::io(path, e))?,
                None => {
                    return Err(Error::parse(
                        path,
                        line_no,
                        format!("expected {count} stations, file ends after {i}"),
                    ))
                }
            };
            // `split` always yields at least one field.
            let name = line.rsplit('!').next().unwrap_or_default().trim();
            names.push(name.to_string());
        }

        log::info!("Loaded {} stations from {}", names.len(), path.display());
        Ok(StationList { names })
    }

    /// Build a list directly from display names, in station order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StationList {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names in station order (index 1 first).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Display name of the station at 1-based `index`.
    pub fn gauge_name(&self, index: usize) -> Result<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
            .ok_or(Error::StationIndex {
                index,
                len: self.names.len(),
            })
    }

    /// Find the station whose name best matches `name`. Ties go to the
    /// station listed first.
    pub fn search_gauge(&self, name: &str) -> Result<FuzzyMatch> {
        let mut best: Option<(usize, u8)> = None;
        for (i, candidate) in self.names.iter().enumerate() {
            let score = weighted_ratio(name, candidate);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
                if score == 100 {
                    break;
                }
            }
        }

        let (i, score) = best.ok_or(Error::EmptyStationList)?;
        log::debug!("'{name}' matched '{}' with score {score}", self.names[i]);
        Ok(FuzzyMatch {
            index: i + 1,
            name: self.names[i].clone(),
            score,
        })
    }
}

/// File-name friendly form of a station name: lowercase with spaces
/// replaced by underscores.
pub fn convert_gauge_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
