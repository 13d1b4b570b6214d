use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveTime;

use super::model::TimeSeries;
use crate::error::{Error, Result};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Simulated elevations below this mark a dry cell.
pub const DRY_THRESHOLD: f64 = -1000.0;

/// Hours of gauge record dropped from the start by default, covering the
/// model's spin-up.
pub const DEFAULT_OFFSET_HOURS: f64 = 12.0;

/// Value written by the gauge export for a missing observation.
const MISSING: &str = "-";

// ---------------------------------------------------------------------------
// Simulation output (station time series)
// ---------------------------------------------------------------------------

/// Read the elevation record of `station` from a model station output file.
///
/// Layout:
/// ```text
/// run description                          <- ignored
/// 96  3  3600.0  360  1                    <- tokens[2] = output interval (s),
///                                             tokens[3] = steps per output
/// 3600.0  360                              <- ignored
/// 1  0.1234E+00                            <- <station id> <elevation>
/// 2 -0.9999E+04
/// ...
/// ```
/// Rows of other stations (and the per-output time headers, whose first
/// token is never a station id) are skipped. Dry cells become `0.0`.
/// A station that never appears yields an empty series.
pub fn read_simulation(path: &Path, station: impl Display) -> Result<TimeSeries> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut lines = BufReader::new(file).lines();
    let mut next_line = || lines.next().transpose().map_err(|e| Error::io(path, e));

    if next_line()?.is_none() {
        return Err(Error::parse(path, 1, "empty file"));
    }
    let info = next_line()?.ok_or_else(|| Error::parse(path, 2, "missing time step header"))?;
    let tokens: Vec<&str> = info.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(Error::parse(
            path,
            2,
            format!("expected at least 4 header fields, found {}", tokens.len()),
        ));
    }
    let interval = parse_f64(tokens[2], path, 2)?;
    let skip = parse_f64(tokens[3], path, 2)?;
    let dt = interval / skip;
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::parse(
            path,
            2,
            format!("cannot derive a time step from interval {interval} over {skip} steps"),
        ));
    }
    next_line()?;

    let id = station.to_string();
    let mut elevation = Vec::new();
    let mut line_no = 3;
    while let Some(line) = next_line()? {
        line_no += 1;
        let mut fields = line.split_whitespace();
        if fields.next() != Some(id.as_str()) {
            continue;
        }
        let raw = fields
            .next()
            .ok_or_else(|| Error::parse(path, line_no, "station row has no elevation"))?;
        let value = parse_f64(raw, path, line_no)?;
        elevation.push(if value < DRY_THRESHOLD { 0.0 } else { value });
    }

    log::debug!(
        "{}: {} samples for station {id}",
        path.display(),
        elevation.len()
    );
    Ok(TimeSeries::uniform(dt * skip / SECONDS_PER_DAY, elevation))
}

fn parse_f64(token: &str, path: &Path, line: usize) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| Error::parse(path, line, format!("'{token}' is not a number")))
}

// ---------------------------------------------------------------------------
// Gauge CSV (NOAA CO-OPS export)
// ---------------------------------------------------------------------------

/// Read a tide-gauge CSV export.
///
/// Layout (header row ignored):
/// ```text
/// Date,Time (GMT),Predicted (m),Preliminary (m),Verified (m)
/// 2017/08/25,"00:00","0.21","-","0.312"
/// 2017/08/25,"01:00","0.25","0.298","-"
/// 2017/08/25,"02:00","0.27","-","-"
/// ```
/// The last column is used; when it is `-` the second-to-last column stands
/// in, and when both are `-` the sample is `NaN`. The sampling interval comes
/// from the time column of the first two rows. The first
/// `offset_hours` of record are dropped and the time axis restarts at zero.
pub fn read_gauge(path: &Path, offset_hours: f64) -> Result<TimeSeries> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut elevation = Vec::new();
    let mut stamps: Vec<NaiveTime> = Vec::with_capacity(2);

    for (row_no, result) in reader.records().enumerate() {
        let line = row_no + 2;
        let record = result.map_err(|e| Error::parse(path, line, e.to_string()))?;
        let n = record.len();
        if n < 2 {
            return Err(Error::parse(path, line, format!("expected at least 2 fields, found {n}")));
        }

        let last = unquote(&record[n - 1]);
        let value = if last == MISSING {
            let fallback = unquote(&record[n - 2]);
            if fallback == MISSING {
                f64::NAN
            } else {
                parse_f64(fallback, path, line)?
            }
        } else {
            parse_f64(last, path, line)?
        };
        elevation.push(value);

        if stamps.len() < 2 {
            let raw = unquote(&record[1]);
            let stamp = NaiveTime::parse_from_str(raw, "%H:%M").map_err(|e| {
                Error::parse(path, line, format!("time '{raw}' is not HH:MM: {e}"))
            })?;
            stamps.push(stamp);
        }
    }

    let [t1, t2] = stamps.as_slice() else {
        return Err(Error::TooFewRows {
            path: path.to_path_buf(),
        });
    };
    let seconds = (*t2 - *t1).num_seconds();
    if seconds <= 0 {
        return Err(Error::Interval {
            path: path.to_path_buf(),
            seconds,
        });
    }
    let dt = seconds as f64;

    let skip = (offset_hours.max(0.0) * 60.0 * 60.0 / dt).floor() as usize;
    let total = elevation.len();
    elevation.drain(..skip.min(total));

    log::debug!(
        "{}: {} samples every {seconds} s, {} dropped as warm-up",
        path.display(),
        elevation.len(),
        skip.min(total)
    );
    Ok(TimeSeries::uniform(dt / SECONDS_PER_DAY, elevation))
}

fn unquote(field: &str) -> &str {
    field.trim().trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    const SIM: &str = "\
Hurricane Ike test run
4 2 1800.0 180 1
1800.0 180
1 0.10
2 -99999.0
1800.0 180
1 0.20
2 0.55
3600.0 360
1 -99999.0
2 0.60
5400.0 540
1 0.40
2 0.65
";

    #[test]
    fn test_simulation_filters_station_and_builds_axis() {
        let f = write_tmp(SIM);
        let ts = read_simulation(f.path(), 1).unwrap();
        assert_eq!(ts.elevation, vec![0.10, 0.20, 0.0, 0.40]);
        assert_eq!(ts.len(), 4);
        let step = 1800.0 / SECONDS_PER_DAY;
        for (i, t) in ts.time.iter().enumerate() {
            assert!((t - i as f64 * step).abs() < 1e-12);
        }
    }

    #[test]
    fn test_simulation_dry_cells_are_zero() {
        let f = write_tmp(SIM);
        let ts = read_simulation(f.path(), "2").unwrap();
        assert_eq!(ts.elevation, vec![0.0, 0.55, 0.60, 0.65]);
    }

    #[test]
    fn test_simulation_unknown_station_is_empty() {
        let f = write_tmp(SIM);
        let ts = read_simulation(f.path(), 42).unwrap();
        assert!(ts.is_empty());
        assert!(ts.elevation.is_empty());
    }

    #[test]
    fn test_simulation_short_header_fails() {
        let f = write_tmp("title\n4 2\n");
        assert!(matches!(
            read_simulation(f.path(), 1),
            Err(Error::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_simulation_zero_steps_per_output_fails() {
        let f = write_tmp("run\n2 1 3600.0 0 1\nhdr\n1 0.5\n1 0.6\n");
        assert!(matches!(
            read_simulation(f.path(), 1),
            Err(Error::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_simulation_bad_elevation_fails() {
        let f = write_tmp("title\n1 1 60 1\nhdr\n1 abc\n");
        assert!(matches!(
            read_simulation(f.path(), 1),
            Err(Error::Parse { line: 4, .. })
        ));
    }

    #[test]
    fn test_gauge_interval_and_offset() {
        let mut csv = String::from("Date,Time (GMT),Predicted (m),Verified (m)\n");
        for h in 0..24 {
            csv.push_str(&format!("2008/09/12,\"{h:02}:00\",\"0.1\",\"{}.0\"\n", h));
        }
        let f = write_tmp(&csv);

        let ts = read_gauge(f.path(), 12.0).unwrap();
        assert_eq!(ts.len(), 12);
        assert_eq!(ts.elevation[0], 12.0);
        assert!(((ts.time[1] - ts.time[0]) * SECONDS_PER_DAY - 3600.0).abs() < 1e-9);

        let full = read_gauge(f.path(), 0.0).unwrap();
        assert_eq!(full.len(), 24);
    }

    #[test]
    fn test_gauge_warm_up_trim_rounds_down() {
        let mut csv = String::from("Date,Time,Verified\n");
        for k in 0..120 {
            csv.push_str(&format!(
                "2008/09/12,\"{:02}:{:02}\",\"{k}.0\"\n",
                k * 6 / 60,
                k * 6 % 60
            ));
        }
        let f = write_tmp(&csv);
        // 8.7 h of six-minute samples is 87 rows.
        let ts = read_gauge(f.path(), 8.7).unwrap();
        assert_eq!(ts.len(), 120 - 87);
        assert_eq!(ts.elevation[0], 87.0);
    }

    #[test]
    fn test_gauge_fallback_column_and_missing() {
        let f = write_tmp(
            "Date,Time,Predicted,Preliminary,Verified\n\
             2008/09/12,\"00:00\",\"0.1\",\"-\",\"0.5\"\n\
             2008/09/12,\"00:06\",\"0.1\",\"0.7\",\"-\"\n\
             2008/09/12,\"00:12\",\"0.1\",\"-\",\"-\"\n",
        );
        let ts = read_gauge(f.path(), 0.0).unwrap();
        assert_eq!(ts.elevation[0], 0.5);
        assert_eq!(ts.elevation[1], 0.7);
        assert!(ts.elevation[2].is_nan());
        assert!(((ts.time[1] - ts.time[0]) * SECONDS_PER_DAY - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_gauge_needs_two_rows() {
        let f = write_tmp("Date,Time,Verified\n2008/09/12,\"00:00\",\"0.5\"\n");
        assert!(matches!(
            read_gauge(f.path(), 0.0),
            Err(Error::TooFewRows { .. })
        ));
    }

    #[test]
    fn test_gauge_unparsable_value_fails() {
        let f = write_tmp(
            "Date,Time,Verified\n\
             2008/09/12,\"00:00\",\"0.5\"\n\
             2008/09/12,\"01:00\",\"n/a\"\n",
        );
        assert!(matches!(
            read_gauge(f.path(), 0.0),
            Err(Error::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_gauge_offset_past_end_is_empty() {
        let f = write_tmp(
            "Date,Time,Verified\n\
             2008/09/12,\"00:00\",\"0.5\"\n\
             2008/09/12,\"01:00\",\"0.6\"\n",
        );
        assert!(read_gauge(f.path(), 12.0).unwrap().is_empty());
    }
}
