use std::fs;
use std::path::Path;

use surge_plot::{Error, PlotOptions, SeriesKind, StormConfig};

fn fixture_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("storm.json");
    let config = format!(
        r#"{{
            "root": "{}",
            "station_list": "stations.txt",
            "series": [{{ "file": "fort.61", "label": "ADCIRC" }}]
        }}"#,
        fixture_dir().display().to_string().replace('\\', "/")
    );
    fs::write(&path, config).unwrap();
    path
}

#[test]
fn test_config_to_figure_with_mean_adjustment() {
    let tmp = tempfile::tempdir().unwrap();
    let mut storm = StormConfig::load(write_config(tmp.path()))
        .unwrap()
        .into_storm()
        .unwrap();

    let options = PlotOptions {
        adjust_mean: true,
        ..PlotOptions::default()
    };
    let fig = storm.plot(2, &[], &options).unwrap();
    assert_eq!(fig.title, "Manchester");
    assert!(fig.has_gauge());

    let sim = fig
        .lines
        .iter()
        .find(|l| l.kind == SeriesKind::Simulation)
        .unwrap();
    // The gauge sits 0.15 m above the run, up to rounding in the files.
    let adj = sim.mean_adjustment.unwrap();
    assert!((adj - 0.15).abs() < 1e-3, "adjustment {adj}");
    assert!(sim.label.starts_with("ADCIRC, adjustment: "));
}

#[test]
fn test_station_without_gauge_still_plots() {
    let tmp = tempfile::tempdir().unwrap();
    let mut storm = StormConfig::load(write_config(tmp.path()))
        .unwrap()
        .into_storm()
        .unwrap();

    let fig = storm.plot(1, &[], &PlotOptions::default()).unwrap();
    assert!(!fig.has_gauge());
    assert_eq!(fig.lines.len(), 1);
    assert_eq!(fig.lines[0].points.len(), 48);
    assert_eq!(fig.lines[0].points[0][1], 0.0);
}

#[test]
fn test_fuzzy_plot_and_unknown_station() {
    let tmp = tempfile::tempdir().unwrap();
    let mut storm = StormConfig::load(write_config(tmp.path()))
        .unwrap()
        .into_storm()
        .unwrap();

    let (found, fig) = storm
        .plot_fuzzy("manchster", &[], &PlotOptions::default())
        .unwrap();
    assert_eq!(found.index, 2);
    assert!(found.score >= 80);
    assert_eq!(fig.title, "Manchester");

    assert!(matches!(
        storm.plot(4, &[], &PlotOptions::default()),
        Err(Error::StationIndex { index: 4, len: 3 })
    ));
}
