use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use eframe::egui;

use surge_plot::app::SurgeViewerApp;
use surge_plot::state::AppState;
use surge_plot::{PlotOptions, StormConfig};

/// Compare simulated storm-surge water levels against tide-gauge records.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Storm configuration (JSON)
    config: PathBuf,

    /// 1-based station index
    #[arg(long, conflicts_with = "name")]
    station: Option<usize>,

    /// Approximate station name, matched against the station list
    #[arg(long)]
    name: Option<String>,

    /// Simulation file to plot (repeatable); all configured files by default
    #[arg(long = "series", value_name = "FILE")]
    series: Vec<String>,

    /// Do not overlay the gauge record
    #[arg(long)]
    no_gauge: bool,

    /// Shift simulations by their mean difference from the gauge
    #[arg(long)]
    adjust_mean: bool,

    /// Fixed elevation shift in metres
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    shift: f64,

    /// Hours trimmed from the start of the gauge record
    #[arg(long, default_value_t = surge_plot::data::loader::DEFAULT_OFFSET_HOURS)]
    offset: f64,

    /// Time window in days
    #[arg(long, num_args = 2, value_names = ["T0", "T1"], allow_negative_numbers = true)]
    timeframe: Option<Vec<f64>>,

    /// Save the figure as <root>/<NAME>
    #[arg(long, value_name = "NAME")]
    save: Option<String>,

    /// Do not open the viewer window
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = StormConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let mut storm = config.into_storm().context("reading station list")?;

    let timeframe = match cli.timeframe.as_deref() {
        Some(&[t0, t1]) => Some((t0, t1)),
        Some(_) => bail!("--timeframe takes exactly two values"),
        None => None,
    };
    let options = PlotOptions {
        plot_gauge: !cli.no_gauge,
        adjust_mean: cli.adjust_mean,
        shift: cli.shift,
        offset_hours: cli.offset,
        timeframe,
    };
    let keys: Vec<&str> = cli.series.iter().map(String::as_str).collect();

    let station = if let Some(name) = &cli.name {
        let (found, _) = storm
            .plot_fuzzy(name, &keys, &options)
            .with_context(|| format!("plotting '{name}'"))?;
        println!("{name} -> {} {} (score {})", found.index, found.name, found.score);
        Some(found.index)
    } else if let Some(index) = cli.station {
        storm
            .plot(index, &keys, &options)
            .with_context(|| format!("plotting station {index}"))?;
        Some(index)
    } else {
        None
    };

    if let Some(fig) = storm.last_figure() {
        for line in &fig.lines {
            if let Some(stats) = &line.stats {
                println!("{}: {stats}", line.label);
            }
        }
    }

    if let Some(name) = &cli.save {
        if station.is_none() {
            bail!("--save needs --station or --name");
        }
        let path = storm.save(name).context("saving figure")?;
        println!("Saved {}", path.display());
    }

    if cli.headless {
        return Ok(());
    }

    let state = AppState::new(storm, station.unwrap_or(1), &cli.series, options);
    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Surge Plot – model vs gauge",
        native,
        Box::new(|_cc| Ok(Box::new(SurgeViewerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
