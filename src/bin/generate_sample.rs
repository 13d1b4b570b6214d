use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use surge_plot::{PlotStyle, SeriesSpec, StormConfig};

/// Output interval of the synthetic model runs, seconds.
const INTERVAL: f64 = 1800.0;
/// Model time steps per output.
const STEPS: u32 = 180;
/// Length of the synthetic storm, hours.
const HOURS: usize = 96;
/// Gauge record starts this many hours before the model.
const LEAD_HOURS: usize = 12;

struct Station {
    name: &'static str,
    lon: f64,
    lat: f64,
    noaa_id: u32,
    /// Peak surge (m) and its time (h).
    peak: (f64, f64),
    has_gauge: bool,
}

const STATIONS: [Station; 3] = [
    Station { name: "Morgans Point", lon: -94.985, lat: 29.681667, noaa_id: 8770613, peak: (3.2, 54.0), has_gauge: true },
    Station { name: "Manchester", lon: -95.266667, lat: 29.72, noaa_id: 8770777, peak: (2.6, 56.0), has_gauge: false },
    Station { name: "Rollover Pass", lon: -94.513333, lat: 29.515, noaa_id: 8770971, peak: (3.8, 50.0), has_gauge: true },
];

/// Water level (m) at `hour` for a station: semidiurnal tide plus a
/// Gaussian surge hump.
fn water_level(st: &Station, hour: f64, surge_scale: f64) -> f64 {
    let tide = 0.3 * (2.0 * std::f64::consts::PI * hour / 12.42).sin();
    let (amp, at) = st.peak;
    let surge = amp * surge_scale * (-(hour - at).powi(2) / (2.0 * 8.0_f64.powi(2))).exp();
    tide + surge
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn station_list() -> String {
    let mut out = format!("NSTAE {}\n", STATIONS.len());
    for (i, st) in STATIONS.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<3} {:.6} {:.6} ! {}  ! NOAA_NOS ! {}",
            i + 1,
            st.lon,
            st.lat,
            st.noaa_id,
            st.name
        );
    }
    out
}

/// Model station output; `dry` marks a station that dries out for the
/// first hours of the run.
fn simulation(title: &str, surge_scale: f64, dry: Option<usize>) -> String {
    let outputs = HOURS * 2;
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{outputs} {} {INTERVAL:.1} {STEPS} 1", STATIONS.len());
    for k in 0..outputs {
        let seconds = (k + 1) as f64 * INTERVAL;
        let _ = writeln!(out, "{seconds:.7E} {}", (k as u32 + 1) * STEPS);
        let hour = k as f64 * INTERVAL / 3600.0;
        for (i, st) in STATIONS.iter().enumerate() {
            let value = match dry {
                Some(d) if d == i + 1 && hour < 6.0 => -99999.0,
                _ => water_level(st, hour, surge_scale),
            };
            let _ = writeln!(out, "{:>12} {value:.7E}", i + 1);
        }
    }
    out
}

/// Hourly NOAA-style CSV. Some hours only have a preliminary value and a
/// few have nothing at all.
fn gauge(st: &Station, rng: &mut SimpleRng) -> String {
    let mut out = String::from("Date,Time (GMT),Predicted (m),Preliminary (m),Verified (m)\n");
    for h in 0..(HOURS + LEAD_HOURS) {
        let hour = h as f64 - LEAD_HOURS as f64;
        let day = 11 + h / 24;
        let level = water_level(st, hour, 1.0) + 0.15 + rng.gauss(0.0, 0.03);
        let predicted = 0.3 * (2.0 * std::f64::consts::PI * hour / 12.42).sin();
        let (prelim, verified) = match h % 29 {
            7 => (format!("\"{level:.3}\""), "\"-\"".to_string()),
            19 => ("\"-\"".to_string(), "\"-\"".to_string()),
            _ => ("\"-\"".to_string(), format!("\"{level:.3}\"")),
        };
        let _ = writeln!(
            out,
            "2008/09/{day:02},\"{:02}:00\",\"{predicted:.3}\",{prelim},{verified}",
            h % 24
        );
    }
    out
}

fn write(dir: &Path, name: &str, contents: &str) -> Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "sample_storm".into()));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);

    write(&dir, "stations.txt", &station_list())?;
    write(&dir, "fort.61", &simulation("Ike synthetic, waves", 1.0, Some(2)))?;
    write(&dir, "fort.61.nowave", &simulation("Ike synthetic, no waves", 0.85, Some(2)))?;
    for (i, st) in STATIONS.iter().enumerate() {
        if st.has_gauge {
            write(&dir, &format!("gauge_{}.csv", i + 1), &gauge(st, &mut rng))?;
        }
    }

    let config = StormConfig {
        root: PathBuf::from("."),
        station_list: PathBuf::from("stations.txt"),
        series: vec![
            SeriesSpec::new("fort.61", "With waves"),
            SeriesSpec::new("fort.61.nowave", "Without waves"),
        ],
        style: PlotStyle::default(),
    };
    let json = serde_json::to_string_pretty(&config).context("serializing config")?;
    write(&dir, "storm.json", &json)?;

    println!(
        "Wrote {} stations, 2 model runs and gauge records to {}",
        STATIONS.len(),
        dir.display()
    );
    Ok(())
}
