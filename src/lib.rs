//! Compare simulated storm-surge water levels with tide-gauge records.
//!
//! A [`Storm`] ties together a storm directory, the simulation outputs in it
//! and the station list. [`Storm::plot`] builds a [`Figure`] for one station,
//! which can be shown in the viewer ([`app::SurgeViewerApp`]) or written to
//! disk with [`Storm::save`].

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod state;
pub mod storm;
pub mod style;
pub mod ui;

pub use config::StormConfig;
pub use data::model::{ComparisonStats, Figure, SeriesKind, SeriesLine, TimeSeries};
pub use data::stations::{FuzzyMatch, StationList};
pub use error::{Error, Result};
pub use storm::{PlotOptions, SeriesSpec, Storm};
pub use style::PlotStyle;
