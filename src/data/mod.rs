/// Data layer: core types, file readers, station lookup and series alignment.
///
/// Architecture:
/// ```text
///  stations.txt      fort.61 / *.out        gauge_N.csv
///        │                 │                     │
///        ▼                 ▼                     ▼
///   ┌──────────┐     ┌────────────────────────────────┐
///   │ stations │     │            loader              │  parse file → TimeSeries
///   └──────────┘     └────────────────────────────────┘
///        │  fuzzy                    │
///        ▼                           ▼
///   station index            ┌──────────┐
///                            │  align   │  window, interpolate, bias
///                            └──────────┘
/// ```

pub mod align;
pub mod fuzzy;
pub mod loader;
pub mod model;
pub mod stations;
