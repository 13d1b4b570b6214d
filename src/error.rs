use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Library error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum Error {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}, line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("station index {index} out of range (1..={len})")]
    StationIndex { index: usize, len: usize },

    #[error("station list is empty")]
    EmptyStationList,

    #[error("{path}: need at least two data rows to derive the sampling interval")]
    TooFewRows { path: PathBuf },

    #[error("{path}: sampling interval must be positive, got {seconds} s")]
    Interval { path: PathBuf, seconds: i64 },

    #[error("unknown series '{0}'")]
    UnknownSeries(String),

    #[error("nothing has been plotted yet")]
    NoFigure,

    #[error("unsupported image format '{0}' (expected png, jpg, jpeg, bmp or svg)")]
    UnsupportedFormat(String),

    #[error("rendering {path}: {message}")]
    Render { path: PathBuf, message: String },

    #[error("config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
