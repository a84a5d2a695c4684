use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration file: {0}")]
    ConfigFile(String),

    #[error("Invalid gain curve: {0}")]
    Curve(String),

    #[error("Coefficient {index} out of range: {value} exceeds ±{limit}")]
    CoefficientOverflow { index: usize, value: i64, limit: i64 },

    #[error("Coefficient {index} is not finite: {value}")]
    NonFiniteCoefficient { index: usize, value: f64 },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DesignError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DesignError>;
