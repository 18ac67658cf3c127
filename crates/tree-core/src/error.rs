//! Crate-level error type.
//!
//! Per-frame operations never fail: detection gaps, selection misses and
//! re-entrant focus requests are absorbed as no-ops. Errors only surface from
//! configuration I/O and from parsing raw landmark lists.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("malformed hand: expected {expected} landmarks, found {found}")]
    MalformedLandmarks { expected: usize, found: usize },
    #[error("landmark {0} is not finite")]
    NonFiniteLandmark(usize),
}

pub type Result<T> = std::result::Result<T, TreeError>;
