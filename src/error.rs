//! Crate error and result types.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced at construction time.
///
/// The simulation itself never fails once built; anything that could go
/// wrong is rejected up front when a config or particle is created.
#[derive(Debug, Error)]
pub enum Error {
    /// A `SimConfig` field is out of range or non-finite.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A particle parameter is out of range or non-finite.
    #[error("invalid particle: {0}")]
    InvalidParticle(String),

    /// Propagated I/O errors (config files read by hosts).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Config files that fail to parse.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
