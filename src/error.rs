//! Error types for the simulation and its configuration layer

use thiserror::Error;

/// Everything the simulation can report back to its host
#[derive(Debug, Error)]
pub enum SimError {
    /// Fire requested with an empty magazine
    #[error("out of ammo")]
    OutOfAmmo,
    /// Fire requested after every target was destroyed
    #[error("game over: no targets remain")]
    GameOver,
    /// A body was constructed with a radius that would break scoring
    #[error("invalid body radius: {0}")]
    InvalidRadius(f32),
    /// Configuration failed validation
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
