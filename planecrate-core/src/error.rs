//! Error types for planecrate

use thiserror::Error;

/// Main error type for planecrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Insufficient points: need at least {required}, got {available}")]
    InsufficientPoints { required: usize, available: usize },

    #[error("Sample size {requested} exceeds population of {population} points")]
    SampleSizeExceedsPopulation { requested: usize, population: usize },

    #[error("Sampling exhausted: drew only {drawn} of {requested} distinct indices")]
    SamplingExhausted { requested: usize, drawn: usize },

    #[error("Mask of length {mask_len} does not match point set of length {set_len}")]
    MaskSizeMismatch { mask_len: usize, set_len: usize },

    #[error("Insufficient remaining points: {remaining} left, {required} needed per sample")]
    InsufficientRemainingPoints { required: usize, remaining: usize },

    #[error("No consensus plane found after {trials} trials")]
    ConsensusNotFound { trials: usize },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for planecrate operations
pub type Result<T> = std::result::Result<T, Error>;
