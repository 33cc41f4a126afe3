//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid dimensions: {width}x{depth} (both must be positive)")]
    InvalidDimensions { width: i64, depth: i64 },

    #[error("Shape mismatch: alive matrix is {alive:?}, interval matrix is {intervals:?}")]
    ShapeMismatch {
        alive: (usize, usize),
        intervals: (usize, usize),
    },

    #[error("Invalid interval {interval} for {owner} (must be positive)")]
    InvalidInterval { owner: String, interval: i64 },

    #[error("Position ({x}, {y}) is outside a {width}x{depth} grid")]
    OutOfRange {
        x: i32,
        y: i32,
        width: usize,
        depth: usize,
    },

    #[error("Cell ({x}, {y}) is already occupied")]
    Occupied { x: i32, y: i32 },

    #[error("Malformed coordinates: {0}")]
    MalformedCoordinates(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
