// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Degenerate polygon: {reason}")]
    DegeneratePolygon { reason: String },

    #[error("Concave hull construction failed: {reason}")]
    HullConstruction { reason: String },

    #[error("Invalid ring for boolean operation: {reason}")]
    InvalidRing { reason: String },

    #[error("Polygon capacity exceeded: maximum {maximum}, would hold {actual}")]
    CapacityExceeded { maximum: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type DrawResult<T> = Result<T, DrawError>;
