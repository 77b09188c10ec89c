// src/error.rs

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FplError {
    /// Too few source points to form a segment, or too few generated points for statistics.
    #[error("insufficient input: need at least {required} points, got {actual}")]
    InsufficientInput { required: usize, actual: usize },

    /// Statistics are only defined against a single source segment.
    #[error("statistics need exactly one source segment (2 points), got {actual} points")]
    NotASegment { actual: usize },

    /// A sweep trial came back with max, mean and elongation all zero.
    #[error("degenerate trial {trial} at parameter {parameter}: all statistics are zero")]
    DegenerateTrial { parameter: f64, trial: usize },

    #[error("elongation undefined: polyline endpoints coincide at ({x}, {y})")]
    UndefinedElongation { x: f64, y: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FplError>;
