// src/lib.rs

pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod sampler;
pub mod session;
pub mod statistics;
pub mod sweep;

pub use config::{DistributionKind, GenerationConfig, SweepSettings, MAX_RECURSION_DEPTH};
pub use error::{FplError, Result};
pub use generator::{generate, FractalGenerator};
pub use geometry::{Point2, Polyline, Segment};
pub use sampler::DeviationSampler;
pub use session::FplSession;
pub use statistics::TrialStatistics;
pub use sweep::{ChartSet, DeviationSweep, StatisticsEngine, SweepRange, SweepSeries};
