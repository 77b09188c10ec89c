// src/config.rs

use crate::error::{FplError, Result};

/// Deepest subdivision accepted. Wide spreads stop edges from shrinking below the minimum
/// length, so the depth alone bounds the `2^depth` points per segment.
pub const MAX_RECURSION_DEPTH: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    Normal,
    Uniform,
}

/// Parameters for one generation call. Held immutably while a polyline or sweep is built.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    pub distribution: DistributionKind,
    pub recursion_depth: u32,
    /// Edges shorter than this are not subdivided any further.
    pub min_segment_length: f64,
    pub normal_std_dev: f64,
    pub uniform_half_width: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            distribution: DistributionKind::Uniform,
            recursion_depth: 2,
            min_segment_length: 2.0,
            normal_std_dev: 0.2,
            uniform_half_width: 0.30,
        }
    }
}

impl GenerationConfig {
    pub fn normal(std_dev: f64) -> Self {
        Self {
            distribution: DistributionKind::Normal,
            normal_std_dev: std_dev,
            ..Self::default()
        }
    }

    pub fn uniform(half_width: f64) -> Self {
        Self {
            distribution: DistributionKind::Uniform,
            uniform_half_width: half_width,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.recursion_depth = depth;
        self
    }

    pub fn with_min_segment_length(mut self, length: f64) -> Self {
        self.min_segment_length = length;
        self
    }

    /// Spread of the active distribution: std dev for `Normal`, half width for `Uniform`.
    pub fn spread(&self) -> f64 {
        match self.distribution {
            DistributionKind::Normal => self.normal_std_dev,
            DistributionKind::Uniform => self.uniform_half_width,
        }
    }

    pub fn with_spread(mut self, spread: f64) -> Self {
        match self.distribution {
            DistributionKind::Normal => self.normal_std_dev = spread,
            DistributionKind::Uniform => self.uniform_half_width = spread,
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.recursion_depth == 0 || self.recursion_depth > MAX_RECURSION_DEPTH {
            return Err(FplError::InvalidConfig(format!(
                "recursion depth must be between 1 and {}, got {}",
                MAX_RECURSION_DEPTH, self.recursion_depth
            )));
        }
        if !self.min_segment_length.is_finite() || self.min_segment_length <= 0.0 {
            return Err(FplError::InvalidConfig(format!(
                "minimum segment length must be positive, got {}",
                self.min_segment_length
            )));
        }
        // Only the active distribution's spread is checked. A zero uniform width is a flat line.
        match self.distribution {
            DistributionKind::Normal => {
                if !self.normal_std_dev.is_finite() || self.normal_std_dev <= 0.0 {
                    return Err(FplError::InvalidConfig(format!(
                        "normal std dev must be positive, got {}",
                        self.normal_std_dev
                    )));
                }
            }
            DistributionKind::Uniform => {
                if !self.uniform_half_width.is_finite() || self.uniform_half_width < 0.0 {
                    return Err(FplError::InvalidConfig(format!(
                        "uniform half width must be non-negative, got {}",
                        self.uniform_half_width
                    )));
                }
            }
        }
        Ok(())
    }
}

/// How the chart sweeps walk the spread parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepSettings {
    pub trials_per_point: usize,
    /// Uniform mode sweeps `step, 2*step, ...` up to the configured half width.
    pub uniform_step: f64,
    /// Normal mode sweeps from `normal_step` up to the configured std dev.
    pub normal_step: f64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            trials_per_point: 25,
            uniform_step: 0.01,
            normal_step: 0.01,
        }
    }
}

impl SweepSettings {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials_per_point = trials;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.trials_per_point == 0 {
            return Err(FplError::InvalidConfig(
                "at least one trial per sweep point is required".to_string(),
            ));
        }
        for (name, step) in [("uniform", self.uniform_step), ("normal", self.normal_step)] {
            if !step.is_finite() || step <= 0.0 {
                return Err(FplError::InvalidConfig(format!(
                    "{} sweep step must be positive, got {}",
                    name, step
                )));
            }
        }
        Ok(())
    }
}
