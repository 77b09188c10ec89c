// src/sampler.rs

use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::{DistributionKind, GenerationConfig};
use crate::error::{FplError, Result};

/// Draws the scalar that scales a midpoint's perpendicular offset.
#[derive(Clone, Copy, Debug)]
pub enum DeviationSampler {
    Normal(Normal<f64>),
    Uniform(Uniform<f64>),
}

impl DeviationSampler {
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        match config.distribution {
            DistributionKind::Normal => {
                let sigma = config.normal_std_dev;
                if !sigma.is_finite() || sigma <= 0.0 {
                    return Err(FplError::InvalidConfig(format!(
                        "normal std dev must be positive, got {}",
                        sigma
                    )));
                }
                Normal::new(0.0, sigma)
                    .map(DeviationSampler::Normal)
                    .map_err(|e| FplError::InvalidConfig(format!("normal distribution: {}", e)))
            }
            DistributionKind::Uniform => {
                let s = config.uniform_half_width;
                if !s.is_finite() || s < 0.0 {
                    return Err(FplError::InvalidConfig(format!(
                        "uniform half width must be non-negative, got {}",
                        s
                    )));
                }
                // Inclusive so that a zero half width still builds (it always yields zero).
                Ok(DeviationSampler::Uniform(Uniform::new_inclusive(-s, s)))
            }
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            DeviationSampler::Normal(dist) => dist.sample(rng),
            DeviationSampler::Uniform(dist) => dist.sample(rng),
        }
    }
}
