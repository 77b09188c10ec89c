// src/statistics.rs

use crate::error::{FplError, Result};
use crate::geometry::Point2;

/// Shape statistics of one generated polyline against its source segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrialStatistics {
    pub max_deviation: f64,
    pub mean_deviation: f64,
    pub elongation: f64,
}

impl TrialStatistics {
    /// Deviations are measured vertically from the source segment's mid height.
    pub fn compute(source: &[Point2], polyline: &[Point2]) -> Result<Self> {
        if source.len() != 2 {
            return Err(FplError::NotASegment {
                actual: source.len(),
            });
        }
        if polyline.len() < 2 {
            return Err(FplError::InsufficientInput {
                required: 2,
                actual: polyline.len(),
            });
        }

        let baseline_y = (source[0].y + source[1].y) / 2.0;
        Ok(Self {
            max_deviation: max_deviation(polyline, baseline_y),
            mean_deviation: mean_deviation(polyline, baseline_y),
            elongation: elongation(polyline)?,
        })
    }

    pub fn is_degenerate(&self) -> bool {
        self.max_deviation == 0.0 && self.mean_deviation == 0.0 && self.elongation == 0.0
    }
}

pub fn max_deviation(points: &[Point2], baseline_y: f64) -> f64 {
    points
        .iter()
        .map(|p| (p.y - baseline_y).abs())
        .fold(0.0, f64::max)
}

pub fn mean_deviation(points: &[Point2], baseline_y: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points.iter().map(|p| (p.y - baseline_y).abs()).sum();
    sum / points.len() as f64
}

/// Path length over chord length. Undefined when the path closes on itself.
pub fn elongation(points: &[Point2]) -> Result<f64> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(FplError::InsufficientInput {
                required: 2,
                actual: points.len(),
            })
        }
    };

    let chord = first.distance(&last);
    if chord == 0.0 {
        return Err(FplError::UndefinedElongation {
            x: first.x,
            y: first.y,
        });
    }

    let path: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    Ok(path / chord)
}

pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
