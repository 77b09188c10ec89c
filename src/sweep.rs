// src/sweep.rs

use log::{debug, error, info, warn};
use rand::Rng;

use crate::config::{DistributionKind, GenerationConfig, SweepSettings};
use crate::error::{FplError, Result};
use crate::generator::FractalGenerator;
use crate::geometry::Point2;
use crate::statistics::{average, TrialStatistics};

/// Evenly spaced parameter values `start + k * step` for `k` in `0..count`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepRange {
    pub start: f64,
    pub step: f64,
    pub count: usize,
}

impl SweepRange {
    pub fn new(start: f64, step: f64, count: usize) -> Self {
        Self { start, step, count }
    }

    /// `count` values from `start` to `end` inclusive.
    pub fn linspace(start: f64, end: f64, count: usize) -> Self {
        let step = if count > 1 {
            (end - start) / (count - 1) as f64
        } else {
            0.0
        };
        Self { start, step, count }
    }

    /// The spread range the charts walk for the active distribution.
    pub fn for_spread(config: &GenerationConfig, settings: &SweepSettings) -> Self {
        match config.distribution {
            DistributionKind::Uniform => {
                Self::up_to(config.uniform_half_width, settings.uniform_step)
            }
            DistributionKind::Normal => Self::up_to(config.normal_std_dev, settings.normal_step),
        }
    }

    // `step, 2*step, ...` up to and including `end`.
    fn up_to(end: f64, step: f64) -> Self {
        // Small slack so that e.g. 0.2 / 0.01 still counts the 0.2 point itself.
        let count = (end / step + 1e-6).floor();
        let count = if count > 0.0 { count as usize } else { 0 };
        Self::new(step, step, count)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(move |k| self.start + k as f64 * self.step)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// One chart line: `(parameter, averaged statistic)` in sweep order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepSeries {
    points: Vec<(f64, f64)>,
}

impl SweepSeries {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn push(&mut self, parameter: f64, value: f64) {
        self.points.push((parameter, value));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_pairs(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn params(&self) -> Vec<f64> {
        self.points.iter().map(|&(x, _)| x).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, y)| y).collect()
    }
}

/// Averaged statistics over a spread sweep.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviationSweep {
    pub max_deviation: SweepSeries,
    pub mean_deviation: SweepSeries,
    pub elongation: SweepSeries,
    /// `log2` of the averaged elongation at each parameter.
    pub log2_elongation: SweepSeries,
}

impl DeviationSweep {
    pub fn len(&self) -> usize {
        self.max_deviation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.max_deviation.is_empty()
    }
}

/// Both chart datasets: statistics against spread, and `log2(elongation)` against depth.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSet {
    pub deviation: DeviationSweep,
    pub depth_log2_elongation: SweepSeries,
}

/// Runs repeated trials and averages them. Fails fast on the first bad trial.
#[derive(Clone, Copy, Debug)]
pub struct StatisticsEngine {
    trials_per_point: usize,
}

impl StatisticsEngine {
    pub fn new(trials_per_point: usize) -> Result<Self> {
        if trials_per_point == 0 {
            return Err(FplError::InvalidConfig(
                "at least one trial per sweep point is required".to_string(),
            ));
        }
        Ok(Self { trials_per_point })
    }

    pub fn trials_per_point(&self) -> usize {
        self.trials_per_point
    }

    /// Generates `source` once per trial and returns every trial's statistics.
    pub fn run_trials<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        source: &[Point2],
        config: &GenerationConfig,
        parameter: f64,
    ) -> Result<Vec<TrialStatistics>> {
        if source.len() != 2 {
            return Err(FplError::NotASegment {
                actual: source.len(),
            });
        }
        let generator = FractalGenerator::new(config.clone())?;

        let mut trials = Vec::with_capacity(self.trials_per_point);
        for trial in 0..self.trials_per_point {
            let fpl = generator.assemble(rng, source)?;
            let stats = TrialStatistics::compute(source, &fpl)?;
            trials.push(check_trial(stats, parameter, trial)?);
        }
        Ok(trials)
    }

    /// Sweeps the active distribution's spread over `range`.
    pub fn run_sweep<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        source: &[Point2],
        range: SweepRange,
        config: &GenerationConfig,
    ) -> Result<DeviationSweep> {
        if range.is_empty() {
            warn!("Empty sweep range; nothing to chart");
        }

        let mut sweep = DeviationSweep::default();
        for spread in range.values() {
            let trial_config = config.clone().with_spread(spread);
            let trials = self.run_trials(rng, source, &trial_config, spread)?;

            let max: Vec<f64> = trials.iter().map(|t| t.max_deviation).collect();
            let mean: Vec<f64> = trials.iter().map(|t| t.mean_deviation).collect();
            let elong: Vec<f64> = trials.iter().map(|t| t.elongation).collect();
            let avg_elong = average(&elong);

            sweep.max_deviation.push(spread, average(&max));
            sweep.mean_deviation.push(spread, average(&mean));
            sweep.elongation.push(spread, avg_elong);
            sweep.log2_elongation.push(spread, avg_elong.log2());
            debug!("spread {:.4}: avg elongation {:.6}", spread, avg_elong);
        }
        Ok(sweep)
    }

    /// Averages `log2(elongation)` for every depth in `1..=max_depth` at the configured spread.
    pub fn run_depth_sweep<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        source: &[Point2],
        max_depth: u32,
        config: &GenerationConfig,
    ) -> Result<SweepSeries> {
        let mut series = SweepSeries::new();
        for depth in 1..=max_depth {
            let trial_config = config.clone().with_depth(depth);
            let trials = self.run_trials(rng, source, &trial_config, depth as f64)?;
            let log2_elong: Vec<f64> = trials.iter().map(|t| t.elongation.log2()).collect();
            series.push(depth as f64, average(&log2_elong));
        }
        Ok(series)
    }

    /// Builds both chart datasets. Nothing is returned unless every trial succeeds.
    pub fn run_charts<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        source: &[Point2],
        config: &GenerationConfig,
        settings: &SweepSettings,
    ) -> Result<ChartSet> {
        config.validate()?;
        settings.validate()?;

        let range = SweepRange::for_spread(config, settings);
        info!(
            "Running chart sweeps: {} spread values, depths 1..={}, {} trials each",
            range.count, config.recursion_depth, self.trials_per_point
        );

        let deviation = self.run_sweep(rng, source, range, config)?;
        let depth_log2_elongation =
            self.run_depth_sweep(rng, source, config.recursion_depth, config)?;
        Ok(ChartSet {
            deviation,
            depth_log2_elongation,
        })
    }
}

// Sanity guard: `TrialStatistics::compute` already rejects the inputs that used to come
// back as all zeros, so this only trips if that contract is broken.
fn check_trial(stats: TrialStatistics, parameter: f64, trial: usize) -> Result<TrialStatistics> {
    if stats.is_degenerate() {
        error!(
            "Sweep aborted: trial {} at parameter {} produced all-zero statistics",
            trial, parameter
        );
        return Err(FplError::DegenerateTrial { parameter, trial });
    }
    Ok(stats)
}
