// src/session.rs

use log::{debug, error};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::{GenerationConfig, SweepSettings};
use crate::error::{FplError, Result};
use crate::generator::FractalGenerator;
use crate::geometry::{Point2, Polyline};
use crate::sweep::{ChartSet, StatisticsEngine};

/// Caller-owned state for an interactive front end: the placed points, the current
/// parameters and the last generated polyline and charts.
///
/// Any parameter change regenerates an existing result, so stale output is never kept.
pub struct FplSession<R: Rng = ThreadRng> {
    points: Vec<Point2>,
    config: GenerationConfig,
    sweep: SweepSettings,
    polyline: Option<Polyline>,
    charts: Option<ChartSet>,
    rng: R,
}

impl FplSession<ThreadRng> {
    pub fn new(config: GenerationConfig, sweep: SweepSettings) -> Result<Self> {
        Self::with_rng(config, sweep, rand::thread_rng())
    }
}

impl<R: Rng> FplSession<R> {
    pub fn with_rng(config: GenerationConfig, sweep: SweepSettings, rng: R) -> Result<Self> {
        config.validate()?;
        sweep.validate()?;
        Ok(Self {
            points: Vec::new(),
            config,
            sweep,
            polyline: None,
            charts: None,
            rng,
        })
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn sweep_settings(&self) -> &SweepSettings {
        &self.sweep
    }

    pub fn polyline(&self) -> Option<&Polyline> {
        self.polyline.as_ref()
    }

    pub fn charts(&self) -> Option<&ChartSet> {
        self.charts.as_ref()
    }

    pub fn add_point(&mut self, point: Point2) {
        self.points.push(point);
    }

    pub fn add_segment(&mut self, a: Point2, b: Point2) {
        self.points.push(a);
        self.points.push(b);
    }

    pub fn clear_polyline(&mut self) {
        self.polyline = None;
        self.charts = None;
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
        self.clear_polyline();
    }

    pub fn set_config(&mut self, config: GenerationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.refresh()
    }

    pub fn set_sweep_settings(&mut self, sweep: SweepSettings) -> Result<()> {
        sweep.validate()?;
        self.sweep = sweep;
        self.refresh()
    }

    /// Regenerates the polyline and, for a single source segment, the charts.
    pub fn generate(&mut self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(FplError::InsufficientInput {
                required: 2,
                actual: self.points.len(),
            });
        }
        self.clear_polyline();

        let generator = FractalGenerator::new(self.config.clone())?;
        let fpl = generator.assemble(&mut self.rng, &self.points)?;
        if fpl.is_empty() {
            error!("Generation produced no points");
            return Err(FplError::InsufficientInput {
                required: 1,
                actual: 0,
            });
        }
        self.polyline = Some(fpl);

        if self.points.len() != 2 {
            debug!(
                "Skipping charts: {} source points is not a single segment",
                self.points.len()
            );
            return Ok(());
        }

        let engine = StatisticsEngine::new(self.sweep.trials_per_point)?;
        match engine.run_charts(&mut self.rng, &self.points, &self.config, &self.sweep) {
            Ok(charts) => {
                self.charts = Some(charts);
                Ok(())
            }
            Err(e) => {
                error!("Chart sweep failed: {}", e);
                Err(e)
            }
        }
    }

    // Only results that were already shown get rebuilt.
    fn refresh(&mut self) -> Result<()> {
        if self.polyline.is_some() {
            self.generate()
        } else {
            Ok(())
        }
    }
}
