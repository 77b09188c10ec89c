// src/generator.rs

use log::{debug, warn};
use rand::Rng;

use crate::config::GenerationConfig;
use crate::error::{FplError, Result};
use crate::geometry::{Point2, Polyline};
use crate::sampler::DeviationSampler;

/// Builds fractal polylines by recursive midpoint displacement.
///
/// Holds only read-only configuration; the random source is passed into every call.
#[derive(Clone, Debug)]
pub struct FractalGenerator {
    config: GenerationConfig,
    sampler: DeviationSampler,
}

impl FractalGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let sampler = DeviationSampler::from_config(&config)?;
        Ok(Self { config, sampler })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Extends `path` from its last point towards `next`, displacing midpoints until
    /// `depth` runs out or the edge is shorter than the minimum segment length.
    ///
    /// `path` is an append-only log: every call sees it exactly as its caller left it.
    /// An empty `path` has no origin, so `next` is simply appended.
    pub fn subdivide<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mut path: Polyline,
        next: Point2,
        depth: u32,
    ) -> Polyline {
        let a = match path.last() {
            Some(&a) => a,
            None => {
                path.push(next);
                return path;
            }
        };
        let b = next;

        let v = b - a;
        if depth == 0 || v.length() < self.config.min_segment_length {
            path.push(b);
            return path;
        }

        let c = (a + b) / 2.0;
        // Not normalized: the offset scales with the edge it splits.
        let perp = v.rotate(90.0);
        let rf = self.sampler.sample(rng);
        let d = c + perp * rf;

        // Both halves share the decremented budget.
        let depth = depth - 1;
        let path = self.subdivide(rng, path, d, depth);
        self.subdivide(rng, path, b, depth)
    }

    /// Fractal approximation of the single segment `a -> b` at the configured depth.
    pub fn subdivide_segment<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        a: Point2,
        b: Point2,
    ) -> Polyline {
        let capacity = (1usize << self.config.recursion_depth.min(12)) + 1;
        let mut path = Polyline::with_capacity(capacity);
        path.push(a);
        self.subdivide(rng, path, b, self.config.recursion_depth)
    }

    /// Generates every `(a, b)` pair of `source` and stitches the results into one polyline.
    ///
    /// A trailing unpaired point is ignored.
    pub fn assemble<R: Rng + ?Sized>(&self, rng: &mut R, source: &[Point2]) -> Result<Polyline> {
        if source.len() < 2 {
            return Err(FplError::InsufficientInput {
                required: 2,
                actual: source.len(),
            });
        }
        if source.len() % 2 != 0 {
            warn!(
                "Odd number of source points ({}); ignoring the trailing point",
                source.len()
            );
        }

        let mut fpl = Polyline::new();
        for pair in source.chunks_exact(2) {
            let arm = self.subdivide_segment(rng, pair[0], pair[1]);
            let arm = arm.points();

            for (n, &point) in arm.iter().enumerate() {
                if fpl.last() == Some(&point) {
                    continue;
                }

                // The arm's end point is kept unless it repeats the previous one.
                if n + 1 >= arm.len() {
                    fpl.push(point);
                    break;
                }

                if Self::is_source_edge(source, point, arm[n + 1]) {
                    continue;
                }

                fpl.push(point);
            }
        }

        debug!(
            "Assembled {} points from {} source segments (depth {})",
            fpl.len(),
            source.len() / 2,
            self.config.recursion_depth
        );
        Ok(fpl)
    }

    // True when `p` and `q` sit next to each other in `source`, i.e. the arm reproduced an
    // untouched input edge. Only reachable when an arm was not subdivided at all.
    fn is_source_edge(source: &[Point2], p: Point2, q: Point2) -> bool {
        let ia = source.iter().position(|s| *s == p);
        let ib = source.iter().position(|s| *s == q);
        match (ia, ib) {
            (Some(ia), Some(ib)) => ia + 1 == ib,
            _ => false,
        }
    }
}

/// One-shot generation with the thread-local, entropy-seeded random source.
pub fn generate(source: &[Point2], config: &GenerationConfig) -> Result<Polyline> {
    let generator = FractalGenerator::new(config.clone())?;
    generator.assemble(&mut rand::thread_rng(), source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat_generator(depth: u32) -> FractalGenerator {
        FractalGenerator::new(
            GenerationConfig::uniform(0.0)
                .with_depth(depth)
                .with_min_segment_length(1.0),
        )
        .unwrap()
    }

    #[test]
    fn depth_zero_returns_endpoints() {
        let gen = FractalGenerator::new(GenerationConfig::uniform(0.3)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(100.0, 0.0);
        let path = gen.subdivide(&mut rng, Polyline::from_points(&[a]), b, 0);
        assert_eq!(path.points(), &[a, b]);
    }

    #[test]
    fn short_edge_is_not_subdivided() {
        let gen = FractalGenerator::new(
            GenerationConfig::uniform(0.3).with_min_segment_length(10.0),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(5.0, 0.0);
        assert_eq!(gen.subdivide_segment(&mut rng, a, b).points(), &[a, b]);
    }

    #[test]
    fn flat_depth_one_splits_at_midpoint() {
        let mut rng = StdRng::seed_from_u64(0);
        let fpl = flat_generator(1)
            .assemble(&mut rng, &[Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)])
            .unwrap();
        assert_eq!(
            fpl.points(),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(50.0, 0.0),
                Point2::new(100.0, 0.0)
            ]
        );
    }

    #[test]
    fn point_count_doubles_per_level() {
        let gen = FractalGenerator::new(GenerationConfig::uniform(0.3).with_depth(4)).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1000.0, 0.0);
        let path = gen.subdivide_segment(&mut rng, a, b);
        assert_eq!(path.len(), (1 << 4) + 1);
    }

    #[test]
    fn endpoints_are_preserved() {
        let gen = FractalGenerator::new(GenerationConfig::normal(0.2).with_depth(5)).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let a = Point2::new(-20.0, 15.0);
        let b = Point2::new(400.0, 90.0);
        let fpl = gen.assemble(&mut rng, &[a, b]).unwrap();
        assert_eq!(fpl.first(), Some(&a));
        assert_eq!(fpl.last(), Some(&b));
    }

    #[test]
    fn insufficient_input() {
        let gen = flat_generator(1);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            gen.assemble(&mut rng, &[Point2::new(1.0, 1.0)]),
            Err(FplError::InsufficientInput {
                required: 2,
                actual: 1
            })
        );
        assert!(gen.assemble(&mut rng, &[]).is_err());
    }

    #[test]
    fn odd_input_drops_trailing_point() {
        let gen = flat_generator(1);
        let mut rng = StdRng::seed_from_u64(0);
        let fpl = gen
            .assemble(
                &mut rng,
                &[
                    Point2::new(0.0, 0.0),
                    Point2::new(100.0, 0.0),
                    Point2::new(500.0, 500.0),
                ],
            )
            .unwrap();
        assert_eq!(fpl.len(), 3);
        assert_eq!(fpl.last(), Some(&Point2::new(100.0, 0.0)));
    }

    #[test]
    fn shared_endpoint_is_not_duplicated() {
        let gen = flat_generator(1);
        let mut rng = StdRng::seed_from_u64(0);
        let fpl = gen
            .assemble(
                &mut rng,
                &[
                    Point2::new(0.0, 0.0),
                    Point2::new(100.0, 0.0),
                    Point2::new(100.0, 0.0),
                    Point2::new(100.0, 100.0),
                ],
            )
            .unwrap();
        assert_eq!(
            fpl.points(),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(50.0, 0.0),
                Point2::new(100.0, 0.0),
                Point2::new(100.0, 50.0),
                Point2::new(100.0, 100.0)
            ]
        );
        for w in fpl.windows(2) {
            assert_ne!(w[0], w[1]);
        }
    }

    #[test]
    fn zero_length_segment_adds_no_duplicate() {
        let gen = flat_generator(1);
        let mut rng = StdRng::seed_from_u64(0);
        let fpl = gen
            .assemble(
                &mut rng,
                &[
                    Point2::new(0.0, 0.0),
                    Point2::new(100.0, 0.0),
                    Point2::new(100.0, 0.0),
                    Point2::new(100.0, 0.0),
                ],
            )
            .unwrap();
        assert_eq!(
            fpl.points(),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(50.0, 0.0),
                Point2::new(100.0, 0.0)
            ]
        );
        for w in fpl.windows(2) {
            assert_ne!(w[0], w[1]);
        }
    }

    #[test]
    fn untouched_source_edge_drops_its_start() {
        // Shorter than the minimum length, so the arm is the raw edge itself.
        let gen = FractalGenerator::new(
            GenerationConfig::uniform(0.3).with_min_segment_length(2.0),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let fpl = gen
            .assemble(&mut rng, &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)])
            .unwrap();
        assert_eq!(fpl.points(), &[Point2::new(1.0, 0.0)]);
    }

    #[test]
    fn seeded_runs_are_identical() {
        let gen = FractalGenerator::new(GenerationConfig::normal(0.3).with_depth(6)).unwrap();
        let source = [
            Point2::new(0.0, 0.0),
            Point2::new(300.0, 40.0),
            Point2::new(300.0, 40.0),
            Point2::new(500.0, -60.0),
        ];
        let first = gen
            .assemble(&mut StdRng::seed_from_u64(1234), &source)
            .unwrap();
        let second = gen
            .assemble(&mut StdRng::seed_from_u64(1234), &source)
            .unwrap();
        assert_eq!(first, second);
    }
}
