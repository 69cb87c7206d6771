pub mod ball;
pub mod distance;
pub mod propagate;
pub mod transition;
pub mod walk;

pub use self::ball::Ball;
pub use self::propagate::MembershipIndex;
pub use self::walk::WalkOutcome;

use crate::config::WalkParams;
use crate::dataset::Dataset;
use crate::error::{Degeneracy, GbError, GbResult};
use crate::granulation::{Granulation, Granulator};
use serde::Serialize;
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

/// Runs the ball-level random walk and maps the result back onto samples.
#[derive(TypedBuilder, Debug, Clone, Default)]
pub struct Detector {
    #[builder(default)]
    pub params: WalkParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// One score per sample, in sample-id order.
    pub sample_scores: Vec<f64>,
    /// Owning ball of each sample.
    pub sample_balls: Vec<usize>,
    pub balls: Vec<Ball>,
    pub walk: WalkOutcome,
}

impl Report {
    /// Sample ids ordered from most to least anomalous. Ties keep id order.
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.sample_scores.len()).collect();
        order.sort_by(|&a, &b| {
            self.sample_scores[b]
                .partial_cmp(&self.sample_scores[a])
                .unwrap_or(Ordering::Equal)
        });
        order
    }

    pub fn top(&self, k: usize) -> Vec<(usize, f64)> {
        self.ranking()
            .into_iter()
            .take(k)
            .map(|i| (i, self.sample_scores[i]))
            .collect()
    }
}

impl Detector {
    pub fn new(params: WalkParams) -> Self {
        Self { params }
    }

    /// Granulates `data` with `granulator`, then scores it.
    pub fn detect(&self, data: &Dataset, granulator: &dyn Granulator) -> GbResult<Report> {
        let started = Instant::now();
        let granulation = granulator.granulate(data)?;
        info!(
            "Granulated {} samples into {} balls ({:.1?})",
            data.len(),
            granulation.len(),
            started.elapsed()
        );
        self.run(data.len(), &granulation)
    }

    /// Scores `samples` samples whose partition into balls is `granulation`.
    pub fn run(&self, samples: usize, granulation: &Granulation) -> GbResult<Report> {
        self.params.validate()?;
        granulation.validate()?;

        let mut balls = granulation
            .blocks
            .iter()
            .zip(&granulation.radii)
            .zip(&granulation.centers)
            .enumerate()
            .map(|(i, ((block, &radius), center))| {
                Ball::from_block(i, block, radius)?.with_center(i, center.clone())
            })
            .collect::<GbResult<Vec<_>>>()?;

        if balls.len() < 2 {
            return Err(GbError::DegenerateInput(Degeneracy::TooFewBalls(
                balls.len(),
            )));
        }

        let index = MembershipIndex::build(&balls, samples)?;
        debug!("Membership index: {} samples over {} balls", samples, balls.len());

        let started = Instant::now();
        let dist = distance::build_normalized(&balls)?;
        let p = transition::build_transition(&dist)?;
        let walk = walk::solve(&p, &self.params)?;
        let sample_scores = propagate::propagate(&mut balls, &index, &walk.degrees);

        info!(
            "Scored {} samples from {} balls in {} walk iterations ({:.1?})",
            samples,
            balls.len(),
            walk.iterations,
            started.elapsed()
        );

        Ok(Report {
            sample_scores,
            sample_balls: index.owners().to_vec(),
            balls,
            walk,
        })
    }
}
