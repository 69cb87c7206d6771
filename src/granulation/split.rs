use super::{ball_radius, Granulation, Granulator};
use crate::config::GranulationParams;
use crate::dataset::Dataset;
use crate::error::{GbError, GbResult};
use crate::matrix::{column_mean, euclidean};
use tracing::debug;

/// Top-down granulation: start from one ball and keep halving balls with
/// 2-means while the ball holds at least `2 * min_ball_size` samples and the
/// halves are tighter than the parent. Halves may be arbitrarily small, so an
/// isolated sample can end up alone in its own ball.
#[derive(Debug, Clone, Default)]
pub struct SplittingGranulator {
    pub params: GranulationParams,
}

impl SplittingGranulator {
    pub fn new(params: GranulationParams) -> Self {
        Self { params }
    }

    fn radius_of(&self, data: &Dataset, ids: &[usize]) -> f64 {
        let rows: Vec<&[f64]> = ids.iter().map(|&i| data.features[i].as_slice()).collect();
        let center = column_mean(&rows);
        ball_radius(&rows, &center, self.params.radius)
    }

    /// Lloyd's 2-means over `ids`. Returns `None` when a side comes out empty.
    fn two_means(
        &self,
        data: &Dataset,
        ids: &[usize],
        rng: &mut fastrand::Rng,
    ) -> Option<(Vec<usize>, Vec<usize>)> {
        let seed = data.features[ids[rng.usize(..ids.len())]].as_slice();
        let far = ids
            .iter()
            .map(|&i| data.features[i].as_slice())
            .max_by(|a, b| euclidean(a, seed).total_cmp(&euclidean(b, seed)))?;

        let mut centroids = [seed.to_vec(), far.to_vec()];
        let mut assign = vec![0u8; ids.len()];

        for iter in 0..self.params.kmeans_iterations {
            let mut changed = false;
            for (slot, &id) in assign.iter_mut().zip(ids) {
                let row = &data.features[id];
                let side = u8::from(euclidean(row, &centroids[1]) < euclidean(row, &centroids[0]));
                if *slot != side {
                    *slot = side;
                    changed = true;
                }
            }
            if !changed && iter > 0 {
                break;
            }
            for (side, centroid) in centroids.iter_mut().enumerate() {
                let rows: Vec<&[f64]> = ids
                    .iter()
                    .zip(&assign)
                    .filter(|(_, &a)| a as usize == side)
                    .map(|(&i, _)| data.features[i].as_slice())
                    .collect();
                if rows.is_empty() {
                    return None;
                }
                *centroid = column_mean(&rows);
            }
        }

        let (left, right): (Vec<_>, Vec<_>) = ids.iter().zip(&assign).partition(|(_, &a)| a == 0);
        let left: Vec<usize> = left.into_iter().map(|(&i, _)| i).collect();
        let right: Vec<usize> = right.into_iter().map(|(&i, _)| i).collect();
        if left.is_empty() || right.is_empty() {
            return None;
        }
        Some((left, right))
    }
}

impl Granulator for SplittingGranulator {
    fn granulate(&self, data: &Dataset) -> GbResult<Granulation> {
        self.params.validate()?;
        if data.is_empty() {
            return Err(GbError::Validation("Cannot granulate an empty dataset".to_string()));
        }

        let min = self.params.min_ball_size;
        let mut rng = fastrand::Rng::with_seed(self.params.seed);
        let mut pending = vec![(0..data.len()).collect::<Vec<usize>>()];
        let mut finished = Vec::new();

        while let Some(ids) = pending.pop() {
            if ids.len() < 2 * min {
                finished.push(ids);
                continue;
            }

            let parent_radius = self.radius_of(data, &ids);
            let split = self
                .two_means(data, &ids, &mut rng)
                .filter(|(l, r)| {
                    let weighted = (l.len() as f64 * self.radius_of(data, l)
                        + r.len() as f64 * self.radius_of(data, r))
                        / ids.len() as f64;
                    weighted < parent_radius
                });

            match split {
                Some((l, r)) => {
                    pending.push(r);
                    pending.push(l);
                }
                None => finished.push(ids),
            }
        }

        debug!(
            "Splitting granulator: {} balls (min size {})",
            finished.len(),
            min
        );
        Granulation::from_clusters(data, &finished, self.params.radius)
    }
}
