pub mod split;

pub use self::split::SplittingGranulator;

use crate::config::RadiusMode;
use crate::dataset::Dataset;
use crate::error::{GbError, GbResult};
use crate::matrix::{column_mean, euclidean};

/// Produces the ball partition the detector walks over.
pub trait Granulator {
    fn granulate(&self, data: &Dataset) -> GbResult<Granulation>;
}

/// Index-aligned ball blocks, radii and centers.
///
/// Each block row is a sample's features followed by its id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Granulation {
    pub blocks: Vec<Vec<Vec<f64>>>,
    pub radii: Vec<f64>,
    pub centers: Vec<Vec<f64>>,
}

impl Granulation {
    /// Builds balls from groups of sample ids over `data`.
    pub fn from_clusters(data: &Dataset, clusters: &[Vec<usize>], mode: RadiusMode) -> GbResult<Self> {
        let tagged = data.with_ids();
        let dim = data.dim();
        let mut out = Self::default();
        for (ball, ids) in clusters.iter().enumerate() {
            let block = ids
                .iter()
                .map(|&id| {
                    tagged.get(id).cloned().ok_or_else(|| {
                        GbError::Validation(format!(
                            "Cluster {} references sample {} outside the dataset",
                            ball, id
                        ))
                    })
                })
                .collect::<GbResult<Vec<Vec<f64>>>>()?;

            let rows: Vec<&[f64]> = block.iter().map(|r| &r[..dim]).collect();
            let center = column_mean(&rows);
            let radius = ball_radius(&rows, &center, mode);

            out.blocks.push(block);
            out.radii.push(radius);
            out.centers.push(center);
        }
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn validate(&self) -> GbResult<()> {
        if self.radii.len() != self.blocks.len() || self.centers.len() != self.blocks.len() {
            return Err(GbError::Validation(format!(
                "Granulation is not index-aligned: {} blocks, {} radii, {} centers",
                self.blocks.len(),
                self.radii.len(),
                self.centers.len()
            )));
        }
        Ok(())
    }
}

pub fn ball_radius(rows: &[&[f64]], center: &[f64], mode: RadiusMode) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let dists = rows.iter().map(|r| euclidean(r, center));
    match mode {
        RadiusMode::Mean => dists.sum::<f64>() / rows.len() as f64,
        RadiusMode::Max => dists.fold(0.0, f64::max),
    }
}
