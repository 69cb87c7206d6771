use crate::error::{GbError, GbResult};
use crate::matrix::column_mean;
use serde::Serialize;

/// One granular ball: its member sample ids, center, radius and anomaly degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ball {
    pub center: Vec<f64>,
    pub radius: f64,
    pub members: Vec<usize>,
    pub score: f64,
}

impl Ball {
    /// Builds a ball from its raw block. Every row holds the feature values
    /// followed by the sample id in the last column.
    pub fn from_block(index: usize, block: &[Vec<f64>], radius: f64) -> GbResult<Self> {
        let Some(first) = block.first() else {
            return Err(GbError::EmptyBall { ball: index });
        };
        let width = first.len();
        if width == 0 {
            return Err(GbError::Validation(format!(
                "Ball {}: rows need at least the id column",
                index
            )));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(GbError::Validation(format!(
                "Ball {}: radius must be finite and non-negative, got {}",
                index, radius
            )));
        }

        let mut features = Vec::with_capacity(block.len());
        let mut members = Vec::with_capacity(block.len());
        for (row_idx, row) in block.iter().enumerate() {
            if row.len() != width {
                return Err(GbError::Validation(format!(
                    "Ball {}: row {} has {} columns, expected {}",
                    index,
                    row_idx,
                    row.len(),
                    width
                )));
            }
            let (feat, id) = row.split_at(width - 1);
            members.push(parse_sample_id(index, id[0])?);
            features.push(feat);
        }

        Ok(Self {
            center: column_mean(&features),
            radius,
            members,
            score: 0.0,
        })
    }

    /// Replaces the computed mean with an externally supplied center.
    pub fn with_center(mut self, index: usize, center: Vec<f64>) -> GbResult<Self> {
        if center.len() != self.center.len() {
            return Err(GbError::Validation(format!(
                "Ball {}: supplied center has {} dimensions, samples have {}",
                index,
                center.len(),
                self.center.len()
            )));
        }
        if center.iter().any(|c| !c.is_finite()) {
            return Err(GbError::Validation(format!(
                "Ball {}: supplied center is not finite",
                index
            )));
        }
        self.center = center;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

fn parse_sample_id(ball: usize, raw: f64) -> GbResult<usize> {
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= usize::MAX as f64 {
        Ok(raw as usize)
    } else {
        Err(GbError::Validation(format!(
            "Ball {}: sample id {} is not a non-negative integer",
            ball, raw
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_feature_mean_and_id_split_off() {
        let block = vec![vec![0.0, 2.0, 7.0], vec![2.0, 4.0, 3.0]];
        let ball = Ball::from_block(0, &block, 0.5).unwrap();
        assert_eq!(ball.center, vec![1.0, 3.0]);
        assert_eq!(ball.members, vec![7, 3]);
        assert_eq!(ball.score, 0.0);
        assert_eq!(ball.radius, 0.5);
    }

    #[test]
    fn test_empty_block_rejected() {
        let err = Ball::from_block(4, &[], 1.0).unwrap_err();
        assert!(matches!(err, GbError::EmptyBall { ball: 4 }));
    }

    #[test]
    fn test_fractional_id_rejected() {
        let block = vec![vec![1.0, 0.5]];
        assert!(matches!(
            Ball::from_block(0, &block, 0.0),
            Err(GbError::Validation(_))
        ));
    }

    #[test]
    fn test_ragged_block_rejected() {
        let block = vec![vec![1.0, 2.0, 0.0], vec![1.0, 1.0]];
        assert!(Ball::from_block(0, &block, 0.0).is_err());
    }

    #[test]
    fn test_with_center_checks_dimension() {
        let ball = Ball::from_block(0, &[vec![1.0, 2.0, 0.0]], 0.0).unwrap();
        assert!(ball.clone().with_center(0, vec![0.0]).is_err());
        let moved = ball.with_center(0, vec![5.0, 5.0]).unwrap();
        assert_eq!(moved.center, vec![5.0, 5.0]);
    }
}
