use super::ball::Ball;
use crate::error::{GbError, GbResult, Violation};

/// Sample id -> owning ball, checked to be a partition of `0..samples`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipIndex {
    owner: Vec<usize>,
}

impl MembershipIndex {
    pub fn build(balls: &[Ball], samples: usize) -> GbResult<Self> {
        let mut owner: Vec<Option<usize>> = vec![None; samples];

        for (ball_idx, ball) in balls.iter().enumerate() {
            for &sample in &ball.members {
                let slot = owner.get_mut(sample).ok_or(GbError::PartitionViolation(
                    Violation::OutOfRange {
                        sample,
                        ball: ball_idx,
                        samples,
                    },
                ))?;
                if let Some(first) = *slot {
                    return Err(GbError::PartitionViolation(Violation::Duplicated {
                        sample,
                        first,
                        second: ball_idx,
                    }));
                }
                *slot = Some(ball_idx);
            }
        }

        let owner = owner
            .into_iter()
            .enumerate()
            .map(|(sample, b)| b.ok_or(GbError::PartitionViolation(Violation::Missing { sample })))
            .collect::<GbResult<Vec<_>>>()?;

        Ok(Self { owner })
    }

    #[inline]
    pub fn ball_of(&self, sample: usize) -> usize {
        self.owner[sample]
    }

    pub fn samples(&self) -> usize {
        self.owner.len()
    }

    pub fn owners(&self) -> &[usize] {
        &self.owner
    }
}

/// `(1 - N/M)^(1/3)`: shrinks scores when granulation barely compresses the data.
pub fn granularity_factor(balls: usize, samples: usize) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    (1.0 - balls as f64 / samples as f64).max(0.0).cbrt()
}

/// Stores each ball's anomaly degree and returns one score per sample in
/// sample-id order.
pub fn propagate(balls: &mut [Ball], index: &MembershipIndex, degrees: &[f64]) -> Vec<f64> {
    for (ball, &ad) in balls.iter_mut().zip(degrees) {
        ball.score = ad;
    }

    let factor = granularity_factor(balls.len(), index.samples());
    (0..index.samples())
        .map(|sample| degrees[index.ball_of(sample)] * factor)
        .collect()
}
