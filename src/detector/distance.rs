use super::ball::Ball;
use crate::error::{Degeneracy, GbError, GbResult};
use crate::matrix::{euclidean, SquareMatrix};
use tracing::debug;

/// Center distance widened by both radii.
#[inline]
pub fn covering_distance(a: &Ball, b: &Ball) -> f64 {
    euclidean(&a.center, &b.center) + a.radius + b.radius
}

/// Raw symmetric dissimilarity matrix. The diagonal is fixed at 0.
pub fn build_raw(balls: &[Ball]) -> SquareMatrix {
    let n = balls.len();
    let mut dist = SquareMatrix::zeros(n);
    for x in 0..n {
        for y in (x + 1)..n {
            let d = covering_distance(&balls[x], &balls[y]);
            dist.set(x, y, d);
            dist.set(y, x, d);
        }
    }
    dist
}

/// Min-max scales each column into [0, 1] on its own range.
pub fn normalize_columns(dist: &mut SquareMatrix) -> GbResult<()> {
    let n = dist.dim();
    for col in 0..n {
        let (lo, hi) = dist
            .column(col)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let range = hi - lo;
        if !range.is_finite() || range <= 0.0 {
            return Err(GbError::DegenerateInput(Degeneracy::ZeroRangeColumn {
                column: col,
                value: lo,
            }));
        }
        for row in 0..n {
            let v = dist.get(row, col);
            dist.set(row, col, (v - lo) / range);
        }
    }
    Ok(())
}

pub fn build_normalized(balls: &[Ball]) -> GbResult<SquareMatrix> {
    let mut dist = build_raw(balls);
    normalize_columns(&mut dist)?;
    debug!("Distance matrix: {}x{} normalized", dist.dim(), dist.dim());
    Ok(dist)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(center: [f64; 2], radius: f64) -> Ball {
        Ball {
            center: center.to_vec(),
            radius,
            members: vec![],
            score: 0.0,
        }
    }

    #[test]
    fn test_raw_matrix_is_symmetric_with_zero_diagonal() {
        let balls = vec![
            ball([0.0, 0.0], 0.1),
            ball([3.0, 4.0], 0.2),
            ball([1.0, 1.0], 0.0),
        ];
        let raw = build_raw(&balls);
        for i in 0..3 {
            assert_eq!(raw.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(raw.get(i, j), raw.get(j, i));
            }
        }
        assert!((raw.get(0, 1) - 5.3).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_zero_radius_balls_are_degenerate() {
        let balls = vec![ball([1.0, 1.0], 0.0), ball([1.0, 1.0], 0.0)];
        let err = build_normalized(&balls).unwrap_err();
        assert!(matches!(
            err,
            GbError::DegenerateInput(Degeneracy::ZeroRangeColumn { column: 0, .. })
        ));
    }

    #[test]
    fn test_single_ball_is_degenerate() {
        let err = build_normalized(&[ball([0.0, 0.0], 1.0)]).unwrap_err();
        assert!(matches!(err, GbError::DegenerateInput(_)));
    }
}
