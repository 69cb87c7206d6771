use crate::error::{Degeneracy, GbError, GbResult};
use crate::matrix::SquareMatrix;
use tracing::debug;

/// Solves `D · P = A` where `D = diag(row sums of A)`.
///
/// `D` is diagonal, so the solve reduces to dividing each row of `A` by its
/// own degree. A zero degree leaves `D` singular and is reported rather than
/// producing non-finite probabilities.
pub fn build_transition(normalized: &SquareMatrix) -> GbResult<SquareMatrix> {
    let degrees = normalized.row_sums();
    let mut p = normalized.clone();

    for (row, &degree) in degrees.iter().enumerate() {
        if !degree.is_finite() || degree <= 0.0 {
            return Err(GbError::DegenerateInput(Degeneracy::ZeroRowDegree { row }));
        }
        for v in p.row_mut(row) {
            *v /= degree;
        }
    }

    debug!(
        "Transition matrix: {} states, min degree {:.4}",
        p.dim(),
        degrees.iter().copied().fold(f64::INFINITY, f64::min)
    );
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_become_stochastic() {
        let a = SquareMatrix::from_rows(&[
            vec![0.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.25],
            vec![1.0, 0.5, 0.0],
        ])
        .unwrap();
        let p = build_transition(&a).unwrap();
        for sum in p.row_sums() {
            assert!((sum - 1.0).abs() < 1e-12);
        }
        assert!((p.get(2, 0) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(p.get(1, 2), 1.0);
    }

    #[test]
    fn test_zero_row_is_reported() {
        let a = SquareMatrix::from_rows(&[vec![0.0, 1.0], vec![0.0, 0.0]]).unwrap();
        let err = build_transition(&a).unwrap_err();
        assert!(matches!(
            err,
            GbError::DegenerateInput(Degeneracy::ZeroRowDegree { row: 1 })
        ));
    }
}
