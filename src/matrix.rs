/// Dense row-major N×N matrix of f64.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Builds a matrix from nested rows. Returns `None` if the rows are not square.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|r| r.len() != n) {
            return None;
        }
        Some(Self {
            n,
            data: rows.iter().flatten().copied().collect(),
        })
    }

    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, val: f64) {
        self.data[row * self.n + col] = val;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.n..(row + 1) * self.n]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let n = self.n;
        &mut self.data[row * n..(row + 1) * n]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.n).map(move |r| self.get(r, col))
    }

    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.n).map(|r| self.row(r).iter().sum()).collect()
    }

    /// Row-vector times matrix: `out[j] = sum_i v[i] * self[i][j]`.
    pub fn left_mul(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.n);
        let mut out = vec![0.0; self.n];
        for (i, &vi) in v.iter().enumerate() {
            if vi == 0.0 {
                continue;
            }
            for (o, &p) in out.iter_mut().zip(self.row(i)) {
                *o += vi * p;
            }
        }
        out
    }
}

pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

pub fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Column-wise arithmetic mean of equally sized rows.
pub fn column_mean(rows: &[&[f64]]) -> Vec<f64> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let mut acc = vec![0.0; first.len()];
    for r in rows {
        for (a, v) in acc.iter_mut().zip(r.iter()) {
            *a += v;
        }
    }
    let count = rows.len() as f64;
    for a in &mut acc {
        *a /= count;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_mul_matches_manual_product() {
        let m = SquareMatrix::from_rows(&[vec![0.0, 1.0], vec![0.5, 0.5]]).unwrap();
        let out = m.left_mul(&[0.25, 0.75]);
        assert!((out[0] - 0.375).abs() < 1e-12);
        assert!((out[1] - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(SquareMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_none());
    }

    #[test]
    fn test_column_mean() {
        let a = [1.0, 2.0];
        let b = [3.0, 6.0];
        assert_eq!(column_mean(&[&a, &b]), vec![2.0, 4.0]);
    }
}
