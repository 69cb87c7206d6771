use std::fmt;
use thiserror::Error;

/// Numerical degeneracies detected while deriving the walk matrices.
#[derive(Debug, Clone, PartialEq)]
pub enum Degeneracy {
    /// Fewer balls than the walk needs (normalization is undefined for N < 2).
    TooFewBalls(usize),
    /// A raw distance column has identical entries everywhere.
    ZeroRangeColumn { column: usize, value: f64 },
    /// A normalized distance row sums to zero, so the degree matrix is singular.
    ZeroRowDegree { row: usize },
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewBalls(n) => write!(f, "need at least 2 balls, got {}", n),
            Self::ZeroRangeColumn { column, value } => write!(
                f,
                "distance column {} has zero range (every entry is {})",
                column, value
            ),
            Self::ZeroRowDegree { row } => {
                write!(f, "normalized distance row {} sums to zero", row)
            }
        }
    }
}

/// Ways the ball membership can fail to partition the sample set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Missing { sample: usize },
    Duplicated { sample: usize, first: usize, second: usize },
    OutOfRange { sample: usize, ball: usize, samples: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { sample } => write!(f, "sample {} belongs to no ball", sample),
            Self::Duplicated {
                sample,
                first,
                second,
            } => write!(
                f,
                "sample {} belongs to both ball {} and ball {}",
                sample, first, second
            ),
            Self::OutOfRange {
                sample,
                ball,
                samples,
            } => write!(
                f,
                "ball {} references sample {} but the dataset has {} samples",
                ball, sample, samples
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum GbError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Ball {ball} has no samples")]
    EmptyBall { ball: usize },

    #[error("Degenerate Input: {0}")]
    DegenerateInput(Degeneracy),

    #[error("Partition Violation: {0}")]
    PartitionViolation(Violation),

    #[error("Random walk did not converge after {iterations} iterations (L1 residual {residual:.3e})")]
    NonConvergence { iterations: usize, residual: f64 },
}

pub type GbResult<T> = Result<T, GbError>;
