use crate::config::{TeleportMode, WalkParams};
use crate::error::{GbError, GbResult};
use crate::matrix::{l1_distance, SquareMatrix};
use serde::Serialize;
use tracing::{debug, warn};

/// Result of the damped walk. `degrees` is the anomaly degree per ball.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkOutcome {
    pub degrees: Vec<f64>,
    pub iterations: usize,
    pub residual: f64,
    pub converged: bool,
}

/// One damped step: `teleport + (1 - d) * pi·P`.
pub fn step(p: &SquareMatrix, pi: &[f64], damping: f64, mode: TeleportMode) -> Vec<f64> {
    let teleport = match mode {
        TeleportMode::Scalar => damping,
        TeleportMode::Uniform => damping / p.dim() as f64,
    };
    let keep = 1.0 - damping;
    p.left_mul(pi)
        .into_iter()
        .map(|v| teleport + keep * v)
        .collect()
}

/// Iterates from the uniform distribution until the L1 change between two
/// successive iterates is at most `params.tolerance`.
///
/// Hitting `params.max_iterations` first returns the last iterate with
/// `converged = false`, unless `params.strict_convergence` is set.
pub fn solve(p: &SquareMatrix, params: &WalkParams) -> GbResult<WalkOutcome> {
    let n = p.dim();
    if n == 0 {
        return Ok(WalkOutcome {
            degrees: Vec::new(),
            iterations: 0,
            residual: 0.0,
            converged: true,
        });
    }

    let mut pi = vec![1.0 / n as f64; n];
    let mut residual = f64::INFINITY;
    let mut iterations = 0;

    while iterations < params.max_iterations {
        let next = step(p, &pi, params.damping, params.teleport);
        residual = l1_distance(&next, &pi);
        pi = next;
        iterations += 1;
        if residual <= params.tolerance {
            break;
        }
    }

    let converged = residual <= params.tolerance;
    if converged {
        debug!(
            "Random walk converged in {} iterations (residual {:.3e})",
            iterations, residual
        );
    } else {
        if params.strict_convergence {
            return Err(GbError::NonConvergence {
                iterations,
                residual,
            });
        }
        warn!(
            "Random walk hit the {} iteration cap (residual {:.3e} > {:.3e}); using last iterate",
            params.max_iterations, residual, params.tolerance
        );
    }

    Ok(WalkOutcome {
        degrees: pi,
        iterations,
        residual,
        converged,
    })
}
