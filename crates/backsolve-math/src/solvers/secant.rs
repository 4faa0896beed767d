//! Secant root-finding algorithm.

use tracing::{trace, warn};

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Secant root-finding algorithm.
///
/// Approximates the derivative from the previous two iterates, so it needs
/// neither an analytical derivative nor a bracketing interval.
///
/// Stopping rules:
///
/// - The loop runs while `|f(x)| > tolerance` and fewer than
///   `max_iterations` updates have been made.
/// - If the last two residuals are exactly equal the step would divide by
///   zero and the solve stops with [`MathError::Diverged`], whatever budget
///   remains. This is an exact comparison, not a near-zero threshold.
/// - After the loop the tolerance is checked first: meeting it on the update
///   that exhausts the budget still converges. A residual that became NaN
///   ends the loop and is reported as [`MathError::ConvergenceFailed`].
/// - A NaN or negative tolerance is rejected with [`MathError::InvalidInput`]
///   before `f` is evaluated.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use backsolve_math::solvers::{secant, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if config.tolerance.is_nan() || config.tolerance < 0.0 {
        return Err(MathError::invalid_input(format!(
            "tolerance must be non-negative, got {}",
            config.tolerance
        )));
    }

    let mut x_prev = x0;
    let mut x_curr = x1;
    let mut f_prev = f(x_prev);
    let mut f_curr = f(x_curr);
    let mut iterations = 0;

    while f_curr.abs() > config.tolerance && iterations < config.max_iterations {
        if f_curr == f_prev {
            warn!(iterations, x = x_curr, residual = f_curr, "secant step is flat");
            return Err(MathError::diverged(iterations, x_curr, f_curr));
        }

        let x_next = x_curr - f_curr * (x_curr - x_prev) / (f_curr - f_prev);

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f(x_curr);
        iterations += 1;

        trace!(iterations, x = x_curr, residual = f_curr, "secant update");
    }

    if f_curr.abs() <= config.tolerance {
        Ok(SolverResult {
            root: x_curr,
            iterations,
            residual: f_curr,
        })
    } else {
        Err(MathError::convergence_failed(iterations, f_curr.abs()))
    }
}
