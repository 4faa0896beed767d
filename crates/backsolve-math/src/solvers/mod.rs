//! Root-finding algorithms.
//!
//! The backsolver uses a two-point secant iteration: no derivative, no
//! bracket, just two seeds. See [`secant`] for the exact stopping rules.
//!
//! # Example
//!
//! ```rust
//! use backsolve_math::solvers::{RootFinder, SecantSolver, SolverConfig};
//!
//! // 5 paid in one year, 105 in two: find the flat annual yield for a price of 100
//! let f = |y: f64| 100.0 - (5.0 / (1.0 + y) + 105.0 / (1.0 + y).powi(2));
//!
//! let root = SecantSolver::default()
//!     .find_root(f, 0.06, &SolverConfig::default())
//!     .unwrap();
//! assert!((root - 0.05).abs() < 1e-9);
//! ```

mod secant;

pub use secant::secant;

use crate::error::MathResult;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default distance between the two secant seeds (25 basis points).
pub const DEFAULT_SECANT_STEP: f64 = 0.0025;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence threshold on the absolute residual.
    pub tolerance: f64,
    /// Maximum number of updates.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Trait for root-finding algorithms started from a single guess.
pub trait RootFinder {
    /// Finds a root of the given function.
    ///
    /// # Arguments
    ///
    /// * `f` - The function for which to find a root
    /// * `initial_guess` - Starting point for the search
    /// * `config` - Solver configuration
    fn find_root<F>(&self, f: F, initial_guess: f64, config: &SolverConfig) -> MathResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        self.solve(f, initial_guess, config).map(|r| r.root)
    }

    /// Finds a root and reports iteration statistics.
    fn solve<F>(&self, f: F, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Secant method solver seeded at `x0` and `x0 + step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantSolver {
    /// Offset of the second seed from the initial guess.
    pub step: f64,
}

impl Default for SecantSolver {
    fn default() -> Self {
        Self {
            step: DEFAULT_SECANT_STEP,
        }
    }
}

impl SecantSolver {
    /// Creates a secant solver with a custom seed step.
    #[must_use]
    pub fn with_step(step: f64) -> Self {
        Self { step }
    }
}

impl RootFinder for SecantSolver {
    fn solve<F>(&self, f: F, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        secant(f, initial_guess, initial_guess + self.step, config)
    }

    fn name(&self) -> &'static str {
        "Secant"
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of updates performed.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
