//! Solver interface for shiplp.
//!
//! This module provides:
//! - The `LpSolver` capability: a linear program in, a `SolveResult` out
//! - Matrix stuffing to convert a `LinearProgram` to conic form
//! - Clarabel solver integration

pub mod clarabel;
pub mod stuffing;

use serde::Serialize;

use crate::problem::LinearProgram;

pub use self::clarabel::{ClarabelSolver, Settings};
pub use stuffing::{stuff_problem, ConeDims, StuffedProblem};

/// How a solve terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TerminationStatus {
    /// Optimal solution found.
    Optimal,
    /// The constraints admit no solution.
    Infeasible,
    /// The objective decreases without bound.
    Unbounded,
    /// The engine failed to run or hit numerical trouble.
    SolverError,
    /// Stopped without a conclusion (iteration or time limit).
    Unknown,
}

/// Outcome of a single solve.
///
/// `objective` and `primal` are present exactly when `status` is `Optimal`.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub status: TerminationStatus,
    /// Objective value, in the program's own sense.
    pub objective: Option<f64>,
    /// One value per declared variable, in column order.
    pub primal: Option<Vec<f64>>,
    /// Engine message accompanying a non-optimal status.
    pub message: Option<String>,
    /// Solve time in seconds.
    pub solve_time: f64,
    /// Number of iterations.
    pub iterations: u32,
}

impl SolveResult {
    /// An optimal result.
    pub fn optimal(objective: f64, primal: Vec<f64>) -> Self {
        SolveResult {
            status: TerminationStatus::Optimal,
            objective: Some(objective),
            primal: Some(primal),
            message: None,
            solve_time: 0.0,
            iterations: 0,
        }
    }

    /// A result without a solution. `Optimal` is not a valid status here and
    /// is downgraded to `Unknown`.
    pub fn failed(status: TerminationStatus, message: Option<String>) -> Self {
        let status = match status {
            TerminationStatus::Optimal => TerminationStatus::Unknown,
            other => other,
        };
        SolveResult {
            status,
            objective: None,
            primal: None,
            message,
            solve_time: 0.0,
            iterations: 0,
        }
    }

    /// Attach timing statistics.
    pub fn with_stats(mut self, solve_time: f64, iterations: u32) -> Self {
        self.solve_time = solve_time;
        self.iterations = iterations;
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == TerminationStatus::Optimal
    }
}

/// A linear programming engine.
///
/// Implementations must make exactly one solve attempt per call and must not
/// panic or return raw engine errors: failures are reported as
/// `TerminationStatus::SolverError` with a message.
pub trait LpSolver {
    /// Engine name, for logs.
    fn name(&self) -> &str;

    /// Solve `problem`.
    fn solve(&self, problem: &LinearProgram) -> SolveResult;
}

impl<S: LpSolver + ?Sized> LpSolver for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, problem: &LinearProgram) -> SolveResult {
        (**self).solve(problem)
    }
}
