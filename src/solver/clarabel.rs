//! Clarabel solver integration.
//!
//! This module provides the default `LpSolver`, backed by the Clarabel
//! interior-point conic solver.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use clarabel::algebra::CscMatrix as ClarabelCsc;
use clarabel::solver::{DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT};
use serde::Deserialize;

use super::stuffing::{stuff_problem, ConeDims, StuffedProblem};
use super::{LpSolver, SolveResult, TerminationStatus};
use crate::problem::LinearProgram;

impl From<SolverStatus> for TerminationStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved | SolverStatus::AlmostSolved => TerminationStatus::Optimal,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                TerminationStatus::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                TerminationStatus::Unbounded
            }
            SolverStatus::NumericalError | SolverStatus::InsufficientProgress => {
                TerminationStatus::SolverError
            }
            SolverStatus::MaxIterations | SolverStatus::MaxTime => TerminationStatus::Unknown,
            _ => TerminationStatus::Unknown,
        }
    }
}

/// Solver settings.
///
/// Deserializable so it can live in a configuration document; every field is
/// optional there.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Print solver output.
    pub verbose: bool,
    /// Maximum iterations.
    pub max_iter: u32,
    /// Time limit in seconds, enforced by the engine.
    pub time_limit: f64,
    /// Absolute duality gap tolerance.
    pub tol_gap_abs: f64,
    /// Relative duality gap tolerance.
    pub tol_gap_rel: f64,
    /// Feasibility tolerance.
    pub tol_feas: f64,
    /// Largest constraint violation accepted once values are clamped onto
    /// their bounds, relative to `LinearProgram::rhs_scale`.
    pub residual_tolerance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            verbose: false,
            max_iter: 200,
            time_limit: f64::INFINITY,
            tol_gap_abs: 1e-8,
            tol_gap_rel: 1e-8,
            tol_feas: 1e-8,
            residual_tolerance: 1e-6,
        }
    }
}

impl Settings {
    /// Set the deadline handed to the engine.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit.as_secs_f64();
        self
    }
}

/// `LpSolver` backed by Clarabel.
#[derive(Debug, Clone, Default)]
pub struct ClarabelSolver {
    settings: Settings,
}

impl ClarabelSolver {
    pub fn new(settings: Settings) -> Self {
        ClarabelSolver { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl LpSolver for ClarabelSolver {
    fn name(&self) -> &str {
        "clarabel"
    }

    fn solve(&self, problem: &LinearProgram) -> SolveResult {
        if let Err(err) = problem.validate() {
            return SolveResult::failed(TerminationStatus::SolverError, Some(err.to_string()));
        }

        let stuffed = stuff_problem(problem);

        let raw = match panic::catch_unwind(AssertUnwindSafe(|| run(&stuffed, &self.settings))) {
            Ok(Ok(raw)) => raw,
            Ok(Err(msg)) => return SolveResult::failed(TerminationStatus::SolverError, Some(msg)),
            Err(payload) => {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "solver panicked".to_string());
                return SolveResult::failed(TerminationStatus::SolverError, Some(msg));
            }
        };

        let status: TerminationStatus = raw.status.into();
        if status != TerminationStatus::Optimal {
            return SolveResult::failed(status, Some(format!("clarabel status {:?}", raw.status)))
                .with_stats(raw.solve_time, raw.iterations);
        }

        let x = match accept_primal(problem, raw.x, self.settings.residual_tolerance) {
            Ok(x) => x,
            Err(msg) => {
                tracing::warn!(%msg, "rejecting clarabel solution");
                return SolveResult::failed(TerminationStatus::SolverError, Some(msg))
                    .with_stats(raw.solve_time, raw.iterations);
            }
        };

        tracing::debug!(
            residual = stuffed.residual(&x),
            iterations = raw.iterations,
            "clarabel solved"
        );

        let value = problem.objective_value(&x);
        SolveResult::optimal(value, x).with_stats(raw.solve_time, raw.iterations)
    }
}

/// What a single Clarabel run returns.
struct RawSolution {
    status: SolverStatus,
    x: Vec<f64>,
    solve_time: f64,
    iterations: u32,
}

/// Run Clarabel once on the stuffed problem.
fn run(problem: &StuffedProblem, settings: &Settings) -> Result<RawSolution, String> {
    let n = problem.num_vars();

    // LP: no quadratic term
    let p = to_clarabel_csc(&nalgebra_sparse::CscMatrix::zeros(n, n));
    let a = to_clarabel_csc(&problem.a);
    let cones = to_clarabel_cones(&problem.cone_dims);

    let clarabel_settings = DefaultSettingsBuilder::default()
        .verbose(settings.verbose)
        .max_iter(settings.max_iter)
        .time_limit(settings.time_limit)
        .tol_gap_abs(settings.tol_gap_abs)
        .tol_gap_rel(settings.tol_gap_rel)
        .tol_feas(settings.tol_feas)
        .build()
        .map_err(|e| format!("invalid clarabel settings: {e}"))?;

    let mut solver = DefaultSolver::new(&p, &problem.q, &a, &problem.b, &cones, clarabel_settings);
    solver.solve();

    Ok(RawSolution {
        status: solver.solution.status,
        x: solver.solution.x.clone(),
        solve_time: solver.solution.solve_time,
        iterations: solver.info.iterations,
    })
}

/// Convert nalgebra CSC to Clarabel CSC.
fn to_clarabel_csc(m: &nalgebra_sparse::CscMatrix<f64>) -> ClarabelCsc<f64> {
    ClarabelCsc::new(
        m.nrows(),
        m.ncols(),
        m.col_offsets().to_vec(),
        m.row_indices().to_vec(),
        m.values().to_vec(),
    )
}

/// Convert cone dimensions to Clarabel cones.
fn to_clarabel_cones(dims: &ConeDims) -> Vec<SupportedConeT<f64>> {
    let mut cones = Vec::new();

    if dims.zero > 0 {
        cones.push(SupportedConeT::ZeroConeT(dims.zero));
    }

    if dims.nonneg > 0 {
        cones.push(SupportedConeT::NonnegativeConeT(dims.nonneg));
    }

    cones
}

/// Clamp `x` onto the variable bounds and check what is left.
///
/// Interior-point iterates can sit slightly outside a bound even on a
/// `Solved` status, by an amount proportional to the data. After clamping,
/// the remaining constraint violation must stay within `tol * rhs_scale`.
fn accept_primal(problem: &LinearProgram, mut x: Vec<f64>, tol: f64) -> Result<Vec<f64>, String> {
    if let Some(col) = x.iter().position(|v| !v.is_finite()) {
        return Err(format!("non-finite value {} in column {}", x[col], col));
    }

    let moved = problem.clamp_to_domains(&mut x);
    let violation = problem.max_violation(&x);
    let limit = tol * problem.rhs_scale();
    if violation > limit {
        return Err(format!(
            "solution violates constraints by {violation:e} after clamping (limit {limit:e})"
        ));
    }
    if moved > 0.0 {
        tracing::debug!(moved, violation, "clamped primal values onto bounds");
    }
    Ok(x)
}
