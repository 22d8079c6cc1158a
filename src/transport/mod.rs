//! The transportation model and its solve pipeline.
//!
//! - `builder` - validates an instance and assembles the linear program
//! - `engine` - generates the capacity and demand constraint families
//! - `plan` - build, solve once, report

pub mod builder;
pub mod engine;

pub use builder::{ShipmentIndex, TransportModel};
pub use engine::{capacity_constraints, demand_constraints, ConstraintFamily};

use crate::domain::ProblemInstance;
use crate::error::Result;
use crate::report::Report;
use crate::solver::LpSolver;

/// Build the model for `instance`, solve it once with `solver`, and report.
///
/// Validation failures are returned as errors before the solver is called.
/// Every solver outcome, including infeasibility and engine failure, is a
/// `Report`.
pub fn plan(instance: &ProblemInstance, solver: &dyn LpSolver) -> Result<Report> {
    let model = TransportModel::build(instance)?;
    let result = solver.solve(model.program());

    let report = Report::from_result(&model, result);
    match &report {
        Report::Optimal(solution) => tracing::info!(
            solver = solver.name(),
            total_cost = solution.total_cost,
            "transport plan optimal"
        ),
        Report::NotSolved(failure) => tracing::warn!(
            solver = solver.name(),
            status = ?failure.status,
            message = failure.message.as_deref().unwrap_or(""),
            "transport plan not solved"
        ),
    }
    Ok(report)
}
