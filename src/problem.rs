//! Linear program definition.
//!
//! The `LinearProgram` struct is the engine-agnostic form handed to a solver:
//! - Variable declarations with their domains
//! - A linear objective (minimize or maximize)
//! - A set of linear constraints
//!
//! Use the builder pattern to construct programs:
//! ```ignore
//! let lp = LinearProgram::minimize(objective)
//!     .variables(decls)
//!     .subject_to([constraint1, constraint2])
//!     .build();
//! ```

use crate::constraints::LinearConstraint;
use crate::error::{Result, TransportError};
use crate::expr::{LinExpr, VariableDecl};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    /// Internally converted to minimization.
    Maximize,
}

/// A linear program over continuous variables.
#[derive(Debug, Clone)]
pub struct LinearProgram {
    pub sense: Sense,
    pub objective: LinExpr,
    pub variables: Vec<VariableDecl>,
    pub constraints: Vec<LinearConstraint>,
}

impl LinearProgram {
    /// Create a minimization program.
    pub fn minimize(objective: LinExpr) -> ProgramBuilder {
        ProgramBuilder::new(Sense::Minimize, objective)
    }

    /// Create a maximization program.
    pub fn maximize(objective: LinExpr) -> ProgramBuilder {
        ProgramBuilder::new(Sense::Maximize, objective)
    }

    /// Number of declared variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Check that the program is well formed.
    ///
    /// Every column referenced by the objective or a constraint must be
    /// declared, and all coefficients and right-hand sides must be finite.
    pub fn validate(&self) -> Result<()> {
        let n = self.variables.len();

        check_expr("objective", &self.objective, n)?;
        for c in &self.constraints {
            check_expr(&c.name, &c.expr, n)?;
            if !c.rhs.is_finite() {
                return Err(TransportError::InvalidProblem(format!(
                    "constraint '{}' has non-finite right-hand side {}",
                    c.name, c.rhs
                )));
            }
        }
        Ok(())
    }

    /// Objective value at `x`, in the program's own sense.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.evaluate(x)
    }

    /// Largest violation at `x` over all constraints and variable domains.
    pub fn max_violation(&self, x: &[f64]) -> f64 {
        let constraints = self
            .constraints
            .iter()
            .map(|c| c.violation(x))
            .fold(0.0, f64::max);

        let domains = self
            .variables
            .iter()
            .zip(x)
            .filter_map(|(v, xi)| v.domain.lower_bound().map(|lb| (lb - xi).max(0.0)))
            .fold(0.0, f64::max);

        constraints.max(domains)
    }

    /// Raise every value below its variable's lower bound onto the bound.
    ///
    /// Returns the largest distance moved.
    pub fn clamp_to_domains(&self, x: &mut [f64]) -> f64 {
        let mut moved = 0.0_f64;
        for (xi, var) in x.iter_mut().zip(&self.variables) {
            if let Some(lb) = var.domain.lower_bound() {
                if *xi < lb {
                    moved = moved.max(lb - *xi);
                    *xi = lb;
                }
            }
        }
        moved
    }

    /// Magnitude of the data, `1 + max |rhs|`, for scaling tolerances.
    pub fn rhs_scale(&self) -> f64 {
        self.constraints
            .iter()
            .map(|c| (c.rhs - c.expr.constant).abs())
            .fold(1.0, |acc, v| acc.max(1.0 + v))
    }
}

fn check_expr(name: &str, expr: &LinExpr, num_vars: usize) -> Result<()> {
    if let Some(col) = expr.max_column().filter(|&c| c >= num_vars) {
        return Err(TransportError::InvalidProblem(format!(
            "'{}' references column {} but only {} variables are declared",
            name, col, num_vars
        )));
    }
    if expr.coeffs.values().any(|v| !v.is_finite()) || !expr.constant.is_finite() {
        return Err(TransportError::InvalidProblem(format!(
            "'{}' has a non-finite coefficient",
            name
        )));
    }
    Ok(())
}

/// Builder for constructing linear programs.
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    sense: Sense,
    objective: LinExpr,
    variables: Vec<VariableDecl>,
    constraints: Vec<LinearConstraint>,
}

impl ProgramBuilder {
    fn new(sense: Sense, objective: LinExpr) -> Self {
        ProgramBuilder {
            sense,
            objective,
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Declare variables; column indices follow declaration order.
    pub fn variables(mut self, vars: impl IntoIterator<Item = VariableDecl>) -> Self {
        self.variables.extend(vars);
        self
    }

    /// Add constraints to the program.
    pub fn subject_to(mut self, constraints: impl IntoIterator<Item = LinearConstraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Add a single constraint.
    pub fn constraint(mut self, c: LinearConstraint) -> Self {
        self.constraints.push(c);
        self
    }

    /// Build the program.
    pub fn build(self) -> LinearProgram {
        LinearProgram {
            sense: self.sense,
            objective: self.objective,
            variables: self.variables,
            constraints: self.constraints,
        }
    }
}
