//! Matrix stuffing: converts a linear program to solver format.
//!
//! This module builds the vectors and matrices (q, A, b) and the cone
//! layout required by Clarabel:
//!
//! ```text
//! minimize    q' x
//! subject to  A x + s = b,  s in Zero^m0 x NonNeg^m1
//! ```

use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;

use crate::constraints::Relation;
use crate::expr::LinExpr;
use crate::problem::{LinearProgram, Sense};
use crate::sparse::csc_from_rows;

/// Cone dimensions for Clarabel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConeDims {
    /// Number of zero cone (equality) rows.
    pub zero: usize,
    /// Number of nonnegative cone rows.
    pub nonneg: usize,
}

impl ConeDims {
    /// Total number of constraint rows.
    pub fn total(&self) -> usize {
        self.zero + self.nonneg
    }
}

/// Stuffed problem ready for Clarabel.
#[derive(Debug)]
pub struct StuffedProblem {
    /// Linear cost vector q (n), already negated for maximization.
    pub q: Vec<f64>,
    /// Constraint matrix A (m x n).
    pub a: CscMatrix<f64>,
    /// Constraint vector b (m).
    pub b: Vec<f64>,
    /// Cone dimensions.
    pub cone_dims: ConeDims,
    /// Constant offset in objective.
    pub objective_offset: f64,
    /// Whether the objective was negated (maximization).
    pub negated: bool,
}

impl StuffedProblem {
    /// Number of optimization variables.
    pub fn num_vars(&self) -> usize {
        self.q.len()
    }

    /// Largest cone residual of `x`: `|Ax - b|` on zero rows, `max(Ax - b, 0)`
    /// on nonnegative rows.
    pub fn residual(&self, x: &[f64]) -> f64 {
        let mut ax = DVector::<f64>::zeros(self.a.nrows());
        for (row, col, val) in self.a.triplet_iter() {
            ax[row] += val * x[col];
        }
        let r = ax - DVector::from_column_slice(&self.b);

        let (zero_rows, nonneg_rows) = r.as_slice().split_at(self.cone_dims.zero);
        let zero = zero_rows.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let nonneg = nonneg_rows.iter().fold(0.0_f64, |acc, v| acc.max(*v));
        zero.max(nonneg)
    }
}

/// Build the stuffed problem from a linear program.
pub fn stuff_problem(problem: &LinearProgram) -> StuffedProblem {
    let n = problem.num_variables();
    let negated = problem.sense == Sense::Maximize;
    let sign = if negated { -1.0 } else { 1.0 };

    // Build objective: q vector
    let mut q = vec![0.0; n];
    for (&col, &coeff) in &problem.objective.coeffs {
        q[col] += sign * coeff;
    }

    // Separate rows by cone. Each entry is (expr, rhs, negate).
    let mut zeros: Vec<(&LinExpr, f64)> = Vec::new();
    let mut nonnegs: Vec<(&LinExpr, f64, bool)> = Vec::new();

    for c in &problem.constraints {
        let rhs = c.rhs - c.expr.constant;
        match c.relation {
            Relation::Eq => zeros.push((&c.expr, rhs)),
            Relation::Le => nonnegs.push((&c.expr, rhs, false)),
            Relation::Ge => nonnegs.push((&c.expr, rhs, true)),
        }
    }

    // Variable domains: x >= lb becomes -x + s = -lb
    let bounds: Vec<(usize, f64)> = problem
        .variables
        .iter()
        .enumerate()
        .filter_map(|(col, v)| v.domain.lower_bound().map(|lb| (col, lb)))
        .collect();

    let cone_dims = ConeDims {
        zero: zeros.len(),
        nonneg: nonnegs.len() + bounds.len(),
    };

    // Row order: equalities, then inequalities, then variable bounds
    let mut rows: Vec<Vec<(usize, f64)>> = Vec::with_capacity(cone_dims.total());
    let mut b = Vec::with_capacity(cone_dims.total());

    // Zero cone (equalities): a'x = rhs
    for (expr, rhs) in zeros {
        rows.push(row_entries(expr, 1.0));
        b.push(rhs);
    }

    // Nonnegative cone: a'x <= rhs as is, a'x >= rhs as -a'x <= -rhs
    for (expr, rhs, negate) in nonnegs {
        let sign = if negate { -1.0 } else { 1.0 };
        rows.push(row_entries(expr, sign));
        b.push(sign * rhs);
    }

    for (col, lb) in bounds {
        rows.push(vec![(col, -1.0)]);
        b.push(-lb);
    }

    let a = csc_from_rows(n, rows);

    tracing::debug!(
        vars = n,
        zero_rows = cone_dims.zero,
        nonneg_rows = cone_dims.nonneg,
        nnz = a.nnz(),
        "stuffed linear program"
    );

    StuffedProblem {
        q,
        a,
        b,
        cone_dims,
        objective_offset: sign * problem.objective.constant,
        negated,
    }
}

/// Coefficients of `expr` as `(column, value)` pairs, scaled by `sign`.
fn row_entries(expr: &LinExpr, sign: f64) -> Vec<(usize, f64)> {
    expr.coeffs
        .iter()
        .map(|(&col, &coeff)| (col, sign * coeff))
        .collect()
}
