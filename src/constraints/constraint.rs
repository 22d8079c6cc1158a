//! Constraint types for linear programs.
//!
//! Every constraint has the form `expr (<= | >= | ==) rhs`. The solver maps
//! them to cones:
//! - `Eq`: zero cone
//! - `Le`, `Ge`: nonnegative orthant

use std::fmt;

use crate::expr::LinExpr;

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// expr <= rhs
    Le,
    /// expr >= rhs
    Ge,
    /// expr == rhs
    Eq,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Le => "<=",
            Relation::Ge => ">=",
            Relation::Eq => "==",
        })
    }
}

/// A named linear constraint: `expr relation rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub expr: LinExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    /// Create an inequality constraint: expr <= rhs.
    pub fn leq(name: impl Into<String>, expr: LinExpr, rhs: f64) -> Self {
        Self::new(name, expr, Relation::Le, rhs)
    }

    /// Create an inequality constraint: expr >= rhs.
    pub fn geq(name: impl Into<String>, expr: LinExpr, rhs: f64) -> Self {
        Self::new(name, expr, Relation::Ge, rhs)
    }

    /// Create an equality constraint: expr == rhs.
    pub fn eq(name: impl Into<String>, expr: LinExpr, rhs: f64) -> Self {
        Self::new(name, expr, Relation::Eq, rhs)
    }

    fn new(name: impl Into<String>, expr: LinExpr, relation: Relation, rhs: f64) -> Self {
        LinearConstraint {
            name: name.into(),
            expr,
            relation,
            rhs,
        }
    }

    /// Amount by which `x` violates this constraint; zero when satisfied.
    pub fn violation(&self, x: &[f64]) -> f64 {
        let lhs = self.expr.evaluate(x);
        match self.relation {
            Relation::Le => (lhs - self.rhs).max(0.0),
            Relation::Ge => (self.rhs - lhs).max(0.0),
            Relation::Eq => (lhs - self.rhs).abs(),
        }
    }

    /// Check the constraint at `x` within absolute tolerance `tol`.
    pub fn is_satisfied(&self, x: &[f64], tol: f64) -> bool {
        self.violation(x) <= tol
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        let mut first = true;
        for (col, coeff) in &self.expr.coeffs {
            if !first {
                f.write_str(" + ")?;
            }
            write!(f, "{coeff}*x{col}")?;
            first = false;
        }
        if self.expr.constant != 0.0 || first {
            if !first {
                f.write_str(" + ")?;
            }
            write!(f, "{}", self.expr.constant)?;
        }
        write!(f, " {} {}", self.relation, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leq_violation() {
        let c = LinearConstraint::leq("cap", LinExpr::sum_of([0, 1]), 10.0);
        assert_eq!(c.relation, Relation::Le);
        assert!(c.is_satisfied(&[4.0, 6.0], 0.0));
        assert_eq!(c.violation(&[8.0, 6.0]), 4.0);
    }

    #[test]
    fn test_geq_violation() {
        let c = LinearConstraint::geq("dem", LinExpr::sum_of([0, 1]), 10.0);
        assert!(c.is_satisfied(&[20.0, 0.0], 0.0));
        assert_eq!(c.violation(&[3.0, 2.0]), 5.0);
    }

    #[test]
    fn test_eq_violation() {
        let c = LinearConstraint::eq("bal", LinExpr::variable(0), 2.0);
        assert_eq!(c.violation(&[1.5]), 0.5);
        assert_eq!(c.violation(&[2.5]), 0.5);
        assert!(c.is_satisfied(&[2.0 + 1e-9], 1e-6));
    }

    #[test]
    fn test_display() {
        let c = LinearConstraint::leq("cap", LinExpr::sum_of([0, 2]), 5.0);
        assert_eq!(c.to_string(), "cap: 1*x0 + 1*x2 <= 5");
    }
}
