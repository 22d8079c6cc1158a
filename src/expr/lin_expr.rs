//! Sparse linear expression: sum_i(a_i * x_i) + b.

use std::collections::BTreeMap;

/// A linear expression in standard form: sum_i(a_i * x_i) + b
///
/// Coefficients are keyed by variable column. Columns with a zero coefficient
/// may still be present; they contribute nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinExpr {
    /// Coefficient for each variable column.
    pub coeffs: BTreeMap<usize, f64>,
    /// Constant term (offset).
    pub constant: f64,
}

impl LinExpr {
    /// Create the zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Create an expression for a single variable with coefficient 1.
    pub fn variable(col: usize) -> Self {
        Self::term(col, 1.0)
    }

    /// Create `coeff * x[col]`.
    pub fn term(col: usize, coeff: f64) -> Self {
        let mut e = Self::zero();
        e.add_term(col, coeff);
        e
    }

    /// Create a constant expression.
    pub fn constant(value: f64) -> Self {
        LinExpr {
            coeffs: BTreeMap::new(),
            constant: value,
        }
    }

    /// Sum of the given columns, each with coefficient 1.
    pub fn sum_of(cols: impl IntoIterator<Item = usize>) -> Self {
        let mut e = Self::zero();
        for col in cols {
            e.add_term(col, 1.0);
        }
        e
    }

    /// Add `coeff * x[col]` in place. Repeated columns accumulate.
    pub fn add_term(&mut self, col: usize, coeff: f64) -> &mut Self {
        *self.coeffs.entry(col).or_insert(0.0) += coeff;
        self
    }

    /// Check if this is a constant (no variables).
    pub fn is_constant(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Number of variable terms.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Add two linear expressions.
    pub fn add(&self, other: &LinExpr) -> LinExpr {
        let mut coeffs = self.coeffs.clone();
        for (col, coeff) in &other.coeffs {
            *coeffs.entry(*col).or_insert(0.0) += coeff;
        }
        LinExpr {
            coeffs,
            constant: self.constant + other.constant,
        }
    }

    /// Negate a linear expression.
    pub fn neg(&self) -> LinExpr {
        self.scale(-1.0)
    }

    /// Scale by a scalar.
    pub fn scale(&self, scalar: f64) -> LinExpr {
        LinExpr {
            coeffs: self.coeffs.iter().map(|(k, v)| (*k, v * scalar)).collect(),
            constant: self.constant * scalar,
        }
    }

    /// Evaluate at the point `x`. Columns beyond `x.len()` read as zero.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.coeffs
            .iter()
            .map(|(col, coeff)| coeff * x.get(*col).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }

    /// Columns referenced by this expression, ascending.
    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.coeffs.keys().copied()
    }

    /// Largest column index referenced, if any.
    pub fn max_column(&self) -> Option<usize> {
        self.coeffs.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lin_expr_zero() {
        let e = LinExpr::zero();
        assert!(e.is_constant());
        assert_eq!(e.evaluate(&[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_lin_expr_variable() {
        let e = LinExpr::variable(3);
        assert!(!e.is_constant());
        assert_eq!(e.columns().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_lin_expr_add_merges_columns() {
        let e1 = LinExpr::term(0, 2.0);
        let e2 = LinExpr::term(0, 3.0).add(&LinExpr::variable(1));
        let sum = e1.add(&e2);
        assert_eq!(sum.len(), 2);
        assert_eq!(sum.coeffs[&0], 5.0);
    }

    #[test]
    fn test_lin_expr_evaluate() {
        // 2*x0 - x2 + 4
        let mut e = LinExpr::constant(4.0);
        e.add_term(0, 2.0).add_term(2, -1.0);
        assert_eq!(e.evaluate(&[1.0, 100.0, 3.0]), 3.0);
        assert_eq!(e.neg().evaluate(&[1.0, 100.0, 3.0]), -3.0);
        assert_eq!(e.max_column(), Some(2));
    }

    #[test]
    fn test_sum_of() {
        let e = LinExpr::sum_of([0, 2, 4]);
        assert_eq!(e.evaluate(&[1.0, 1.0, 2.0, 1.0, 3.0]), 6.0);
    }
}
