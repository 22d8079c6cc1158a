//! Linear expressions and variable declarations.
//!
//! This module provides the building blocks of a linear program:
//! - `LinExpr` - a sparse affine expression over variable columns
//! - `VariableDecl` - a declared variable with its domain
//! - Variable creation via `VariableBuilder`

pub mod lin_expr;
pub mod variable;

pub use lin_expr::LinExpr;
pub use variable::{nonneg_variable, Domain, VariableBuilder, VariableDecl};
