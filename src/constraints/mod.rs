//! Linear constraints.

pub mod constraint;

pub use constraint::{LinearConstraint, Relation};
