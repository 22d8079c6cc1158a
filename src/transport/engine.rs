//! Constraint generation for the transportation model.
//!
//! Two families, each generated over the full cross product with no sparsity
//! shortcuts:
//! - capacity: for every (w, p), `sum_c x[w,c,p] <= capacity[w,p]`
//! - demand:   for every (c, p), `sum_w x[w,c,p] >= demand[c,p]`

use super::builder::ShipmentIndex;
use crate::constraints::LinearConstraint;
use crate::domain::ProblemInstance;
use crate::error::ValidationError;
use crate::expr::LinExpr;

/// Which family a generated constraint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintFamily {
    Capacity,
    Demand,
}

/// Capacity rows, ordered by warehouse then product.
pub fn capacity_constraints(
    instance: &ProblemInstance,
    index: &ShipmentIndex,
) -> Result<Vec<LinearConstraint>, ValidationError> {
    let reg = &instance.registry;
    let mut rows = Vec::with_capacity(index.warehouses() * index.products());

    for (w, warehouse) in reg.warehouses.iter().enumerate() {
        for (p, product) in reg.products.iter().enumerate() {
            let cap = instance.capacity.require(warehouse, product)?;
            let shipped = LinExpr::sum_of((0..index.customers()).map(|c| index.column(w, c, p)));
            rows.push(LinearConstraint::leq(
                format!("capacity[{warehouse},{product}]"),
                shipped,
                cap,
            ));
        }
    }
    Ok(rows)
}

/// Demand rows, ordered by customer then product.
pub fn demand_constraints(
    instance: &ProblemInstance,
    index: &ShipmentIndex,
) -> Result<Vec<LinearConstraint>, ValidationError> {
    let reg = &instance.registry;
    let mut rows = Vec::with_capacity(index.customers() * index.products());

    for (c, customer) in reg.customers.iter().enumerate() {
        for (p, product) in reg.products.iter().enumerate() {
            let demand = instance.demand.require(customer, product)?;
            let received = LinExpr::sum_of((0..index.warehouses()).map(|w| index.column(w, c, p)));
            rows.push(LinearConstraint::geq(
                format!("demand[{customer},{product}]"),
                received,
                demand,
            ));
        }
    }
    Ok(rows)
}
