//! Turning a solve result into a shipment plan.
//!
//! A `Report` is either a complete `Solution` (every shipment quantity plus
//! the total cost) or a `Failure` carrying the termination status. The two
//! never mix: a failed solve has no shipment data at all.

use serde::Serialize;

use crate::domain::Registry;
use crate::error::{Result, TransportError};
use crate::solver::{SolveResult, TerminationStatus};
use crate::transport::{ShipmentIndex, TransportModel};

/// Quantity of one product shipped on one lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipment {
    pub warehouse: String,
    pub customer: String,
    pub product: String,
    pub quantity: f64,
}

/// An optimal shipment plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// Total transportation cost.
    pub total_cost: f64,
    /// One entry per (warehouse, customer, product), zero quantities included,
    /// in `ShipmentIndex` column order.
    pub shipments: Vec<Shipment>,
    #[serde(skip)]
    registry: Registry,
}

impl Solution {
    /// Quantity shipped for a triple, if the triple exists.
    pub fn quantity(&self, warehouse: &str, customer: &str, product: &str) -> Option<f64> {
        let reg = &self.registry;
        let col = ShipmentIndex::new(reg).column(
            reg.warehouses.position(warehouse)?,
            reg.customers.position(customer)?,
            reg.products.position(product)?,
        );
        self.shipments.get(col).map(|s| s.quantity)
    }

    /// Shipments with a quantity above `tol`.
    pub fn active(&self, tol: f64) -> impl Iterator<Item = &Shipment> + '_ {
        self.shipments.iter().filter(move |s| s.quantity > tol)
    }

    /// Total of `product` leaving `warehouse`.
    pub fn shipped_from(&self, warehouse: &str, product: &str) -> f64 {
        let reg = &self.registry;
        match (reg.warehouses.position(warehouse), reg.products.position(product)) {
            (Some(w), Some(p)) => (0..reg.customers.len()).map(|c| self.at(w, c, p)).sum(),
            _ => 0.0,
        }
    }

    /// Total of `product` arriving at `customer`.
    pub fn delivered_to(&self, customer: &str, product: &str) -> f64 {
        let reg = &self.registry;
        match (reg.customers.position(customer), reg.products.position(product)) {
            (Some(c), Some(p)) => (0..reg.warehouses.len()).map(|w| self.at(w, c, p)).sum(),
            _ => 0.0,
        }
    }

    fn at(&self, w: usize, c: usize, p: usize) -> f64 {
        let col = ShipmentIndex::new(&self.registry).column(w, c, p);
        self.shipments.get(col).map_or(0.0, |s| s.quantity)
    }
}

/// A product whose total demand exceeds total capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortfall {
    pub product: String,
    pub demand: f64,
    pub capacity: f64,
}

/// A solve that produced no plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub status: TerminationStatus,
    pub message: Option<String>,
    /// Products that can't be covered by any plan. Only filled for
    /// `Infeasible`.
    pub shortfalls: Vec<Shortfall>,
}

/// Outcome of planning one instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    Optimal(Solution),
    NotSolved(Failure),
}

impl Report {
    /// Interpret `result` against the model it was solved from.
    pub fn from_result(model: &TransportModel<'_>, result: SolveResult) -> Report {
        if result.status != TerminationStatus::Optimal {
            return Report::NotSolved(failure(model, result.status, result.message));
        }

        let expected = model.variable_count();
        let mut x = match result.primal {
            Some(x) if x.len() == expected => x,
            Some(x) => {
                return Report::NotSolved(failure(
                    model,
                    TerminationStatus::SolverError,
                    Some(format!(
                        "solver returned {} values for {} variables",
                        x.len(),
                        expected
                    )),
                ))
            }
            None => {
                return Report::NotSolved(failure(
                    model,
                    TerminationStatus::SolverError,
                    Some("solver reported optimal without a solution".into()),
                ))
            }
        };

        if let Err(msg) = clamp_quantities(model, &mut x) {
            return Report::NotSolved(failure(model, TerminationStatus::SolverError, Some(msg)));
        }

        let shipments = x
            .iter()
            .enumerate()
            .filter_map(|(col, &quantity)| {
                let (warehouse, customer, product) = model.triple_names(col)?;
                Some(Shipment {
                    warehouse: warehouse.to_owned(),
                    customer: customer.to_owned(),
                    product: product.to_owned(),
                    quantity,
                })
            })
            .collect();

        Report::Optimal(Solution {
            total_cost: model.program().objective_value(&x),
            shipments,
            registry: model.instance().registry.clone(),
        })
    }

    pub fn status(&self) -> TerminationStatus {
        match self {
            Report::Optimal(_) => TerminationStatus::Optimal,
            Report::NotSolved(f) => f.status,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, Report::Optimal(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Report::Optimal(s) => Some(s),
            Report::NotSolved(_) => None,
        }
    }

    /// The plan, or `NotOptimal` for any other outcome.
    pub fn into_solution(self) -> Result<Solution> {
        match self {
            Report::Optimal(s) => Ok(s),
            Report::NotSolved(f) => Err(TransportError::NotOptimal {
                status: f.status,
                message: f.message,
            }),
        }
    }
}

/// Relative amount a reported quantity may fall below zero before the
/// result is refused rather than clamped.
const NEGATIVE_TOLERANCE: f64 = 1e-6;

/// Make every quantity finite and non-negative, or explain why it can't be.
fn clamp_quantities(model: &TransportModel<'_>, x: &mut [f64]) -> std::result::Result<(), String> {
    if let Some(col) = x.iter().position(|v| !v.is_finite()) {
        return Err(format!("solver returned non-finite value {} in column {}", x[col], col));
    }
    let program = model.program();
    let limit = NEGATIVE_TOLERANCE * program.rhs_scale();
    let moved = program.clamp_to_domains(x);
    if moved > limit {
        return Err(format!(
            "solver returned a quantity {moved:e} below zero (limit {limit:e})"
        ));
    }
    Ok(())
}

fn failure(model: &TransportModel<'_>, status: TerminationStatus, message: Option<String>) -> Failure {
    let shortfalls = if status == TerminationStatus::Infeasible {
        shortfalls(model)
    } else {
        Vec::new()
    };
    Failure {
        status,
        message,
        shortfalls,
    }
}

fn shortfalls(model: &TransportModel<'_>) -> Vec<Shortfall> {
    let instance = model.instance();
    instance
        .registry
        .products
        .iter()
        .filter_map(|product| {
            let demand = instance.total_demand(product);
            let capacity = instance.total_capacity(product);
            (demand > capacity).then(|| Shortfall {
                product: product.to_owned(),
                demand,
                capacity,
            })
        })
        .collect()
}
