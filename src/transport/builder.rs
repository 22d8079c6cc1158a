//! Model construction: instance data to linear program.

use super::engine::{capacity_constraints, demand_constraints, ConstraintFamily};
use crate::constraints::LinearConstraint;
use crate::domain::{ProblemInstance, Registry};
use crate::error::{Result, ValidationError};
use crate::expr::{nonneg_variable, LinExpr};
use crate::problem::LinearProgram;

/// Bijection between (warehouse, customer, product) positions and LP columns.
///
/// `column = (w * |C| + c) * |P| + p`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentIndex {
    warehouses: usize,
    customers: usize,
    products: usize,
}

impl ShipmentIndex {
    pub fn new(registry: &Registry) -> Self {
        ShipmentIndex {
            warehouses: registry.warehouses.len(),
            customers: registry.customers.len(),
            products: registry.products.len(),
        }
    }

    pub fn warehouses(&self) -> usize {
        self.warehouses
    }

    pub fn customers(&self) -> usize {
        self.customers
    }

    pub fn products(&self) -> usize {
        self.products
    }

    /// Number of shipment variables, |W| x |C| x |P|.
    pub fn len(&self) -> usize {
        self.warehouses * self.customers * self.products
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column of `x[w, c, p]`.
    pub fn column(&self, w: usize, c: usize, p: usize) -> usize {
        debug_assert!(w < self.warehouses && c < self.customers && p < self.products);
        (w * self.customers + c) * self.products + p
    }

    /// Inverse of `column`.
    pub fn triple(&self, col: usize) -> Option<(usize, usize, usize)> {
        if col >= self.len() {
            return None;
        }
        let p = col % self.products;
        let c = (col / self.products) % self.customers;
        let w = col / (self.products * self.customers);
        Some((w, c, p))
    }

    /// All triples in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.len()).filter_map(move |col| self.triple(col))
    }
}

/// A validated transportation instance together with its linear program.
///
/// The program is immutable once built; to change the data, build again.
#[derive(Debug, Clone)]
pub struct TransportModel<'a> {
    instance: &'a ProblemInstance,
    index: ShipmentIndex,
    program: LinearProgram,
    capacity_rows: usize,
}

impl<'a> TransportModel<'a> {
    /// Validate `instance` and assemble its linear program.
    ///
    /// # Errors
    ///
    /// `TransportError::Validation` if a table key names an unregistered
    /// identifier, or a required cost, demand or capacity entry is missing,
    /// negative or not finite. Nothing is built in that case.
    pub fn build(instance: &'a ProblemInstance) -> Result<Self> {
        let reg = &instance.registry;

        instance.cost.check_keys(&reg.warehouses, &reg.customers)?;
        instance.demand.check_keys(&reg.customers, &reg.products)?;
        instance.capacity.check_keys(&reg.warehouses, &reg.products)?;

        let index = ShipmentIndex::new(reg);

        // Validate everything before allocating the program
        let lane_costs = lane_costs(instance)?;
        let capacity = capacity_constraints(instance, &index)?;
        let demand = demand_constraints(instance, &index)?;

        let mut variables = Vec::with_capacity(index.len());
        let mut objective = LinExpr::zero();
        for (w, c, p) in index.iter() {
            let name = format!(
                "ship[{},{},{}]",
                reg.warehouses.name(w).unwrap_or_default(),
                reg.customers.name(c).unwrap_or_default(),
                reg.products.name(p).unwrap_or_default(),
            );
            variables.push(nonneg_variable(name));
            // Same unit cost for every product on a lane
            objective.add_term(index.column(w, c, p), lane_costs[w * index.customers() + c]);
        }

        let capacity_rows = capacity.len();
        let program = LinearProgram::minimize(objective)
            .variables(variables)
            .subject_to(capacity)
            .subject_to(demand)
            .build();

        tracing::debug!(
            variables = program.num_variables(),
            capacity_rows,
            demand_rows = program.constraints.len() - capacity_rows,
            "built transport model"
        );

        Ok(TransportModel {
            instance,
            index,
            program,
            capacity_rows,
        })
    }

    pub fn instance(&self) -> &'a ProblemInstance {
        self.instance
    }

    pub fn index(&self) -> &ShipmentIndex {
        &self.index
    }

    /// The assembled linear program.
    pub fn program(&self) -> &LinearProgram {
        &self.program
    }

    pub fn variable_count(&self) -> usize {
        self.program.num_variables()
    }

    /// Constraints of one family, in generation order.
    pub fn constraints(&self, family: ConstraintFamily) -> &[LinearConstraint] {
        let (capacity, demand) = self.program.constraints.split_at(self.capacity_rows);
        match family {
            ConstraintFamily::Capacity => capacity,
            ConstraintFamily::Demand => demand,
        }
    }

    pub fn capacity_constraint_count(&self) -> usize {
        self.capacity_rows
    }

    pub fn demand_constraint_count(&self) -> usize {
        self.program.constraints.len() - self.capacity_rows
    }

    /// Names of the triple behind column `col`.
    pub fn triple_names(&self, col: usize) -> Option<(&'a str, &'a str, &'a str)> {
        let (w, c, p) = self.index.triple(col)?;
        let reg = &self.instance.registry;
        Some((
            reg.warehouses.name(w)?,
            reg.customers.name(c)?,
            reg.products.name(p)?,
        ))
    }
}

/// Validated cost of every lane, row-major by warehouse.
fn lane_costs(instance: &ProblemInstance) -> std::result::Result<Vec<f64>, ValidationError> {
    let reg = &instance.registry;
    let mut costs = Vec::with_capacity(reg.warehouses.len() * reg.customers.len());
    for warehouse in reg.warehouses.iter() {
        for customer in reg.customers.iter() {
            costs.push(instance.cost.require(warehouse, customer)?);
        }
    }
    Ok(costs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CapacityTable, CostTable, DemandTable, EntityKind};
    use crate::error::TransportError;

    fn two_by_two() -> ProblemInstance {
        let registry = Registry::new(["W1", "W2"], ["A", "B"], ["X"]).unwrap();
        let cost = CostTable::new()
            .with("W1", "A", 1.0)
            .with("W1", "B", 2.0)
            .with("W2", "A", 3.0)
            .with("W2", "B", 4.0);
        let demand = DemandTable::new().with("A", "X", 5.0).with("B", "X", 6.0);
        let capacity = CapacityTable::new().with("W1", "X", 7.0).with("W2", "X", 8.0);
        ProblemInstance::new(registry, cost, demand, capacity)
    }

    #[test]
    fn test_shipment_index_roundtrip() {
        let reg = Registry::new(["W1", "W2"], ["A", "B", "C"], ["X", "Y"]).unwrap();
        let index = ShipmentIndex::new(&reg);
        assert_eq!(index.len(), 12);
        assert_eq!(index.column(1, 2, 1), 11);
        assert_eq!(index.triple(7), Some((1, 0, 1)));
        assert_eq!(index.triple(12), None);
        for (col, (w, c, p)) in index.iter().enumerate() {
            assert_eq!(index.column(w, c, p), col);
        }
    }

    #[test]
    fn test_build_dimensions() {
        let inst = two_by_two();
        let model = TransportModel::build(&inst).unwrap();
        assert_eq!(model.variable_count(), 4);
        assert_eq!(model.capacity_constraint_count(), 2);
        assert_eq!(model.demand_constraint_count(), 2);
        assert_eq!(model.constraints(ConstraintFamily::Demand)[0].name, "demand[A,X]");
        assert_eq!(model.program().variables[3].name, "ship[W2,B,X]");
        assert_eq!(model.triple_names(1), Some(("W1", "B", "X")));
    }

    #[test]
    fn test_objective_uses_lane_cost_for_every_product() {
        let registry = Registry::new(["W"], ["C"], ["P1", "P2", "P3"]).unwrap();
        let inst = ProblemInstance::new(
            registry,
            CostTable::new().with("W", "C", 5.0),
            ["P1", "P2", "P3"].iter().map(|p| (("C", *p), 1.0)).collect(),
            ["P1", "P2", "P3"].iter().map(|p| (("W", *p), 1.0)).collect(),
        );
        let model = TransportModel::build(&inst).unwrap();
        let coeffs: Vec<f64> = model.program().objective.coeffs.values().copied().collect();
        assert_eq!(coeffs, vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_build_missing_cost() {
        let mut inst = two_by_two();
        inst.cost.remove("W2", "A");
        let err = TransportModel::build(&inst).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Validation(ValidationError::MissingEntry { table: "cost", ref row, ref col })
                if row == "W2" && col == "A"
        ));
    }

    #[test]
    fn test_build_negative_demand() {
        let mut inst = two_by_two();
        inst.demand.insert("B", "X", -3.0);
        let err = TransportModel::build(&inst).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Validation(ValidationError::NegativeValue { table: "demand", .. })
        ));
    }

    #[test]
    fn test_build_unknown_identifier() {
        let mut inst = two_by_two();
        inst.cost.insert("W9", "A", 1.0);
        let err = TransportModel::build(&inst).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Validation(ValidationError::UnknownIdentifier {
                kind: EntityKind::Warehouse,
                ..
            })
        ));
    }

    #[test]
    fn test_build_is_deterministic() {
        let inst = two_by_two();
        let a = TransportModel::build(&inst).unwrap();
        let b = TransportModel::build(&inst).unwrap();
        assert_eq!(a.program().constraints, b.program().constraints);
        assert_eq!(a.program().objective, b.program().objective);
    }
}
