//! A complete problem instance and its JSON document form.
//!
//! ```ignore
//! {
//!   "warehouses": ["W1", "W2"],
//!   "customers": ["A"],
//!   "products": ["X"],
//!   "cost":     [{"warehouse": "W1", "customer": "A", "value": 8.0}, ...],
//!   "demand":   [{"customer": "A", "product": "X", "value": 10.0}],
//!   "capacity": [{"warehouse": "W1", "product": "X", "value": 6.0}, ...]
//! }
//! ```

use std::io::Read;

use serde::Deserialize;

use super::registry::Registry;
use super::tables::{CapacityTable, CostTable, DemandTable};
use crate::error::Result;

/// Identifier sets plus the three parameter tables of one problem.
///
/// Construction only checks that the identifier sets are non-empty; the
/// tables are validated against the registry when a model is built.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub registry: Registry,
    pub cost: CostTable,
    pub demand: DemandTable,
    pub capacity: CapacityTable,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InstanceDocument {
    warehouses: Vec<String>,
    customers: Vec<String>,
    products: Vec<String>,
    #[serde(default)]
    cost: Vec<CostRecord>,
    #[serde(default)]
    demand: Vec<DemandRecord>,
    #[serde(default)]
    capacity: Vec<CapacityRecord>,
}

#[derive(Debug, Deserialize)]
struct CostRecord {
    warehouse: String,
    customer: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct DemandRecord {
    customer: String,
    product: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct CapacityRecord {
    warehouse: String,
    product: String,
    value: f64,
}

impl ProblemInstance {
    pub fn new(registry: Registry, cost: CostTable, demand: DemandTable, capacity: CapacityTable) -> Self {
        ProblemInstance {
            registry,
            cost,
            demand,
            capacity,
        }
    }

    /// Decode an instance from a JSON document.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed JSON, `Validation` if an identifier set is empty.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: InstanceDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Decode an instance from a JSON reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let doc: InstanceDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    fn from_document(doc: InstanceDocument) -> Result<Self> {
        let registry = Registry::new(doc.warehouses, doc.customers, doc.products)?;

        let cost = doc
            .cost
            .into_iter()
            .map(|r| ((r.warehouse, r.customer), r.value))
            .collect();
        let demand = doc
            .demand
            .into_iter()
            .map(|r| ((r.customer, r.product), r.value))
            .collect();
        let capacity = doc
            .capacity
            .into_iter()
            .map(|r| ((r.warehouse, r.product), r.value))
            .collect();

        Ok(ProblemInstance::new(registry, cost, demand, capacity))
    }

    /// Sum of demand for `product` over all registered customers.
    ///
    /// Missing entries count as zero here; this is a diagnostic, not a model
    /// input.
    pub fn total_demand(&self, product: &str) -> f64 {
        self.registry
            .customers
            .iter()
            .filter_map(|c| self.demand.get(c, product))
            .sum()
    }

    /// Sum of capacity for `product` over all registered warehouses.
    pub fn total_capacity(&self, product: &str) -> f64 {
        self.registry
            .warehouses
            .iter()
            .filter_map(|w| self.capacity.get(w, product))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TransportError, ValidationError};

    const DOC: &str = r#"{
        "warehouses": ["W1", "W2"],
        "customers": ["A"],
        "products": ["X"],
        "cost": [
            {"warehouse": "W1", "customer": "A", "value": 8},
            {"warehouse": "W2", "customer": "A", "value": 10}
        ],
        "demand": [{"customer": "A", "product": "X", "value": 10}],
        "capacity": [
            {"warehouse": "W1", "product": "X", "value": 6},
            {"warehouse": "W2", "product": "X", "value": 20}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let inst = ProblemInstance::from_json(DOC).unwrap();
        assert_eq!(inst.registry.warehouses.len(), 2);
        assert_eq!(inst.cost.get("W2", "A"), Some(10.0));
        assert_eq!(inst.total_demand("X"), 10.0);
        assert_eq!(inst.total_capacity("X"), 26.0);
    }

    #[test]
    fn test_from_reader() {
        let inst = ProblemInstance::from_reader(DOC.as_bytes()).unwrap();
        assert_eq!(inst.capacity.len(), 2);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ProblemInstance::from_json("{\"warehouses\": [").unwrap_err();
        assert!(matches!(err, TransportError::Parse(_)));
    }

    #[test]
    fn test_from_json_empty_set() {
        let doc = r#"{"warehouses": [], "customers": ["A"], "products": ["X"]}"#;
        let err = ProblemInstance::from_json(doc).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Validation(ValidationError::EmptySet { .. })
        ));
    }
}
