//! Instance data: identifier sets and parameter tables.
//!
//! This module holds everything that describes *one* transportation problem,
//! independent of how it is turned into a linear program:
//! - `Registry` - the warehouse, customer and product identifier sets
//! - `CostTable`, `DemandTable`, `CapacityTable` - the parameter tables
//! - `ProblemInstance` - the bundle of both, loadable from JSON

pub mod instance;
pub mod registry;
pub mod tables;

pub use instance::ProblemInstance;
pub use registry::{EntityKind, IdSet, Registry};
pub use tables::{Capacity, CapacityTable, Cost, CostTable, Demand, DemandTable, ParamTable, TableKind};
