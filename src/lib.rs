//! # shiplp
//!
//! Multi-commodity transportation planning as a linear program.
//!
//! Given warehouses, customers and products, a unit cost per
//! warehouse→customer lane, a demand per (customer, product) and a capacity
//! per (warehouse, product), shiplp finds how much of each product to ship on
//! each lane so that every demand is met, no capacity is exceeded, and the
//! total transportation cost is minimal.
//!
//! ## Quick Start
//!
//! ```ignore
//! use shiplp::prelude::*;
//!
//! let instance = ProblemInstance::from_json(&std::fs::read_to_string("network.json")?)?;
//! let report = plan(&instance, &ClarabelSolver::default())?;
//!
//! match report {
//!     Report::Optimal(solution) => println!("total cost: {}", solution.total_cost),
//!     Report::NotSolved(failure) => println!("status: {:?}", failure.status),
//! }
//! ```
//!
//! ## Model
//!
//! ```text
//! minimize    sum_{w,c,p} x[w,c,p] * cost[w,c]
//! subject to  sum_c x[w,c,p] <= capacity[w,p]    for all w, p
//!             sum_w x[w,c,p] >= demand[c,p]      for all c, p
//!             x >= 0
//! ```
//!
//! The lane cost is shared by every product on that lane.
//!
//! ## Architecture
//!
//! - **Instance data** (`domain`) is separate from the engine
//! - **Model building** (`transport`) validates the data and emits a generic
//!   `LinearProgram`
//! - **Solvers** implement `LpSolver`; Clarabel is the default engine
//! - **Reporting** (`report`) turns a `SolveResult` into a plan or a failure

pub mod constraints;
pub mod domain;
pub mod error;
pub mod expr;
pub mod problem;
pub mod report;
pub mod solver;
pub mod sparse;
pub mod transport;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use shiplp::prelude::*;
/// ```
pub mod prelude {
    // Instance data
    pub use crate::domain::{
        CapacityTable, CostTable, DemandTable, EntityKind, IdSet, ProblemInstance, Registry,
    };

    // Linear programs
    pub use crate::constraints::{LinearConstraint, Relation};
    pub use crate::expr::{nonneg_variable, Domain, LinExpr, VariableBuilder, VariableDecl};
    pub use crate::problem::{LinearProgram, ProgramBuilder, Sense};

    // Model
    pub use crate::transport::{plan, ConstraintFamily, ShipmentIndex, TransportModel};

    // Solver
    pub use crate::solver::{ClarabelSolver, LpSolver, Settings, SolveResult, TerminationStatus};

    // Report
    pub use crate::report::{Failure, Report, Shipment, Shortfall, Solution};

    // Errors
    pub use crate::error::{Result, TransportError, ValidationError};
}

// Re-export main types at crate root
pub use error::{Result, TransportError, ValidationError};
pub use report::Report;
pub use transport::plan;
