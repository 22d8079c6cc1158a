//! Warehouse Network Example
//!
//! Three warehouses supply four customers with three products. Each
//! warehouse→customer lane has one unit cost shared by all products.
//!
//! minimize    sum_{w,c,p} x[w,c,p] * cost[w,c]
//! subject to  sum_c x[w,c,p] <= capacity[w,p]
//!             sum_w x[w,c,p] >= demand[c,p]
//!             x >= 0

use shiplp::prelude::*;

const NETWORK: &str = include_str!("warehouse_network.json");

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Warehouse Network ===\n");

    let instance = ProblemInstance::from_json(NETWORK)?;
    let reg = &instance.registry;
    println!(
        "{} warehouses, {} customers, {} products\n",
        reg.warehouses.len(),
        reg.customers.len(),
        reg.products.len()
    );

    println!("Solving...");
    let report = plan(&instance, &ClarabelSolver::default())?;

    match &report {
        Report::Optimal(solution) => {
            println!("\nResults:");
            println!("  Status: {:?}", report.status());
            println!("  Total transportation cost: {:.4}", solution.total_cost);
            for s in solution.active(1e-6) {
                println!(
                    "  {:>10} -> {:<10} {:<9} {:>8.4}",
                    s.warehouse, s.customer, s.product, s.quantity
                );
            }
        }
        Report::NotSolved(failure) => {
            println!("\nOptimization failed. Status: {:?}", failure.status);
            for s in &failure.shortfalls {
                println!(
                    "  {}: demand {} exceeds capacity {}",
                    s.product, s.demand, s.capacity
                );
            }
        }
    }

    println!("\nJSON:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
