//! Shared helpers for integration tests.

#![allow(dead_code)]

use shiplp::prelude::*;

/// Build an instance from dense tables.
///
/// `cost[w][c]`, `demand[c][p]`, `capacity[w][p]`; identifiers are generated
/// as `W0..`, `C0..`, `P0..`.
pub fn dense_instance(cost: &[Vec<f64>], demand: &[Vec<f64>], capacity: &[Vec<f64>]) -> ProblemInstance {
    let warehouses: Vec<String> = (0..cost.len()).map(|w| format!("W{w}")).collect();
    let customers: Vec<String> = (0..demand.len()).map(|c| format!("C{c}")).collect();
    let products: Vec<String> = (0..demand[0].len()).map(|p| format!("P{p}")).collect();

    let mut cost_table = CostTable::new();
    let mut capacity_table = CapacityTable::new();
    let mut demand_table = DemandTable::new();

    for (w, wname) in warehouses.iter().enumerate() {
        for (c, cname) in customers.iter().enumerate() {
            cost_table.insert(wname.as_str(), cname.as_str(), cost[w][c]);
        }
        for (p, pname) in products.iter().enumerate() {
            capacity_table.insert(wname.as_str(), pname.as_str(), capacity[w][p]);
        }
    }
    for (c, cname) in customers.iter().enumerate() {
        for (p, pname) in products.iter().enumerate() {
            demand_table.insert(cname.as_str(), pname.as_str(), demand[c][p]);
        }
    }

    let registry = Registry::new(warehouses, customers, products).expect("non-empty sets");
    ProblemInstance::new(registry, cost_table, demand_table, capacity_table)
}

/// Check capacity, demand, objective consistency and non-negativity.
pub fn check_plan(instance: &ProblemInstance, solution: &Solution, tol: f64) {
    let reg = &instance.registry;

    for w in reg.warehouses.iter() {
        for p in reg.products.iter() {
            let cap = instance.capacity.get(w, p).unwrap();
            let shipped = solution.shipped_from(w, p);
            assert!(
                shipped <= cap + tol * (1.0 + cap),
                "capacity[{},{}] = {} exceeded: {}",
                w, p, cap, shipped
            );
        }
    }

    for c in reg.customers.iter() {
        for p in reg.products.iter() {
            let demand = instance.demand.get(c, p).unwrap();
            let received = solution.delivered_to(c, p);
            assert!(
                received >= demand - tol * (1.0 + demand),
                "demand[{},{}] = {} not met: {}",
                c, p, demand, received
            );
        }
    }

    let mut expected_cost = 0.0;
    for s in &solution.shipments {
        assert!(s.quantity >= 0.0, "negative shipment {:?}", s);
        expected_cost += s.quantity * instance.cost.get(&s.warehouse, &s.customer).unwrap();
    }
    let rel_err = (solution.total_cost - expected_cost).abs() / (1.0 + expected_cost.abs());
    assert!(
        rel_err < tol,
        "objective {} inconsistent with shipments {}",
        solution.total_cost, expected_cost
    );

    assert_eq!(solution.shipments.len(), reg.triple_count());
}
