//! Property-based tests for transport plans.
//!
//! Random small instances, at unit scale up to demands in the millions and
//! with or without spare capacity, are checked for:
//! - capacity and demand satisfaction, objective consistency, non-negativity
//! - infeasibility detection when total demand exceeds total capacity
//! - deterministic model construction

mod common;

use common::{check_plan, dense_instance};
use proptest::collection::vec;
use proptest::prelude::*;
use shiplp::prelude::*;

const TOL: f64 = 1e-4;

/// Dimensions plus flat cost, demand and extra-capacity tables.
type Raw = (usize, usize, usize, Vec<f64>, Vec<f64>, Vec<f64>);

fn raw_instance(demand_range: std::ops::Range<f64>) -> impl Strategy<Value = Raw> {
    (1usize..=3, 1usize..=3, 1usize..=3).prop_flat_map(move |(w, c, p)| {
        (
            Just(w),
            Just(c),
            Just(p),
            vec(0.0f64..20.0, w * c),
            vec(demand_range.clone(), c * p),
            vec(0.0f64..30.0, w * p),
        )
    })
}

fn split<T: Clone>(flat: &[T], cols: usize) -> Vec<Vec<T>> {
    flat.chunks(cols).map(|row| row.to_vec()).collect()
}

/// Multiplier applied to demand and capacity.
fn magnitude() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), Just(1e3), Just(1e6)]
}

/// Per-product total demand.
fn totals(demand: &[Vec<f64>], products: usize) -> Vec<f64> {
    (0..products)
        .map(|p| demand.iter().map(|row| row[p]).sum())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn feasible_plans_respect_all_constraints(
        (w, c, p, cost, demand, extra) in raw_instance(0.0..30.0),
        scale in magnitude(),
        tight in any::<bool>()
    ) {
        let cost = split(&cost, c);
        let demand: Vec<f64> = demand.iter().map(|d| d * scale).collect();
        let demand = split(&demand, p);
        let total = totals(&demand, p);

        // Spread each product's total demand over the warehouses; slack only
        // when not tight
        let slack = if tight { 0.0 } else { scale };
        let capacity: Vec<Vec<f64>> = (0..w)
            .map(|wi| {
                (0..p)
                    .map(|pi| total[pi] / w as f64 + slack * extra[wi * p + pi])
                    .collect()
            })
            .collect();

        let instance = dense_instance(&cost, &demand, &capacity);
        let report = plan(&instance, &ClarabelSolver::default()).unwrap();

        prop_assert_eq!(report.status(), TerminationStatus::Optimal);
        check_plan(&instance, report.solution().unwrap(), TOL);
    }

    #[test]
    fn short_supply_is_infeasible(
        (w, c, p, cost, demand, _extra) in raw_instance(1.0..30.0),
        fraction in 0.1f64..0.9
    ) {
        let cost = split(&cost, c);
        let demand = split(&demand, p);
        let total = totals(&demand, p);

        let capacity: Vec<Vec<f64>> = (0..w)
            .map(|_| (0..p).map(|pi| fraction * total[pi] / w as f64).collect())
            .collect();

        let instance = dense_instance(&cost, &demand, &capacity);
        let report = plan(&instance, &ClarabelSolver::default()).unwrap();

        prop_assert_eq!(report.status(), TerminationStatus::Infeasible);
        prop_assert!(report.solution().is_none());
    }

    #[test]
    fn model_size_matches_cross_product(
        (w, c, p, cost, demand, extra) in raw_instance(0.0..30.0)
    ) {
        let instance = dense_instance(&split(&cost, c), &split(&demand, p), &split(&extra, p));
        let model = TransportModel::build(&instance).unwrap();

        prop_assert_eq!(model.variable_count(), w * c * p);
        prop_assert_eq!(model.capacity_constraint_count(), w * p);
        prop_assert_eq!(model.demand_constraint_count(), c * p);

        let again = TransportModel::build(&instance).unwrap();
        prop_assert_eq!(&model.program().constraints, &again.program().constraints);
    }
}
