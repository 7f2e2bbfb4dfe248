//! `simulate`: the single entry point of the engine.
//!
//! Deterministic given the same inputs (log text included). Inputs are only
//! borrowed; the engine mutates nothing but its own pool copy.

use alloc::vec::Vec;

use fleet_core::{OdPair, SimulationResult, VehicleRule};

use crate::aggregate::{aggregate, finish_vehicle};
use crate::allocation::run_allocation_loop;
use crate::demand::DemandPool;
use crate::ordering::processing_order;
use crate::redundancy::apply_redundancy_fill;
use crate::state::VehicleState;

/// Allocate waiting demand onto the vehicles serving one route.
///
/// Never fails: degenerate inputs (no rules, no demand, zero-seat vehicles,
/// odd thresholds) still produce a complete result.
pub fn simulate(rules: &[VehicleRule], demand: &[OdPair]) -> SimulationResult {
    let mut pool = DemandPool::from_snapshot(demand);
    let mut results = Vec::with_capacity(rules.len());

    for rule in processing_order(rules) {
        let mut state = VehicleState::open(rule);
        run_allocation_loop(&mut state, &mut pool);
        apply_redundancy_fill(&mut state, &mut pool);
        results.push(finish_vehicle(state));
    }

    aggregate(results, &pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{od, rule};
    use alloc::string::ToString;
    use alloc::vec;
    use fleet_core::{LogKind, ThresholdConfig};
    use proptest::prelude::*;

    fn total_demand(demand: &[OdPair]) -> u64 {
        demand.iter().map(|d| u64::from(d.demand())).sum()
    }

    #[test]
    fn degenerate_inputs_return_complete_results() {
        let empty = simulate(&[], &[]);
        assert!(empty.vehicle_results.is_empty());
        assert_eq!(empty.unallocated_passengers, 0);

        let only_demand = simulate(&[], &[od("a", 5)]);
        assert_eq!(only_demand.unallocated_passengers, 5);

        let zero_seat = simulate(&[rule("v1", 0, 0, vec![od("a", 5)])], &[od("a", 5)]);
        assert_eq!(zero_seat.vehicle_results[0].allocated_passengers, 0);
        assert!(zero_seat.vehicle_results[0].is_full());
        assert_eq!(zero_seat.unallocated_passengers, 5);
    }

    #[test]
    fn huge_duplicate_demand_is_conserved() {
        let demand = vec![od("a", u32::MAX), od("a", 10)];
        let res = simulate(&[rule("v1", 5, 0, vec![od("a", 0)])], &demand);
        assert_eq!(res.vehicle_results[0].allocated_passengers, 5);
        assert_eq!(res.total_allocated() + res.unallocated_passengers, 4_294_967_305);
        assert_eq!(res.unallocated_passengers, total_demand(&demand) - 5);
    }

    #[test]
    fn higher_priority_takes_the_shared_od() {
        let demand = vec![od("x", 6)];
        let rules = vec![
            rule("low", 10, 1, vec![od("x", 6)]),
            rule("high", 10, 9, vec![od("x", 6)]),
        ];
        let res = simulate(&rules, &demand);
        assert_eq!(res.vehicle_results[0].vehicle_id.as_str(), "high");
        assert_eq!(res.vehicle_results[0].allocated_passengers, 6);
        assert_eq!(res.vehicle_results[1].allocated_passengers, 0);
        assert_eq!(res.unallocated_passengers, 0);
    }

    #[test]
    fn tie_order_decides_scarce_demand() {
        let demand = vec![od("x", 4)];
        let rules = vec![
            rule("first", 4, 5, vec![od("x", 4)]),
            rule("second", 4, 5, vec![od("x", 4)]),
        ];
        let res = simulate(&rules, &demand);
        assert_eq!(res.vehicle_results[0].vehicle_id.as_str(), "first");
        assert_eq!(res.vehicle_results[0].allocated_passengers, 4);
        assert_eq!(res.vehicle_results[1].allocated_passengers, 0);
    }

    #[test]
    fn skipped_group_is_served_by_a_later_vehicle() {
        let demand = vec![od("a", 8)];
        let mut small = rule("small", 5, 10, vec![od("a", 8)]);
        small.full_load_threshold = ThresholdConfig::enabled(5);
        let big = rule("big", 20, 1, vec![od("a", 8)]);
        let res = simulate(&[small, big], &demand);

        let s = &res.vehicle_results[0];
        assert_eq!(s.allocated_passengers, 0);
        assert_eq!(s.remaining_seats, 5);
        assert!(s.logs.iter().any(|l| l.kind == LogKind::Skip));
        assert_eq!(res.vehicle_results[1].allocated_passengers, 8);
        assert_eq!(res.unallocated_passengers, 0);
    }

    #[test]
    fn captain_precedence_reserves_two_seats() {
        let demand = vec![od("a", 50)];
        let mut r = rule("v1", 10, 0, vec![od("a", 50)]);
        r.has_fixed_captain = true;
        r.fixed_captain_name = Some("X".to_string());
        r.enable_temp_captain = true;
        r.temp_captain_names = vec!["A".to_string(), "B".to_string()];
        let res = simulate(&[r], &demand);
        assert_eq!(res.vehicle_results[0].allocated_passengers, 8);
        assert_eq!(res.unallocated_passengers, 42);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let demand = vec![od("a", 9)];
        let rules = vec![rule("v1", 4, 0, vec![od("a", 9)])];
        let (d0, r0) = (demand.clone(), rules.clone());
        let _ = simulate(&rules, &demand);
        assert_eq!(demand, d0);
        assert_eq!(rules, r0);
    }

    #[test]
    fn reference_route_scenario() {
        // Two vehicles of one morning route, fixed captain on the first.
        let od1 = od("od1", 45);
        let od2 = od("od2", 12);
        let od3 = od("od3", 8);
        let demand = vec![od1.clone(), od2.clone(), od3.clone(), od("od4", 20)];

        let mut v1 = rule("v1", 48, 100, vec![od1.clone(), od2.clone()]);
        v1.total_seats = 50;
        v1.has_fixed_captain = true;
        v1.fixed_captain_name = Some("Li".to_string());
        v1.full_load_threshold = ThresholdConfig::enabled(3);
        v1.redundancy_threshold = ThresholdConfig::enabled(2);

        let mut v2 = rule("v2", 30, 90, vec![od1, od3]);
        v2.full_load_threshold = ThresholdConfig { enabled: false, value: 5 };

        let res = simulate(&[v2, v1], &demand);
        let first = &res.vehicle_results[0];
        // 47 usable: 45 from od1, then 2 of od2's 12 (2 seats <= 3, 12 > 2 → skip)
        assert_eq!(first.vehicle_id.as_str(), "v1");
        assert_eq!(first.allocated_passengers, 45);
        assert_eq!(first.remaining_seats, 2);
        assert_eq!(first.logs.last().unwrap().kind, LogKind::Skip);

        let second = &res.vehicle_results[1];
        assert_eq!(second.allocated_passengers, 8);
        assert_eq!(second.remaining_seats, 22);
        assert_eq!(res.unallocated_passengers, 12 + 20);
    }

    // ------------------------------- properties -------------------------------

    fn arb_threshold() -> impl Strategy<Value = ThresholdConfig> {
        (any::<bool>(), -2i64..12).prop_map(|(enabled, value)| ThresholdConfig { enabled, value })
    }

    prop_compose! {
        fn arb_rule(idx: usize, n_ods: usize)(
            available in 0u32..15,
            extra in 0u32..5,
            priority in 0i64..3,
            fixed in any::<bool>(),
            temp in proptest::collection::vec("[A-Z]", 0..3),
            temp_on in any::<bool>(),
            full in arb_threshold(),
            redundancy in arb_threshold(),
            picks in proptest::collection::vec(0..n_ods.max(1), 0..5),
        ) -> VehicleRule {
            let mut r = rule(&alloc::format!("v{idx}"), available, priority, vec![]);
            r.total_seats = available + extra;
            r.has_fixed_captain = fixed;
            r.enable_temp_captain = temp_on;
            r.temp_captain_names = temp;
            r.full_load_threshold = full;
            r.redundancy_threshold = redundancy;
            r.od_priority_list = picks.into_iter().map(|i| od(&alloc::format!("od{i}"), 0)).collect();
            r
        }
    }

    fn arb_case() -> impl Strategy<Value = (Vec<VehicleRule>, Vec<OdPair>)> {
        (1usize..5, 0usize..5).prop_flat_map(|(n_ods, n_rules)| {
            let demand = proptest::collection::vec(0u32..20, n_ods).prop_map(|counts| {
                counts
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| od(&alloc::format!("od{i}"), c))
                    .collect::<Vec<_>>()
            });
            let rules: Vec<_> = (0..n_rules).map(|i| arb_rule(i, n_ods)).collect();
            (rules, demand)
        })
    }

    proptest! {
        #[test]
        fn passengers_are_conserved((rules, demand) in arb_case()) {
            let res = simulate(&rules, &demand);
            prop_assert_eq!(res.total_allocated() + res.unallocated_passengers, total_demand(&demand));
            prop_assert_eq!(res.vehicle_results.len(), rules.len());
        }

        #[test]
        fn simulation_is_deterministic((rules, demand) in arb_case()) {
            prop_assert_eq!(simulate(&rules, &demand), simulate(&rules, &demand));
        }

        #[test]
        fn never_exceeds_physical_capacity((rules, demand) in arb_case()) {
            let res = simulate(&rules, &demand);
            for vr in &res.vehicle_results {
                let rule = rules.iter().find(|r| r.vehicle_id == vr.vehicle_id).unwrap();
                let reserved = crate::reserve_captain_seats(rule).seats;
                prop_assert!(
                    u64::from(vr.allocated_passengers)
                        <= u64::from(rule.total_seats.max(rule.available_seats).saturating_sub(reserved))
                );
            }
        }
    }
}
