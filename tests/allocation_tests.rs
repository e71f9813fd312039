//! End-to-end allocation scenarios through the public API.
//!
//! Covers the documented worked examples, the sleep and error paths, and a
//! few multi-user cases checked by hand.

use rcg_core::{
    allocate, Allocation, AllocationError, CostMatrix, RateCravingGreedy, RcgConfig,
    TargetCounts, Trade,
};

// ─── helpers ─────────────────────────────────────────────────────────────────

fn assigned(costs: &CostMatrix, targets: &[f32]) -> rcg_core::Assignment {
    match allocate(costs, targets) {
        Ok(Allocation::Assigned(a)) => a,
        other => panic!("expected an assignment, got {:?}", other),
    }
}

// ─── worked examples ─────────────────────────────────────────────────────────

#[test]
fn test_tie_break_example_needs_no_trades() {
    let costs = CostMatrix::from_array(&[[5.0, 5.0], [1.0, 9.0]]);
    let a = assigned(&costs, &[1.0, 1.0]);

    assert_eq!(a.owners(), &[0, 1], "subcarrier 0 tie must go to user 0");
    assert_eq!(a.initial_load(), &[1, 1]);
    assert_eq!(a.trade_count(), 0);
}

#[test]
fn test_rebalancing_example_moves_subcarrier_one() {
    let costs = CostMatrix::from_array(&[[10.0, 1.0], [9.0, 2.0], [1.0, 10.0]]);
    let a = assigned(&costs, &[1.0, 2.0]);

    assert_eq!(a.initial_load(), &[2, 1]);
    // |2 - 9| = 7 beats |1 - 10| = 9
    assert_eq!(a.trades(), &[Trade { subcarrier: 1, from: 0, to: 1, cost_delta: -7.0 }]);
    assert_eq!(a.owners(), &[0, 1, 1]);
    assert_eq!(a.load(), [1, 2]);
}

#[test]
fn test_overloaded_users_are_processed_in_index_order() {
    let costs = CostMatrix::from_array(&[
        [9.0, 0.0, 0.0],
        [8.0, 0.0, 1.0],
        [0.0, 9.0, 0.0],
        [0.0, 8.0, 2.0],
    ]);
    let a = assigned(&costs, &[1.0, 1.0, 2.0]);

    assert_eq!(a.initial_load(), &[2, 2, 0]);
    let moves: Vec<(usize, usize, usize)> =
        a.trades().iter().map(|t| (t.subcarrier, t.from, t.to)).collect();
    assert_eq!(moves, [(1, 0, 2), (3, 1, 2)]);
    assert_eq!(a.owners(), &[0, 2, 1, 2]);
    assert_eq!(a.load(), [1, 1, 2]);
}

#[test]
fn test_demo_shape_meets_targets() {
    let costs = CostMatrix::from_array(&[
        [0.9, 0.1, 0.2, 0.3],
        [0.8, 0.7, 0.1, 0.6],
        [0.7, 0.2, 0.6, 0.1],
        [0.2, 0.3, 0.9, 0.4],
        [0.6, 0.5, 0.4, 0.95],
    ]);
    let a = assigned(&costs, &[1.0, 2.0, 2.0, 0.0]);

    assert_eq!(a.initial_load(), &[3, 0, 1, 1]);
    assert_eq!(a.load(), [1, 2, 2, 0]);
    assert_eq!(a.trade_count(), 3);
    assert!(a.subcarriers_of(3).next().is_none(), "user 3 has a zero target");
}

// ─── sleep slot ──────────────────────────────────────────────────────────────

#[test]
fn test_all_nan_targets_is_a_sleep_slot() {
    let costs = CostMatrix::from_array(&[[0.1, 0.2, 0.3, 0.4]; 5]);
    let out = allocate(&costs, &[f32::NAN; 4]).unwrap();

    assert!(out.is_sleep());
    assert_eq!(out, Allocation::Sleep { subcarriers: 5 });
    let map = out.owner_map();
    assert_eq!(map.len(), 5);
    assert!(map.iter().all(|v| v.is_nan()));
    assert_eq!(out.initial_map(), None);
    assert!(out.assignment().is_none());
}

#[test]
fn test_sleep_skips_target_sum_check() {
    // 3 subcarriers, targets cannot sum to anything: still a clean sleep
    let costs = CostMatrix::from_array(&[[1.0, 2.0]; 3]);
    assert!(allocate(&costs, &[f32::NAN, f32::NAN]).unwrap().is_sleep());
}

// ─── errors ──────────────────────────────────────────────────────────────────

#[test]
fn test_target_length_mismatch() {
    let costs = CostMatrix::from_array(&[[0.1, 0.2, 0.3, 0.4]; 4]);
    assert_eq!(
        allocate(&costs, &[1.0, 1.0, 2.0]),
        Err(AllocationError::InputMismatch { users: 4, targets: 3 })
    );
}

#[test]
fn test_mismatch_is_reported_before_target_parsing() {
    let costs = CostMatrix::from_array(&[[0.1, 0.2]; 2]);
    // an invalid entry would also fail parsing; the shape check wins
    assert_eq!(
        allocate(&costs, &[-1.0]),
        Err(AllocationError::InputMismatch { users: 2, targets: 1 })
    );
}

#[test]
fn test_targets_short_of_subcarriers_are_inconsistent() {
    let costs = CostMatrix::from_array(&[[3.0, 1.0], [3.0, 1.0], [3.0, 1.0]]);
    assert_eq!(
        allocate(&costs, &[1.0, 1.0]),
        Err(AllocationError::InconsistentTarget { target_sum: 2, subcarriers: 3 })
    );
}

#[test]
fn test_targets_beyond_subcarriers_are_inconsistent() {
    let costs = CostMatrix::from_array(&[[3.0, 1.0], [3.0, 1.0]]);
    assert_eq!(
        allocate(&costs, &[2.0, 2.0]),
        Err(AllocationError::InconsistentTarget { target_sum: 4, subcarriers: 2 })
    );
}

#[test]
fn test_invalid_target_values() {
    let costs = CostMatrix::from_array(&[[3.0, 1.0], [3.0, 1.0]]);
    assert_eq!(
        allocate(&costs, &[1.5, 0.5]),
        Err(AllocationError::InvalidTarget { user: 0, value: 1.5 })
    );
    assert_eq!(
        allocate(&costs, &[3.0, -1.0]),
        Err(AllocationError::InvalidTarget { user: 1, value: -1.0 })
    );
}

#[test]
fn test_all_nan_row_is_unrankable() {
    let costs = CostMatrix::from_array(&[[1.0, 2.0], [f32::NAN, f32::NAN]]);
    assert_eq!(
        allocate(&costs, &[1.0, 1.0]),
        Err(AllocationError::UnrankableSubcarrier { subcarrier: 1 })
    );
}

// ─── NaN handling ────────────────────────────────────────────────────────────

#[test]
fn test_nan_cost_cells_are_never_used() {
    // subcarrier 1 cannot go to user 1; the trade must move subcarrier 0
    let costs = CostMatrix::from_array(&[[4.0, 1.0], [5.0, f32::NAN], [0.0, 3.0]]);
    let a = assigned(&costs, &[1.0, 2.0]);

    assert_eq!(a.initial_load(), &[2, 1]);
    assert_eq!(a.owners(), &[1, 0, 1]);
}

#[test]
fn test_partially_nan_targets_mark_inactive_users() {
    let costs = CostMatrix::from_array(&[[1.0, 5.0, 2.0], [3.0, 9.0, 1.0]]);
    let a = assigned(&costs, &[1.0, f32::NAN, 1.0]);

    assert_eq!(a.initial_load(), &[0, 2, 0]);
    // user 1 sheds both: first to user 2 (|2 - 5| = 3), then to user 0
    let moves: Vec<(usize, usize)> = a.trades().iter().map(|t| (t.subcarrier, t.to)).collect();
    assert_eq!(moves, [(0, 2), (1, 0)]);
    assert_eq!(a.load(), [1, 0, 1]);
}

// ─── API surface ─────────────────────────────────────────────────────────────

#[test]
fn test_typed_and_float_targets_agree() {
    let costs = CostMatrix::from_array(&[[10.0, 1.0], [9.0, 2.0], [1.0, 10.0]]);
    let rcg = RateCravingGreedy::new(RcgConfig::default());
    let from_floats = rcg.allocate(&costs, &[1.0, 2.0]).unwrap();
    let from_counts = rcg.allocate_counts(&costs, &TargetCounts::from_counts(&[1, 2])).unwrap();
    assert_eq!(from_floats, from_counts);
}

#[test]
fn test_typed_targets_still_check_user_count() {
    let costs = CostMatrix::from_array(&[[10.0, 1.0]]);
    let rcg = RateCravingGreedy::default();
    assert_eq!(
        rcg.allocate_counts(&costs, &TargetCounts::from_counts(&[1])),
        Err(AllocationError::InputMismatch { users: 2, targets: 1 })
    );
}

#[test]
fn test_input_matrix_is_left_untouched() {
    let costs = CostMatrix::from_array(&[[10.0, 1.0], [9.0, 2.0], [1.0, 10.0]]);
    let before = costs.clone();
    let _ = allocate(&costs, &[1.0, 2.0]).unwrap();
    assert_eq!(costs, before);
}

#[test]
fn test_owner_map_renders_indices_as_floats() {
    let costs = CostMatrix::from_array(&[[10.0, 1.0], [9.0, 2.0], [1.0, 10.0]]);
    let out = allocate(&costs, &[1.0, 2.0]).unwrap();
    assert_eq!(out.owner_map(), [0.0, 1.0, 1.0]);
    assert_eq!(out.initial_map(), Some(&[2, 1][..]));
}

#[test]
fn test_zero_subcarriers() {
    let costs = CostMatrix::new(0, 3, Vec::new()).unwrap();
    let a = assigned(&costs, &[0.0, 0.0, 0.0]);
    assert!(a.owners().is_empty());
    assert_eq!(a.initial_load(), &[0, 0, 0]);
}

#[test]
fn test_from_rows_feeds_the_allocator() {
    let rows = vec![vec![10.0f32, 1.0], vec![9.0, 2.0], vec![1.0, 10.0]];
    let costs = CostMatrix::from_rows(&rows[..]).unwrap();
    assert_eq!(assigned(&costs, &[1.0, 2.0]).owners(), &[0, 1, 1]);
}
