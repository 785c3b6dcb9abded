use crate::core::engine::netting::{
    SETTLEMENT_EPSILON, compute_balances, personal_settlement, reduce_to_transfers,
};
use crate::core::models::expense::SharedExpense;
use crate::core::models::group::GroupMember;
use chrono::Utc;
use uuid::Uuid;

fn members(entries: &[(&str, &str)]) -> Vec<GroupMember> {
    entries
        .iter()
        .map(|(user_id, name)| GroupMember {
            user_id: user_id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

fn expense(amount: f64, paid_by: &str, participants: &[&str]) -> SharedExpense {
    SharedExpense {
        id: Uuid::new_v4().to_string(),
        group_id: "g1".to_string(),
        description: "test".to_string(),
        amount,
        paid_by: paid_by.to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        timestamp: Utc::now(),
    }
}

#[test]
fn test_three_way_split_credits_payer() {
    let members = members(&[("a", "Alice"), ("b", "Bob"), ("c", "Carol")]);
    let expenses = vec![expense(300.0, "a", &["a", "b", "c"])];

    let balances = compute_balances(&members, &expenses);
    assert_eq!(balances["a"], 200.0);
    assert_eq!(balances["b"], -100.0);
    assert_eq!(balances["c"], -100.0);

    let transfers = reduce_to_transfers(&members, &balances);
    assert_eq!(transfers.len(), 2);
    assert_eq!(transfers[0].from, "b");
    assert_eq!(transfers[0].to, "a");
    assert_eq!(transfers[0].amount, 100.0);
    assert_eq!(transfers[1].from, "c");
    assert_eq!(transfers[1].to, "a");
    assert_eq!(transfers[1].amount, 100.0);
}

#[test]
fn test_offsetting_expenses_settle_to_zero() {
    let members = members(&[("a", "Alice"), ("b", "Bob")]);
    let expenses = vec![
        expense(100.0, "a", &["a", "b"]),
        expense(100.0, "b", &["a", "b"]),
    ];

    let balances = compute_balances(&members, &expenses);
    assert_eq!(balances["a"], 0.0);
    assert_eq!(balances["b"], 0.0);
    assert!(reduce_to_transfers(&members, &balances).is_empty());
}

#[test]
fn test_single_member_group_is_settled() {
    let members = members(&[("a", "Alice")]);
    let expenses = vec![expense(50.0, "a", &["a"])];

    let balances = compute_balances(&members, &expenses);
    assert_eq!(balances.len(), 1);
    assert_eq!(balances["a"], 0.0);
    assert!(reduce_to_transfers(&members, &balances).is_empty());
}

#[test]
fn test_no_expenses_yields_zero_balances() {
    let members = members(&[("a", "Alice"), ("b", "Bob")]);
    let balances = compute_balances(&members, &[]);
    assert_eq!(balances.len(), 2);
    assert!(balances.values().all(|b| *b == 0.0));
    assert!(reduce_to_transfers(&members, &balances).is_empty());
}

#[test]
fn test_balances_conserve_to_zero() {
    let members = members(&[("a", "Alice"), ("b", "Bob"), ("c", "Carol"), ("d", "Dan")]);
    let expenses = vec![
        expense(100.0, "a", &["a", "b", "c"]),
        expense(74.5, "b", &["b", "d"]),
        expense(9.99, "c", &["a", "b", "c", "d"]),
        expense(250.0, "d", &["a", "c"]),
    ];

    let balances = compute_balances(&members, &expenses);
    let sum: f64 = balances.values().sum();
    assert!(sum.abs() <= SETTLEMENT_EPSILON, "residual {}", sum);
}

#[test]
fn test_applying_transfers_settles_everyone() {
    let members = members(&[("a", "Alice"), ("b", "Bob"), ("c", "Carol"), ("d", "Dan")]);
    let expenses = vec![
        expense(120.0, "a", &["a", "b", "c", "d"]),
        expense(45.0, "b", &["a", "b"]),
        expense(33.34, "c", &["b", "c", "d"]),
    ];

    let mut balances = compute_balances(&members, &expenses);
    let transfers = reduce_to_transfers(&members, &balances);
    for transfer in &transfers {
        *balances.get_mut(&transfer.from).unwrap() += transfer.amount;
        *balances.get_mut(&transfer.to).unwrap() -= transfer.amount;
    }
    for (user_id, balance) in balances {
        assert!(
            balance.abs() <= SETTLEMENT_EPSILON,
            "{} left with {}",
            user_id,
            balance
        );
    }
}

#[test]
fn test_recomputation_is_idempotent() {
    let members = members(&[("a", "Alice"), ("b", "Bob"), ("c", "Carol")]);
    let expenses = vec![
        expense(100.0, "a", &["a", "b", "c"]),
        expense(60.0, "b", &["a", "c"]),
    ];

    let first = compute_balances(&members, &expenses);
    let second = compute_balances(&members, &expenses);
    assert_eq!(first, second);
    assert_eq!(
        reduce_to_transfers(&members, &first),
        reduce_to_transfers(&members, &second)
    );
}

#[test]
fn test_uneven_split_rounds_to_cents() {
    let members = members(&[("a", "Alice"), ("b", "Bob"), ("c", "Carol")]);
    let expenses = vec![expense(100.0, "a", &["a", "b", "c"])];

    let balances = compute_balances(&members, &expenses);
    assert_eq!(balances["a"], 66.67);
    assert_eq!(balances["b"], -33.33);
    assert_eq!(balances["c"], -33.33);

    // The 0.01 residue on the creditor is absorbed by the tolerance
    let transfers = reduce_to_transfers(&members, &balances);
    assert_eq!(transfers.len(), 2);
    assert_eq!(transfers[0].amount, 33.33);
    assert_eq!(transfers[1].amount, 33.33);
}

#[test]
fn test_personal_settlement_resolves_names() {
    let members = members(&[("a", "Alice"), ("b", "Bob"), ("c", "Carol")]);
    let expenses = vec![expense(300.0, "a", &["a", "b", "c"])];
    let balances = compute_balances(&members, &expenses);
    let transfers = reduce_to_transfers(&members, &balances);

    let bob_view = personal_settlement("b", &members, &transfers);
    assert_eq!(bob_view.you_owe.len(), 1);
    assert_eq!(bob_view.you_owe[0].counterpart_id, "a");
    assert_eq!(bob_view.you_owe[0].counterpart_name, "Alice");
    assert_eq!(bob_view.you_owe[0].amount, 100.0);
    assert!(bob_view.you_are_owed.is_empty());

    let alice_view = personal_settlement("a", &members, &transfers);
    assert!(alice_view.you_owe.is_empty());
    assert_eq!(alice_view.you_are_owed.len(), 2);
    assert_eq!(alice_view.you_are_owed[0].counterpart_name, "Bob");
    assert_eq!(alice_view.you_are_owed[1].counterpart_name, "Carol");
}

#[test]
fn test_payer_outside_split_owes_nothing() {
    let members = members(&[("a", "Alice"), ("b", "Bob"), ("c", "Carol")]);
    let expenses = vec![expense(90.0, "a", &["b", "c"])];

    let balances = compute_balances(&members, &expenses);
    assert_eq!(balances["a"], 90.0);
    assert_eq!(balances["b"], -45.0);
    assert_eq!(balances["c"], -45.0);
}
