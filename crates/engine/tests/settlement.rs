use chrono::Utc;

use engine::{Expense, ParticipantId, Split, Transfer, balance, settlement, transfer};

fn expense(payer: &str, total: f64, splits: &[(&str, f64)]) -> Expense {
    Expense {
        payer: payer.into(),
        total_amount: total,
        splits: splits
            .iter()
            .map(|(debtor, amount)| Split {
                debtor: (*debtor).into(),
                amount_owed: *amount,
            })
            .collect(),
        occurred_at: Utc::now(),
    }
}

fn transfer(from: &str, to: &str, amount: f64) -> Transfer {
    Transfer {
        from: from.into(),
        to: to.into(),
        amount,
    }
}

fn id(email: &str) -> ParticipantId {
    email.into()
}

#[test]
fn one_expense_split_between_payer_and_friend() {
    let expenses = vec![expense("a@x.it", 100.0, &[("a@x.it", 50.0), ("b@x.it", 50.0)])];

    let balances = balance::aggregate(&expenses);
    assert_eq!(balances[&id("a@x.it")], 50.0);
    assert_eq!(balances[&id("b@x.it")], -50.0);

    let transfers = transfer::minimize(&balances);
    assert_eq!(transfers, vec![transfer("b@x.it", "a@x.it", 50.0)]);

    assert_eq!(settlement::for_user(&expenses, &id("a@x.it")).amount, 50.0);
    assert_eq!(settlement::for_user(&expenses, &id("b@x.it")).amount, -50.0);
}

#[test]
fn three_way_equal_split() {
    let expenses = vec![expense(
        "a@x.it",
        90.0,
        &[("a@x.it", 30.0), ("b@x.it", 30.0), ("c@x.it", 30.0)],
    )];

    let balances = balance::aggregate(&expenses);
    assert_eq!(balances[&id("a@x.it")], 60.0);
    assert_eq!(balances[&id("b@x.it")], -30.0);
    assert_eq!(balances[&id("c@x.it")], -30.0);

    let transfers = transfer::minimize(&balances);
    assert_eq!(
        transfers,
        vec![
            transfer("b@x.it", "a@x.it", 30.0),
            transfer("c@x.it", "a@x.it", 30.0),
        ]
    );
}

#[test]
fn round_trip_expenses_cancel_out() {
    let expenses = vec![
        expense("a@x.it", 50.0, &[("a@x.it", 25.0), ("b@x.it", 25.0)]),
        expense("b@x.it", 50.0, &[("a@x.it", 25.0), ("b@x.it", 25.0)]),
    ];

    let balances = balance::aggregate(&expenses);
    assert_eq!(balances[&id("a@x.it")], 0.0);
    assert_eq!(balances[&id("b@x.it")], 0.0);

    assert!(transfer::minimize(&balances).is_empty());
}

#[test]
fn chain_collapse_uses_at_most_n_minus_one_transfers() {
    let balances = [("a@x.it", 100.0), ("b@x.it", -40.0), ("c@x.it", -60.0)]
        .into_iter()
        .map(|(email, amount)| (id(email), amount))
        .collect();

    let transfers = transfer::minimize(&balances);
    assert_eq!(
        transfers,
        vec![
            transfer("c@x.it", "a@x.it", 60.0),
            transfer("b@x.it", "a@x.it", 40.0),
        ]
    );
    assert_eq!(transfers.len(), 2);
}

#[test]
fn leftover_creditor_is_paid_by_the_same_debtor() {
    let balances = [("a@x.it", 100.0), ("b@x.it", 20.0), ("c@x.it", -120.0)]
        .into_iter()
        .map(|(email, amount)| (id(email), amount))
        .collect();

    let transfers = transfer::minimize(&balances);
    assert_eq!(
        transfers,
        vec![
            transfer("c@x.it", "a@x.it", 100.0),
            transfer("c@x.it", "b@x.it", 20.0),
        ]
    );
}

#[test]
fn self_split_with_duplicate_debtor_rows() {
    let expenses = vec![expense(
        "a@x.it",
        30.0,
        &[("a@x.it", 10.0), ("a@x.it", 10.0), ("b@x.it", 10.0)],
    )];

    let balances = balance::aggregate(&expenses);
    assert_eq!(balances[&id("a@x.it")], 10.0);
    assert_eq!(balances[&id("b@x.it")], -10.0);

    let transfers = transfer::minimize(&balances);
    assert_eq!(transfers, vec![transfer("b@x.it", "a@x.it", 10.0)]);
}

#[test]
fn empty_ledger_settles_to_nothing() {
    let expenses: Vec<Expense> = Vec::new();

    let balances = balance::aggregate(&expenses);
    assert!(balances.is_empty());
    assert!(transfer::minimize(&balances).is_empty());

    let view = settlement::for_user(&expenses, &id("a@x.it"));
    assert!(view.transfers.is_empty());
    assert_eq!(view.amount, 0.0);
}

#[test]
fn lone_participant_with_zero_balance() {
    let balances = [(id("a@x.it"), 0.0)].into_iter().collect();
    assert!(transfer::minimize(&balances).is_empty());
}

#[test]
fn settlement_view_matches_transfer_slice() {
    let expenses = vec![
        expense("a@x.it", 60.0, &[("b@x.it", 30.0), ("c@x.it", 30.0)]),
        expense("b@x.it", 20.0, &[("c@x.it", 20.0)]),
    ];

    let all = transfer::minimize(&balance::aggregate(&expenses));
    for email in ["a@x.it", "b@x.it", "c@x.it"] {
        let user = id(email);
        let view = settlement::for_user(&expenses, &user);
        assert_eq!(view.transfers, settlement::transfers_for(&all, &user));
        assert_eq!(view.amount, settlement::scalar_for(&view.transfers, &user));
    }
}
