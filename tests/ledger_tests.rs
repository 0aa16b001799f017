// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use wealthflow::models::{Account, AccountType, Transaction, TxnType, new_id};
use wealthflow::{ledger, report};

fn account(name: &str, balance: i64) -> Account {
    Account {
        id: new_id(),
        name: name.into(),
        r#type: AccountType::Bank,
        balance: Decimal::from(balance),
        currency: "TWD".into(),
    }
}

fn txn(account_id: &str, date: &str, amount: i64, r#type: TxnType, category: &str) -> Transaction {
    Transaction {
        id: new_id(),
        account_id: account_id.into(),
        date: date.into(),
        amount: Decimal::from(amount),
        r#type,
        category: category.into(),
        description: String::new(),
    }
}

#[test]
fn expense_reduces_balance_and_sets_top_category() {
    let mut accounts = vec![account("A", 1000)];
    let mut transactions = Vec::new();
    let a = accounts[0].id.clone();

    ledger::record(
        &mut accounts,
        &mut transactions,
        txn(&a, "2023-10-02", 200, TxnType::Expense, "Food"),
    )
    .unwrap();

    assert_eq!(accounts[0].balance, Decimal::from(800));
    assert_eq!(
        report::top_expense_category(&transactions),
        Some(("Food".to_string(), Decimal::from(200)))
    );
}

#[test]
fn income_increases_balance() {
    let mut accounts = vec![account("A", 1000)];
    let mut transactions = Vec::new();
    let a = accounts[0].id.clone();

    ledger::record(
        &mut accounts,
        &mut transactions,
        txn(&a, "2023-10-01", 50_000, TxnType::Income, "Salary"),
    )
    .unwrap();

    assert_eq!(accounts[0].balance, Decimal::from(51_000));
}

// Transfer behaves exactly like Expense at the balance level: the source is
// debited and nothing is credited anywhere.
#[test]
fn transfer_decrements_source_and_credits_nothing() {
    let mut accounts = vec![account("Source", 1000), account("Dest", 1000)];
    let mut transactions = Vec::new();
    let source = accounts[0].id.clone();

    ledger::record(
        &mut accounts,
        &mut transactions,
        txn(&source, "2023-10-01", 300, TxnType::Transfer, "Transfer"),
    )
    .unwrap();

    assert_eq!(accounts[0].balance, Decimal::from(700));
    assert_eq!(accounts[1].balance, Decimal::from(1000));
}

#[test]
fn missing_account_still_records_without_balance_change() {
    let mut accounts = vec![account("A", 1000)];
    let mut transactions = Vec::new();

    ledger::record(
        &mut accounts,
        &mut transactions,
        txn("no-such-id", "2023-10-01", 999, TxnType::Expense, "Food"),
    )
    .unwrap();

    assert_eq!(transactions.len(), 1);
    assert_eq!(accounts[0].balance, Decimal::from(1000));
}

#[test]
fn zero_and_negative_amounts_are_rejected() {
    let mut accounts = vec![account("A", 1000)];
    let mut transactions = Vec::new();
    let a = accounts[0].id.clone();

    let zero = txn(&a, "2023-10-01", 0, TxnType::Expense, "Food");
    assert!(ledger::record(&mut accounts, &mut transactions, zero).is_err());

    let negative = txn(&a, "2023-10-01", -5, TxnType::Expense, "Food");
    assert!(ledger::record(&mut accounts, &mut transactions, negative).is_err());

    assert!(transactions.is_empty());
    assert_eq!(accounts[0].balance, Decimal::from(1000));
}

#[test]
fn new_transactions_are_prepended() {
    let mut accounts = vec![account("A", 1000)];
    let mut transactions = Vec::new();
    let a = accounts[0].id.clone();

    for date in ["2023-10-01", "2023-10-02", "2023-10-03"] {
        ledger::record(
            &mut accounts,
            &mut transactions,
            txn(&a, date, 10, TxnType::Expense, "Food"),
        )
        .unwrap();
    }

    let dates: Vec<&str> = transactions.iter().map(|t| t.date.as_str()).collect();
    assert_eq!(dates, ["2023-10-03", "2023-10-02", "2023-10-01"]);
}

#[test]
fn replayed_history_reconciles_with_total_assets() {
    let mut accounts = vec![account("Bank", 1000), account("Cash", 500)];
    let mut transactions = Vec::new();
    let bank = accounts[0].id.clone();
    let cash = accounts[1].id.clone();

    let history = [
        (bank.clone(), 50_000, TxnType::Income),
        (bank.clone(), 1_200, TxnType::Expense),
        (cash.clone(), 200, TxnType::Expense),
        (bank.clone(), 5_000, TxnType::Transfer),
        (cash.clone(), 300, TxnType::Income),
        ("gone".to_string(), 7_777, TxnType::Expense),
    ];
    for (id, amount, r#type) in history {
        ledger::record(
            &mut accounts,
            &mut transactions,
            txn(&id, "2023-11-01", amount, r#type, "Misc"),
        )
        .unwrap();
    }

    // initial 1500 + income 50300 - expense 1400 - transfer 5000; the
    // orphaned 7777 never touches a balance
    assert_eq!(report::total_assets(&accounts), Decimal::from(45_400));
}
