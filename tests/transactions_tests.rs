// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use wealthflow::models::{Account, AccountType, Transaction, TxnType, new_id};
use wealthflow::{cli, commands::transactions, ledger};

fn setup() -> (Vec<Account>, Vec<Transaction>) {
    let mut accounts = vec![Account {
        id: new_id(),
        name: "A1".into(),
        r#type: AccountType::Bank,
        balance: Decimal::from(1_000),
        currency: "TWD".into(),
    }];
    let mut txns = Vec::new();
    let a = accounts[0].id.clone();
    for i in 1..=3 {
        ledger::record(
            &mut accounts,
            &mut txns,
            Transaction {
                id: new_id(),
                account_id: a.clone(),
                date: format!("2025-01-0{}", i),
                amount: Decimal::from(10),
                r#type: TxnType::Expense,
                category: "Cat1".into(),
                description: "P".into(),
            },
        )
        .unwrap();
    }
    (accounts, txns)
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return list_m.clone();
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_limit_respected() {
    let (accounts, txns) = setup();
    let list_m = list_matches(&["wealthflow", "tx", "list", "--limit", "2"]);
    let rows = transactions::query_rows(&accounts, &txns, &list_m);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_month_filter_uses_prefix() {
    let (accounts, mut txns) = setup();
    txns.push(Transaction {
        id: new_id(),
        account_id: accounts[0].id.clone(),
        date: "2025-02-01".into(),
        amount: Decimal::from(5),
        r#type: TxnType::Expense,
        category: "Cat1".into(),
        description: "Feb".into(),
    });
    let list_m = list_matches(&["wealthflow", "tx", "list", "--month", "2025-01"]);
    let rows = transactions::query_rows(&accounts, &txns, &list_m);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.date.starts_with("2025-01")));
}

#[test]
fn dangling_account_renders_unknown() {
    let (accounts, mut txns) = setup();
    txns.insert(
        0,
        Transaction {
            id: new_id(),
            account_id: "deleted-account".into(),
            date: "2025-01-09".into(),
            amount: Decimal::from(7),
            r#type: TxnType::Expense,
            category: "Cat1".into(),
            description: "orphan".into(),
        },
    );
    let list_m = list_matches(&["wealthflow", "tx", "list"]);
    let rows = transactions::query_rows(&accounts, &txns, &list_m);
    assert_eq!(rows[0].account, "Unknown");
    assert_eq!(rows[0].amount, "-7");
}

#[test]
fn income_rows_are_signed_positive() {
    let (mut accounts, mut txns) = setup();
    let a = accounts[0].id.clone();
    ledger::record(
        &mut accounts,
        &mut txns,
        Transaction {
            id: new_id(),
            account_id: a,
            date: "2025-01-31".into(),
            amount: Decimal::from(500),
            r#type: TxnType::Income,
            category: "Salary".into(),
            description: "pay".into(),
        },
    )
    .unwrap();
    let list_m = list_matches(&["wealthflow", "tx", "list", "--limit", "1"]);
    let rows = transactions::query_rows(&accounts, &txns, &list_m);
    assert_eq!(rows[0].amount, "+500");
    assert_eq!(rows[0].r#type, "Income");
}
