// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use wealthflow::models::{Account, AccountType, Transaction, TxnType, new_id};
use wealthflow::store::{SqliteStore, Store};
use wealthflow::{cli, commands::exporter};

fn seeded_store() -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let account = Account {
        id: new_id(),
        name: "A1".into(),
        r#type: AccountType::Bank,
        balance: Decimal::from(1_000),
        currency: "TWD".into(),
    };
    let txns = vec![
        Transaction {
            id: new_id(),
            account_id: account.id.clone(),
            date: "2023-10-02".into(),
            amount: Decimal::from(200),
            r#type: TxnType::Expense,
            category: "Food & Dining".into(),
            description: "Lunch at 7-11".into(),
        },
        Transaction {
            id: new_id(),
            account_id: "deleted".into(),
            date: "2023-10-01".into(),
            amount: Decimal::from(50),
            r#type: TxnType::Income,
            category: "Other".into(),
            description: "orphan".into(),
        },
    ];
    store.store_accounts(&[account]).unwrap();
    store.store_transactions(&txns).unwrap();
    store
}

fn export_matches(args: &[&str]) -> clap::ArgMatches {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args);
    if let Some(("export", sub)) = matches.subcommand() {
        return sub.clone();
    }
    panic!("no export subcommand");
}

#[test]
fn csv_export_writes_header_and_rows() {
    let store = seeded_store();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("txns.csv");
    let sub = export_matches(&[
        "wealthflow",
        "export",
        "transactions",
        "--format",
        "csv",
        "--out",
        out.to_str().unwrap(),
    ]);

    exporter::handle(&store, &sub).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,account,type,amount,currency,category,description"
    );
    // sorted by date ascending; the orphan exports with an Unknown account
    assert!(content.contains("2023-10-01,Unknown,Income,50,,Other,orphan"));
    assert!(content.contains("Lunch at 7-11"));
}

#[test]
fn json_export_is_a_parseable_array() {
    let store = seeded_store();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("txns.json");
    let sub = export_matches(&[
        "wealthflow",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        out.to_str().unwrap(),
    ]);

    exporter::handle(&store, &sub).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let items: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["date"], "2023-10-01");
    assert_eq!(items[1]["account"], "A1");
}
