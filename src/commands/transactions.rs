// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::{Account, Transaction, TxnType, new_id};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let account_name = sub.get_one::<String>("account").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let r#type: TxnType = sub.get_one::<String>("type").unwrap().parse()?;
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let description = sub.get_one::<String>("description").unwrap().to_string();

    let mut accounts = store.load_accounts()?;
    let mut transactions = store.load_transactions()?;

    let account_id = accounts
        .iter()
        .find(|a| a.name == account_name)
        .map(|a| a.id.clone())
        .ok_or_else(|| anyhow!("Account '{}' not found", account_name))?;

    let txn = Transaction {
        id: new_id(),
        account_id,
        date: date.to_string(),
        amount,
        r#type,
        category: category.clone(),
        description,
    };
    ledger::record(&mut accounts, &mut transactions, txn)?;

    // Balance and history are one write; a crash cannot separate them.
    store.store_ledger(&accounts, &transactions)?;

    println!(
        "Recorded {} {} on {} for '{}' (acct: {})",
        r#type, amount, date, category, account_name
    );
    Ok(())
}

fn list(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = store.load_accounts()?;
    let transactions = store.load_transactions()?;
    let data = query_rows(&accounts, &transactions, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.account.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Description", "Category", "Account", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub description: String,
    pub category: String,
    pub account: String,
    pub r#type: String,
    pub amount: String,
}

/// Rows in stored (most-recent-first) order, filtered by the list flags.
/// A dangling account_id renders as "Unknown" rather than erroring.
pub fn query_rows(
    accounts: &[Account],
    transactions: &[Transaction],
    sub: &clap::ArgMatches,
) -> Vec<TransactionRow> {
    let month = sub.get_one::<String>("month");
    let account = sub.get_one::<String>("account");
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied();

    let mut data = Vec::new();
    for t in transactions {
        if let Some(m) = month {
            if t.date.get(0..7) != Some(m.as_str()) {
                continue;
            }
        }
        let account_name = accounts
            .iter()
            .find(|a| a.id == t.account_id)
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown");
        if let Some(a) = account {
            if account_name != a {
                continue;
            }
        }
        if let Some(c) = category {
            if &t.category != c {
                continue;
            }
        }
        let sign = if t.r#type == TxnType::Income { "+" } else { "-" };
        data.push(TransactionRow {
            date: t.date.clone(),
            description: t.description.clone(),
            category: t.category.clone(),
            account: account_name.to_string(),
            r#type: t.r#type.to_string(),
            amount: format!("{}{}", sign, t.amount),
        });
        if let Some(limit) = limit {
            if data.len() == limit {
                break;
            }
        }
    }
    data
}
