// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, Transaction};
use crate::store::Store;
use anyhow::Result;
use serde_json::json;

pub fn handle(store: &dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let accounts = store.load_accounts()?;
    let mut transactions = store.load_transactions()?;
    transactions.sort_by(|a, b| a.date.cmp(&b.date));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "account",
                "type",
                "amount",
                "currency",
                "category",
                "description",
            ])?;
            for t in &transactions {
                let (account, currency) = account_columns(&accounts, t);
                wtr.write_record([
                    t.date.clone(),
                    account.to_string(),
                    t.r#type.to_string(),
                    t.amount.to_string(),
                    currency.to_string(),
                    t.category.clone(),
                    t.description.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for t in &transactions {
                let (account, currency) = account_columns(&accounts, t);
                items.push(json!({
                    "date": t.date,
                    "account": account,
                    "type": t.r#type.to_string(),
                    "amount": t.amount,
                    "currency": currency,
                    "category": t.category,
                    "description": t.description,
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions to {}", transactions.len(), out);
    Ok(())
}

fn account_columns<'a>(accounts: &'a [Account], t: &Transaction) -> (&'a str, &'a str) {
    accounts
        .iter()
        .find(|a| a.id == t.account_id)
        .map(|a| (a.name.as_str(), a.currency.as_str()))
        .unwrap_or(("Unknown", ""))
}
