// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, AccountType, new_id};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let r#type: AccountType = sub.get_one::<String>("type").unwrap().parse()?;
    let balance = parse_decimal(sub.get_one::<String>("balance").unwrap().trim())?;
    let currency = sub.get_one::<String>("currency").unwrap().to_uppercase();

    let mut accounts = store.load_accounts()?;
    if accounts.iter().any(|a| a.name == name) {
        return Err(anyhow!("Account '{}' already exists", name));
    }
    accounts.push(Account {
        id: new_id(),
        name: name.clone(),
        r#type,
        balance,
        currency: currency.clone(),
    });
    store.store_accounts(&accounts)?;
    println!("Added account '{}' ({}, {})", name, r#type, currency);
    Ok(())
}

fn list(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = store.load_accounts()?;
    let data: Vec<Vec<String>> = accounts
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.r#type.to_string(),
                a.currency.clone(),
                format!("{:.2}", a.balance),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Name", "Type", "Currency", "Balance"], data)
        );
    }
    Ok(())
}

// Deleting an account never rewrites history: transactions that referenced it
// stay in place with a dangling account_id and list as 'Unknown'.
fn rm(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let mut accounts = store.load_accounts()?;
    let before = accounts.len();
    accounts.retain(|a| &a.name != name);
    if accounts.len() == before {
        return Err(anyhow!("Account '{}' not found", name));
    }
    store.store_accounts(&accounts)?;
    println!("Removed account '{}'", name);
    Ok(())
}
