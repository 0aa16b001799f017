// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::report;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(store: &dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(store, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn cashflow(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);

    let transactions = store.load_transactions()?;
    let series = report::monthly_series(&transactions);
    let start = series.len().saturating_sub(months);

    let data: Vec<Vec<String>> = series[start..]
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                format!("{:.2}", m.income),
                format!("{:.2}", m.expense),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn spend_by_category(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(raw) => Some(parse_month(raw)?),
        None => None,
    };

    let mut transactions = store.load_transactions()?;
    if let Some(month) = &month {
        transactions.retain(|t| t.date.get(0..7) == Some(month.as_str()));
    }

    let data: Vec<Vec<String>> = report::category_breakdown(&transactions)
        .into_iter()
        .map(|(category, total)| vec![category, format!("{:.2}", total)])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}
