// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::{Advisor, AdvisorError};
use crate::models::{Market, Stock, new_id};
use crate::quotes;
use crate::report;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use chrono::Utc;

pub fn handle(store: &mut dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("refresh", _)) => refresh(store)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let symbol = sub.get_one::<String>("symbol").unwrap().trim().to_uppercase();
    let name = sub
        .get_one::<String>("name")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| symbol.clone());
    let market: Market = sub.get_one::<String>("market").unwrap().parse()?;
    let quantity = parse_decimal(sub.get_one::<String>("quantity").unwrap().trim())?;
    let avg_cost = parse_decimal(sub.get_one::<String>("avg-cost").unwrap().trim())?;

    let mut stocks = store.load_stocks()?;
    if stocks.iter().any(|s| s.symbol.eq_ignore_ascii_case(&symbol)) {
        return Err(anyhow!("Holding '{}' already exists", symbol));
    }
    stocks.push(Stock {
        id: new_id(),
        symbol: symbol.clone(),
        name,
        market,
        quantity,
        avg_cost,
        // Until the first refresh the holding is marked at cost.
        current_price: avg_cost,
        last_updated: Some(Utc::now()),
    });
    store.store_stocks(&stocks)?;
    println!("Added {} ({}) {} @ {}", symbol, market, quantity, avg_cost);
    Ok(())
}

fn list(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let stocks = store.load_stocks()?;

    let data: Vec<Vec<String>> = stocks
        .iter()
        .map(|s| {
            let (gain, percent) = report::holding_gain(s);
            vec![
                s.symbol.clone(),
                s.market.to_string(),
                format!("{:.4}", s.quantity),
                format!("{:.2}", s.avg_cost),
                format!("{:.2}", s.current_price),
                format!("{:.2}", s.quantity * s.current_price),
                format!("{:.2} ({:.2}%)", gain, percent),
            ]
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Symbol", "Market", "Qty", "Avg Cost", "Price", "Value", "P&L"],
                data,
            )
        );
        let v = report::portfolio_valuation(&stocks);
        println!(
            "Market value {:.2} | cost {:.2} | unrealized {:.2} ({:.2}%)",
            v.market_value, v.cost, v.unrealized_pnl, v.pnl_percent
        );
    }
    Ok(())
}

fn rm(store: &mut dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let symbol = sub.get_one::<String>("symbol").unwrap();
    let mut stocks = store.load_stocks()?;
    let before = stocks.len();
    stocks.retain(|s| !s.symbol.eq_ignore_ascii_case(symbol));
    if stocks.len() == before {
        return Err(anyhow!("Holding '{}' not found", symbol));
    }
    store.store_stocks(&stocks)?;
    println!("Removed holding '{}'", symbol);
    Ok(())
}

fn refresh(store: &mut dyn Store) -> Result<()> {
    let mut stocks = store.load_stocks()?;
    if stocks.is_empty() {
        println!("No holdings to update");
        return Ok(());
    }

    let advisor = Advisor::from_env()?;
    let symbols: Vec<String> = stocks.iter().map(|s| s.symbol.clone()).collect();
    // Any failure leaves stored prices exactly as they were.
    let fetched = advisor.fetch_quotes(&symbols).map_err(|err| match err {
        AdvisorError::NotConfigured => anyhow::Error::new(err),
        other => {
            anyhow::Error::new(other).context("Price update failed; existing prices unchanged")
        }
    })?;

    let now = Utc::now();
    let updated = quotes::apply(&mut stocks, &fetched, now);
    if updated == 0 {
        println!("No prices updated at {}", now.to_rfc3339());
        return Ok(());
    }
    store.store_stocks(&stocks)?;
    println!(
        "Updated {} of {} holdings at {}",
        updated,
        stocks.len(),
        now.to_rfc3339()
    );
    Ok(())
}
