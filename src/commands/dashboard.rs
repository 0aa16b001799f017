// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::Advisor;
use crate::models::TxnType;
use crate::report;
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::Utc;

pub fn handle(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = store.load_accounts()?;
    let transactions = store.load_transactions()?;
    let stocks = store.load_stocks()?;

    let total = report::total_assets(&accounts);
    let month = Utc::now().format("%Y-%m").to_string();
    let flow = report::monthly_flow(&transactions, &month);
    let top = report::top_expense_category(&transactions);
    let top_name = top.as_ref().map(|(c, _)| c.as_str()).unwrap_or("None");
    let valuation = report::portfolio_valuation(&stocks);

    let overview = vec![
        vec!["Total Assets".to_string(), format!("{:.2}", total)],
        vec![
            format!("Income ({})", month),
            format!("{:.2}", flow.income),
        ],
        vec![
            format!("Expenses ({})", month),
            format!("{:.2}", flow.expense),
        ],
        vec!["Top Expense Category".to_string(), top_name.to_string()],
        vec![
            "Portfolio Value".to_string(),
            format!("{:.2}", valuation.market_value),
        ],
    ];
    println!("{}", pretty_table(&["Overview", ""], overview));

    let recent: Vec<Vec<String>> = transactions
        .iter()
        .take(5)
        .map(|t| {
            let sign = if t.r#type == TxnType::Income { "+" } else { "-" };
            vec![
                t.date.clone(),
                t.description.clone(),
                t.category.clone(),
                format!("{}{}", sign, t.amount),
            ]
        })
        .collect();
    if !recent.is_empty() {
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount"], recent)
        );
    }

    if !sub.get_flag("no-advice") {
        let advisor = Advisor::from_env()?;
        // The original overview hands total assets to both stat slots.
        println!("AI Insight: {}", advisor.advice(total, total, top_name));
    }
    Ok(())
}
