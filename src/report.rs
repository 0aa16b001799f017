// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Account, Stock, Transaction, TxnType};

// Every view here recomputes from the full snapshot; collections are
// user-entered and small, so nothing is cached or maintained incrementally.

/// Sum of all account balances. No currency conversion happens anywhere in
/// the aggregation layer; mixed-currency totals are summed as-is.
pub fn total_assets(accounts: &[Account]) -> Decimal {
    accounts.iter().map(|a| a.balance).sum()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyFlow {
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income and expense totals for one `YYYY-MM` month. Matching is a 7-char
/// string-prefix comparison; a malformed date simply excludes the record.
/// Transfers contribute to neither side.
pub fn monthly_flow(transactions: &[Transaction], year_month: &str) -> MonthlyFlow {
    let mut flow = MonthlyFlow::default();
    for t in transactions {
        if t.date.get(0..7) != Some(year_month) {
            continue;
        }
        match t.r#type {
            TxnType::Income => flow.income += t.amount,
            TxnType::Expense => flow.expense += t.amount,
            TxnType::Transfer => {}
        }
    }
    flow
}

/// Expense totals per category, sorted descending. The sort is stable, so
/// equal totals keep first-encountered order.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for t in transactions {
        if t.r#type != TxnType::Expense {
            continue;
        }
        match groups.iter_mut().find(|(name, _)| *name == t.category) {
            Some((_, total)) => *total += t.amount,
            None => groups.push((t.category.clone(), t.amount)),
        }
    }
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
}

pub fn top_expense_category(transactions: &[Transaction]) -> Option<(String, Decimal)> {
    category_breakdown(transactions).into_iter().next()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expense: Decimal,
}

/// One entry per distinct `YYYY-MM` prefix across the whole history,
/// ascending. A month seen only through transfers still gets a zero entry.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let Some(month) = t.date.get(0..7) else {
            continue;
        };
        let entry = months
            .entry(month.to_string())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.r#type {
            TxnType::Income => entry.0 += t.amount,
            TxnType::Expense => entry.1 += t.amount,
            TxnType::Transfer => {}
        }
    }
    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense,
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Valuation {
    pub market_value: Decimal,
    pub cost: Decimal,
    pub unrealized_pnl: Decimal,
    pub pnl_percent: Decimal,
}

pub fn portfolio_valuation(stocks: &[Stock]) -> Valuation {
    let market_value: Decimal = stocks.iter().map(|s| s.quantity * s.current_price).sum();
    let cost: Decimal = stocks.iter().map(|s| s.quantity * s.avg_cost).sum();
    let unrealized_pnl = market_value - cost;
    let pnl_percent = if cost.is_zero() {
        Decimal::ZERO
    } else {
        Decimal::from(100) * unrealized_pnl / cost
    };
    Valuation {
        market_value,
        cost,
        unrealized_pnl,
        pnl_percent,
    }
}

/// Per-holding gain and gain percent. A zero cost basis yields a 0 percent
/// rather than a division error.
pub fn holding_gain(stock: &Stock) -> (Decimal, Decimal) {
    let cost = stock.quantity * stock.avg_cost;
    let gain = stock.quantity * stock.current_price - cost;
    let percent = if cost.is_zero() {
        Decimal::ZERO
    } else {
        Decimal::from(100) * gain / cost
    };
    (gain, percent)
}
