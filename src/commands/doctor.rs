// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use crate::utils::{parse_date, pretty_table};
use anyhow::Result;

pub fn handle(store: &dyn Store) -> Result<()> {
    let accounts = store.load_accounts()?;
    let transactions = store.load_transactions()?;
    let stocks = store.load_stocks()?;

    let mut rows = Vec::new();

    // 1) Transactions whose account is gone (they list as 'Unknown')
    for t in &transactions {
        if !accounts.iter().any(|a| a.id == t.account_id) {
            rows.push(vec![
                "orphaned_transaction".into(),
                format!("{} {} '{}'", t.date, t.amount, t.description),
            ]);
        }
    }

    // 2) Dates that the monthly views silently skip
    for t in &transactions {
        if parse_date(&t.date).is_err() {
            rows.push(vec!["malformed_date".into(), format!("'{}'", t.date)]);
        }
    }

    // 3) Holdings whose gain percent is pinned to 0 by the zero-cost guard
    for s in &stocks {
        if s.avg_cost.is_zero() {
            rows.push(vec!["zero_cost_holding".into(), s.symbol.clone()]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
