// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};

use crate::models::{Quote, Stock};

/// Merge fetched quotes into the holdings list and return how many holdings
/// changed. Matching is case-insensitive exact symbol equality; a quote with
/// no matching holding is dropped, never added. Only `current_price` and
/// `last_updated` move; cost basis and quantity are untouched.
pub fn apply(stocks: &mut [Stock], quotes: &[Quote], now: DateTime<Utc>) -> usize {
    let mut updated = 0;
    for stock in stocks.iter_mut() {
        let Some(quote) = quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(&stock.symbol))
        else {
            continue;
        };
        stock.current_price = quote.price;
        stock.last_updated = Some(now);
        updated += 1;
    }
    updated
}
