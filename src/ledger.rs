// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::models::{Account, Transaction, TxnType};

/// Record a transaction against the in-memory collections.
///
/// The matched account's balance moves by `+amount` for Income and `-amount`
/// for everything else; a transaction whose `account_id` matches no account is
/// still recorded and the balance update becomes a no-op. Transactions are
/// prepended so the collection stays most-recent-first regardless of `date`.
///
/// Callers must persist both collections through `Store::store_ledger` so the
/// balance and the history land in the same write.
pub fn record(
    accounts: &mut [Account],
    transactions: &mut Vec<Transaction>,
    txn: Transaction,
) -> Result<()> {
    if txn.amount.is_zero() {
        return Err(anyhow!("Transaction amount must be non-zero"));
    }
    if txn.amount.is_sign_negative() {
        return Err(anyhow!(
            "Transaction amount must be positive; the type carries the sign"
        ));
    }

    if let Some(account) = accounts.iter_mut().find(|a| a.id == txn.account_id) {
        match txn.r#type {
            TxnType::Income => account.balance += txn.amount,
            // Transfer debits the source like an expense; no destination
            // account is credited.
            TxnType::Expense | TxnType::Transfer => account.balance -= txn.amount,
        }
    }

    transactions.insert(0, txn);
    Ok(())
}
