// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Account, AccountType, Market, Stock, Transaction, TxnType, new_id};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "WealthFlow", "wealthflow"));

pub const KEY_ACCOUNTS: &str = "accounts";
pub const KEY_TRANSACTIONS: &str = "transactions";
pub const KEY_STOCKS: &str = "stocks";

pub fn data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("wealthflow.sqlite"))
}

/// Durable home of the three entity collections. Each collection is written
/// whole; `store_ledger` is the one write that must cover two collections
/// without a gap a crash could fall into.
pub trait Store {
    fn load_accounts(&self) -> Result<Vec<Account>>;
    fn load_transactions(&self) -> Result<Vec<Transaction>>;
    fn load_stocks(&self) -> Result<Vec<Stock>>;
    fn store_accounts(&mut self, accounts: &[Account]) -> Result<()>;
    fn store_transactions(&mut self, transactions: &[Transaction]) -> Result<()>;
    fn store_stocks(&mut self, stocks: &[Stock]) -> Result<()>;
    fn store_ledger(&mut self, accounts: &[Account], transactions: &[Transaction]) -> Result<()>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("Open store at {}", path.display()))?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM collections WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn load_collection<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.read_blob(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Corrupt '{}' collection in store", key)),
            None => Ok(Vec::new()),
        }
    }

    fn store_collection<T: serde::Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        write_blob(&self.conn, key, &raw)
    }

    /// Seed any collection that has never been written with the built-in
    /// sample dataset. Each key is checked independently, so a store that
    /// already holds accounts but lost its stocks only regains stocks.
    pub fn seed_missing(&mut self) -> Result<bool> {
        let mut seeded = false;
        if self.read_blob(KEY_ACCOUNTS)?.is_none() {
            let accounts = sample_accounts();
            self.store_accounts(&accounts)?;
            seeded = true;
        }
        if self.read_blob(KEY_TRANSACTIONS)?.is_none() {
            let accounts = self.load_accounts()?;
            let transactions = sample_transactions(&accounts);
            self.store_transactions(&transactions)?;
            seeded = true;
        }
        if self.read_blob(KEY_STOCKS)?.is_none() {
            self.store_stocks(&sample_stocks())?;
            seeded = true;
        }
        Ok(seeded)
    }
}

impl Store for SqliteStore {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        self.load_collection(KEY_ACCOUNTS)
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        self.load_collection(KEY_TRANSACTIONS)
    }

    fn load_stocks(&self) -> Result<Vec<Stock>> {
        self.load_collection(KEY_STOCKS)
    }

    fn store_accounts(&mut self, accounts: &[Account]) -> Result<()> {
        self.store_collection(KEY_ACCOUNTS, accounts)
    }

    fn store_transactions(&mut self, transactions: &[Transaction]) -> Result<()> {
        self.store_collection(KEY_TRANSACTIONS, transactions)
    }

    fn store_stocks(&mut self, stocks: &[Stock]) -> Result<()> {
        self.store_collection(KEY_STOCKS, stocks)
    }

    fn store_ledger(&mut self, accounts: &[Account], transactions: &[Transaction]) -> Result<()> {
        let accounts_raw = serde_json::to_string(accounts)?;
        let transactions_raw = serde_json::to_string(transactions)?;
        let tx = self.conn.transaction()?;
        write_blob(&tx, KEY_ACCOUNTS, &accounts_raw)?;
        write_blob(&tx, KEY_TRANSACTIONS, &transactions_raw)?;
        tx.commit()?;
        Ok(())
    }
}

pub fn open_or_init() -> Result<SqliteStore> {
    let path = data_path()?;
    let mut store = SqliteStore::open(&path)?;
    store.seed_missing()?;
    Ok(store)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS collections(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

fn write_blob(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO collections(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

fn sample_accounts() -> Vec<Account> {
    vec![
        Account {
            id: new_id(),
            name: "CTBC Primary".into(),
            r#type: AccountType::Bank,
            balance: Decimal::from(150_000),
            currency: "TWD".into(),
        },
        Account {
            id: new_id(),
            name: "E.Sun Savings".into(),
            r#type: AccountType::Bank,
            balance: Decimal::from(500_000),
            currency: "TWD".into(),
        },
        Account {
            id: new_id(),
            name: "Wallet Cash".into(),
            r#type: AccountType::Cash,
            balance: Decimal::from(3_500),
            currency: "TWD".into(),
        },
    ]
}

fn sample_stocks() -> Vec<Stock> {
    let now = Some(Utc::now());
    vec![
        Stock {
            id: new_id(),
            symbol: "2330.TW".into(),
            name: "TSMC".into(),
            market: Market::TW,
            quantity: Decimal::from(1_000),
            avg_cost: Decimal::from(550),
            current_price: Decimal::from(980),
            last_updated: now,
        },
        Stock {
            id: new_id(),
            symbol: "AAPL".into(),
            name: "Apple Inc.".into(),
            market: Market::US,
            quantity: Decimal::from(10),
            avg_cost: Decimal::from(150),
            current_price: Decimal::from(180),
            last_updated: now,
        },
        Stock {
            id: new_id(),
            symbol: "0050.TW".into(),
            name: "Yuanta Taiwan 50".into(),
            market: Market::TW,
            quantity: Decimal::from(2_000),
            avg_cost: Decimal::from(120),
            current_price: Decimal::from(175),
            last_updated: now,
        },
    ]
}

fn sample_transactions(accounts: &[Account]) -> Vec<Transaction> {
    let bank = accounts
        .first()
        .map(|a| a.id.clone())
        .unwrap_or_default();
    let cash = accounts
        .get(2)
        .map(|a| a.id.clone())
        .unwrap_or_else(|| bank.clone());
    let txn = |account_id: &str, date: &str, amount: i64, r#type, category: &str, desc: &str| {
        Transaction {
            id: new_id(),
            account_id: account_id.to_string(),
            date: date.to_string(),
            amount: Decimal::from(amount),
            r#type,
            category: category.to_string(),
            description: desc.to_string(),
        }
    };
    vec![
        txn(&bank, "2023-10-01", 50_000, TxnType::Income, "Salary", "October Salary"),
        txn(&cash, "2023-10-02", 200, TxnType::Expense, "Food & Dining", "Lunch at 7-11"),
        txn(&bank, "2023-10-03", 1_200, TxnType::Expense, "Utilities", "Electricity Bill"),
        txn(&bank, "2023-10-05", 20_000, TxnType::Expense, "Housing", "Rent"),
        txn(&cash, "2023-10-06", 500, TxnType::Expense, "Transportation", "EasyCard Topup"),
    ]
}
