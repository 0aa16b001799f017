// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Bank,
    Cash,
    Credit,
    Investment,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccountType::Bank => "Bank",
            AccountType::Cash => "Cash",
            AccountType::Credit => "Credit",
            AccountType::Investment => "Investment",
        };
        f.write_str(s)
    }
}

impl FromStr for AccountType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bank" => Ok(AccountType::Bank),
            "cash" => Ok(AccountType::Cash),
            "credit" => Ok(AccountType::Credit),
            "investment" => Ok(AccountType::Investment),
            other => Err(anyhow::anyhow!(
                "Unknown account type '{}' (use bank|cash|credit|investment)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxnType {
    Income,
    Expense,
    Transfer,
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxnType::Income => "Income",
            TxnType::Expense => "Expense",
            TxnType::Transfer => "Transfer",
        };
        f.write_str(s)
    }
}

impl FromStr for TxnType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            "transfer" => Ok(TxnType::Transfer),
            other => Err(anyhow::anyhow!(
                "Unknown transaction type '{}' (use income|expense|transfer)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Market {
    TW,
    US,
    Other,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Market::TW => "TW",
            Market::US => "US",
            Market::Other => "Other",
        };
        f.write_str(s)
    }
}

impl FromStr for Market {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tw" => Ok(Market::TW),
            "us" => Ok(Market::US),
            "other" => Ok(Market::Other),
            o => Err(anyhow::anyhow!("Unknown market '{}' (use tw|us|other)", o)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub r#type: AccountType,
    pub balance: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub date: String, // YYYY-MM-DD
    pub amount: Decimal,
    pub r#type: TxnType,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub market: Market,
    pub quantity: Decimal,
    pub avg_cost: Decimal,
    pub current_price: Decimal,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub currency: String,
}
