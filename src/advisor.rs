// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Quote;
use crate::utils::http_client;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
const MODEL: &str = "gemini-2.5-flash";

pub const FALLBACK_UNCONFIGURED: &str = "AI service unavailable. Please check your API settings.";
pub const FALLBACK_ERROR: &str = "Keep up the good work managing your finances!";
pub const FALLBACK_EMPTY: &str = "Keep tracking your expenses to build wealth!";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Gemini API key not configured; set GEMINI_API_KEY to enable price updates")]
    NotConfigured,
    #[error("Gemini request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Gemini returned a malformed quote payload: {0}")]
    Malformed(String),
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

pub struct Advisor {
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl Advisor {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Ok(Self {
            api_key,
            client: http_client()?,
        })
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    /// Short encouraging advice for the dashboard. Never fails: missing key,
    /// transport errors and empty responses all degrade to fixed sentences.
    pub fn advice(&self, total_assets: Decimal, net_worth: Decimal, top_category: &str) -> String {
        let Some(key) = self.api_key.as_deref() else {
            return FALLBACK_UNCONFIGURED.to_string();
        };
        let prompt = advice_prompt(total_assets, net_worth, top_category);
        match self.generate(key, &prompt) {
            Ok(Some(text)) => text,
            Ok(None) => FALLBACK_EMPTY.to_string(),
            Err(_) => FALLBACK_ERROR.to_string(),
        }
    }

    /// Current prices for the given symbols as strict JSON. Fails fast with
    /// `NotConfigured` when no key is set so callers can distinguish a setup
    /// problem from a transport or parse failure.
    pub fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, AdvisorError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(AdvisorError::NotConfigured);
        };
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        let prompt = quotes_prompt(symbols);
        let text = self
            .generate(key, &prompt)?
            .ok_or_else(|| AdvisorError::Malformed("empty response".into()))?;
        parse_quotes(&text)
    }

    fn generate(&self, key: &str, prompt: &str) -> Result<Option<String>, AdvisorError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            MODEL, key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };
        let resp = self.client.post(url).json(&body).send()?.error_for_status()?;
        let data: GenerateResponse = resp.json()?;
        Ok(first_text(data))
    }
}

fn advice_prompt(total_assets: Decimal, net_worth: Decimal, top_category: &str) -> String {
    format!(
        "I am a personal finance assistant.\n\
         User Stats:\n\
         - Total Assets: {}\n\
         - Net Worth: {}\n\
         - Top Expense Category: {}\n\n\
         Give me a short, 2-sentence encouraging advice or tip for the user.",
        total_assets, net_worth, top_category
    )
}

fn quotes_prompt(symbols: &[String]) -> String {
    format!(
        "Find the current stock price for these symbols: {}. \
         Return the result as a JSON array of objects where each object has \
         \"symbol\", \"price\", and \"currency\". \
         If it is a Taiwan stock (ending in .TW), assume TWD. If US stock, assume USD. \
         Do not use markdown formatting.",
        symbols.join(", ")
    )
}

fn first_text(resp: GenerateResponse) -> Option<String> {
    resp.candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts)
        .and_then(|p| p.into_iter().next())
        .and_then(|p| p.text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(?:json)?").unwrap());

// Models keep wrapping "strict JSON" in markdown fences anyway.
fn strip_code_fences(text: &str) -> String {
    FENCE.replace_all(text, "").trim().to_string()
}

fn parse_quotes(text: &str) -> Result<Vec<Quote>, AdvisorError> {
    let cleaned = strip_code_fences(text);
    let quotes: Vec<Quote> =
        serde_json::from_str(&cleaned).map_err(|e| AdvisorError::Malformed(e.to_string()))?;
    for q in &quotes {
        if q.symbol.trim().is_empty() {
            return Err(AdvisorError::Malformed("quote with empty symbol".into()));
        }
        if q.price.is_sign_negative() {
            return Err(AdvisorError::Malformed(format!(
                "negative price {} for '{}'",
                q.price, q.symbol
            )));
        }
    }
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn offline_advisor() -> Advisor {
        Advisor {
            api_key: None,
            client: http_client().unwrap(),
        }
    }

    #[test]
    fn strips_json_code_fences() {
        let fenced = "```json\n[{\"symbol\":\"AAPL\",\"price\":180,\"currency\":\"USD\"}]\n```";
        assert_eq!(
            strip_code_fences(fenced),
            "[{\"symbol\":\"AAPL\",\"price\":180,\"currency\":\"USD\"}]"
        );
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }

    #[test]
    fn parses_quote_array() {
        let quotes = parse_quotes(
            "```json\n[{\"symbol\":\"2330.TW\",\"price\":985.5,\"currency\":\"TWD\"},\
             {\"symbol\":\"AAPL\",\"price\":182,\"currency\":\"USD\"}]\n```",
        )
        .unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol, "2330.TW");
        assert_eq!(quotes[0].price, Decimal::from_str("985.5").unwrap());
        assert_eq!(quotes[1].currency, "USD");
    }

    #[test]
    fn rejects_non_json_payload() {
        let err = parse_quotes("The current price of AAPL is $182.").unwrap_err();
        assert!(matches!(err, AdvisorError::Malformed(_)));
    }

    #[test]
    fn rejects_missing_fields_and_negative_prices() {
        let missing = parse_quotes("[{\"symbol\":\"AAPL\"}]").unwrap_err();
        assert!(matches!(missing, AdvisorError::Malformed(_)));

        let negative =
            parse_quotes("[{\"symbol\":\"AAPL\",\"price\":-1,\"currency\":\"USD\"}]").unwrap_err();
        assert!(matches!(negative, AdvisorError::Malformed(_)));
    }

    #[test]
    fn advice_degrades_without_key() {
        let advisor = offline_advisor();
        assert!(!advisor.is_available());
        let advice = advisor.advice(Decimal::from(1000), Decimal::from(1000), "Food & Dining");
        assert_eq!(advice, FALLBACK_UNCONFIGURED);
    }

    #[test]
    fn quote_fetch_fails_fast_without_key() {
        let advisor = offline_advisor();
        let err = advisor.fetch_quotes(&["AAPL".to_string()]).unwrap_err();
        assert!(matches!(err, AdvisorError::NotConfigured));
    }
}
