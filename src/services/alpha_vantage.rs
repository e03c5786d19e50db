use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::QuoteError;

use super::price_source::{PriceSource, Quote};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

#[derive(Clone)]
pub struct AlphaVantageClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[async_trait]
impl PriceSource for AlphaVantageClient {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        if !self.has_key() {
            return Err(QuoteError::Unavailable(
                "ALPHA_VANTAGE_API_KEY is missing in .env".to_string(),
            ));
        }

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| QuoteError::Unavailable(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(QuoteError::Unavailable(format!(
                "Alpha Vantage quote failed: {status} {body}"
            )));
        }

        let body = res
            .json::<GlobalQuoteResponse>()
            .await
            .map_err(|e| QuoteError::Unavailable(e.to_string()))?;

        body.into_quote(symbol)
    }
}

#[derive(Debug, Deserialize)]
pub struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    pub global_quote: Option<HashMap<String, String>>,

    // rate limiting / bad key come back as 200 with one of these
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
}

impl GlobalQuoteResponse {
    pub fn into_quote(self, symbol: &str) -> Result<Quote, QuoteError> {
        if let Some(msg) = self.note.or(self.information) {
            return Err(QuoteError::Unavailable(msg));
        }
        if self.error_message.is_some() {
            return Err(QuoteError::NotFound(symbol.to_string()));
        }

        let fields = match self.global_quote {
            Some(f) if !f.is_empty() => f,
            _ => return Err(QuoteError::NotFound(symbol.to_string())),
        };

        let price = fields
            .get("05. price")
            .and_then(|p| Decimal::from_str(p.trim()).ok())
            .filter(|p| *p > Decimal::ZERO)
            .ok_or_else(|| QuoteError::NotFound(symbol.to_string()))?;

        let as_of = fields
            .get("07. latest trading day")
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc())
            .unwrap_or_else(Utc::now);

        let symbol = fields
            .get("01. symbol")
            .cloned()
            .unwrap_or_else(|| symbol.to_string());

        Ok(Quote { symbol, price, as_of })
    }
}
