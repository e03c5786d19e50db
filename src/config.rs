use std::env;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::services::alpha_vantage;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub db_connect_retries: u32,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub jwt_cookie_name: String,

    pub alpha_vantage_api_key: String,
    pub alpha_vantage_base_url: String,

    pub starting_balance: Decimal,
    pub quote_timeout_ms: u64,
    pub max_order_attempts: u32,
    pub seed_demo_accounts: bool,
}

/// Knobs the ledger itself needs, split out so it never sees secrets.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub starting_balance: Decimal,
    pub quote_timeout: Duration,
    pub max_order_attempts: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            starting_balance: dec!(100000),
            quote_timeout: Duration::from_secs(5),
            max_order_attempts: 3,
        }
    }
}

impl Settings {
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            starting_balance: self.starting_balance,
            quote_timeout: Duration::from_millis(self.quote_timeout_ms),
            max_order_attempts: self.max_order_attempts.max(1),
        }
    }
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "demotrader".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-dev-secret".to_string());
    let jwt_cookie_name = env::var("JWT_COOKIE_NAME").unwrap_or_else(|_| "auth".to_string());

    let alpha_vantage_api_key = env::var("ALPHA_VANTAGE_API_KEY").unwrap_or_default();
    let alpha_vantage_base_url = env::var("ALPHA_VANTAGE_BASE_URL")
        .unwrap_or_else(|_| alpha_vantage::DEFAULT_BASE_URL.to_string());

    let seed_demo_accounts = env::var("SEED_DEMO_ACCOUNTS")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    Settings {
        mongodb_uri,
        mongodb_db,
        db_connect_retries: parsed_or("DB_CONNECT_RETRIES", 5),
        host,
        port: parsed_or("PORT", 3000),
        jwt_secret,
        jwt_cookie_name,
        alpha_vantage_api_key,
        alpha_vantage_base_url,
        starting_balance: parsed_or("STARTING_BALANCE", dec!(100000)),
        quote_timeout_ms: parsed_or("QUOTE_TIMEOUT_MS", 5000),
        max_order_attempts: parsed_or("MAX_ORDER_ATTEMPTS", 3),
        seed_demo_accounts,
    }
}
