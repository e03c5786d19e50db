use rust_decimal::Decimal;
use thiserror::Error;

/// Everything a ledger call can fail with. Every variant is scoped to one
/// request; none of them leave the account half-updated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    #[error("Stock symbol is required")]
    InvalidSymbol,

    #[error("Quoted price must be positive, got {0}")]
    InvalidPrice(Decimal),

    #[error("Insufficient funds. Required: {required}, Available: {available}")]
    InsufficientFunds { required: Decimal, available: Decimal },

    #[error("No open position in {0}")]
    NoPosition(String),

    #[error("Insufficient shares of {symbol}. Requested: {requested}, Available: {available}")]
    InsufficientShares {
        symbol: String,
        requested: i64,
        available: i64,
    },

    #[error("Stock not found: {0}")]
    SymbolNotFound(String),

    #[error("Price source unavailable: {0}")]
    PriceSourceUnavailable(String),

    #[error("Account is busy, gave up after {attempts} attempts")]
    Busy { attempts: u32 },

    #[error("Storage error: {0}")]
    Store(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Account was modified concurrently")]
    VersionConflict,

    #[error("{0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("No quote for {0}")]
    NotFound(String),

    #[error("{0}")]
    Unavailable(String),
}

impl From<QuoteError> for LedgerError {
    fn from(e: QuoteError) -> Self {
        match e {
            QuoteError::NotFound(sym) => LedgerError::SymbolNotFound(sym),
            QuoteError::Unavailable(reason) => LedgerError::PriceSourceUnavailable(reason),
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        LedgerError::Store(e.to_string())
    }
}
