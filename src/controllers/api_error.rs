use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::LedgerError;

impl LedgerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::InvalidQuantity(_)
            | LedgerError::InvalidSymbol
            | LedgerError::InvalidPrice(_)
            | LedgerError::InsufficientFunds { .. }
            | LedgerError::NoPosition(_)
            | LedgerError::InsufficientShares { .. } => StatusCode::BAD_REQUEST,
            LedgerError::SymbolNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::PriceSourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::Busy { .. } => StatusCode::CONFLICT,
            LedgerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            LedgerError::InsufficientFunds { required, available } => json!({
                "message": "Insufficient funds",
                "required": required,
                "available": available,
            }),
            LedgerError::InsufficientShares { requested, available, .. } => json!({
                "message": "Insufficient shares",
                "required": requested,
                "available": available,
            }),
            LedgerError::NoPosition(_) => json!({
                "message": "Insufficient shares",
                "required": serde_json::Value::Null,
                "available": 0,
            }),
            LedgerError::SymbolNotFound(_) => json!({ "message": "Stock not found" }),
            LedgerError::Store(e) => {
                tracing::error!("storage error: {e}");
                json!({ "message": "Server error" })
            }
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
