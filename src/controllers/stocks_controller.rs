use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};

use crate::AppState;

// GET /api/stocks/:symbol/quote
pub async fn get_quote(State(state): State<AppState>, Path(symbol): Path<String>) -> Response {
    match state.ledger.quote(&symbol).await {
        Ok(q) => Json(q).into_response(),
        Err(e) => e.into_response(),
    }
}
