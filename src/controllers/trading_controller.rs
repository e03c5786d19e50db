use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{error::LedgerError, models::CurrentUser, AppState};

#[derive(Deserialize)]
pub struct TradeBody {
    #[serde(default)]
    pub symbol: String,
    // accepted as a number or a numeric string
    #[serde(default)]
    pub quantity: serde_json::Value,
}

impl TradeBody {
    fn quantity(&self) -> Result<i64, LedgerError> {
        let parsed = match &self.quantity {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        match parsed {
            Some(q) if q > 0 => Ok(q),
            Some(q) => Err(LedgerError::InvalidQuantity(q)),
            None => Err(LedgerError::InvalidQuantity(0)),
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Not authorized to access this route" })),
    )
        .into_response()
}

// POST /api/trading/buy
pub async fn post_buy(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<TradeBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let qty = match body.quantity() {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };

    match state.ledger.buy(&u.user_key, &body.symbol, qty).await {
        Ok(out) => Json(json!({
            "message": "Stock purchased successfully",
            "trade": out.trade,
            "position": out.position,
            "balance": out.balance,
        }))
        .into_response(),
        Err(e) => e.into_response(),
    }
}

// POST /api/trading/sell
pub async fn post_sell(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<TradeBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let qty = match body.quantity() {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };

    match state.ledger.sell(&u.user_key, &body.symbol, qty).await {
        Ok(out) => Json(json!({
            "message": "Stock sold successfully",
            "trade": out.trade,
            "position": out.position,
            "balance": out.balance,
            "realized_profit_loss": out.realized_profit_loss,
        }))
        .into_response(),
        Err(e) => e.into_response(),
    }
}

// GET /api/trading/portfolio
pub async fn get_portfolio(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    match state.ledger.get_portfolio(&u.user_key).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => e.into_response(),
    }
}

// GET /api/trading/balance
pub async fn get_balance(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    match state.ledger.get_balance(&u.user_key).await {
        Ok(balance) => Json(json!({ "balance": balance })).into_response(),
        Err(e) => e.into_response(),
    }
}

// GET /api/trading/history
pub async fn get_history(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    match state.ledger.get_trade_history(&u.user_key).await {
        Ok(trades) => Json(trades).into_response(),
        Err(e) => e.into_response(),
    }
}
