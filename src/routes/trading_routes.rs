use axum::{Router, routing::{get, post}};

use crate::{AppState, controllers::trading_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/trading/buy", post(trading_controller::post_buy))
        .route("/api/trading/sell", post(trading_controller::post_sell))
        .route("/api/trading/portfolio", get(trading_controller::get_portfolio))
        .route("/api/trading/balance", get(trading_controller::get_balance))
        .route("/api/trading/history", get(trading_controller::get_history))
}
