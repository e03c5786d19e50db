use axum::{Router, routing::get};

use crate::{AppState, controllers::stocks_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/api/stocks/:symbol/quote", get(stocks_controller::get_quote))
}
