use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub async fn home() -> impl IntoResponse {
    (StatusCode::OK, "Welcome to the Demo Trading API")
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
