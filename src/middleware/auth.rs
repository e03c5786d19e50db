use axum::{
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{models::CurrentUser, AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    // opaque user key handed to the ledger
    pub sub: String,
    // expiry (unix timestamp seconds)
    pub exp: usize,
}

fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    for part in raw.split(';') {
        let part = part.trim();
        let mut it = part.splitn(2, '=');
        let Some(k) = it.next().map(str::trim) else { continue };
        let Some(v) = it.next().map(str::trim) else { continue };
        if k == name {
            return Some(v.to_string());
        }
    }
    None
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

pub fn decode_user(token: &str, secret: &str) -> Option<CurrentUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation).ok()?;
    let user_key = data.claims.sub.trim().to_string();
    (!user_key.is_empty()).then_some(CurrentUser { user_key })
}

pub async fn inject_current_user(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = bearer_token(req.headers())
        .or_else(|| get_cookie(req.headers(), &state.settings.jwt_cookie_name));

    if let Some(user) = token.and_then(|t| decode_user(&t, &state.settings.jwt_secret)) {
        // Store user in request extensions so handlers can access it
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}

fn is_protected_path(path: &str) -> bool {
    path.starts_with("/api/trading")
}

pub async fn require_auth(
    State(_state): State<AppState>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    if !is_protected_path(req.uri().path()) {
        return next.run(req).await;
    }

    // inject_current_user runs first and leaves CurrentUser behind on success
    if req.extensions().get::<CurrentUser>().is_some() {
        return next.run(req).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Not authorized to access this route" })),
    )
        .into_response()
}
