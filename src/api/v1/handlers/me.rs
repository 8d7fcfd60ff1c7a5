/*
 * Responsibility
 * - GET /me: echo the claims the access gate decoded
 */
use axum::{Extension, Json};

use crate::services::auth::TokenPayload;

pub async fn me(Extension(payload): Extension<TokenPayload>) -> Json<TokenPayload> {
    Json(payload)
}
