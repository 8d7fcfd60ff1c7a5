//! Access gate: `Authorization` token → verify → `TokenPayload` into extensions.
//!
//! - The header value is used as-is (no `Bearer ` scheme parsing).
//! - Missing/empty header is rejected before the verifier is touched.
//! - Downstream stages (role gate, handlers) read the payload from extensions.

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Put every route of `router` behind the access gate.
///
/// ```ignore
/// let me = Router::new().route("/me", get(me));
/// let me = middleware::auth::access::apply(me, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, restricted))
}

pub async fn restricted(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = token_from_headers(req.headers())?;

    let payload = match state.tokens.verify(token) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::TokenInvalid);
        }
    };

    // middleware → role gate / handler
    req.extensions_mut().insert(payload);

    Ok(next.run(req).await)
}

/// Raw `Authorization` value.
///
/// - absent or empty      => `TokenRequired`
/// - not visible ASCII    => `TokenInvalid` (present, but can never verify)
pub fn token_from_headers(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(v) if !v.is_empty() => v,
        _ => {
            tracing::debug!("request without access token");
            return Err(AppError::TokenRequired);
        }
    };

    value.to_str().map_err(|_| AppError::TokenInvalid)
}
