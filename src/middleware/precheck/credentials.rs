use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::error::AppError;
use crate::middleware::body::buffer_json;
use crate::repos::user_repo::with_timeout;
use crate::state::AppState;

/// Reject up front when `username` in the JSON body does not belong to an account.
///
/// The found user is not attached; the login handler looks it up again with
/// the password hash it needs.
pub async fn check_username_exists(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (body, req) = buffer_json(req, state.body_limit_bytes).await?;

    let Some(username) = supplied_username(&body) else {
        tracing::debug!("login attempt without username");
        return Err(AppError::InvalidCredentials);
    };

    let found = with_timeout(
        state.user_lookup_timeout,
        state.users.find_by_username(username),
    )
    .await;

    match found {
        Ok(Some(_)) => Ok(next.run(req).await),
        Ok(None) => {
            tracing::debug!("login attempt for unknown username");
            Err(AppError::InvalidCredentials)
        }
        Err(err) => {
            tracing::error!(error = %err, "username lookup failed");
            Err(AppError::CredentialLookupFailed)
        }
    }
}

// Only a non-empty string counts as a supplied username.
fn supplied_username(body: &Value) -> Option<&str> {
    body.get("username")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
