use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State, rejection::PathRejection},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::repos::user_repo::with_timeout;
use crate::state::AppState;

/// Path parameter holding the user id (`/users/{id}`).
pub const USER_ID_PARAM: &str = "id";

/// Resolve `{id}` to a stored user and attach it (`Extension<User>`) for the handler.
///
/// Must be added with `route_layer` so path params are already matched.
pub async fn validate_user_id(
    State(state): State<AppState>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Undecodable segments (`/users/%FF`) are just another bad id.
    let Path(params) = params.map_err(|rejection| {
        tracing::debug!(%rejection, "user id path did not decode");
        AppError::InvalidUserId
    })?;
    let Some(user_id) = parse_user_id(params.get(USER_ID_PARAM).map(String::as_str)) else {
        tracing::debug!(raw = ?params.get(USER_ID_PARAM), "unparseable user id");
        return Err(AppError::InvalidUserId);
    };

    let found = with_timeout(state.user_lookup_timeout, state.users.find_by_id(user_id)).await;

    match found {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Ok(None) => {
            tracing::debug!(user_id, "no user with this id");
            Err(AppError::InvalidUserId)
        }
        Err(err) => {
            tracing::error!(error = %err, user_id, "user lookup by id failed");
            Err(AppError::UserLookupFailed)
        }
    }
}

// An id that cannot exist in storage is simply not found.
fn parse_user_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}
