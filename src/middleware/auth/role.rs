//! Role gate: let a request through only when its decoded token carries the
//! configured `role_name` claim.
//!
//! Must be mounted inside the access gate. The payload is read from request
//! extensions and handed to `require_role` explicitly; nothing is re-verified.

use std::{future::Future, pin::Pin, sync::Arc};

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::services::auth::TokenPayload;

pub type RoleGateFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Build a middleware that only admits `role_name`.
///
/// ```ignore
/// let admin = Router::new()
///     .route("/users/{id}", get(get_user))
///     .route_layer(axum::middleware::from_fn(role::only("admin")));
/// let admin = access::apply(admin, state.clone());
/// ```
pub fn only(
    role_name: &str,
) -> impl Fn(Request, Next) -> RoleGateFuture + Clone + Send + Sync + 'static + use<> {
    let role_name: Arc<str> = Arc::from(role_name);

    move |req: Request, next: Next| -> RoleGateFuture {
        let role_name = Arc::clone(&role_name);
        Box::pin(async move {
            let decision = require_role(&role_name, req.extensions().get::<TokenPayload>());
            match decision {
                Ok(()) => next.run(req).await,
                Err(err) => err.into_response(),
            }
        })
    }
}

/// Exact, case-sensitive match of the `role_name` claim.
///
/// `None` means no access gate ran before us; that is a routing mistake and
/// fails closed.
pub fn require_role(expected: &str, payload: Option<&TokenPayload>) -> Result<(), AppError> {
    let Some(payload) = payload else {
        tracing::error!(
            role = expected,
            "role gate reached without a decoded token; is the access gate mounted?"
        );
        return Err(AppError::Forbidden);
    };

    match payload.role_name() {
        Some(actual) if !actual.is_empty() && actual == expected => Ok(()),
        actual => {
            tracing::debug!(expected, actual = ?actual, "role mismatch");
            Err(AppError::Forbidden)
        }
    }
}
