/*
 * Responsibility
 * - v1 URL structure
 * - which gates guard which routes (route_layer: last added runs first)
 */
use axum::{Router, middleware, routing::get};

use crate::api::v1::handlers::{health::health, me::me, users::get_user};
use crate::middleware::auth::{access, role};
use crate::middleware::precheck::validate_user_id;
use crate::state::AppState;

pub fn routes(state: AppState, admin_role_name: &str) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let me = access::apply(Router::new().route("/me", get(me)), state.clone());

    // access gate → role gate → id precheck → handler
    let users = Router::new()
        .route("/users/{id}", get(get_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            validate_user_id,
        ))
        .route_layer(middleware::from_fn(role::only(admin_role_name)));
    let users = access::apply(users, state);

    public.merge(me).merge(users)
}
