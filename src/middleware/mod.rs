/*
 * Responsibility
 * - public surface of the request gates
 *   - auth::access::restricted / auth::role::only
 *   - precheck::{credentials, user_id, role_name}
 * - http: transport-level layers applied to the whole app
 */
pub mod auth;
mod body;
pub mod http;
pub mod precheck;
