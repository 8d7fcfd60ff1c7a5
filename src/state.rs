/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 *   - token verifier (holds the secret), user store, lookup bound, body cap
 * - cheap to Clone (everything behind Arc)
 */
use std::sync::Arc;
use std::time::Duration;

use crate::repos::UserStore;
use crate::services::auth::VerifyToken;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<dyn VerifyToken>,
    pub users: Arc<dyn UserStore>,
    pub user_lookup_timeout: Duration,
    /// Largest body a precheck will buffer; matches the HTTP body limit.
    pub body_limit_bytes: usize,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("user_lookup_timeout", &self.user_lookup_timeout)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        tokens: Arc<dyn VerifyToken>,
        users: Arc<dyn UserStore>,
        user_lookup_timeout: Duration,
        body_limit_bytes: usize,
    ) -> Self {
        Self {
            tokens,
            users,
            user_lookup_timeout,
            body_limit_bytes,
        }
    }
}
