#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use auth_gates::repos::{RepoError, RepoResult, User, UserStore};
use auth_gates::services::auth::{TokenPayload, TokenVerifier, VerificationError, VerifyToken};
use auth_gates::state::AppState;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

/// Short so the hanging-store tests finish quickly.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_millis(100);

pub const BODY_LIMIT: usize = 64 * 1024;

pub fn user(user_id: i64, username: &str, role_name: &str) -> User {
    User {
        user_id,
        username: username.to_string(),
        role_name: role_name.to_string(),
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Vec<User>,
}

impl MemoryUserStore {
    pub fn with(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn seeded() -> Self {
        Self::with(vec![
            user(1, "bob", "admin"),
            user(2, "sue", "instructor"),
            user(3, "ada", "student"),
        ])
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> RepoResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.user_id == user_id).cloned())
    }
}

/// Every lookup fails like an unreachable database.
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn find_by_username(&self, _username: &str) -> RepoResult<Option<User>> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _user_id: i64) -> RepoResult<Option<User>> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}

/// Every lookup never settles.
pub struct HangingUserStore;

#[async_trait]
impl UserStore for HangingUserStore {
    async fn find_by_username(&self, _username: &str) -> RepoResult<Option<User>> {
        std::future::pending().await
    }

    async fn find_by_id(&self, _user_id: i64) -> RepoResult<Option<User>> {
        std::future::pending().await
    }
}

/// Counts how often the gate asks for a token to be verified.
#[derive(Default)]
pub struct CountingVerifier {
    calls: AtomicUsize,
}

impl CountingVerifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl VerifyToken for CountingVerifier {
    fn verify(&self, token: &str) -> Result<TokenPayload, VerificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TokenVerifier::new(SECRET, 0).verify(token)
    }
}

pub fn state_from(
    tokens: Arc<dyn VerifyToken>,
    users: impl UserStore,
    body_limit_bytes: usize,
) -> AppState {
    AppState::new(tokens, Arc::new(users), LOOKUP_TIMEOUT, body_limit_bytes)
}

pub fn state_with(users: impl UserStore) -> AppState {
    state_from(Arc::new(TokenVerifier::new(SECRET, 0)), users, BODY_LIMIT)
}

pub fn state() -> AppState {
    state_with(MemoryUserStore::seeded())
}

pub fn sign_with(claims: Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn sign(claims: Value) -> String {
    sign_with(claims, SECRET)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Status plus the JSON body (`Value::Null` when the body is not JSON).
pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = router.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
