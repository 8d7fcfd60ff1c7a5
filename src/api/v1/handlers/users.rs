/*
 * Responsibility
 * - GET /users/{id}: return the user the id precheck already resolved
 */
use axum::{Extension, Json};

use crate::repos::User;

pub async fn get_user(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
