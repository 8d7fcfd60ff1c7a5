/*
 * Responsibility
 * - v1 public entry point (re-export routes())
 */
pub mod handlers;
mod routes;

pub use routes::routes;
