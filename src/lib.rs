/*
 * Responsibility
 * - expose the gates, the user store and the token verifier so route
 *   configuration (and tests) can compose them
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
