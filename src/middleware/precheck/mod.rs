/*
 * Responsibility
 * - request prechecks that run before account handlers
 *   - credentials: the supplied username must exist
 *   - user_id: path `id` must resolve to a stored user (attached to extensions)
 *   - role_name: sanitize/validate a proposed role name (attached to extensions)
 */
pub mod credentials;
pub mod role_name;
pub mod user_id;

pub use credentials::check_username_exists;
pub use role_name::{RoleName, normalize_role_name, validate_role_name};
pub use user_id::validate_user_id;
