use std::ops::Deref;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::error::AppError;
use crate::middleware::body::buffer_json;
use crate::state::AppState;

pub const DEFAULT_ROLE_NAME: &str = "student";
pub const RESERVED_ROLE_NAME: &str = "admin";
pub const MAX_ROLE_NAME_CHARS: usize = 32;

/// Role name a registration is allowed to use, after trimming and checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for RoleName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// Normalize `role_name` from the JSON body and attach it as `Extension<RoleName>`.
pub async fn validate_role_name(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (body, mut req) = buffer_json(req, state.body_limit_bytes).await?;

    let role_name = normalize_role_name(requested_role_name(&body)?)?;

    req.extensions_mut().insert(role_name);

    Ok(next.run(req).await)
}

/// Trim, default, and reject.
///
/// Order matters: length is checked before the reserved-name check.
/// Length is measured in UTF-16 code units, so one astral character counts as two.
pub fn normalize_role_name(requested: Option<&str>) -> Result<RoleName, AppError> {
    let trimmed = requested
        .map(|s| s.trim_matches(is_trimmable))
        .unwrap_or_default();

    if trimmed.is_empty() {
        return Ok(RoleName(DEFAULT_ROLE_NAME.to_string()));
    }
    if trimmed.encode_utf16().count() > MAX_ROLE_NAME_CHARS {
        return Err(AppError::RoleNameTooLong);
    }
    if trimmed == RESERVED_ROLE_NAME {
        return Err(AppError::RoleNameReserved);
    }

    Ok(RoleName(trimmed.to_string()))
}

// ECMAScript WhiteSpace + LineTerminator: Unicode White_Space without NEL, plus BOM.
fn is_trimmable(c: char) -> bool {
    (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}'
}

// Falsy JSON means "not supplied"; any other non-string is a client error.
fn requested_role_name(body: &Value) -> Result<Option<&str>, AppError> {
    match body.get("role_name") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(_) => Err(AppError::RoleNameNotString),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalized(requested: Option<&str>) -> Result<String, AppError> {
        normalize_role_name(requested).map(RoleName::into_inner)
    }

    #[test]
    fn missing_or_blank_defaults_to_student() {
        assert_eq!(normalized(None).unwrap(), "student");
        assert_eq!(normalized(Some("")).unwrap(), "student");
        assert_eq!(normalized(Some("   ")).unwrap(), "student");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(normalized(Some("  teacher  ")).unwrap(), "teacher");
        assert_eq!(normalized(Some("\tteaching assistant\n")).unwrap(), "teaching assistant");
    }

    #[test]
    fn longer_than_32_chars_is_rejected() {
        let exactly = "a".repeat(32);
        assert_eq!(normalized(Some(exactly.as_str())).unwrap(), exactly);

        let too_long = "a".repeat(33);
        assert_eq!(normalized(Some(too_long.as_str())), Err(AppError::RoleNameTooLong));

        // padding does not count
        let padded = format!("  {}  ", "a".repeat(32));
        assert_eq!(normalized(Some(padded.as_str())).unwrap(), "a".repeat(32));
    }

    #[test]
    fn admin_is_rejected_after_trimming() {
        assert_eq!(normalized(Some("admin")), Err(AppError::RoleNameReserved));
        assert_eq!(normalized(Some(" admin ")), Err(AppError::RoleNameReserved));
        assert_eq!(normalized(Some("Admin")).unwrap(), "Admin");
    }

    #[test]
    fn length_counts_utf16_units() {
        let accented = "é".repeat(32);
        assert_eq!(normalized(Some(accented.as_str())).unwrap(), accented);

        let sixteen_emoji = "🦀".repeat(16);
        assert_eq!(normalized(Some(sixteen_emoji.as_str())).unwrap(), sixteen_emoji);

        let seventeen_emoji = "🦀".repeat(17);
        assert_eq!(
            normalized(Some(seventeen_emoji.as_str())),
            Err(AppError::RoleNameTooLong)
        );
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert_eq!(
            normalized(Some("\u{FEFF}admin")),
            Err(AppError::RoleNameReserved)
        );
        assert_eq!(
            normalized(Some("\u{FEFF}teacher\u{FEFF}")).unwrap(),
            "teacher"
        );
        assert_eq!(normalized(Some("\u{00A0}\u{3000}mentor\u{2028}")).unwrap(), "mentor");
    }

    #[test]
    fn next_line_is_kept() {
        assert_eq!(
            normalized(Some("\u{0085}teacher")).unwrap(),
            "\u{0085}teacher"
        );
    }

    #[test]
    fn falsy_json_is_not_supplied() {
        for body in [
            json!({}),
            json!({ "role_name": null }),
            json!({ "role_name": false }),
            json!({ "role_name": 0 }),
        ] {
            assert_eq!(requested_role_name(&body), Ok(None));
        }
        assert_eq!(
            requested_role_name(&json!({ "role_name": "mentor" })),
            Ok(Some("mentor"))
        );
    }

    #[test]
    fn other_non_strings_are_rejected() {
        for body in [
            json!({ "role_name": 7 }),
            json!({ "role_name": true }),
            json!({ "role_name": ["admin"] }),
        ] {
            assert_eq!(
                requested_role_name(&body),
                Err(AppError::RoleNameNotString)
            );
        }
    }
}
