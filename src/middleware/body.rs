//! Buffer a request body as JSON without consuming it for downstream handlers.

use std::error::Error as StdError;

use axum::{
    body::{Body, to_bytes},
    extract::Request,
};
use http_body_util::LengthLimitError;
use serde_json::Value;

use crate::error::AppError;

/// Read the whole body, parse it, and rebuild the request with the same bytes.
///
/// - over `limit` bytes => `AppError::PayloadTooLarge`
/// - empty body         => empty object (no fields present)
/// - not JSON           => `AppError::InvalidBody`
pub(crate) async fn buffer_json(
    req: Request,
    limit: usize,
) -> Result<(Value, Request), AppError> {
    let (parts, body) = req.into_parts();

    let bytes = to_bytes(body, limit).await.map_err(|err| {
        if exceeds_limit(&err) {
            tracing::debug!(limit, "request body over limit");
            AppError::PayloadTooLarge
        } else {
            tracing::debug!(error = %err, "failed to read request body");
            AppError::InvalidBody
        }
    })?;

    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::debug!(error = %err, "request body is not valid JSON");
            AppError::InvalidBody
        })?
    };

    Ok((value, Request::from_parts(parts, Body::from(bytes))))
}

// Both our cap and RequestBodyLimitLayer's report LengthLimitError somewhere in the chain.
fn exceeds_limit(err: &axum::Error) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err as &(dyn StdError + 'static));
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}
