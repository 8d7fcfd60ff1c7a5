/*
 * Responsibility
 * - AppError: every way a gate can end a request
 * - IntoResponse (HTTP status + fixed JSON body)
 * - ErrorKind: the coarse taxonomy used for logging
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthenticationMissing,
    AuthenticationInvalid,
    AuthorizationDenied,
    CredentialInvalid,
    ResourceNotFound,
    StorageFailure,
    ValidationFailure,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Token required")]
    TokenRequired,
    #[error("Token invalid")]
    TokenInvalid,
    #[error("This is not for you")]
    Forbidden,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Could not validate credentials")]
    CredentialLookupFailed,
    #[error("invalid user id")]
    InvalidUserId,
    #[error("Could not validate user with the specified id")]
    UserLookupFailed,
    #[error("Role name can not be longer than 32 chars")]
    RoleNameTooLong,
    #[error("Role name can not be admin")]
    RoleNameReserved,
    #[error("Role name must be a string")]
    RoleNameNotString,
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Request body too large")]
    PayloadTooLarge,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::TokenRequired => ErrorKind::AuthenticationMissing,
            AppError::TokenInvalid => ErrorKind::AuthenticationInvalid,
            AppError::Forbidden => ErrorKind::AuthorizationDenied,
            AppError::InvalidCredentials => ErrorKind::CredentialInvalid,
            AppError::InvalidUserId => ErrorKind::ResourceNotFound,
            AppError::CredentialLookupFailed | AppError::UserLookupFailed => {
                ErrorKind::StorageFailure
            }
            AppError::RoleNameTooLong
            | AppError::RoleNameReserved
            | AppError::RoleNameNotString
            | AppError::InvalidBody
            | AppError::PayloadTooLarge => ErrorKind::ValidationFailure,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::TokenRequired | AppError::TokenInvalid | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidUserId | AppError::InvalidBody => StatusCode::BAD_REQUEST,
            AppError::RoleNameTooLong | AppError::RoleNameReserved | AppError::RoleNameNotString => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::CredentialLookupFailed | AppError::UserLookupFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Storage faults answer with `errorMessage`, everything else with `message`.
        let body = match self.kind() {
            ErrorKind::StorageFailure => json!({ "errorMessage": self.to_string() }),
            _ => json!({ "message": self.to_string() }),
        };

        (self.status(), Json(body)).into_response()
    }
}
