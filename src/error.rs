use crate::db::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request body is not valid JSON")]
    InvalidJson,
    #[error("Request body has a field of the wrong type: {0}")]
    WrongFieldType(String),
    #[error("Request body exceeds the size limit")]
    PayloadTooLarge,
    #[error("Request body could not be read")]
    UnreadableBody,
    #[error("Pseudo and email are required")]
    MissingUserFields,
    #[error("Email is required")]
    MissingEmail,
    #[error("Missing parameters or invalid choice")]
    InvalidVote,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidJson => (StatusCode::BAD_REQUEST, "Invalid JSON body"),
            AppError::WrongFieldType(_) => (StatusCode::BAD_REQUEST, "Invalid field type"),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large"),
            AppError::UnreadableBody => (StatusCode::BAD_REQUEST, "Unreadable body"),
            AppError::MissingUserFields => (StatusCode::BAD_REQUEST, "Missing fields"),
            AppError::MissingEmail => (StatusCode::BAD_REQUEST, "Missing email"),
            AppError::InvalidVote => (StatusCode::BAD_REQUEST, "Invalid vote"),
            AppError::UserAlreadyExists => (StatusCode::CONFLICT, "User already exists"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            AppError::Store(e) => {
                error!("Store failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let details = match &self {
            AppError::Store(_) => error_message.to_string(),
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
            "details": details
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_taxonomy() {
        let cases = [
            (AppError::InvalidJson, StatusCode::BAD_REQUEST),
            (AppError::WrongFieldType("pseudo".into()), StatusCode::BAD_REQUEST),
            (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (AppError::UnreadableBody, StatusCode::BAD_REQUEST),
            (AppError::MissingUserFields, StatusCode::BAD_REQUEST),
            (AppError::MissingEmail, StatusCode::BAD_REQUEST),
            (AppError::InvalidVote, StatusCode::BAD_REQUEST),
            (AppError::UserAlreadyExists, StatusCode::CONFLICT),
            (AppError::UserNotFound, StatusCode::NOT_FOUND),
            (AppError::Store(StoreError::NotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
