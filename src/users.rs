use crate::db::{self, StoreError, User};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::startup::AppState;
use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub pseudo: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Register a new user, keyed by email
pub async fn register(
    Extension(app_state): Extension<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(pseudo), Some(email)) = (non_empty(payload.pseudo), non_empty(payload.email)) else {
        warn!("Registration rejected: missing pseudo or email");
        return Err(AppError::MissingUserFields);
    };

    let user = User::new(pseudo, email);

    match db::create_user(app_state.users.as_ref(), &user).await {
        Ok(_) => {
            info!("Registered user {}", user.email);
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(StoreError::Conflict) => {
            info!("Registration refused, {} already exists", user.email);
            Err(AppError::UserAlreadyExists)
        }
        Err(e) => Err(e.into()),
    }
}

/// Look up a registered user by email
pub async fn login(
    Extension(app_state): Extension<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = non_empty(payload.email).ok_or(AppError::MissingEmail)?;

    let user = db::get_user(app_state.users.as_ref(), &email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok((StatusCode::OK, Json(user)))
}
