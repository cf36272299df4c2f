use crate::db::{self, Choice, Vote};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::startup::AppState;
use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub user_id: Option<String>,
    pub choice: Option<String>,
}

/// Record a user's choice, replacing any earlier vote for the same choice
pub async fn cast_vote(
    Extension(app_state): Extension<AppState>,
    JsonBody(payload): JsonBody<CastVoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = payload
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or(AppError::InvalidVote)?;
    let choice: Choice = payload
        .choice
        .as_deref()
        .and_then(|c| c.parse().ok())
        .ok_or(AppError::InvalidVote)?;

    if db::get_user(app_state.users.as_ref(), &user_id)
        .await?
        .is_none()
    {
        warn!("Vote rejected, unknown user {}", user_id);
        return Err(AppError::UserNotFound);
    }

    let vote = Vote::new(user_id, choice);
    db::upsert_vote(app_state.votes.as_ref(), &vote).await?;

    info!("Recorded vote {}", vote.id);

    Ok((StatusCode::CREATED, Json(vote)))
}

/// Every recorded vote, unpaginated
pub async fn list_votes(
    Extension(app_state): Extension<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let votes = db::get_all_votes(app_state.votes.as_ref()).await?;

    Ok((StatusCode::OK, Json(votes)))
}
