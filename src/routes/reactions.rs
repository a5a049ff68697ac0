use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use jointravel_review::ToggleInput;
use jointravel_shared::reaction::{ReactionStatus, ToggleRequest};

use crate::{auth::Viewer, error::AppError, routes::AppState};

/// GET /reviews/{id}/reactions
///
/// Anonymous callers get the counts with a null `reactionType`.
pub async fn status(
    State(state): State<AppState>,
    viewer: Option<Viewer>,
    Path(review_id): Path<String>,
) -> Result<Json<ReactionStatus>, AppError> {
    let viewer = viewer.map(|Viewer(id)| id);
    let status = state
        .review_command
        .status(review_id, viewer.as_deref())
        .await?;

    Ok(Json(status))
}

/// POST /reviews/{id}/reactions
pub async fn toggle(
    State(state): State<AppState>,
    Viewer(user_id): Viewer,
    Path(review_id): Path<String>,
    input: Result<Json<ToggleRequest>, JsonRejection>,
) -> Result<Json<ReactionStatus>, AppError> {
    let Json(input) = input.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let status = state
        .review_command
        .toggle(ToggleInput {
            review_id,
            user_id,
            reaction_type: input.reaction_type,
        })
        .await?;

    Ok(Json(status))
}
