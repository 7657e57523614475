use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde_json::Value;

use super::{ApiError, access_token};
use crate::{
    server::AppState,
    types::{Library, SaveLibraryRequest, SaveLibraryResponse},
    warning,
};

const MISSING_CREDENTIALS: &str = "Missing access token or user ID";

/// `POST /api/user/library`: overwrites the caller's stored library.
pub async fn save_library(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SaveLibraryRequest>,
) -> Result<Json<SaveLibraryResponse>, ApiError> {
    let (Some(token), Some(user_id)) = (
        access_token(&headers),
        body.user_id.filter(|id| !id.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(MISSING_CREDENTIALS));
    };

    verify_owner(&state, &token, &user_id).await?;

    state
        .store
        .save(
            &user_id,
            body.playlists.unwrap_or_default(),
            body.albums.unwrap_or_default(),
        )
        .await
        .inspect_err(|e| warning!("Error saving library of {}: {}", user_id, e))?;

    Ok(Json(SaveLibraryResponse {
        success: true,
        message: "Library saved successfully".to_string(),
    }))
}

/// `GET /api/user/library/{user_id}`: the stored library, or an empty one.
pub async fn load_library(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let Some(token) = access_token(&headers).filter(|_| !user_id.is_empty()) else {
        return Err(ApiError::BadRequest(MISSING_CREDENTIALS));
    };

    verify_owner(&state, &token, &user_id).await?;

    let library = match state.store.load(&user_id).await {
        Ok(library) => library,
        Err(e) => {
            warning!("Stored library of {} is unreadable: {}", user_id, e);
            serde_json::to_value(Library::empty(&user_id))
                .map_err(|e| ApiError::Internal(e.to_string()))?
        }
    };
    Ok(Json(library))
}

/// Rejects tokens owned by somebody else than `user_id`.
async fn verify_owner(state: &AppState, token: &str, user_id: &str) -> Result<(), ApiError> {
    let owner = state
        .spotify
        .current_user(token)
        .await
        .inspect_err(|e| warning!("Resolving token owner failed: {}", e))?;

    if owner.id != user_id {
        return Err(ApiError::Forbidden("User ID mismatch"));
    }
    Ok(())
}
