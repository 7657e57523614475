use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::{ApiError, access_token};
use crate::{
    server::AppState,
    spotify::SpotifyError,
    types::{LoginQuery, TokenRequest},
    warning,
};

/// `GET /api/spotify/login`: sends the browser to Spotify's consent page.
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Response, ApiError> {
    let Some(redirect_uri) = query.redirect_uri.filter(|u| !u.is_empty()) else {
        return Err(ApiError::BadRequest("Missing redirect_uri"));
    };

    let url = state
        .spotify
        .authorize_url(
            &state.config.client_id,
            &redirect_uri,
            query.state.as_deref(),
        )
        .ok_or_else(|| ApiError::Internal("Invalid Spotify accounts URL".to_string()))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}

/// `POST /api/spotify/token`: trades an authorization code for a token.
///
/// The answer is forwarded verbatim. Any failure is a 500 carrying what
/// Spotify said; nothing is retried.
pub async fn token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(code), Some(redirect_uri)) = (
        body.code.filter(|c| !c.is_empty()),
        body.redirect_uri.filter(|u| !u.is_empty()),
    ) else {
        return Err(ApiError::BadRequest("Missing code or redirect_uri"));
    };

    state
        .spotify
        .exchange_code(
            &state.config.client_id,
            &state.config.client_secret,
            &code,
            &redirect_uri,
        )
        .await
        .map(Json)
        .map_err(|e| {
            warning!("Token exchange failed: {}", e);
            match e {
                SpotifyError::Status { body, .. } => ApiError::Exchange(body),
                other => ApiError::Exchange(Value::String(other.to_string())),
            }
        })
}

/// `GET /api/spotify/playlists`
pub async fn playlists(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let token = require_token(&headers)?;
    Ok(Json(state.spotify.my_playlists_raw(&token).await?))
}

/// `GET /api/spotify/albums`
pub async fn albums(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let token = require_token(&headers)?;
    Ok(Json(state.spotify.my_albums_raw(&token).await?))
}

/// `GET /api/spotify/recently-played`
pub async fn recently_played(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let token = require_token(&headers)?;
    Ok(Json(state.spotify.recently_played_raw(&token, 20).await?))
}

fn require_token(headers: &HeaderMap) -> Result<String, ApiError> {
    access_token(headers).ok_or(ApiError::Unauthorized("Missing access token"))
}
