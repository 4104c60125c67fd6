use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::instrument;

use crate::{error::ApiError, state::AppState, users::dto::PublicUser, users::repo};

use super::dto::{CheckPhotoResponse, PhotoResponse};
use super::service;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/photo/:cedula", post(process_photo))
        .route("/check-photo/:cedula", get(check_photo))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// POST /api/photo/:cedula — multipart with an optional `image` field.
/// Returns the existing photo when the user has one, otherwise generates,
/// stores and records a new one.
#[instrument(skip(state, mp))]
pub async fn process_photo(
    State(state): State<AppState>,
    Path(cedula): Path<String>,
    mut mp: Multipart,
) -> Result<Json<PhotoResponse>, ApiError> {
    let mut upload: Option<Bytes> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() == Some("image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
            upload = Some(data);
        }
    }

    let outcome = service::resolve_photo(
        state.directory.as_ref(),
        state.generator.as_ref(),
        state.storage.as_ref(),
        state.config.signed_url_ttl_secs,
        &cedula,
        upload,
    )
    .await?;

    Ok(Json(PhotoResponse::from(outcome)))
}

/// GET /api/check-photo/:cedula — existence check only, never generates.
#[instrument(skip(state))]
pub async fn check_photo(
    State(state): State<AppState>,
    Path(cedula): Path<String>,
) -> Result<Json<CheckPhotoResponse>, ApiError> {
    let user = repo::find_by_id(&state.db, &cedula)
        .await?
        .ok_or(ApiError::NotFound)?;

    let image = match &user.image {
        Some(key) => {
            state
                .storage
                .presign_get(key, state.config.signed_url_ttl_secs)
                .await
        }
        None => None,
    };

    Ok(Json(CheckPhotoResponse {
        success: true,
        has_photo: user.image.is_some(),
        user: PublicUser::from(&user),
        image,
    }))
}
