use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateArtistRequest, UpdateArtistRequest};
use crate::domain::models::artist::Artist;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateArtistRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_publish() {
        return Err(AppError::Forbidden("Artist or organizer role required".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Artist name is required".into()));
    }

    let artist = Artist::new(
        user.id,
        payload.name.trim().to_string(),
        payload.bio.unwrap_or_default(),
        payload.image_url,
    );
    let created = state.artist_repo.create(&artist).await?;

    info!("Artist created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let artists = state.artist_repo.list().await?;
    Ok(Json(artists))
}

pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(artist_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let artist = state.artist_repo.find_by_id(&artist_id).await?
        .ok_or(AppError::NotFound("Artist not found".into()))?;
    Ok(Json(artist))
}

pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(artist_id): Path<String>,
    Json(payload): Json<UpdateArtistRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut artist = state.artist_repo.find_by_id(&artist_id).await?
        .ok_or(AppError::NotFound("Artist not found".into()))?;

    if artist.user_id != user.id && !user.role.is_admin() {
        return Err(AppError::Forbidden("Only the owner or an admin may edit this artist".into()));
    }

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Artist name must not be blank".into()));
        }
        artist.name = name.trim().to_string();
    }
    if let Some(bio) = payload.bio { artist.bio = bio; }
    if let Some(image_url) = payload.image_url {
        artist.image_url = if image_url.is_empty() { None } else { Some(image_url) };
    }

    let updated = state.artist_repo.update(&artist).await?;
    info!("Artist updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(artist_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let artist = state.artist_repo.find_by_id(&artist_id).await?
        .ok_or(AppError::NotFound("Artist not found".into()))?;

    if artist.user_id != user.id && !user.role.is_admin() {
        return Err(AppError::Forbidden("Only the owner or an admin may delete this artist".into()));
    }

    state.artist_repo.delete(&artist.id).await?;
    info!("Artist deleted: {}", artist.id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
