use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::auth::UserProfile;
use crate::domain::models::booking::BookingStatus;
use crate::domain::models::settings::UserSettings;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.user_repo.find_by_id(&user.id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(UserProfile {
        id: profile.id,
        email: profile.email,
        name: profile.name,
        role: profile.role,
    }))
}

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.settings_repo.get(&user.id).await?.unwrap_or_default();
    Ok(Json(settings))
}

pub async fn put_settings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(settings): Json<UserSettings>,
) -> Result<impl IntoResponse, AppError> {
    state.settings_repo.put(&user.id, &settings).await?;
    Ok(Json(settings))
}

pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&user.id).await?;
    Ok(Json(bookings))
}

pub async fn cancel_my_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id {
        return Err(AppError::Forbidden("Not your booking".into()));
    }
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::Conflict("Booking is already cancelled".into()));
    }

    let cancelled = state.booking_repo.update_status(&booking.id, BookingStatus::Cancelled).await?;
    info!("Booking cancelled by attendee: {}", cancelled.id);
    Ok(Json(cancelled))
}
