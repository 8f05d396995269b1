use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::UpdateBookingStatusRequest;
use crate::domain::models::booking::BookingStatus;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_event_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.user_id != user.id && !user.role.is_admin() {
        return Err(AppError::Forbidden("Only the event owner or an admin may review bookings".into()));
    }

    let bookings = state.booking_repo.list_by_event(&event.id).await?;
    Ok(Json(bookings))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.status == BookingStatus::Pending {
        return Err(AppError::Validation("Bookings can only be confirmed or cancelled".into()));
    }

    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let event = state.event_repo.find_by_id(&booking.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.user_id != user.id && !user.role.is_admin() {
        return Err(AppError::Forbidden("Only the event owner or an admin may update bookings".into()));
    }

    let updated = state.booking_repo.update_status(&booking.id, payload.status).await?;
    info!("Booking {} set to {:?}", updated.id, updated.status);
    Ok(Json(updated))
}
