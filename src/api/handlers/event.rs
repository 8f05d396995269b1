use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::api::dtos::responses::EventDetail;
use crate::domain::models::event::{Event, PriceTier};
use crate::domain::services::filter::{self, EventFilter};
use crate::error::AppError;
use std::collections::HashSet;
use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use tracing::{info, warn};

fn validate_tiers(tiers: &[PriceTier]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for tier in tiers {
        if tier.id.trim().is_empty() {
            return Err(AppError::Validation("Tier id must not be blank".into()));
        }
        if !seen.insert(tier.id.as_str()) {
            return Err(AppError::Validation(format!("Duplicate tier id: {}", tier.id)));
        }
    }
    Ok(())
}

async fn check_artists_exist(state: &AppState, artist_ids: &[String]) -> Result<(), AppError> {
    for artist_id in artist_ids {
        if state.artist_repo.find_by_id(artist_id).await?.is_none() {
            return Err(AppError::Validation(format!("Unknown artist: {}", artist_id)));
        }
    }
    Ok(())
}

/// Best-effort coordinate lookup. A geocoder outage never blocks the write.
async fn geocode(state: &AppState, location_name: &str) -> (Option<f64>, Option<f64>) {
    match state.geocoder.search(location_name).await {
        Ok(hits) => match hits.first() {
            Some(hit) => (Some(hit.lat), Some(hit.lon)),
            None => (None, None),
        },
        Err(e) => {
            warn!("Geocoding failed for '{}': {}", location_name, e);
            (None, None)
        }
    }
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !user.role.can_publish() {
        return Err(AppError::Forbidden("Artist or organizer role required".into()));
    }
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Event title is required".into()));
    }
    if payload.location_name.trim().is_empty() {
        return Err(AppError::Validation("Location name is required".into()));
    }
    if payload.ticket_capacity.is_some_and(|c| c < 0) {
        return Err(AppError::Validation("Ticket capacity must not be negative".into()));
    }

    let price_tiers = payload.price_tiers.unwrap_or_default();
    validate_tiers(&price_tiers)?;

    if let Some(ref instructions) = payload.payment_instructions {
        instructions.validate().map_err(AppError::Validation)?;
    }

    let artist_ids = payload.artist_ids.unwrap_or_default();
    check_artists_exist(&state, &artist_ids).await?;

    let (location_lat, location_lng) = match (payload.location_lat, payload.location_lng) {
        (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
        _ => geocode(&state, &payload.location_name).await,
    };

    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: payload.title.trim().to_string(),
        description: payload.description.unwrap_or_default(),
        date: payload.date,
        time: payload.time,
        location_name: payload.location_name.trim().to_string(),
        location_lat,
        location_lng,
        price: payload.price,
        price_tiers,
        ticket_capacity: payload.ticket_capacity,
        payment_instructions: payload.payment_instructions,
        user_id: user.id,
        created_at: Utc::now(),
    };

    let created = state.event_repo.create(&event, &artist_ids).await?;
    info!("Event created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(event_filter): Query<EventFilter>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    let filtered = filter::apply(events, &event_filter, Utc::now());
    Ok(Json(filtered))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    let artists = state.artist_repo.list_for_event(&event.id).await?;
    Ok(Json(EventDetail { event, artists }))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.user_id != user.id && !user.role.is_admin() {
        return Err(AppError::Forbidden("Only the owner or an admin may edit this event".into()));
    }

    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Event title must not be blank".into()));
        }
        event.title = title.trim().to_string();
    }
    if let Some(description) = payload.description { event.description = description; }
    if let Some(date) = payload.date { event.date = date; }
    if let Some(time) = payload.time { event.time = time; }
    if let Some(price) = payload.price { event.price = Some(price); }
    if let Some(capacity) = payload.ticket_capacity {
        if capacity < 0 {
            return Err(AppError::Validation("Ticket capacity must not be negative".into()));
        }
        event.ticket_capacity = Some(capacity);
    }
    if let Some(tiers) = payload.price_tiers {
        validate_tiers(&tiers)?;
        event.price_tiers = tiers;
    }
    if let Some(instructions) = payload.payment_instructions {
        instructions.validate().map_err(AppError::Validation)?;
        event.payment_instructions = Some(instructions);
    }

    let location_changed = payload.location_name.as_deref()
        .is_some_and(|name| name != event.location_name);
    if let Some(location_name) = payload.location_name {
        if location_name.trim().is_empty() {
            return Err(AppError::Validation("Location name must not be blank".into()));
        }
        event.location_name = location_name.trim().to_string();
    }

    match (payload.location_lat, payload.location_lng) {
        (Some(lat), Some(lng)) => {
            event.location_lat = Some(lat);
            event.location_lng = Some(lng);
        }
        _ if location_changed => {
            let (lat, lng) = geocode(&state, &event.location_name).await;
            event.location_lat = lat;
            event.location_lng = lng;
        }
        _ => {}
    }

    let artist_ids = payload.artist_ids;
    if let Some(ref ids) = artist_ids {
        check_artists_exist(&state, ids).await?;
    }

    let updated = state.event_repo.update(&event, artist_ids.as_deref()).await?;
    info!("Event updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.user_id != user.id && !user.role.is_admin() {
        return Err(AppError::Forbidden("Only the owner or an admin may delete this event".into()));
    }

    state.event_repo.delete(&event.id).await?;
    info!("Event deleted: {}", event.id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
