use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateBookingRequest, ProofPayload, QuoteQuery};
use crate::api::dtos::responses::{BookingConfirmation, QuoteResponse};
use crate::domain::models::booking::{Booking, BookingStatus, NewBookingParams, PaymentMethod};
use crate::domain::models::event::Event;
use crate::domain::services::{calendar, pricing};
use crate::error::AppError;
use std::sync::Arc;
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use tera::Context;
use tracing::{info, warn};

/// Client-side ceiling mirrored here: proofs above 5 MB are rejected before
/// any upload is attempted.
const MAX_PROOF_BYTES: usize = 5 * 1024 * 1024;

pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let active = state.booking_repo.count_active(&event.id).await?;
    let count = query.count.unwrap_or(1);

    let quote = pricing::quote(&event, query.tier_id.as_deref(), count, active, Utc::now())
        .map_err(AppError::from)?;

    Ok(Json(QuoteResponse {
        quote,
        max_selectable: pricing::max_selectable(&event, active),
    }))
}

fn decode_proof(proof: &ProofPayload) -> Result<Vec<u8>, AppError> {
    let bytes = general_purpose::STANDARD
        .decode(proof.content_base64.trim())
        .map_err(|_| AppError::Validation("Proof of payment is not valid base64".into()))?;

    if bytes.len() > MAX_PROOF_BYTES {
        return Err(AppError::PayloadTooLarge("Proof of payment must be 5MB or smaller".into()));
    }
    Ok(bytes)
}

fn proof_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("bin")
        .to_lowercase()
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_booking: Starting for event {}", event_id);

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let count = payload.ticket_count.unwrap_or(1);
    if count > pricing::MAX_TICKETS_PER_ORDER {
        return Err(AppError::Validation(format!(
            "At most {} tickets per order", pricing::MAX_TICKETS_PER_ORDER
        )));
    }

    // Attendee snapshot: payload wins, stored profile is the fallback.
    let profile = state.user_repo.find_by_id(&user.id).await?
        .ok_or(AppError::Unauthorized)?;
    let attendee_name = payload.attendee_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| profile.name.clone());
    let attendee_email = payload.attendee_email
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| profile.email.clone());
    if attendee_name.trim().is_empty() || attendee_email.trim().is_empty() {
        return Err(AppError::Validation("Attendee name and email are required".into()));
    }

    let active = state.booking_repo.count_active(&event.id).await?;
    let quote = pricing::quote(&event, payload.tier_id.as_deref(), count, active, Utc::now())
        .map_err(AppError::from)?;

    // Everything past this point has side effects.
    let proof_of_payment_url = if quote.is_free {
        None
    } else {
        let proof = payload.proof_of_payment.as_ref()
            .ok_or(AppError::Validation("Proof of payment is required for paid events".into()))?;
        let bytes = decode_proof(proof)?;

        let path = format!(
            "{}/{}/{}.{}",
            user.id,
            event.id,
            Utc::now().timestamp_millis(),
            proof_extension(&proof.filename),
        );
        let content_type = proof.content_type.as_deref().unwrap_or("application/octet-stream");

        info!("create_booking: Uploading proof to {}", path);
        let url = state.object_storage.upload(&path, &bytes, content_type).await?;
        Some(url)
    };

    let status = if quote.is_free { BookingStatus::Confirmed } else { BookingStatus::Pending };
    let rows = Booking::batch(
        NewBookingParams {
            event_id: event.id.clone(),
            user_id: user.id.clone(),
            attendee_name: attendee_name.clone(),
            attendee_email: attendee_email.clone(),
            amount: quote.unit_price,
            payment_method: if quote.is_free { PaymentMethod::Free } else { PaymentMethod::Direct },
            proof_of_payment_url,
            status,
        },
        count,
    );

    info!("create_booking: Inserting {} rows...", rows.len());
    let created = state.booking_repo.create_batch(&rows).await?;
    info!("create_booking: Insert success for event {}", event.id);

    let calendar_link = calendar::quick_add_link(&event);

    if quote.is_free {
        send_confirmation(&state, &event, &created, &attendee_name, &attendee_email, &calendar_link).await;
    }

    Ok(Json(BookingConfirmation {
        booking_ids: created.iter().map(|b| b.id.clone()).collect(),
        ticket_count: count,
        total_amount: quote.total_amount,
        status,
        calendar_link,
    }))
}

/// Free bookings are confirmed on the spot; the notification is
/// fire-and-forget and never unwinds the already-persisted rows.
async fn send_confirmation(
    state: &AppState,
    event: &Event,
    created: &[Booking],
    attendee_name: &str,
    attendee_email: &str,
    calendar_link: &str,
) {
    let settings = match state.settings_repo.get(created[0].user_id.as_str()).await {
        Ok(s) => s.unwrap_or_default(),
        Err(e) => {
            warn!("Could not load settings before confirmation email: {}", e);
            return;
        }
    };
    if !settings.email_notifications {
        info!("Confirmation email suppressed by user settings");
        return;
    }

    let mut ctx = Context::new();
    ctx.insert("attendee_name", attendee_name);
    ctx.insert("event_title", &event.title);
    ctx.insert("event_date", &event.date.format("%A, %B %e, %Y").to_string());
    ctx.insert("event_time", &event.time.format("%H:%M").to_string());
    ctx.insert("location", &event.location_name);
    ctx.insert("ticket_count", &created.len());
    ctx.insert("calendar_link", calendar_link);

    let html_body = match state.templates.render("confirmation.html", &ctx) {
        Ok(html) => html,
        Err(e) => {
            warn!("Confirmation template render failed: {}", e);
            return;
        }
    };

    let ics = calendar::generate_ics(event, &created[0]);
    let subject = format!("Tickets confirmed: {}", event.title);

    if let Err(e) = state.email_service
        .send(attendee_email, &subject, &html_body, Some("event.ics"), Some(ics.as_bytes()))
        .await
    {
        warn!("Confirmation email failed (booking kept): {}", e);
    }
}
