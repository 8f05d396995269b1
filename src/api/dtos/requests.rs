use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use crate::domain::models::booking::BookingStatus;
use crate::domain::models::event::{PaymentInstructions, PriceTier};
use crate::domain::models::user::Role;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateArtistRequest {
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateArtistRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location_name: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub price: Option<f64>,
    pub price_tiers: Option<Vec<PriceTier>>,
    pub ticket_capacity: Option<i32>,
    pub payment_instructions: Option<PaymentInstructions>,
    pub artist_ids: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub location_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub price: Option<f64>,
    pub price_tiers: Option<Vec<PriceTier>>,
    pub ticket_capacity: Option<i32>,
    pub payment_instructions: Option<PaymentInstructions>,
    pub artist_ids: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct QuoteQuery {
    pub tier_id: Option<String>,
    pub count: Option<u32>,
}

/// Proof-of-payment file, shipped inline as base64.
#[derive(Deserialize)]
pub struct ProofPayload {
    pub filename: String,
    pub content_base64: String,
    pub content_type: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub tier_id: Option<String>,
    pub ticket_count: Option<u32>,
    /// Overrides for the attendee snapshot; the stored profile is the fallback.
    pub attendee_name: Option<String>,
    pub attendee_email: Option<String>,
    pub proof_of_payment: Option<ProofPayload>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}
