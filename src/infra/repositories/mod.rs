use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use crate::domain::models::event::Event;

pub mod sqlite_artist_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_event_repo;
pub mod sqlite_settings_repo;
pub mod sqlite_user_repo;

pub mod postgres_artist_repo;
pub mod postgres_auth_repo;
pub mod postgres_booking_repo;
pub mod postgres_event_repo;
pub mod postgres_settings_repo;
pub mod postgres_user_repo;

/// Raw event row. The JSON columns are decoded exactly once, here, so every
/// consumer past the store boundary sees the typed [`Event`].
#[derive(Debug, FromRow)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location_name: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub price: Option<f64>,
    pub price_tiers: Option<String>,
    pub ticket_capacity: Option<i32>,
    pub payment_instructions: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        let price_tiers = row
            .price_tiers
            .as_deref()
            .map(|json| serde_json::from_str(json).unwrap_or_default())
            .unwrap_or_default();

        let payment_instructions = row
            .payment_instructions
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok());

        Event {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            time: row.time,
            location_name: row.location_name,
            location_lat: row.location_lat,
            location_lng: row.location_lng,
            price: row.price,
            price_tiers,
            ticket_capacity: row.ticket_capacity,
            payment_instructions,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

pub(crate) fn tiers_json(event: &Event) -> Option<String> {
    if event.price_tiers.is_empty() {
        None
    } else {
        serde_json::to_string(&event.price_tiers).ok()
    }
}

pub(crate) fn instructions_json(event: &Event) -> Option<String> {
    event
        .payment_instructions
        .as_ref()
        .and_then(|p| serde_json::to_string(p).ok())
}
