use serde::Serialize;
use crate::domain::models::artist::Artist;
use crate::domain::models::booking::BookingStatus;
use crate::domain::models::event::Event;
use crate::domain::services::pricing::Quote;

#[derive(Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: Quote,
    pub max_selectable: u32,
}

#[derive(Serialize)]
pub struct BookingConfirmation {
    pub booking_ids: Vec<String>,
    pub ticket_count: u32,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub calendar_link: String,
}

#[derive(Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub artists: Vec<Artist>,
}
