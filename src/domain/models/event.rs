use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// A named ticket tier. The price field is free text from the organizer
/// form; an unparseable value is treated as 0 (a free tier).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PriceTier {
    pub id: String,
    pub name: String,
    pub price: String,
    pub end_date: Option<DateTime<Utc>>,
}

impl PriceTier {
    pub fn parsed_price(&self) -> f64 {
        self.price.trim().parse().unwrap_or(0.0)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_some_and(|end| end < now)
    }
}

/// External payment handles shown to attendees of paid events.
/// Validated when an event is written, not when it is read.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PaymentInstructions {
    pub venmo: Option<String>,
    pub cashapp: Option<String>,
    pub zelle: Option<String>,
    pub paypal: Option<String>,
}

impl PaymentInstructions {
    pub fn validate(&self) -> Result<(), String> {
        let handles = [&self.venmo, &self.cashapp, &self.zelle, &self.paypal];
        if handles.iter().all(|h| h.is_none()) {
            return Err("Payment instructions must include at least one handle".to_string());
        }
        if handles.iter().any(|h| h.as_deref().is_some_and(|v| v.trim().is_empty())) {
            return Err("Payment handles must not be blank".to_string());
        }
        Ok(())
    }
}

/// The single event shape used everywhere past the store boundary.
/// All optional fields are genuinely nullable in the product: a null price
/// means a free event, a null capacity means unlimited tickets, and date and
/// time are the venue-local wall clock with no timezone stored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location_name: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub price: Option<f64>,
    pub price_tiers: Vec<PriceTier>,
    pub ticket_capacity: Option<i32>,
    pub payment_instructions: Option<PaymentInstructions>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.starts_at() < now.naive_utc()
    }

    pub fn tier(&self, tier_id: &str) -> Option<&PriceTier> {
        self.price_tiers.iter().find(|t| t.id == tier_id)
    }
}
