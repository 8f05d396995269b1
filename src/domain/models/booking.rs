use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Free,
    Direct,
}

/// One row per ticket. A checkout of N tickets produces N rows that are
/// identical apart from their ids.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub attendee_name: String,
    pub attendee_email: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub proof_of_payment_url: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub event_id: String,
    pub user_id: String,
    pub attendee_name: String,
    pub attendee_email: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub proof_of_payment_url: Option<String>,
    pub status: BookingStatus,
}

impl Booking {
    /// Builds the rows for one checkout. All rows share a single creation
    /// instant so they sort together.
    pub fn batch(params: NewBookingParams, count: u32) -> Vec<Booking> {
        let created_at = Utc::now();
        (0..count)
            .map(|_| Booking {
                id: Uuid::new_v4().to_string(),
                event_id: params.event_id.clone(),
                user_id: params.user_id.clone(),
                attendee_name: params.attendee_name.clone(),
                attendee_email: params.attendee_email.clone(),
                amount: params.amount,
                payment_method: params.payment_method,
                proof_of_payment_url: params.proof_of_payment_url.clone(),
                status: params.status,
                created_at,
            })
            .collect()
    }
}
