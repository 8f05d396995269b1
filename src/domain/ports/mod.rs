use crate::domain::models::{
    artist::Artist,
    auth::RefreshTokenRecord,
    booking::{Booking, BookingStatus},
    event::Event,
    settings::UserSettings,
    user::{Role, User},
};
use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update_role(&self, id: &str, role: Role) -> Result<User, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn create(&self, artist: &Artist) -> Result<Artist, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Artist>, AppError>;
    async fn list(&self) -> Result<Vec<Artist>, AppError>;
    async fn list_for_event(&self, event_id: &str) -> Result<Vec<Artist>, AppError>;
    async fn update(&self, artist: &Artist) -> Result<Artist, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event, artist_ids: &[String]) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event, artist_ids: Option<&[String]>) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts every row of one checkout in a single transaction.
    async fn create_batch(&self, bookings: &[Booking]) -> Result<Vec<Booking>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Rows for an event, newest first.
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Rows an attendee holds, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Non-cancelled rows counted against the event's capacity.
    async fn count_active(&self, event_id: &str) -> Result<i64, AppError>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserSettings>, AppError>;
    async fn put(&self, user_id: &str, settings: &UserSettings) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str, attachment_name: Option<&str>, attachment_data: Option<&[u8]>) -> Result<(), AppError>;
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores the bytes under `path` and returns a publicly retrievable URL.
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String, AppError>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoResult {
    pub lat: f64,
    pub lon: f64,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Forward-geocodes a free-text place name. Callers take the first hit.
    async fn search(&self, query: &str) -> Result<Vec<GeoResult>, AppError>;
}
