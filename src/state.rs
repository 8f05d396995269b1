use std::sync::Arc;
use crate::domain::ports::{
    ArtistRepository, AuthRepository, BookingRepository, EmailService, EventRepository,
    Geocoder, ObjectStorage, SettingsRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub artist_repo: Arc<dyn ArtistRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub object_storage: Arc<dyn ObjectStorage>,
    pub geocoder: Arc<dyn Geocoder>,
    pub templates: Arc<Tera>,
}
