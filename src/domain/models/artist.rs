use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Artist {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub bio: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Artist {
    pub fn new(user_id: String, name: String, bio: String, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
            bio,
            image_url,
            created_at: Utc::now(),
        }
    }
}
