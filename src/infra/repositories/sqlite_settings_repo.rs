use crate::domain::{models::settings::UserSettings, ports::SettingsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqlitePool, Row};

pub struct SqliteSettingsRepo {
    pool: SqlitePool,
}

impl SqliteSettingsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepo {
    async fn get(&self, user_id: &str) -> Result<Option<UserSettings>, AppError> {
        let row = sqlx::query("SELECT data FROM user_settings WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.map(|r| serde_json::from_str(&r.get::<String, _>("data")).unwrap_or_default()))
    }
    async fn put(&self, user_id: &str, settings: &UserSettings) -> Result<(), AppError> {
        let data = serde_json::to_string(settings)
            .map_err(|e| AppError::InternalWithMsg(format!("Settings serialization failed: {}", e)))?;
        sqlx::query(
            "INSERT INTO user_settings (user_id, data, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at"
        )
            .bind(user_id).bind(data).bind(Utc::now())
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
