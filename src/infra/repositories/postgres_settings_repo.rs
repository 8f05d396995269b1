use crate::domain::{models::settings::UserSettings, ports::SettingsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};

pub struct PostgresSettingsRepo {
    pool: PgPool,
}

impl PostgresSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepo {
    async fn get(&self, user_id: &str) -> Result<Option<UserSettings>, AppError> {
        let row = sqlx::query("SELECT data FROM user_settings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.map(|r| serde_json::from_str(&r.get::<String, _>("data")).unwrap_or_default()))
    }
    async fn put(&self, user_id: &str, settings: &UserSettings) -> Result<(), AppError> {
        let data = serde_json::to_string(settings)
            .map_err(|e| AppError::InternalWithMsg(format!("Settings serialization failed: {}", e)))?;
        sqlx::query(
            "INSERT INTO user_settings (user_id, data, updated_at) VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at"
        )
            .bind(user_id).bind(data).bind(Utc::now())
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
