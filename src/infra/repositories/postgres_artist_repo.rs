use crate::domain::{models::artist::Artist, ports::ArtistRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresArtistRepo {
    pool: PgPool,
}

impl PostgresArtistRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtistRepository for PostgresArtistRepo {
    async fn create(&self, artist: &Artist) -> Result<Artist, AppError> {
        sqlx::query_as::<_, Artist>(
            "INSERT INTO artists (id, user_id, name, bio, image_url, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&artist.id).bind(&artist.user_id).bind(&artist.name)
            .bind(&artist.bio).bind(&artist.image_url).bind(artist.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Artist>, AppError> {
        sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Artist>, AppError> {
        sqlx::query_as::<_, Artist>("SELECT * FROM artists ORDER BY name ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_for_event(&self, event_id: &str) -> Result<Vec<Artist>, AppError> {
        sqlx::query_as::<_, Artist>(
            "SELECT a.* FROM artists a JOIN event_artists ea ON ea.artist_id = a.id WHERE ea.event_id = $1 ORDER BY a.name ASC"
        )
            .bind(event_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, artist: &Artist) -> Result<Artist, AppError> {
        sqlx::query_as::<_, Artist>(
            "UPDATE artists SET name = $1, bio = $2, image_url = $3 WHERE id = $4 RETURNING *"
        )
            .bind(&artist.name).bind(&artist.bio).bind(&artist.image_url).bind(&artist.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Artist not found".into())); }
        Ok(())
    }
}
