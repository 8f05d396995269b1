use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use crate::infra::repositories::{instructions_json, tiers_json, EventRow};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event, artist_ids: &[String]) -> Result<Event, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let row = sqlx::query_as::<_, EventRow>(
            "INSERT INTO events (id, title, description, date, time, location_name, location_lat, location_lng, price, price_tiers, ticket_capacity, payment_instructions, user_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.title).bind(&event.description)
            .bind(event.date).bind(event.time).bind(&event.location_name)
            .bind(event.location_lat).bind(event.location_lng).bind(event.price)
            .bind(tiers_json(event)).bind(event.ticket_capacity).bind(instructions_json(event))
            .bind(&event.user_id).bind(event.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        for artist_id in artist_ids {
            sqlx::query("INSERT INTO event_artists (event_id, artist_id) VALUES ($1, $2)")
                .bind(&event.id).bind(artist_id)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(row.into())
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        let row = sqlx::query_as::<_, EventRow>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.map(Into::into))
    }
    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query_as::<_, EventRow>("SELECT * FROM events ORDER BY date ASC, time ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
    async fn update(&self, event: &Event, artist_ids: Option<&[String]>) -> Result<Event, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let row = sqlx::query_as::<_, EventRow>(
            "UPDATE events SET title=$1, description=$2, date=$3, time=$4, location_name=$5, location_lat=$6, location_lng=$7, price=$8, price_tiers=$9, ticket_capacity=$10, payment_instructions=$11
             WHERE id=$12
             RETURNING *"
        )
            .bind(&event.title).bind(&event.description).bind(event.date).bind(event.time)
            .bind(&event.location_name).bind(event.location_lat).bind(event.location_lng)
            .bind(event.price).bind(tiers_json(event)).bind(event.ticket_capacity)
            .bind(instructions_json(event)).bind(&event.id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        if let Some(ids) = artist_ids {
            sqlx::query("DELETE FROM event_artists WHERE event_id = $1").bind(&event.id).execute(&mut *tx).await.map_err(AppError::Database)?;
            for artist_id in ids {
                sqlx::query("INSERT INTO event_artists (event_id, artist_id) VALUES ($1, $2)")
                    .bind(&event.id).bind(artist_id)
                    .execute(&mut *tx).await.map_err(AppError::Database)?;
            }
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(row.into())
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Event not found".into())); }
        Ok(())
    }
}
