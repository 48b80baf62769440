use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::topic_dto::{CreateTopicPayload, UpdateTopicPayload};
use crate::error::{Error, Result};
use crate::models::topic::Topic;

#[derive(Clone)]
pub struct TopicService {
    pool: PgPool,
}

impl TopicService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateTopicPayload) -> Result<Topic> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            INSERT INTO topics (title, job_role, level, category, time, description, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.title.trim())
        .bind(payload.job_role.trim())
        .bind(payload.level.trim())
        .bind(payload.category.trim())
        .bind(payload.time.trim())
        .bind(payload.description.trim())
        .bind(&payload.image)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(topic_id = %topic.id, "topic created");
        Ok(topic)
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<Topic>> {
        let topics = sqlx::query_as::<_, Topic>("SELECT * FROM topics ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(topics)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Topic> {
        sqlx::query_as::<_, Topic>("SELECT * FROM topics WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Topic not found".into()))
    }

    pub async fn update(&self, id: Uuid, payload: UpdateTopicPayload) -> Result<Topic> {
        sqlx::query_as::<_, Topic>(
            r#"
            UPDATE topics
            SET
                title = COALESCE($2, title),
                job_role = COALESCE($3, job_role),
                level = COALESCE($4, level),
                category = COALESCE($5, category),
                time = COALESCE($6, time),
                description = COALESCE($7, description),
                image = COALESCE($8, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.job_role)
        .bind(&payload.level)
        .bind(&payload.category)
        .bind(&payload.time)
        .bind(&payload.description)
        .bind(&payload.image)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Topic not found".into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Topic not found".into()));
        }
        tracing::info!(topic_id = %id, "topic deleted");
        Ok(())
    }
}
