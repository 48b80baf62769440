use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// An admin-curated interview practice topic. `job_role`, `level` and
/// `category` are stored as entered and only checked against the closed
/// generation enums when a quiz is requested for the topic.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
    pub job_role: String,
    pub level: String,
    pub category: String,
    pub time: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
