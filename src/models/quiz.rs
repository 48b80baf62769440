use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;

use super::question::Question;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub difficulty: String,
    pub question_type: String,
    #[schema(value_type = Vec<Question>)]
    pub questions: Json<Vec<Question>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }
}
