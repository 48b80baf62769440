use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicPayload {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "jobRole is required"))]
    pub job_role: String,
    #[validate(length(min = 1, message = "level is required"))]
    pub level: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(url)]
    pub image: Option<String>,
}

/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub job_role: Option<String>,
    #[validate(length(min = 1))]
    pub level: Option<String>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub time: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicQuizPayload {
    pub question_count: Option<usize>,
}
