use serde::Deserialize;
use utoipa::ToSchema;

/// Subject-style quiz. Enum-like fields are checked by the generation layer,
/// which reports them as `invalid_request`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizPayload {
    pub subject: String,
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    pub number_of_questions: Option<usize>,
    pub question_type: Option<String>,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuizPayload {
    pub job_role: String,
    pub level: String,
    pub category: String,
    pub question_count: Option<usize>,
}
