use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A fully validated quiz question. Stored inside the quiz's JSONB column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum QuestionKind {
    #[default]
    #[serde(rename = "technical")]
    Technical,
    #[serde(rename = "behavioral")]
    Behavioral,
    #[serde(rename = "problem-solving")]
    ProblemSolving,
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technical" => Ok(QuestionKind::Technical),
            "behavioral" => Ok(QuestionKind::Behavioral),
            "problem-solving" => Ok(QuestionKind::ProblemSolving),
            other => Err(format!("unknown question type '{}'", other)),
        }
    }
}
