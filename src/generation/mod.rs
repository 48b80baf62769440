//! Quiz generation pipeline.
//!
//! `GenerationRequest` -> [`prompt::build`] -> [`CompletionModel::complete`]
//! -> [`normalizer::normalize`] -> [`sanitizer::sanitize`] -> `Vec<Question>`.
//!
//! Only the model call performs I/O. Everything after it is synchronous and
//! total over its input, so a generator can be shared freely between requests.

pub mod normalizer;
pub mod prompt;
pub mod request;
pub mod sanitizer;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::models::question::Question;

pub use request::{Category, Focus, GenerationRequest, JobRole, Level};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Model call timed out after {0:?}")]
    ModelTimeout(Duration),

    #[error("No valid questions were generated")]
    NoValidQuestions,
}

/// How `correctAnswer` is expressed for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerFormat {
    /// A single letter `A`-`D` pointing into `options`.
    #[default]
    Letter,
    /// The verbatim text of the correct option.
    OptionText,
}

impl FromStr for AnswerFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(AnswerFormat::Letter),
            "option_text" | "option-text" | "text" => Ok(AnswerFormat::OptionText),
            other => Err(format!(
                "unknown answer format '{}', expected 'letter' or 'option_text'",
                other
            )),
        }
    }
}

impl fmt::Display for AnswerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerFormat::Letter => f.write_str("letter"),
            AnswerFormat::OptionText => f.write_str("option_text"),
        }
    }
}

/// A question-like record recovered from model output, before any defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateQuestion {
    pub question_text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub question_type: Option<String>,
}

/// The outbound generative-AI capability: prompt in, raw text out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Clone)]
pub struct QuizGenerator {
    model: Arc<dyn CompletionModel>,
    timeout: Duration,
    max_questions: usize,
    answer_format: AnswerFormat,
}

impl QuizGenerator {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        timeout: Duration,
        max_questions: usize,
        answer_format: AnswerFormat,
    ) -> Self {
        Self {
            model,
            timeout,
            max_questions,
            answer_format,
        }
    }

    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(level = %request.level, count = request.question_count)
    )]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<Vec<Question>, GenerationError> {
        request.check_question_count(self.max_questions)?;

        let prompt = prompt::build(request, self.answer_format);
        let started = Instant::now();
        let raw = match tokio::time::timeout(self.timeout, self.model.complete(&prompt)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                tracing::error!(elapsed = ?started.elapsed(), error = %e, "model call failed");
                return Err(GenerationError::ModelInvocation(format!("{:#}", e)));
            }
            Err(_) => {
                tracing::error!(timeout = ?self.timeout, "model call timed out");
                return Err(GenerationError::ModelTimeout(self.timeout));
            }
        };
        tracing::info!(
            elapsed = ?started.elapsed(),
            response_len = raw.len(),
            "model response received"
        );

        let candidates = normalizer::normalize(&raw, self.answer_format);
        let questions = sanitizer::sanitize(candidates, self.answer_format);
        if questions.is_empty() {
            tracing::warn!(response_len = raw.len(), "model output contained no usable questions");
            return Err(GenerationError::NoValidQuestions);
        }

        if questions.len() != request.question_count {
            tracing::debug!(
                requested = request.question_count,
                produced = questions.len(),
                "question count differs from request"
            );
        }
        Ok(questions)
    }
}
