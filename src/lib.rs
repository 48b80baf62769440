pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod generation;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;

use crate::generation::{CompletionModel, QuizGenerator};
use crate::services::{
    ai_service::AIService, quiz_service::QuizService, topic_service::TopicService,
    user_service::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub topic_service: TopicService,
    pub quiz_service: QuizService,
}

impl AppState {
    /// Production wiring: Gemini behind the generator.
    pub fn new(pool: PgPool) -> error::Result<Self> {
        let config = config::get_config();
        let http_client = Client::builder()
            .timeout(config.model_timeout + std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| error::Error::Internal(format!("failed to build HTTP client: {}", e)))?;
        let ai_service = AIService::new(config.gemini.clone(), http_client);
        Ok(Self::with_model(pool, Arc::new(ai_service)))
    }

    pub fn with_model(pool: PgPool, model: Arc<dyn CompletionModel>) -> Self {
        let config = config::get_config();
        let generator = QuizGenerator::new(
            model,
            config.model_timeout,
            config.max_ai_questions,
            config.answer_format,
        );

        Self {
            user_service: UserService::new(pool.clone()),
            topic_service: TopicService::new(pool.clone()),
            quiz_service: QuizService::new(pool.clone(), generator),
            pool,
        }
    }
}
