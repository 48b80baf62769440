//! Router assembly: public auth routes, bearer-protected API, admin-only
//! writes, OpenAPI document, CORS and HTTP tracing.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::middleware::{
    auth::{require_admin, require_bearer_auth},
    cors::api_cors,
};
use crate::AppState;

pub mod auth;
pub mod health;
pub mod quiz;
pub mod topic;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::register,
        auth::login,
        auth::list_users,
        topic::create_topic,
        topic::list_topics,
        topic::get_topic,
        topic::update_topic,
        topic::delete_topic,
        topic::generate_topic_quiz,
        quiz::generate_quiz,
        quiz::generate_interview_quiz,
        quiz::list_quizzes,
        quiz::get_quiz,
        quiz::delete_quiz,
    ),
    components(schemas(
        crate::models::user::User,
        crate::models::topic::Topic,
        crate::models::quiz::Quiz,
        crate::models::question::Question,
        crate::models::question::QuestionKind,
        crate::dto::auth_dto::RegisterPayload,
        crate::dto::auth_dto::LoginPayload,
        crate::dto::auth_dto::AuthResponse,
        crate::dto::topic_dto::CreateTopicPayload,
        crate::dto::topic_dto::UpdateTopicPayload,
        crate::dto::topic_dto::TopicQuizPayload,
        crate::dto::quiz_dto::GenerateQuizPayload,
        crate::dto::quiz_dto::InterviewQuizPayload,
    )),
    modifiers(&BearerAuth),
    tags((name = "interview-prep", description = "AI-generated quizzes and interview practice"))
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api/docs/openapi.json", get(openapi_json))
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login));

    let admin = Router::new()
        .route("/api/all-users", get(auth::list_users))
        .route("/api/topic", post(topic::create_topic))
        .route(
            "/api/topic/:id",
            axum::routing::patch(topic::update_topic).delete(topic::delete_topic),
        )
        .route_layer(from_fn(require_admin));

    let authenticated = Router::new()
        .route("/api/topic/all", get(topic::list_topics))
        .route("/api/topic/:id", get(topic::get_topic))
        .route("/api/topic/:id/quiz", post(topic::generate_topic_quiz))
        .route("/api/quiz", get(quiz::list_quizzes))
        .route("/api/quiz/generate", post(quiz::generate_quiz))
        .route("/api/quiz/interview", post(quiz::generate_interview_quiz))
        .route("/api/quiz/:id", get(quiz::get_quiz).delete(quiz::delete_quiz))
        .route_layer(from_fn(require_bearer_auth));

    public
        .merge(admin)
        .merge(authenticated)
        .with_state(state)
        .layer(api_cors())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
