use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        topic_dto::{CreateTopicPayload, TopicQuizPayload, UpdateTopicPayload},
        ApiResponse,
    },
    error::Result,
    middleware::auth::Claims,
    models::{quiz::Quiz, topic::Topic},
    utils::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/topic",
    request_body = CreateTopicPayload,
    responses(
        (status = 201, description = "Topic created", body = Topic),
        (status = 400, description = "A required field is missing"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn create_topic(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTopicPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let topic = state.topic_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Topic created successfully", topic)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/topic/all",
    responses((status = 200, description = "Topics, newest first", body = [Topic])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_topics(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let topics = state.topic_service.list().await?;
    Ok(Json(ApiResponse::with_message("Topics fetched successfully", topics)))
}

#[utoipa::path(
    get,
    path = "/api/topic/{id}",
    params(("id" = Uuid, Path, description = "Topic ID")),
    responses(
        (status = 200, description = "Topic found", body = Topic),
        (status = 404, description = "Topic not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let topic = state.topic_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::with_message("Topic fetched successfully", topic)))
}

#[utoipa::path(
    patch,
    path = "/api/topic/{id}",
    params(("id" = Uuid, Path, description = "Topic ID")),
    request_body = UpdateTopicPayload,
    responses(
        (status = 200, description = "Topic updated", body = Topic),
        (status = 404, description = "Topic not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn update_topic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateTopicPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let topic = state.topic_service.update(id, payload).await?;
    Ok(Json(ApiResponse::with_message("Topic updated successfully", topic)))
}

#[utoipa::path(
    delete,
    path = "/api/topic/{id}",
    params(("id" = Uuid, Path, description = "Topic ID")),
    responses(
        (status = 200, description = "Topic deleted"),
        (status = 404, description = "Topic not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn delete_topic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.topic_service.delete(id).await?;
    Ok(Json(ApiResponse::message("Topic deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/topic/{id}/quiz",
    params(("id" = Uuid, Path, description = "Topic ID")),
    request_body = TopicQuizPayload,
    responses(
        (status = 201, description = "Interview quiz generated for the topic", body = Quiz),
        (status = 400, description = "Topic fields are not a valid role, level or category"),
        (status = 404, description = "Topic not found"),
        (status = 422, description = "The model produced no usable questions"),
        (status = 502, description = "The model call failed"),
        (status = 504, description = "The model call timed out")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn generate_topic_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    payload: Option<ApiJson<TopicQuizPayload>>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let question_count = payload.and_then(|ApiJson(p)| p.question_count);
    let topic = state.topic_service.get_by_id(id).await?;
    let quiz = state
        .quiz_service
        .generate_topic_quiz(user_id, &topic, question_count)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(quiz))))
}
