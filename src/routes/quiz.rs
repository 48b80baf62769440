use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    dto::{
        quiz_dto::{GenerateQuizPayload, InterviewQuizPayload},
        ApiResponse,
    },
    error::Result,
    middleware::auth::Claims,
    models::quiz::Quiz,
    utils::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/quiz/generate",
    request_body = GenerateQuizPayload,
    responses(
        (status = 201, description = "Quiz generated and saved", body = Quiz),
        (status = 400, description = "Invalid subject, topic, difficulty or count"),
        (status = 422, description = "The model produced no usable questions"),
        (status = 502, description = "The model call failed"),
        (status = 504, description = "The model call timed out")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn generate_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<GenerateQuizPayload>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let quiz = state
        .quiz_service
        .generate_subject_quiz(user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(quiz))))
}

#[utoipa::path(
    post,
    path = "/api/quiz/interview",
    request_body = InterviewQuizPayload,
    responses(
        (status = 201, description = "Interview quiz generated and saved", body = Quiz),
        (status = 400, description = "Unknown job role, level or category"),
        (status = 422, description = "The model produced no usable questions"),
        (status = 502, description = "The model call failed"),
        (status = 504, description = "The model call timed out")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn generate_interview_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<InterviewQuizPayload>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let quiz = state
        .quiz_service
        .generate_interview_quiz(user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(quiz))))
}

#[utoipa::path(
    get,
    path = "/api/quiz",
    responses((status = 200, description = "The caller's quizzes", body = [Quiz])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_quizzes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let quizzes = state.quiz_service.list_for_user(claims.user_id()?).await?;
    Ok(Json(ApiResponse::data(quizzes)))
}

#[utoipa::path(
    get,
    path = "/api/quiz/{id}",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Quiz found", body = Quiz),
        (status = 403, description = "Quiz belongs to another user"),
        (status = 404, description = "Quiz not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let quiz = state
        .quiz_service
        .get_for_user(id, claims.user_id()?)
        .await?;
    Ok(Json(ApiResponse::data(quiz)))
}

#[utoipa::path(
    delete,
    path = "/api/quiz/{id}",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Quiz removed"),
        (status = 403, description = "Quiz belongs to another user"),
        (status = 404, description = "Quiz not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn delete_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .quiz_service
        .delete_for_user(id, claims.user_id()?)
        .await?;
    Ok(Json(ApiResponse::message("Quiz removed")))
}
