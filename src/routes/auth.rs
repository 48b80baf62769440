use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    config::get_config,
    dto::{
        auth_dto::{AuthResponse, LoginPayload, RegisterPayload},
        ApiResponse,
    },
    error::{Error, Result},
    models::user::{User, ROLE_ADMIN, ROLE_USER},
    utils::{extract::ApiJson, token::issue_token},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let role = if get_config().is_admin_email(&payload.email) {
        ROLE_ADMIN
    } else {
        ROLE_USER
    };
    let user = state.user_service.register(payload, role).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("User registered successfully", user)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Session token issued", body = AuthResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .authenticate(&payload.email, &payload.password)
        .await?;

    let config = get_config();
    let token = issue_token(user.id, &user.role, &config.jwt_secret, config.jwt_ttl_hours)
        .map_err(|e| Error::Internal(format!("failed to sign token: {}", e)))?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(ApiResponse::with_message(
        "Login successful",
        AuthResponse { token, user },
    )))
}

#[utoipa::path(
    get,
    path = "/api/all-users",
    responses(
        (status = 200, description = "All registered users", body = [User]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_service.list().await?;
    Ok(Json(ApiResponse::data(users)))
}
