use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::ROLE_ADMIN;
use crate::utils::token::decode_token;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| Error::Unauthorized("Invalid token subject".into()))
    }

    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case(ROLE_ADMIN))
    }
}

fn reject(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message, "error": code })),
    )
        .into_response()
}

/// Validates the bearer token; the error is already a response.
fn authenticate(req: &Request) -> std::result::Result<Claims, Response> {
    let Some(auth_header) = req.headers().get(AUTHORIZATION) else {
        return Err(reject(
            StatusCode::UNAUTHORIZED,
            "missing_authorization",
            "Authorization header is required",
        ));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(reject(
            StatusCode::UNAUTHORIZED,
            "bad_authorization",
            "Authorization header is malformed",
        ));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(reject(
            StatusCode::UNAUTHORIZED,
            "unsupported_scheme",
            "Only Bearer tokens are accepted",
        ));
    };

    let config = crate::config::get_config();
    decode_token(token.trim(), &config.jwt_secret).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        reject(StatusCode::UNAUTHORIZED, "invalid_token", "Token is invalid or expired")
    })
}

pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    match authenticate(&req) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(resp) => resp,
    }
}

pub async fn require_admin(mut req: Request, next: Next) -> Response {
    match authenticate(&req) {
        Ok(claims) if claims.is_admin() => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Ok(_) => reject(StatusCode::FORBIDDEN, "forbidden", "Admin access required"),
        Err(resp) => resp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: Option<&str>) -> Claims {
        Claims {
            sub: sub.to_string(),
            exp: 0,
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn admin_role_is_case_insensitive() {
        assert!(claims("x", Some("Admin")).is_admin());
        assert!(!claims("x", Some("user")).is_admin());
        assert!(!claims("x", None).is_admin());
    }

    #[test]
    fn subject_must_be_a_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(claims(&id.to_string(), None).user_id().unwrap(), id);
        assert!(claims("42", None).user_id().is_err());
    }
}
