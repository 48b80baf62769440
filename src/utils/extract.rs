use axum::extract::FromRequest;

use crate::error::Error;

/// `axum::Json` whose rejection (bad syntax, missing fields, wrong content
/// type) is rendered through the standard error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::IntoResponse,
    };
    use serde::Deserialize;
    use serde_json::Value as JsonValue;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        subject: String,
    }

    fn request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_an_invalid_request_envelope() {
        let err = ApiJson::<Payload>::from_request(request(r#"{"topic":"HTTP"}"#), &())
            .await
            .unwrap_err();
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "invalid_request");
        assert!(body["message"].as_str().unwrap().contains("subject"));
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let ApiJson(payload) = ApiJson::<Payload>::from_request(request(r#"{"subject":"CS"}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.subject, "CS");
    }
}
