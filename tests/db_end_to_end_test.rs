mod common;

use axum::{http::StatusCode, Router};
use interview_prep_backend::{
    database::pool::{create_pool, run_migrations},
    routes::build_router,
    AppState,
};
use serde_json::json;
use uuid::Uuid;

use common::{empty_request, init_test_config, json_request, send, StubModel, TWO_QUESTIONS};

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        json_request("POST", "/api/login", None, &json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    format!("Bearer {}", body["data"]["token"].as_str().unwrap())
}

#[tokio::test]
#[ignore = "needs a PostgreSQL instance in DATABASE_URL"]
async fn full_quiz_lifecycle() {
    init_test_config();
    let pool = create_pool().await.expect("pool");
    run_migrations(&pool).await.expect("migrations");

    let model = StubModel::new(TWO_QUESTIONS);
    let app = build_router(AppState::with_model(pool, model.clone()));

    let user_email = format!("user_{}@example.com", Uuid::new_v4().simple());
    let register = json!({
        "username": "student", "email": user_email, "password": "secret123",
        "university": "Test University", "year": "3"
    });
    let (status, body) = send(&app, json_request("POST", "/api/register", None, &register)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"].get("passwordHash").is_none());

    let (status, _) = send(&app, json_request("POST", "/api/register", None, &register)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/login", None, &json!({ "email": user_email, "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = login(&app, &user_email, "secret123").await;

    let admin_register = json!({ "username": "admin", "email": "admin@example.com", "password": "admin-pass" });
    let (status, _) = send(&app, json_request("POST", "/api/register", None, &admin_register)).await;
    assert!(status == StatusCode::CREATED || status == StatusCode::CONFLICT);
    let admin = login(&app, "admin@example.com", "admin-pass").await;

    let topic = json!({
        "title": "Reliability", "jobRole": "DevOps Engineer", "level": "intermediate",
        "category": "System Design", "time": "45 min", "description": "Incidents and SLOs"
    });
    let (status, body) = send(&app, json_request("POST", "/api/topic", Some(admin.as_str()), &topic)).await;
    assert_eq!(status, StatusCode::CREATED);
    let topic_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/topic/{}", topic_id),
            Some(admin.as_str()),
            &json!({ "time": "60 min" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["time"], "60 min");
    assert_eq!(body["data"]["title"], "Reliability");

    let (status, body) = send(&app, empty_request("GET", "/api/topic/all", Some(user.as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], topic_id.as_str());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/topic/{}/quiz", topic_id),
            Some(user.as_str()),
            &json!({ "questionCount": 2 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "DevOps Engineer System Design Quiz");
    assert_eq!(body["data"]["difficulty"], "medium");
    let questions = body["data"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[1]["explanation"], "No explanation provided");

    let generate = json!({ "subject": "Computer Science", "topic": "HTTP", "difficulty": "easy", "numberOfQuestions": 2 });
    let (status, body) = send(&app, json_request("POST", "/api/quiz/generate", Some(user.as_str()), &generate)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "HTTP Quiz");
    assert_eq!(
        body["data"]["description"],
        "Auto-generated easy quiz about HTTP in Computer Science"
    );
    let quiz_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(model.calls(), 2);

    let (status, body) = send(&app, empty_request("GET", "/api/quiz", Some(user.as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let quiz_uri = format!("/api/quiz/{}", quiz_id);
    let (status, _) = send(&app, empty_request("GET", &quiz_uri, Some(admin.as_str()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, empty_request("DELETE", &quiz_uri, Some(admin.as_str()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, empty_request("GET", &quiz_uri, Some(user.as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["questions"][0]["correctAnswer"], "B");

    let (status, _) = send(&app, empty_request("DELETE", &quiz_uri, Some(user.as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, empty_request("GET", &quiz_uri, Some(user.as_str()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, empty_request("GET", "/api/all-users", Some(admin.as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u.get("passwordHash").is_none()));

    let topic_uri = format!("/api/topic/{}", topic_id);
    let (status, _) = send(&app, empty_request("DELETE", &topic_uri, Some(admin.as_str()))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, empty_request("DELETE", &topic_uri, Some(admin.as_str()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
