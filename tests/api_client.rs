use chrono::{TimeZone, Utc};
use mockito::Matcher;
use serde_json::{json, Value};

use mindalign::api::{ApiClient, ApiError};
use mindalign::backend::rest::RestBackend;
use mindalign::backend::{Backend, BackendError, RegisterArgs};
use mindalign::entities::{ActivityKind, EventDraft, Repeat};

#[tokio::test]
async fn test_bearer_token_attached_when_set() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tasks")
        .match_header("authorization", "Bearer secret-token")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    client.set_token(Some("secret-token".to_string()));
    let tasks: Vec<Value> = client.get("/api/tasks").await.unwrap();
    assert!(tasks.is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/notes")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let _: Value = client.get("/api/notes").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_body_message_and_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_body(r#"{"error":"Invalid credentials"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let err = client
        .post::<Value, _>("/api/auth/login", &json!({"email": "a@b.c", "password": "x"}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_error_without_body_uses_generic_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/tasks/9")
        .with_status(500)
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let err = client.delete::<Value>("/api/tasks/9").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: "HTTP error! status: 500".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/notes/3")
        .with_status(204)
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let value: Value = client.delete("/api/notes/3").await.unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_network_failure() {
    // Nothing listens on port 9 of localhost.
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let err = client.get::<Value>("/api/tasks").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_login_sends_credentials_and_parses_user() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(json!({"email": "ana@example.com", "password": "Secr3t!pw"})))
        .with_status(200)
        .with_body(r#"{"user":{"id":7,"name":"Ana","email":"ana@example.com"},"token":"jwt-1"}"#)
        .create_async()
        .await;

    let backend = RestBackend::new(server.url()).unwrap();
    let auth = backend.login("ana@example.com", "Secr3t!pw").await.unwrap();
    assert_eq!(auth.user.id, "7");
    assert_eq!(auth.user.display_name(), "Ana");
    assert_eq!(auth.token, "jwt-1");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_maps_to_backend_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/habits")
        .with_status(401)
        .with_body(r#"{"message":"Token expired"}"#)
        .create_async()
        .await;

    let backend = RestBackend::new(server.url()).unwrap();
    let err = backend.fetch_habits().await.unwrap_err();
    assert_eq!(err, BackendError::unauthorized("Token expired"));
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_forbidden_keeps_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/tasks/9")
        .with_status(403)
        .with_body(r#"{"error":"Not your task"}"#)
        .create_async()
        .await;

    let backend = RestBackend::new(server.url()).unwrap();
    let err = backend.delete_task("9").await.unwrap_err();
    assert!(matches!(err, BackendError::Unauthorized { .. }));
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Not your task");
}

#[tokio::test]
async fn test_register_posts_form() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/register")
        .match_body(Matcher::Json(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "Secr3t!pw"
        })))
        .with_status(201)
        .with_body(r#"{"message":"created"}"#)
        .create_async()
        .await;

    let backend = RestBackend::new(server.url()).unwrap();
    backend
        .register(RegisterArgs {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "Secr3t!pw".to_string(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_array_list_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/tasks")
        .with_status(200)
        .with_body(r#"{"tasks":[]}"#)
        .create_async()
        .await;

    let backend = RestBackend::new(server.url()).unwrap();
    assert!(backend.fetch_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mutation_endpoints() {
    let mut server = mockito::Server::new_async().await;
    let toggle_task = server
        .mock("PATCH", "/api/tasks/42/toggle")
        .match_body(Matcher::Json(json!({})))
        .with_status(200)
        .with_body(r#"{"id":42,"text":"x","completed":true}"#)
        .create_async()
        .await;
    let toggle_habit = server
        .mock("PUT", "/api/habits/h1/toggle")
        .match_body(Matcher::Json(json!({"day": 3})))
        .with_status(200)
        .create_async()
        .await;
    let create_note = server
        .mock("POST", "/api/notes")
        .match_body(Matcher::Json(json!({"content": "hello"})))
        .with_status(201)
        .with_body(r#"{"id":"n1","content":"hello"}"#)
        .create_async()
        .await;
    let delete_event = server
        .mock("DELETE", "/api/calendar/e9")
        .with_status(204)
        .create_async()
        .await;

    let backend = RestBackend::new(server.url()).unwrap();
    backend.toggle_task("42").await.unwrap();
    backend.toggle_habit_day("h1", 3).await.unwrap();
    backend.create_note("hello").await.unwrap();
    backend.delete_event("e9").await.unwrap();

    toggle_task.assert_async().await;
    toggle_habit.assert_async().await;
    create_note.assert_async().await;
    delete_event.assert_async().await;
}

#[tokio::test]
async fn test_event_wire_body() {
    let mut server = mockito::Server::new_async().await;
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

    let create = server
        .mock("POST", "/api/calendar")
        .match_body(Matcher::Json(json!({
            "title": "Standup",
            "start": "2024-01-01T09:00:00Z",
            "end": "2024-01-01T10:00:00Z",
            "repeat": "weekly",
            "allDay": false
        })))
        .with_status(201)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/calendar/e1")
        .match_body(Matcher::PartialJson(json!({"id": "e1", "title": "Standup", "allDay": false})))
        .with_status(200)
        .create_async()
        .await;

    let backend = RestBackend::new(server.url()).unwrap();
    let draft = EventDraft::new("Standup", start, end).with_repeat(Some(Repeat::Weekly));
    backend.create_event(&draft).await.unwrap();

    let edit = EventDraft::new("Standup", start, end).with_id("e1");
    backend.update_event("e1", &edit).await.unwrap();

    create.assert_async().await;
    update.assert_async().await;
}

#[tokio::test]
async fn test_activity_feed_decoding() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/activity")
        .with_status(200)
        .with_body(
            r#"[
                {"id":1,"type":"task","content":"Buy milk","date":"2024-03-05T14:07:00Z"},
                {"id":"2","type":"sticker","content":"?","date":"2024-03-05T15:00:00Z"}
            ]"#,
        )
        .create_async()
        .await;

    let backend = RestBackend::new(server.url()).unwrap();
    let items = backend.fetch_activity().await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind, ActivityKind::Task);
    assert_eq!(items[0].id, "1");
    assert_eq!(items[1].kind, ActivityKind::Unknown);
}
