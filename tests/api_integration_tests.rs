use std::sync::Arc;

use contact_form::api::{ApiError, ContactClient, MessageBackend, MessageId, NewMessage};
use contact_form::core::action::{Action, update};
use contact_form::core::form::{Field, FormStatus};
use contact_form::core::format::format_created_at;
use contact_form::core::state::{App, FetchStatus, LOAD_FAILED_MESSAGE};
use contact_form::tui::tasks::run_effect;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn message_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@x.com", name.to_lowercase()),
        "message": format!("hello from {name}"),
        "created_at": "2024-01-01T00:00:00Z"
    })
}

/// Runs `action` and every follow-up effect against the real client until
/// the app settles.
async fn drive(app: &mut App, backend: &dyn MessageBackend, action: Action) {
    let mut next = Some(action);
    while let Some(action) = next.take() {
        let effect = update(app, action);
        next = run_effect(backend, effect).await;
    }
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = ContactClient::new(mock_server.uri());
    let messages = client.list().await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_list_preserves_server_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([message_json(2, "Bo"), message_json(1, "Ann")])),
        )
        .mount(&mock_server)
        .await;

    let client = ContactClient::new(mock_server.uri());
    let messages = client.list().await.unwrap();
    let names: Vec<&str> = messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Bo", "Ann"]);
    assert_eq!(messages[0].id, MessageId::Number(2));
}

#[tokio::test]
async fn test_list_server_error_reports_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = ContactClient::new(mock_server.uri());
    match client.list().await {
        Err(ApiError::Fetch(msg)) => assert_eq!(msg, "HTTP error! status: 500"),
        other => panic!("Expected Fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = ContactClient::new(mock_server.uri());
    assert!(matches!(client.list().await, Err(ApiError::Parse(_))));
}

// ============================================================================
// Submit
// ============================================================================

#[tokio::test]
async fn test_submit_sends_json_body_and_returns_created() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "message": "hi"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "name": "Ann",
            "email": "ann@x.com",
            "message": "hi",
            "created_at": "2024-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ContactClient::new(mock_server.uri());
    let created = client
        .submit(&NewMessage::new("Ann", "ann@x.com", "hi"))
        .await
        .unwrap();
    assert_eq!(created.id, MessageId::Number(1));
    assert_eq!(format_created_at(&created.created_at), "Jan 1, 2024, 12:00 AM");
}

#[tokio::test]
async fn test_submit_forwards_string_detail() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "email invalid"})))
        .mount(&mock_server)
        .await;

    let client = ContactClient::new(mock_server.uri());
    match client.submit(&NewMessage::new("Ann", "bad", "hi")).await {
        Err(ApiError::Submission(msg)) => assert_eq!(msg, "email invalid"),
        other => panic!("Expected Submission error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_joins_validation_details() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "email"], "msg": "value is not a valid email address"},
                {"loc": ["body", "name"], "msg": "field required"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = ContactClient::new(mock_server.uri());
    let err = client
        .submit(&NewMessage::new("Ann", "bad", "hi"))
        .await
        .unwrap_err();
    assert_eq!(
        err.detail(),
        "value is not a valid email address; field required"
    );
}

#[tokio::test]
async fn test_submit_non_json_error_falls_back_to_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = ContactClient::new(mock_server.uri());
    match client.submit(&NewMessage::new("Ann", "ann@x.com", "hi")).await {
        Err(ApiError::Submission(msg)) => assert_eq!(msg, "HTTP error! status: 500"),
        other => panic!("Expected Submission error, got {other:?}"),
    }
}

// ============================================================================
// Health and transport
// ============================================================================

#[tokio::test]
async fn test_health_probe() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&mock_server)
        .await;

    let client = ContactClient::new(format!("{}/", mock_server.uri()));
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Port 9 (discard) is closed on test machines.
    let client = ContactClient::new("http://127.0.0.1:9");
    assert!(matches!(client.list().await, Err(ApiError::Network(_))));
    assert!(matches!(
        client.submit(&NewMessage::new("a", "b", "c")).await,
        Err(ApiError::Network(_))
    ));
}

// ============================================================================
// End-to-end through the reducer
// ============================================================================

#[tokio::test]
async fn test_submit_then_list_shows_new_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(message_json(1, "Ann")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([message_json(1, "Ann")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client: Arc<dyn MessageBackend> = Arc::new(ContactClient::new(mock_server.uri()));
    let mut app = App::new(client.clone());
    update(&mut app, Action::EditField(Field::Name, "Ann".to_string()));
    update(&mut app, Action::EditField(Field::Email, "ann@x.com".to_string()));
    update(&mut app, Action::EditField(Field::Message, "hello from Ann".to_string()));

    drive(&mut app, client.as_ref(), Action::SubmitForm).await;

    assert_eq!(app.form.status, FormStatus::Succeeded);
    assert_eq!(app.fetch, FetchStatus::Ready);
    assert_eq!(app.messages.len(), 1);
    assert_eq!(app.messages[0].name, "Ann");
}

#[tokio::test]
async fn test_load_failure_hides_cause() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client: Arc<dyn MessageBackend> = Arc::new(ContactClient::new(mock_server.uri()));
    let mut app = App::new(client.clone());
    drive(&mut app, client.as_ref(), Action::Refresh).await;

    assert_eq!(app.fetch_error(), Some(LOAD_FAILED_MESSAGE));
    assert!(app.messages.is_empty());
}
