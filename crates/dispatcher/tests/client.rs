use acordi_dispatcher::{DispatcherClient, EmailRequest, Recipient, Sender};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_request() -> EmailRequest {
    EmailRequest {
        to: vec![Recipient {
            email: "dest@example.com".to_string(),
            name: Some("Destinatário".to_string()),
        }],
        subject: "Assunto".to_string(),
        html_content: "<p>Olá</p>".to_string(),
        reply_to: Sender {
            email: "maria@example.com".to_string(),
            name: "Maria".to_string(),
        },
        text_content: Some("Olá".to_string()),
        sender: Sender {
            email: "site@example.com".to_string(),
            name: "Website".to_string(),
        },
        params: None,
        tags: Some(vec!["contact-form".to_string()]),
    }
}

#[tokio::test]
async fn send_email_returns_the_dispatcher_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/emails/send"))
        .and(header("X-API-Key", "test-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messageId": "msg-123",
            "status": "queued",
            "message": "Email queued for delivery"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DispatcherClient::new(server.uri(), "test-key");
    let response = client
        .send_email(&sample_request())
        .await
        .expect("send should succeed");

    assert_eq!(response.message_id.as_deref(), Some("msg-123"));
    assert_eq!(response.status, "queued");
}

#[tokio::test]
async fn send_email_serializes_camel_case_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/emails/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "queued",
            "message": "ok"
        })))
        .mount(&server)
        .await;

    let client = DispatcherClient::new(server.uri(), "test-key");
    client
        .send_email(&sample_request())
        .await
        .expect("send should succeed");

    let requests = server
        .received_requests()
        .await
        .expect("requests should be recorded");
    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("body should be JSON");
    assert!(body.get("htmlContent").is_some());
    assert!(body.get("replyTo").is_some());
    assert!(body.get("textContent").is_some());
    assert_eq!(body["tags"], json!(["contact-form"]));
}

#[tokio::test]
async fn send_email_maps_error_responses_to_typed_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/emails/send"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "error": "Bad Request",
            "message": "m",
            "path": "/api/v1/emails/send",
            "details": ["email invalid"]
        })))
        .mount(&server)
        .await;

    let client = DispatcherClient::new(server.uri(), "test-key");
    let error = client
        .send_email(&sample_request())
        .await
        .expect_err("send should fail");

    assert_eq!(error.status, 400);
    assert_eq!(error.error, "Bad Request");
    assert_eq!(error.message, "m");
    assert_eq!(error.details, Some(vec!["email invalid".to_string()]));
}

#[tokio::test]
async fn send_email_collapses_transport_failures_to_status_zero() {
    let client = DispatcherClient::new("http://127.0.0.1:9", "test-key");
    let error = client
        .send_email(&sample_request())
        .await
        .expect_err("send should fail");

    assert_eq!(error.status, 0);
    assert_eq!(error.error, "Network Error");
}

#[tokio::test]
async fn send_email_treats_undecodable_error_bodies_as_network_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/emails/send"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = DispatcherClient::new(server.uri(), "test-key");
    let error = client
        .send_email(&sample_request())
        .await
        .expect_err("send should fail");

    assert_eq!(error.status, 0);
    assert_eq!(error.error, "Network Error");
}

#[tokio::test]
async fn health_is_true_only_for_success_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/emails/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "UP"})))
        .mount(&server)
        .await;

    let client = DispatcherClient::new(server.uri(), "unused");
    assert!(client.health().await);
}

#[tokio::test]
async fn health_is_false_for_error_responses_and_unreachable_hosts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/emails/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = DispatcherClient::new(server.uri(), "unused");
    assert!(!client.health().await);

    let unreachable = DispatcherClient::new("http://127.0.0.1:9", "unused");
    assert!(!unreachable.health().await);
}
