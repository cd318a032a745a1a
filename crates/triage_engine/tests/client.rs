use pretty_assertions::assert_eq;
use serde_json::json;
use triage_engine::{
    AttachmentDto, CategoryTypeDto, ClassifyRequest, EmailIdDto, EmailService, FailureKind,
    ReqwestEmailService, ServiceConfig,
};
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestEmailService {
    let config = ServiceConfig::new(&server.uri()).expect("config");
    ReqwestEmailService::new(config).expect("client")
}

#[tokio::test]
async fn process_uploads_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email/process"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"invoice.eml\""))
        .and(body_string_contains("Subject: Invoice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Email processed successfully",
            "data": {
                "email_id": 5,
                "subject": "Invoice",
                "from": "billing@example.com",
                "to": "ops@example.com",
                "body": "Pay now",
                "attachments": [{"filename": "a.pdf", "extracted_text": "due"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let email = service
        .process_email("invoice.eml", b"Subject: Invoice\r\n\r\nPay now".to_vec())
        .await
        .expect("process ok");

    assert_eq!(email.email_id, Some(EmailIdDto::Number(5)));
    assert_eq!(email.subject, "Invoice");
    assert_eq!(email.body, "Pay now");
    assert_eq!(
        email.attachments,
        vec![AttachmentDto {
            filename: "a.pdf".to_string(),
            extracted_text: "due".to_string(),
        }]
    );
}

#[tokio::test]
async fn process_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email/process"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "bad"})))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .process_email("a.eml", b"x".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(422));
}

#[tokio::test]
async fn process_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email/process"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .process_email("a.eml", b"x".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidResponse);
}

#[tokio::test]
async fn process_requires_data_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .process_email("a.eml", b"x".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidResponse);
}

#[tokio::test]
async fn classify_posts_json_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email/classify"))
        .and(body_json(json!({
            "body": "Pay now",
            "category_type": "BODY",
            "email_id": "abc",
            "attachments": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Email classified successfully",
            "data": "**Category:** Billing"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ClassifyRequest {
        body: Some("Pay now".to_string()),
        category_type: CategoryTypeDto::Body,
        email_id: Some(EmailIdDto::Text("abc".to_string())),
        attachments: Vec::new(),
    };
    let response = service_for(&server)
        .classify_email(&request)
        .await
        .expect("classify ok");
    assert_eq!(response.data.as_deref(), Some("**Category:** Billing"));
}

#[tokio::test]
async fn classify_fails_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email/classify"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = ClassifyRequest {
        body: None,
        category_type: CategoryTypeDto::Attachment,
        email_id: None,
        attachments: vec![AttachmentDto::default()],
    };
    let err = service_for(&server)
        .classify_email(&request)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let service = ReqwestEmailService::new(ServiceConfig::new(&uri).unwrap()).unwrap();
    let err = service
        .process_email("a.eml", b"x".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}
