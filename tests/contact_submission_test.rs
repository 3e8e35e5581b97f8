use anyhow::Result;
use httpmock::prelude::*;
use portfolio_client::app::commands;
use portfolio_client::{
    ConfigProvider, ContactForm, ContactPayload, HttpPortfolioApi, SubmissionController,
    SubmissionOutcome, SubmissionState,
};
use std::sync::Arc;
use std::time::Duration;

struct TestConfig {
    backend_url: String,
}

impl ConfigProvider for TestConfig {
    fn backend_url(&self) -> &str {
        &self.backend_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }
}

fn api_for(server: &MockServer) -> Result<Arc<HttpPortfolioApi>> {
    let config = TestConfig {
        backend_url: server.base_url(),
    };
    Ok(Arc::new(HttpPortfolioApi::new(&config)?))
}

fn payload() -> ContactPayload {
    ContactPayload {
        name: "A".to_string(),
        email: "a@b.com".to_string(),
        subject: "S".to_string(),
        message: "M".to_string(),
    }
}

#[tokio::test]
async fn test_submission_posts_payload_verbatim_and_succeeds_on_201() -> Result<()> {
    let server = MockServer::start();
    let contact_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/contact")
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "name": "A",
                "email": "a@b.com",
                "subject": "S",
                "message": "M"
            }));
        then.status(201).json_body(serde_json::json!({
            "success": true,
            "data": {"message": "Contact form submitted successfully!", "id": "65f0c1"}
        }));
    });

    let controller = SubmissionController::new(api_for(&server)?);
    let outcome = controller.submit(&payload()).await;

    contact_mock.assert();
    match outcome {
        SubmissionOutcome::Success(confirmation) => {
            assert_eq!(confirmation.message, "Contact form submitted successfully!");
            assert_eq!(confirmation.id, "65f0c1");
        }
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(controller.state(), SubmissionState::Succeeded);

    Ok(())
}

#[tokio::test]
async fn test_backend_failure_surfaces_message_and_keeps_form() -> Result<()> {
    let server = MockServer::start();
    let contact_mock = server.mock(|when, then| {
        when.method(POST).path("/api/contact");
        then.status(500)
            .json_body(serde_json::json!({"detail": "Failed to submit contact form"}));
    });

    let controller = SubmissionController::new(api_for(&server)?);
    let mut form = ContactForm::from(payload());
    let outcome = controller.submit_form(&mut form).await;

    contact_mock.assert();
    assert_eq!(outcome.error(), Some("Request failed with status code 500"));
    assert_eq!(
        controller.state(),
        SubmissionState::Failed("Request failed with status code 500".to_string())
    );
    assert_eq!(form.to_payload(), payload());

    controller.reset_status();
    assert_eq!(controller.state(), SubmissionState::Idle);

    Ok(())
}

#[tokio::test]
async fn test_successful_form_submission_clears_fields() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/contact");
        then.status(200).json_body(serde_json::json!({"success": true}));
    });

    let controller = SubmissionController::new(api_for(&server)?);
    let mut form = ContactForm::from(payload());
    let outcome = controller.submit_form(&mut form).await;

    assert!(outcome.is_success());
    assert!(form.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() -> Result<()> {
    let config = TestConfig {
        backend_url: "http://127.0.0.1:9".to_string(),
    };
    let api = Arc::new(HttpPortfolioApi::new(&config)?);
    let controller = SubmissionController::new(api);

    let outcome = controller.submit(&payload()).await;

    let error = outcome.error().unwrap();
    assert!(error.starts_with("Network Error"), "unexpected error: {}", error);
    assert!(matches!(controller.state(), SubmissionState::Failed(_)));

    Ok(())
}

#[tokio::test]
async fn test_contact_command_prints_confirmation() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/contact");
        then.status(201).json_body(serde_json::json!({
            "success": true,
            "data": {"message": "Contact form submitted successfully!", "id": "1"}
        }));
    });

    let mut out = Vec::new();
    let outcome = commands::send_contact(api_for(&server)?, payload(), &mut out).await?;

    assert!(outcome.is_success());
    assert_eq!(
        String::from_utf8(out)?,
        "✅ Contact form submitted successfully!\n"
    );

    Ok(())
}

#[tokio::test]
async fn test_contacts_command_lists_submissions() -> Result<()> {
    let server = MockServer::start();
    let contacts_mock = server.mock(|when, then| {
        when.method(GET).path("/api/contacts");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "data": [
                {"_id": "x", "id": "c2", "name": "B", "email": "b@c.com", "subject": "Hello",
                 "message": "Hi", "is_read": true, "created_at": "2024-05-02T09:30:00.000123"},
                {"id": "c1", "name": "A", "email": "a@b.com", "subject": "S", "message": "M", "is_read": false}
            ]
        }));
    });

    let mut out = Vec::new();
    let count = commands::list_contacts(api_for(&server)?, &mut out).await?;
    let text = String::from_utf8(out)?;

    contacts_mock.assert();
    assert_eq!(count, 2);
    assert!(text.contains("[read] 2024-05-02 09:30 B <b@c.com>: Hello"));
    assert!(text.contains("[new] - A <a@b.com>: S"));

    Ok(())
}
