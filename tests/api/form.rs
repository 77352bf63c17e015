//! Drives the subscription form against the running endpoint.

use anyhow::Result;
use newsletter_signup::form::{FormState, Outcome, SubscriptionForm};
use serde_json::json;
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{members_path, TestApp};

#[tokio::test]
async fn form_subscribes_through_the_endpoint() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(members_path()))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "pending" })))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let form = SubscriptionForm::with_base_url(app.base_url())?;

    assert_eq!(form.submit("ursula@example.com").await, Some(Outcome::Success));
    assert_eq!(
        form.state(),
        FormState {
            busy: false,
            outcome: Some(Outcome::Success)
        }
    );

    Ok(())
}

#[tokio::test]
async fn form_reports_existing_member() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "title": "Member Exists",
            "status": 400,
            "detail": "ursula@example.com is already a list member."
        })))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let form = SubscriptionForm::with_base_url(app.base_url())?;

    assert_eq!(
        form.submit("ursula@example.com").await,
        Some(Outcome::EmailExists)
    );
    assert!(!form.is_busy());

    Ok(())
}

#[tokio::test]
async fn form_reports_server_error_for_other_provider_failures() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "API Key Invalid",
            "status": 401
        })))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let form = SubscriptionForm::with_base_url(app.base_url())?;

    assert_eq!(
        form.submit("ursula@example.com").await,
        Some(Outcome::ServerError)
    );
    assert!(!form.is_busy());

    Ok(())
}

#[tokio::test]
async fn form_invalid_email_never_reaches_the_provider() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.provider_server)
        .await;

    let form = SubscriptionForm::with_base_url(app.base_url())?;

    assert_eq!(form.submit("ursula.example.com").await, Some(Outcome::InvalidInput));
    assert_eq!(form.submit("").await, None);
    assert_eq!(
        form.state(),
        FormState {
            busy: false,
            outcome: Some(Outcome::InvalidInput)
        }
    );

    Ok(())
}
