use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, body_partial_json, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{members_path, TestApp};

fn member_exists_error() -> Value {
    json!({
        "type": "https://mailchimp.com/developer/marketing/docs/errors/",
        "title": "Member Exists",
        "status": 400,
        "detail": "john.doe@example.com is already a list member. Use PUT to insert or update list members.",
        "instance": "2e5cb1a4-6b3a-4b3e-a8a8-7d1b9c4f2dd8"
    })
}

#[tokio::test]
async fn api_subscribe_ok() -> Result<()> {
    let app = TestApp::spawn().await?;
    let member = json!({
        "id": "8f3a1c",
        "email_address": "john.doe@example.com",
        "status": "pending"
    });

    Mock::given(path(members_path()))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(member.clone()))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let res = app
        .put_subscribe(&json!({ "email": "john.doe@example.com" }))
        .await?;

    assert_eq!(
        res.status(),
        StatusCode::OK,
        "Wrong response StatusCode: {}",
        res.status()
    );
    assert!(res.headers().contains_key("x-request-id"));

    let body: Value = res.json().await?;
    assert_eq!(body, member);

    Ok(())
}

#[tokio::test]
async fn api_subscribe_requests_a_pending_member() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(members_path()))
        .and(method("POST"))
        .and(body_partial_json(json!({
            "email_address": "le_guin@gmail.com",
            "status": "pending"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "pending" })))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let res = app
        .put_subscribe(&json!({ "email": "le_guin@gmail.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn api_subscribe_returns_a_400_when_email_is_invalid() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.provider_server)
        .await;

    let cases = [
        (json!({ "email": "not-an-email" }), "Plain word"),
        (json!({ "email": "" }), "Empty email"),
        (json!({ "email": "not an email" }), "Words with spaces"),
        (json!({ "email": "@domain.com" }), "Missing subject"),
    ];

    for (body, description) in cases {
        let res = app.put_subscribe(&body).await?;
        assert_eq!(
            400,
            res.status().as_u16(),
            "The API did not return a 400 BAD REQUEST the payload was {}.",
            description
        );

        let body: Value = res.json().await?;
        assert_eq!(body["kind"], "invalid_input");
        assert_eq!(body["error"]["field"], "email");
        assert_eq!(body["error"]["rule"], "email_invalid");
        assert!(body["req_id"].is_string());
    }

    Ok(())
}

#[tokio::test]
async fn api_subscribe_unprocessable_entity() -> Result<()> {
    let app = TestApp::spawn().await?;

    let tests = [
        (json!({ "name": "John Doe" }), "Missing email"),
        (json!({ "email": null }), "Null email"),
        (json!({ "email": 42 }), "Number email"),
        (json!({}), "Empty json"),
    ];

    for (json_request, params) in tests {
        let res = app.put_subscribe(&json_request).await?;
        assert_eq!(
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "Wrong response: ({}), Expected: ({}); for request with: {params}",
            res.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    Ok(())
}

#[tokio::test]
async fn api_subscribe_member_exists_returns_500_with_provider_error() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(members_path()))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(member_exists_error()))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let res = app
        .put_subscribe(&json!({ "email": "john.doe@example.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(body["error"], member_exists_error());
    assert_eq!(body["kind"], "member_exists");

    Ok(())
}

#[tokio::test]
async fn api_subscribe_other_provider_failure_returns_500() -> Result<()> {
    let app = TestApp::spawn().await?;
    let provider_error = json!({
        "title": "Invalid Resource",
        "status": 400,
        "detail": "The resource submitted could not be validated."
    });

    Mock::given(any())
        .respond_with(ResponseTemplate::new(400).set_body_json(provider_error.clone()))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let res = app
        .put_subscribe(&json!({ "email": "john.doe@example.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(body["error"], provider_error);
    assert_eq!(body["kind"], "service_error");

    Ok(())
}

#[tokio::test]
async fn api_subscribe_provider_timeout_returns_500() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(180)))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let res = app
        .put_subscribe(&json!({ "email": "john.doe@example.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(body["kind"], "service_error");
    assert_eq!(body["error"]["message"], "Service Error!");

    Ok(())
}

#[tokio::test]
async fn api_subscribe_rejects_other_methods() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .http_client
        .post(format!("{}/api/newsletter/subscribe", app.base_url()))
        .json(&json!({ "email": "john.doe@example.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}
