mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use common::{
    app_with, default_app, get, post_json, ScriptedPaynowGateway, ScriptedStripeGateway,
    MOCK_CHECKOUT_URL,
};

#[tokio::test]
async fn mounting_an_unknown_session_writes_one_welcome_entry() {
    let app = default_app();

    let (status, body) = get(&app, "/stripe/fresh-stripe-id-1").await;

    assert_eq!(status, StatusCode::OK);
    let log = body["log"].as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(
        log[0]["message"],
        "Welcome to stripe playground, demo@example.com"
    );
    assert_eq!(body["state"]["name"], "Stripe fresh-stripe-id-1");
}

#[tokio::test]
async fn index_always_redirects_to_a_fresh_session() {
    let app = default_app();

    let mut locations = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/stripe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_redirection());
        locations.push(
            response.headers()["location"]
                .to_str()
                .unwrap()
                .to_string(),
        );
    }

    assert!(locations[0].starts_with("/stripe/"));
    assert_ne!(locations[0], locations[1]);
}

#[tokio::test]
async fn successful_pay_logs_the_payload_and_a_checkout_link() {
    let app = default_app();

    let (status, body) = post_json(
        &app,
        "/stripe/stripe-session-1/pay",
        serde_json::json!({
            "secret_key": "sk_test_123",
            "amount": 1.0,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let log = body["log"].as_array().unwrap();
    assert!(log.iter().any(|entry| {
        entry["message"]
            .as_str()
            .unwrap_or_default()
            .starts_with("<details><summary>View response json</summary>")
    }));

    let link = log
        .iter()
        .find(|entry| {
            entry["message"]
                .as_str()
                .unwrap_or_default()
                .starts_with("Complete payment at")
        })
        .expect("missing checkout link entry");
    assert_eq!(link["severity"], "success");
    assert!(link["message"]
        .as_str()
        .unwrap()
        .contains(MOCK_CHECKOUT_URL));
}

#[tokio::test]
async fn pay_autosaves_the_session() {
    let app = default_app();

    post_json(
        &app,
        "/stripe/stripe-session-2/pay",
        serde_json::json!({ "secret_key": "sk_test_123" }),
    )
    .await;

    let (_, body) = get(&app, "/stripe/stripe-session-2").await;
    let log = body["log"].as_array().unwrap();
    assert!(log
        .iter()
        .any(|entry| entry["message"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Autosave - Saving session")));
}

#[tokio::test]
async fn returning_with_the_success_flag_logs_a_paid_entry() {
    let app = default_app();

    let (_, body) = get(&app, "/stripe/stripe-session-3?success=true").await;

    let log = body["log"].as_array().unwrap();
    let paid_entry = log
        .iter()
        .find(|entry| entry["message"] == "Last transaction was paid successfully")
        .expect("missing paid entry");
    assert_eq!(paid_entry["severity"], "success");
}

#[tokio::test]
async fn declined_checkout_logs_one_error_entry() {
    let app = app_with(
        Arc::new(ScriptedPaynowGateway::default()),
        Arc::new(ScriptedStripeGateway {
            decline_with: Some("Expired API Key provided".to_string()),
        }),
    );

    let (status, body) = post_json(
        &app,
        "/stripe/stripe-session-4/pay",
        serde_json::json!({ "secret_key": "sk_test_expired" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let log = body["log"].as_array().unwrap();
    let errors: Vec<_> = log
        .iter()
        .filter(|entry| entry["severity"] == "error")
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0]["message"],
        "Failed to make payment: Expired API Key provided"
    );
}

#[tokio::test]
async fn clear_empties_the_log_and_persists_silently() {
    let app = default_app();

    post_json(
        &app,
        "/stripe/stripe-session-5/pay",
        serde_json::json!({ "secret_key": "sk_test_123" }),
    )
    .await;

    let (_, body) = post_json(&app, "/stripe/stripe-session-5/clear", serde_json::json!({})).await;
    assert_eq!(body["log"].as_array().unwrap().len(), 0);

    let (_, body) = get(&app, "/stripe/stripe-session-5").await;
    assert_eq!(body["log"].as_array().unwrap().len(), 0);
}
