use std::net::TcpListener;

use httptest::matchers::*;
use httptest::responders::*;
use httptest::{all_of, Expectation, Server};
use serde_json::{json, Value};
use slack_relay::configuration::Settings;
use slack_relay::relay::NotificationRelay;
use slack_relay::startup::run;

async fn spawn_app(webhook_url: Option<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let settings = Settings {
        slack_webhook_url: webhook_url,
        ..Settings::default()
    };
    let relay = NotificationRelay::from_settings(&settings).expect("Failed to build relay");
    let server = run(listener, relay).expect("Failed to start server");
    let _ = tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

async fn post_json(url: String, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    let status = resp.status().as_u16();
    (status, resp.json().await.expect("Response was not JSON"))
}

#[tokio::test]
async fn health_check_works_without_webhook() {
    let address = spawn_app(None).await;

    let resp = reqwest::get(format!("{}/health", address)).await.unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "OK", "message": "Proxy server is running" }));
}

#[tokio::test]
async fn notify_posts_text_to_webhook() {
    let slack = Server::run();
    slack.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/services/hook"),
            request::headers(contains(("content-type", "application/json"))),
            request::body(json_decoded(eq(json!({ "text": "hello" })))),
        ])
        .times(1)
        .respond_with(status_code(200)),
    );
    let address = spawn_app(Some(slack.url("/services/hook").to_string())).await;

    let (status, body) = post_json(
        format!("{}/api/slack/notify", address),
        json!({ "message": "hello" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true, "message": "Notification sent to Slack successfully" }));
}

#[tokio::test]
async fn order_is_forwarded_once() {
    let slack = Server::run();
    slack.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/services/hook"),
            request::body(json_decoded(|v: &Value| {
                let text = v["text"].as_str().unwrap_or_default();
                text.starts_with("NEW ORDER RECEIVED - Acme\n")
                    && text.contains("Email: a@b.com")
                    && text.contains("Address: 1 Main St")
                    && text.contains("Standard Roof Report - $12.00")
                    && text.contains("Status: Order Submitted - Awaiting Payment")
            })),
        ])
        .times(1)
        .respond_with(status_code(200)),
    );
    let address = spawn_app(Some(slack.url("/services/hook").to_string())).await;

    let (status, body) = post_json(
        format!("{}/api/slack/order", address),
        json!({ "businessName": "Acme", "email": "a@b.com", "address": "1 Main St" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["message"], "Order notification sent to Slack successfully");
}

#[tokio::test]
async fn missing_fields_never_reach_webhook() {
    // No expectations: any request to this server fails the test on drop.
    let mut slack = Server::run();
    let address = spawn_app(Some(slack.url("/services/hook").to_string())).await;

    let cases = [
        ("notify", json!({})),
        ("order", json!({ "businessName": "Acme", "email": "a@b.com" })),
        ("payment", json!({ "businessName": "Acme", "email": "a@b.com", "address": "1 Main St", "paymentId": "P" })),
    ];

    for (route, payload) in cases {
        let (status, body) = post_json(format!("{}/api/slack/{}", address, route), payload).await;
        assert_eq!(status, 400, "route {route}");
        assert_eq!(body["success"], false, "route {route}");
        assert!(body["error"].as_str().unwrap().contains("required"), "route {route}");
    }

    slack.verify_and_clear();
}

#[tokio::test]
async fn webhook_failure_status_is_reported() {
    let slack = Server::run();
    slack.expect(
        Expectation::matching(request::method_path("POST", "/services/hook"))
            .respond_with(status_code(503)),
    );
    let address = spawn_app(Some(slack.url("/services/hook").to_string())).await;

    let (status, body) = post_json(
        format!("{}/api/slack/payment", address),
        json!({
            "businessName": "Acme",
            "email": "a@b.com",
            "address": "1 Main St",
            "paymentId": "PAY-1",
            "orderId": "ORD-1",
        }),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Slack API error: 503", "success": false }));
}

#[tokio::test]
async fn unreachable_webhook_is_reported() {
    let closed = TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_url = format!("http://{}/services/T000/B000/secret", closed.local_addr().unwrap());
    drop(closed);
    let address = spawn_app(Some(dead_url)).await;

    let (status, body) = post_json(
        format!("{}/api/slack/notify", address),
        json!({ "message": "hello" }),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["success"], false);
    let error = body["error"].as_str().unwrap();
    assert!(error.to_lowercase().contains("connect"), "{error}");
    assert!(!error.contains("/services/"), "{error}");
    assert!(!error.contains("secret"), "{error}");
}

#[tokio::test]
async fn unconfigured_webhook_is_a_delivery_error() {
    let address = spawn_app(None).await;

    let (status, body) = post_json(
        format!("{}/api/slack/notify", address),
        json!({ "message": "hello" }),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Slack webhook URL is not configured", "success": false }));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let address = spawn_app(None).await;

    let resp = reqwest::Client::new()
        .get(format!("{}/health", address))
        .header("Origin", "https://shop.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn openapi_document_lists_slack_routes() {
    let address = spawn_app(None).await;

    let resp = reqwest::get(format!("{}/api-docs/openapi.json", address)).await.unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let doc: Value = resp.json().await.unwrap();
    for path in ["/health", "/api/slack/notify", "/api/slack/order", "/api/slack/payment"] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
}
