use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use tower::ServiceExt;

use pagarme_connector::config::Config;
use pagarme_connector::create_app;
use pagarme_connector::domain::{OrderState, PlatformOrder};
use pagarme_connector::startup::Standalone;

type HmacSha256 = Hmac<Sha256>;

const SECRET: &str = "test_secret_key";

async fn app() -> Router {
    let config = Config {
        webhook_secret: Some(SECRET.to_string()),
        ..Config::default()
    };
    let standalone = Standalone::build(&config).unwrap();
    standalone
        .platform
        .insert_order(PlatformOrder::new("100000042", OrderState::New, "pending"))
        .await;
    create_app(standalone.app_state(&config))
}

fn payload() -> String {
    json!({
        "id": "hook_RyEKQO789TRpZjv5",
        "type": "order.created",
        "data": {
            "id": "or_ZdnB5BBTrTPaqG3o",
            "code": "100000042",
            "status": "pending",
            "charges": []
        }
    })
    .to_string()
}

fn signature(secret: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(payload.as_bytes());
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

async fn send(app: Router, payload: String, signature: Option<String>) -> StatusCode {
    let mut request = Request::builder().method("POST").uri("/webhook");
    if let Some(signature) = signature {
        request = request.header("X-Hub-Signature", signature);
    }

    app.oneshot(request.body(Body::from(payload)).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_valid_signature_is_accepted() {
    let payload = payload();
    let signature = signature(SECRET, &payload);

    assert_eq!(send(app().await, payload, Some(signature)).await, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_signature_is_rejected() {
    assert_eq!(send(app().await, payload(), None).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signature_with_wrong_secret_is_rejected() {
    let payload = payload();
    let signature = signature("another_secret", &payload);

    assert_eq!(
        send(app().await, payload, Some(signature)).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_signature_over_other_body_is_rejected() {
    let signature = signature(SECRET, r#"{"id":"456","status":"pending"}"#);

    assert_eq!(
        send(app().await, payload(), Some(signature)).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_health_is_not_signed() {
    let response = app()
        .await
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_library_signature_matches_manual_hmac() {
    let payload = payload();
    assert_eq!(
        pagarme_connector::middleware::webhook_signature::sign(SECRET, payload.as_bytes()).unwrap(),
        signature(SECRET, &payload)
    );
}
