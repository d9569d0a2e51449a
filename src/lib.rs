pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod factories;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod startup;
pub mod utils;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::services::WebhookReceiverService;

#[derive(Clone)]
pub struct AppState {
    pub receiver: Arc<WebhookReceiverService>,
    pub webhook_secret: Option<String>,
    pub log_request_body: bool,
}

pub fn create_app(state: AppState) -> Router {
    let webhook_route = Router::new()
        .route("/webhook", post(handlers::webhook::receive))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::webhook_signature::verify_webhook_signature,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(webhook_route)
        .layer(axum::middleware::from_fn_with_state(
            state.log_request_body,
            middleware::request_logger::request_logger_middleware,
        ))
        .with_state(state)
}
