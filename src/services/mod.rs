pub mod order_handler;
pub mod webhook_receiver;

pub use order_handler::OrderHandlerService;
pub use webhook_receiver::WebhookReceiverService;

use serde::{Deserialize, Serialize};

/// Outcome reported back to the provider for a handled webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResult {
    pub message: String,
    pub code: u16,
}

impl WebhookResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 200,
        }
    }
}
