use std::sync::Arc;

use tracing::info;

use super::{OrderHandlerService, WebhookResult};
use crate::domain::{Webhook, WebhookEntity};
use crate::error::AppError;
use crate::ports::WebhookRepository;

/// Entry point for parsed webhooks: drops repeats and routes by entity type.
pub struct WebhookReceiverService {
    webhook_repository: Arc<dyn WebhookRepository>,
    order_handler: OrderHandlerService,
}

impl WebhookReceiverService {
    pub fn new(
        webhook_repository: Arc<dyn WebhookRepository>,
        order_handler: OrderHandlerService,
    ) -> Self {
        Self {
            webhook_repository,
            order_handler,
        }
    }

    pub async fn handle(&self, webhook: &Webhook) -> Result<WebhookResult, AppError> {
        if !self.webhook_repository.reserve(&webhook.pagarme_id).await? {
            info!(hook_id = %webhook.pagarme_id, "Webhook already handled");
            return Ok(WebhookResult::ok("Webhook already handled"));
        }

        match self.dispatch(webhook).await {
            Ok(result) => {
                self.webhook_repository.save(webhook).await?;
                Ok(result)
            }
            Err(err) => {
                self.webhook_repository.release(&webhook.pagarme_id).await?;
                Err(err)
            }
        }
    }

    async fn dispatch(&self, webhook: &Webhook) -> Result<WebhookResult, AppError> {
        match &webhook.entity {
            WebhookEntity::Order(_) => self.order_handler.handle(webhook).await,
            WebhookEntity::Charge(_) => {
                let message = format!("Webhook {} not implemented", webhook.webhook_type);
                info!(hook_id = %webhook.pagarme_id, "{}", message);
                Ok(WebhookResult::ok(message))
            }
        }
    }
}
