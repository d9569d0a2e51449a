use serde_json::Value;

use super::fields::Fields;
use super::{ChargeFactory, EntityFactory, OrderFactory};
use crate::domain::{HookId, Webhook, WebhookEntity, WebhookType};
use crate::error::AppError;

/// Builds webhooks from the provider's notification body:
/// `{ "id": "hook_...", "type": "order.paid", "data": { ... } }`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebhookFactory;

impl WebhookFactory {
    fn entity(webhook_type: &WebhookType, data: &Value) -> Result<WebhookEntity, AppError> {
        match webhook_type.entity_type.as_str() {
            "order" => Ok(WebhookEntity::Order(OrderFactory.create_from_post_data(data)?)),
            "charge" => Ok(WebhookEntity::Charge(ChargeFactory.create_from_post_data(data)?)),
            other => Err(AppError::invalid_param(
                format!("{other} is not a valid webhook entity type!"),
                other,
            )),
        }
    }
}

impl EntityFactory for WebhookFactory {
    type Entity = Webhook;

    fn create_from_post_data(&self, data: &Value) -> Result<Webhook, AppError> {
        let fields = Fields::of(data, "webhook")?;

        let pagarme_id = HookId::new(fields.required_string("id")?)?;
        let webhook_type = WebhookType::parse(&fields.required_string("type")?)?;
        let payload = fields
            .get("data")
            .ok_or_else(|| AppError::invalid_param("data is required", "data"))?;
        let entity = Self::entity(&webhook_type, payload)?;

        Ok(Webhook {
            pagarme_id,
            webhook_type,
            entity,
        })
    }

    /// Stored webhooks keep the original notification body in `data`.
    fn create_from_db_data(&self, data: &Value) -> Result<Webhook, AppError> {
        let fields = Fields::of(data, "webhook")?;
        let body = fields
            .get("data")
            .ok_or_else(|| AppError::invalid_param("data is required", "data"))?;
        self.create_from_post_data(body)
    }
}
