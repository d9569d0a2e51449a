use std::fmt;

use serde::Serialize;

use super::charge::Charge;
use super::ids::HookId;
use super::order::Order;
use crate::error::AppError;

/// `<entity>.<action>`, e.g. `order.payment_failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookType {
    pub entity_type: String,
    pub action: String,
}

impl WebhookType {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.split_once('.') {
            Some((entity_type, action)) if !entity_type.is_empty() && !action.is_empty() => {
                Ok(Self {
                    entity_type: entity_type.to_string(),
                    action: action.to_string(),
                })
            }
            _ => Err(AppError::invalid_param(
                format!("{value} is not a valid webhook type!"),
                value,
            )),
        }
    }
}

impl fmt::Display for WebhookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity_type, self.action)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WebhookEntity {
    Order(Order),
    Charge(Charge),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Webhook {
    pub pagarme_id: HookId,
    pub webhook_type: WebhookType,
    pub entity: WebhookEntity,
}

impl Webhook {
    pub fn order(&self) -> Option<&Order> {
        match &self.entity {
            WebhookEntity::Order(order) => Some(order),
            WebhookEntity::Charge(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_entity_and_action() {
        let kind = WebhookType::parse("order.payment_failed").unwrap();
        assert_eq!(kind.entity_type, "order");
        assert_eq!(kind.action, "payment_failed");
        assert_eq!(kind.to_string(), "order.payment_failed");
    }

    #[test]
    fn rejects_types_without_action() {
        assert!(WebhookType::parse("order").is_err());
        assert!(WebhookType::parse("order.").is_err());
        assert!(WebhookType::parse(".paid").is_err());
    }
}
