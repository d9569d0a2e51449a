//! Wires the webhook services on top of the in-process adapters.

use std::sync::Arc;

use anyhow::Context;

use crate::adapters::{
    DashboardLocalization, InMemoryOrderRepository, InMemoryWebhookRepository, StandalonePlatform,
};
use crate::config::Config;
use crate::services::{OrderHandlerService, WebhookReceiverService};
use crate::AppState;

pub struct Standalone {
    pub orders: Arc<InMemoryOrderRepository>,
    pub webhooks: Arc<InMemoryWebhookRepository>,
    pub platform: Arc<StandalonePlatform>,
    pub receiver: Arc<WebhookReceiverService>,
}

impl Standalone {
    pub fn build(config: &Config) -> anyhow::Result<Self> {
        let i18n = DashboardLocalization::for_locale(&config.dashboard_locale)
            .with_context(|| format!("unsupported dashboard locale {}", config.dashboard_locale))?;

        let orders = Arc::new(InMemoryOrderRepository::new());
        let webhooks = Arc::new(InMemoryWebhookRepository::new());
        let platform = Arc::new(StandalonePlatform::default());

        let order_handler = OrderHandlerService::new(
            orders.clone(),
            platform.clone(),
            platform.clone(),
            Arc::new(i18n),
        );
        let receiver = Arc::new(WebhookReceiverService::new(webhooks.clone(), order_handler));

        tracing::info!(locale = %config.dashboard_locale, "Standalone adapters initialized");

        Ok(Self {
            orders,
            webhooks,
            platform,
            receiver,
        })
    }

    pub fn app_state(&self, config: &Config) -> AppState {
        AppState {
            receiver: self.receiver.clone(),
            webhook_secret: config.webhook_secret.clone(),
            log_request_body: config.log_request_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_locale() {
        let config = Config {
            dashboard_locale: "fr_FR".to_string(),
            ..Config::default()
        };

        assert!(Standalone::build(&config).is_err());
    }

    #[test]
    fn state_carries_config() {
        let config = Config {
            webhook_secret: Some("whsec".to_string()),
            log_request_body: true,
            ..Config::default()
        };
        let standalone = Standalone::build(&config).unwrap();

        let state = standalone.app_state(&config);

        assert_eq!(state.webhook_secret.as_deref(), Some("whsec"));
        assert!(state.log_request_body);
    }
}
