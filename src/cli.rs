use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::domain::{OrderState, PlatformOrder, WebhookEntity};
use crate::factories::{EntityFactory, WebhookFactory};
use crate::services::WebhookResult;
use crate::startup::Standalone;

#[derive(Parser)]
#[command(name = "pagarme-connector")]
#[command(about = "Pagar.me connector - payment webhook processor", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Run a webhook JSON file through the standalone adapters
    Replay {
        /// Path to the webhook body
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Configuration validation
    Config,
}

/// Replays a stored webhook against a fresh standalone platform. Order
/// webhooks find their platform order as new and pending.
pub async fn handle_replay(config: &Config, file: &Path) -> anyhow::Result<WebhookResult> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let payload: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not JSON", file.display()))?;
    let webhook = WebhookFactory.create_from_post_data(&payload)?;

    let standalone = Standalone::build(config)?;
    if let WebhookEntity::Order(order) = &webhook.entity {
        standalone
            .platform
            .insert_order(PlatformOrder::new(order.code.clone(), OrderState::New, "pending"))
            .await;
    }

    tracing::info!(hook_id = %webhook.pagarme_id, "Replaying webhook");
    let result = standalone.receiver.handle(&webhook).await?;

    println!("✓ {} ({})", result.message, result.code);
    Ok(result)
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Validating configuration...");

    println!("Configuration:");
    println!("  Server Port: {}", config.server_port);
    println!(
        "  Webhook Secret: {}",
        if config.webhook_secret.is_some() { "****" } else { "(not set)" }
    );
    println!("  Dashboard Locale: {}", config.dashboard_locale);
    println!("  Log Request Body: {}", config.log_request_body);

    tracing::info!("Configuration is valid");
    println!("✓ Configuration is valid");

    Ok(())
}
