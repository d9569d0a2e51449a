use anyhow::Context;
use dotenvy::dotenv;
use std::env;

use crate::adapters::DashboardLocalization;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub webhook_secret: Option<String>,
    pub dashboard_locale: String,
    pub log_request_body: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            webhook_secret: None,
            dashboard_locale: "en_US".to_string(),
            log_request_body: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("SERVER_PORT must be a port number")?;

        let webhook_secret = env::var("PAGARME_WEBHOOK_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty());

        let dashboard_locale =
            env::var("DASHBOARD_LOCALE").unwrap_or_else(|_| "en_US".to_string());
        if DashboardLocalization::for_locale(&dashboard_locale).is_none() {
            anyhow::bail!("DASHBOARD_LOCALE must be en_US or pt_BR, got {dashboard_locale}");
        }

        let log_request_body = env::var("LOG_REQUEST_BODY")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .context("LOG_REQUEST_BODY must be true or false")?;

        Ok(Config {
            server_port,
            webhook_secret,
            dashboard_locale,
            log_request_body,
        })
    }
}
