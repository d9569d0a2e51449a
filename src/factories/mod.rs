//! Builders turning raw key/value data into entities.
//!
//! Two sources feed the factories: provider API payloads (webhooks, API
//! responses, POST bodies) and persisted rows. Both arrive as JSON objects;
//! they differ in key names and timestamp formats.

mod charge;
mod customer;
mod fields;
mod order;
mod plan;
mod transaction;
mod webhook;

pub use charge::ChargeFactory;
pub use customer::CustomerFactory;
pub use order::OrderFactory;
pub use plan::PlanFactory;
pub use transaction::TransactionFactory;
pub use webhook::WebhookFactory;

use serde_json::Value;

use crate::error::AppError;

/// Timestamp layout of provider API payloads.
pub const API_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Timestamp layout of persisted rows.
pub const DB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait EntityFactory {
    type Entity;

    fn create_from_post_data(&self, data: &Value) -> Result<Self::Entity, AppError>;

    fn create_from_db_data(&self, data: &Value) -> Result<Self::Entity, AppError>;
}
