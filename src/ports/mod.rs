//! Boundaries to the systems the connector drives: storage of its own
//! records and the host e-commerce platform.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{HookId, Order, OrderId, OrderStatus, PlatformOrder, Webhook};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Platform order {0} not found")]
    OrderNotFound(String),

    #[error("Invoice error: {0}")]
    Invoice(String),
}

pub type PlatformResult<T> = Result<T, PlatformError>;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_pagarme_id(&self, id: &OrderId) -> RepositoryResult<Option<Order>>;

    /// Inserts or updates; a fresh order gets its local id assigned.
    async fn save(&self, order: &mut Order) -> RepositoryResult<()>;
}

#[async_trait]
pub trait WebhookRepository: Send + Sync {
    async fn find_by_pagarme_id(&self, id: &HookId) -> RepositoryResult<Option<Webhook>>;

    /// Claims `id` for handling. False when the hook is already handled or
    /// claimed by another delivery.
    async fn reserve(&self, id: &HookId) -> RepositoryResult<bool>;

    /// Drops a claim taken with `reserve` that was never saved.
    async fn release(&self, id: &HookId) -> RepositoryResult<()>;

    async fn save(&self, webhook: &Webhook) -> RepositoryResult<()>;
}

/// The host platform's order records and customer-facing notifications.
#[async_trait]
pub trait PlatformOrderService: Send + Sync {
    async fn load_by_increment_id(&self, increment_id: &str) -> PlatformResult<Option<PlatformOrder>>;

    async fn save(&self, order: &PlatformOrder) -> PlatformResult<()>;

    /// Pushes the connector's view of `order` into the platform record.
    async fn sync_with(&self, order: &Order) -> PlatformResult<()>;

    /// Human-readable label the platform shows for `status`.
    fn status_label(&self, status: OrderStatus) -> String;

    /// Sends the order-update e-mail. Returns whether the customer was notified.
    async fn send_email(&self, order: &PlatformOrder, message: &str) -> PlatformResult<bool>;

    async fn add_history_comment(
        &self,
        order: &PlatformOrder,
        comment: &str,
        customer_notified: bool,
    ) -> PlatformResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceOutcome {
    Created,
    /// The platform declined to invoice; carries its reason.
    Refused(String),
}

#[async_trait]
pub trait InvoiceService: Send + Sync {
    async fn create_for(&self, order: &Order) -> PlatformResult<InvoiceOutcome>;

    async fn cancel_invoices_for(&self, order: &Order) -> PlatformResult<()>;
}

/// Dashboard strings. `%s` placeholders are filled from `args` in order.
pub trait Localization: Send + Sync {
    fn get_dashboard(&self, text: &str, args: &[&str]) -> String;
}
