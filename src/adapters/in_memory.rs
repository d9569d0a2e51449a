//! In-process repositories. Used by the standalone service and by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{HookId, Order, OrderId, Webhook};
use crate::ports::{OrderRepository, RepositoryError, RepositoryResult, WebhookRepository};

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
    next_id: AtomicI64,
    saves: AtomicUsize,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls served so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_pagarme_id(&self, id: &OrderId) -> RepositoryResult<Option<Order>> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn save(&self, order: &mut Order) -> RepositoryResult<()> {
        let key = order.pagarme_id.clone().ok_or_else(|| {
            RepositoryError::Storage(format!("order {} has no provider id", order.code))
        })?;

        if order.id.is_none() {
            order.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        }

        self.orders.write().await.insert(key, order.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Handled webhooks by hook id. A `None` entry is a claim still in flight.
#[derive(Default)]
pub struct InMemoryWebhookRepository {
    webhooks: RwLock<HashMap<HookId, Option<Webhook>>>,
}

impl InMemoryWebhookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebhookRepository for InMemoryWebhookRepository {
    async fn find_by_pagarme_id(&self, id: &HookId) -> RepositoryResult<Option<Webhook>> {
        Ok(self.webhooks.read().await.get(id).cloned().flatten())
    }

    async fn reserve(&self, id: &HookId) -> RepositoryResult<bool> {
        let mut webhooks = self.webhooks.write().await;
        if webhooks.contains_key(id) {
            return Ok(false);
        }
        webhooks.insert(id.clone(), None);
        Ok(true)
    }

    async fn release(&self, id: &HookId) -> RepositoryResult<()> {
        let mut webhooks = self.webhooks.write().await;
        if matches!(webhooks.get(id), Some(None)) {
            webhooks.remove(id);
        }
        Ok(())
    }

    async fn save(&self, webhook: &Webhook) -> RepositoryResult<()> {
        self.webhooks
            .write()
            .await
            .insert(webhook.pagarme_id.clone(), Some(webhook.clone()));
        Ok(())
    }
}
