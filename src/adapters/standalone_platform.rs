//! A self-contained stand-in for the host platform.
//!
//! Keeps platform orders, invoices, history comments and outgoing e-mails in
//! memory so the connector can run (and be tested) without a CMS behind it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Order, OrderStatus, PlatformOrder, ProviderCode};
use crate::ports::{
    InvoiceOutcome, InvoiceService, PlatformError, PlatformOrderService, PlatformResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryComment {
    pub increment_id: String,
    pub comment: String,
    pub customer_notified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub increment_id: String,
    pub amount: i64,
    pub canceled: bool,
}

pub struct StandalonePlatform {
    orders: RwLock<HashMap<String, PlatformOrder>>,
    history: RwLock<Vec<HistoryComment>>,
    emails: RwLock<Vec<(String, String)>>,
    invoices: RwLock<Vec<Invoice>>,
    invoice_cancellations: AtomicUsize,
    notify_customer: bool,
}

impl Default for StandalonePlatform {
    fn default() -> Self {
        Self::new(true)
    }
}

impl StandalonePlatform {
    pub fn new(notify_customer: bool) -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            history: RwLock::new(Vec::new()),
            emails: RwLock::new(Vec::new()),
            invoices: RwLock::new(Vec::new()),
            invoice_cancellations: AtomicUsize::new(0),
            notify_customer,
        }
    }

    pub async fn insert_order(&self, order: PlatformOrder) {
        self.orders
            .write()
            .await
            .insert(order.increment_id.clone(), order);
    }

    pub async fn order(&self, increment_id: &str) -> Option<PlatformOrder> {
        self.orders.read().await.get(increment_id).cloned()
    }

    pub async fn history(&self, increment_id: &str) -> Vec<HistoryComment> {
        self.history
            .read()
            .await
            .iter()
            .filter(|entry| entry.increment_id == increment_id)
            .cloned()
            .collect()
    }

    pub async fn emails(&self, increment_id: &str) -> Vec<String> {
        self.emails
            .read()
            .await
            .iter()
            .filter(|(id, _)| id == increment_id)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub async fn invoices(&self, increment_id: &str) -> Vec<Invoice> {
        self.invoices
            .read()
            .await
            .iter()
            .filter(|invoice| invoice.increment_id == increment_id)
            .cloned()
            .collect()
    }

    /// Number of `cancel_invoices_for` calls served so far.
    pub fn invoice_cancellation_count(&self) -> usize {
        self.invoice_cancellations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformOrderService for StandalonePlatform {
    async fn load_by_increment_id(&self, increment_id: &str) -> PlatformResult<Option<PlatformOrder>> {
        Ok(self.order(increment_id).await)
    }

    async fn save(&self, order: &PlatformOrder) -> PlatformResult<()> {
        self.insert_order(order.clone()).await;
        Ok(())
    }

    async fn sync_with(&self, order: &Order) -> PlatformResult<()> {
        let platform_order = order
            .platform_order
            .as_ref()
            .ok_or_else(|| PlatformError::OrderNotFound(order.code.clone()))?;

        let mut synced = platform_order.clone();
        synced.status = order.status.code().to_string();
        self.insert_order(synced).await;
        Ok(())
    }

    fn status_label(&self, status: OrderStatus) -> String {
        let name = status.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    async fn send_email(&self, order: &PlatformOrder, message: &str) -> PlatformResult<bool> {
        if !self.notify_customer {
            return Ok(false);
        }

        self.emails
            .write()
            .await
            .push((order.increment_id.clone(), message.to_string()));
        Ok(true)
    }

    async fn add_history_comment(
        &self,
        order: &PlatformOrder,
        comment: &str,
        customer_notified: bool,
    ) -> PlatformResult<()> {
        self.history.write().await.push(HistoryComment {
            increment_id: order.increment_id.clone(),
            comment: comment.to_string(),
            customer_notified,
        });
        Ok(())
    }
}

#[async_trait]
impl InvoiceService for StandalonePlatform {
    async fn create_for(&self, order: &Order) -> PlatformResult<InvoiceOutcome> {
        let mut invoices = self.invoices.write().await;

        if invoices
            .iter()
            .any(|invoice| invoice.increment_id == order.code && !invoice.canceled)
        {
            return Ok(InvoiceOutcome::Refused(
                "The order already has an invoice".to_string(),
            ));
        }

        let amount = order
            .charges
            .iter()
            .try_fold(0i64, |total, charge| total.checked_add(charge.paid_amount))
            .ok_or_else(|| {
                PlatformError::Invoice(format!("paid amount of order {} overflows", order.code))
            })?;
        if amount <= 0 {
            return Ok(InvoiceOutcome::Refused("No items to be invoiced".to_string()));
        }

        invoices.push(Invoice {
            increment_id: order.code.clone(),
            amount,
            canceled: false,
        });
        Ok(InvoiceOutcome::Created)
    }

    async fn cancel_invoices_for(&self, order: &Order) -> PlatformResult<()> {
        self.invoice_cancellations.fetch_add(1, Ordering::SeqCst);

        for invoice in self
            .invoices
            .write()
            .await
            .iter_mut()
            .filter(|invoice| invoice.increment_id == order.code)
        {
            invoice.canceled = true;
        }
        Ok(())
    }
}
