//! Reacts to `order.*` webhooks.

use std::sync::Arc;

use tracing::{info, warn};

use super::WebhookResult;
use crate::domain::status::parse_code;
use crate::domain::{
    Order, OrderAction, OrderState, OrderStatus, PlatformOrder, ProviderCode, Webhook,
};
use crate::error::AppError;
use crate::factories::OrderFactory;
use crate::ports::{
    InvoiceOutcome, InvoiceService, Localization, OrderRepository, PlatformOrderService,
};

pub struct OrderHandlerService {
    order_repository: Arc<dyn OrderRepository>,
    platform: Arc<dyn PlatformOrderService>,
    invoices: Arc<dyn InvoiceService>,
    i18n: Arc<dyn Localization>,
}

impl OrderHandlerService {
    pub fn new(
        order_repository: Arc<dyn OrderRepository>,
        platform: Arc<dyn PlatformOrderService>,
        invoices: Arc<dyn InvoiceService>,
        i18n: Arc<dyn Localization>,
    ) -> Self {
        Self {
            order_repository,
            platform,
            invoices,
            i18n,
        }
    }

    pub async fn handle(&self, webhook: &Webhook) -> Result<WebhookResult, AppError> {
        let action = match parse_code::<OrderAction>(&webhook.webhook_type.action) {
            Ok(action @ (OrderAction::Paid | OrderAction::Canceled | OrderAction::PaymentFailed)) => {
                action
            }
            // created/closed are known actions with nothing to do yet.
            _ => return Ok(Self::not_implemented(webhook)),
        };

        let mut order = self.load_order(webhook).await?;
        self.add_webhook_received_history(webhook, &order).await?;

        info!(
            hook_id = %webhook.pagarme_id,
            order_code = %order.code,
            action = %action,
            "Handling order webhook"
        );

        match action {
            OrderAction::Paid => self.handle_paid(webhook, &order).await,
            OrderAction::Canceled => self.handle_canceled(&mut order).await,
            OrderAction::PaymentFailed => self.handle_payment_failed(&mut order).await,
            OrderAction::Created | OrderAction::Closed => Ok(Self::not_implemented(webhook)),
        }
    }

    fn not_implemented(webhook: &Webhook) -> WebhookResult {
        let message = format!("Webhook {} not implemented", webhook.webhook_type);
        info!(hook_id = %webhook.pagarme_id, "{}", message);
        WebhookResult::ok(message)
    }

    async fn handle_paid(&self, webhook: &Webhook, order: &Order) -> Result<WebhookResult, AppError> {
        Self::ensure_can_be_paid(order)?;

        let mut webhook_order = webhook_order(webhook)?.clone();
        webhook_order.id = order.id;
        webhook_order.platform_order = order.platform_order.clone();
        for charge in &order.charges {
            webhook_order.update_charge(charge.clone(), false);
        }

        match self.invoices.create_for(&webhook_order).await? {
            InvoiceOutcome::Created => Ok(WebhookResult::ok("Order paid and invoice created.")),
            InvoiceOutcome::Refused(reason) => {
                warn!(order_code = %order.code, reason = %reason, "Invoice not created");
                Ok(WebhookResult::ok(format!(
                    "Can't create Invoice for the order! Reason: {reason}"
                )))
            }
        }
    }

    async fn handle_canceled(&self, order: &mut Order) -> Result<WebhookResult, AppError> {
        if order.is_canceled() {
            return Ok(WebhookResult::ok(
                "It is not possible to cancel an order that was already canceled.",
            ));
        }

        self.invoices.cancel_invoices_for(order).await?;

        order.status = OrderStatus::Canceled;
        let snapshot = platform_order_mut(order)?;
        snapshot.state = OrderState::Canceled;
        snapshot.status = OrderStatus::Canceled.code().to_string();

        self.order_repository.save(order).await?;

        let history = self.i18n.get_dashboard("Order canceled.", &[]);

        self.platform.sync_with(order).await?;

        let status_label = self.platform.status_label(order.status);
        let email_message = self
            .i18n
            .get_dashboard("New order status: %s", &[status_label.as_str()]);

        let snapshot = platform_order(order)?;
        let customer_notified = self.platform.send_email(snapshot, &email_message).await?;
        self.platform
            .add_history_comment(snapshot, &history, customer_notified)
            .await?;

        info!(order_code = %order.code, customer_notified, "Order canceled");
        Ok(WebhookResult::ok("Order canceled."))
    }

    async fn handle_payment_failed(&self, order: &mut Order) -> Result<WebhookResult, AppError> {
        let history = format!(
            "{}. {}.",
            self.i18n.get_dashboard("Order payment failed", &[]),
            self.i18n.get_dashboard("The order will be canceled", &[])
        );
        self.platform
            .add_history_comment(platform_order(order)?, &history, false)
            .await?;

        self.handle_canceled(order).await
    }

    /// Resolves the local order for the webhook, falling back to the platform
    /// record when the connector has never seen the order.
    async fn load_order(&self, webhook: &Webhook) -> Result<Order, AppError> {
        let webhook_order = webhook_order(webhook)?;
        let pagarme_id = webhook_order.pagarme_id.clone().ok_or_else(|| {
            AppError::invalid_param("The webhook order has no id", webhook_order.code.as_str())
        })?;

        if let Some(mut order) = self.order_repository.find_by_pagarme_id(&pagarme_id).await? {
            // The platform record is authoritative over the stored snapshot.
            if let Some(live) = self.platform.load_by_increment_id(&order.code).await? {
                order.platform_order = Some(live);
            }
            return Ok(order);
        }

        let platform_order = self
            .platform
            .load_by_increment_id(&webhook_order.code)
            .await?
            .ok_or_else(|| AppError::NotFound("Order Not found!".to_string()))?;

        OrderFactory.create_from_platform_data(platform_order, pagarme_id)
    }

    async fn add_webhook_received_history(
        &self,
        webhook: &Webhook,
        order: &Order,
    ) -> Result<(), AppError> {
        let message = self.i18n.get_dashboard(
            "Webhook received: %s %s",
            &[
                webhook.pagarme_id.value(),
                webhook.webhook_type.to_string().as_str(),
            ],
        );

        let snapshot = platform_order(order)?;
        self.platform
            .add_history_comment(snapshot, &message, false)
            .await?;
        self.platform.save(snapshot).await?;
        Ok(())
    }

    fn ensure_can_be_paid(order: &Order) -> Result<(), AppError> {
        if order.can_be_paid() {
            return Ok(());
        }

        let statuses = serde_json::to_string(&order.charge_statuses())
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Err(AppError::UnprocessableWebhook(format!(
            "One or more charges of the order are in a state that is not compatible with an paid order. Charge Statuses: {statuses}"
        )))
    }
}

fn webhook_order(webhook: &Webhook) -> Result<&Order, AppError> {
    webhook.order().ok_or_else(|| {
        AppError::BadRequest(format!("{} does not carry an order", webhook.webhook_type))
    })
}

fn platform_order(order: &Order) -> Result<&PlatformOrder, AppError> {
    order
        .platform_order
        .as_ref()
        .ok_or_else(|| AppError::Internal(format!("order {} has no platform order", order.code)))
}

fn platform_order_mut(order: &mut Order) -> Result<&mut PlatformOrder, AppError> {
    let code = order.code.clone();
    order
        .platform_order
        .as_mut()
        .ok_or_else(|| AppError::Internal(format!("order {code} has no platform order")))
}
