//! Order as the connector tracks it: the provider's view of a platform order.

use std::collections::BTreeMap;

use serde::Serialize;

use super::charge::Charge;
use super::ids::OrderId;
use super::status::{ChargeStatus, OrderState, OrderStatus};

/// Snapshot of the host platform's own order record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformOrder {
    pub increment_id: String,
    pub state: OrderState,
    /// Platform status code, e.g. `pending_payment`.
    pub status: String,
}

impl PlatformOrder {
    pub fn new(increment_id: impl Into<String>, state: OrderState, status: impl Into<String>) -> Self {
        Self {
            increment_id: increment_id.into(),
            state,
            status: status.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: Option<i64>,
    pub pagarme_id: Option<OrderId>,
    /// Platform increment id the order was placed with.
    pub code: String,
    pub status: OrderStatus,
    pub charges: Vec<Charge>,
    pub platform_order: Option<PlatformOrder>,
}

impl Order {
    pub fn new(code: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            id: None,
            pagarme_id: None,
            code: code.into(),
            status,
            charges: Vec::new(),
            platform_order: None,
        }
    }

    pub fn add_charge(&mut self, charge: Charge) {
        self.charges.push(charge);
    }

    /// Replaces the charge with the same provider id, or appends it when the
    /// order does not know it yet. With `overwrite_id` the replacement keeps
    /// the local id of the charge it replaces.
    pub fn update_charge(&mut self, mut updated: Charge, overwrite_id: bool) {
        if let Some(existing) = self
            .charges
            .iter_mut()
            .find(|charge| charge.is_same_charge(&updated))
        {
            if overwrite_id {
                updated.id = existing.id;
            }
            *existing = updated;
            return;
        }

        self.add_charge(updated);
    }

    /// False while any charge is still pending or processing on the provider.
    pub fn can_be_paid(&self) -> bool {
        !self.charges.iter().any(|charge| charge.status.blocks_payment())
    }

    /// Status of every charge, keyed by charge id.
    pub fn charge_statuses(&self) -> BTreeMap<&str, ChargeStatus> {
        self.charges
            .iter()
            .map(|charge| (charge.pagarme_id.value(), charge.status))
            .collect()
    }

    pub fn is_canceled(&self) -> bool {
        self.status == OrderStatus::Canceled
    }
}
