//! Framework-agnostic entities exchanged with the payment provider.

pub mod charge;
pub mod customer;
pub mod ids;
pub mod order;
pub mod payment;
pub mod plan;
pub mod status;
pub mod transaction;
pub mod webhook;

pub use charge::Charge;
pub use customer::{Customer, CustomerType};
pub use ids::{CardId, ChargeId, CustomerId, HookId, OrderId, PlanId, TransactionId};
pub use order::{Order, PlatformOrder};
pub use payment::{Payment, PaymentOrder};
pub use plan::{BillingType, Interval, IntervalType, Plan, PlanStatus, SubProduct};
pub use status::{
    ChargeStatus, OrderAction, OrderState, OrderStatus, ProviderCode, TransactionStatus,
    TransactionType,
};
pub use transaction::Transaction;
pub use webhook::{Webhook, WebhookEntity, WebhookType};
