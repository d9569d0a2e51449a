//! Checkout side: the order the connector submits to the provider and the
//! payment attempts attached to it.

mod order;

pub use order::{Item, PaymentOrder, Shipping};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{CardId, CustomerId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "payment_method", rename_all = "snake_case")]
pub enum Payment {
    #[serde(rename = "credit_card")]
    NewCreditCard(NewCreditCardPayment),
    #[serde(rename = "saved_credit_card")]
    SavedCreditCard(SavedCreditCardPayment),
    Boleto(BoletoPayment),
}

impl Payment {
    pub fn amount(&self) -> i64 {
        match self {
            Payment::NewCreditCard(payment) => payment.amount,
            Payment::SavedCreditCard(payment) => payment.amount,
            Payment::Boleto(payment) => payment.amount,
        }
    }
}

/// Card tokenized in the browser for this checkout only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCreditCardPayment {
    pub amount: i64,
    pub card_token: String,
    pub installments: u32,
    pub capture: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_descriptor: Option<String>,
}

/// Card already stored in the provider wallet of `owner`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedCreditCardPayment {
    pub amount: i64,
    pub card_id: CardId,
    #[serde(skip)]
    pub owner: CustomerId,
    pub installments: u32,
    pub capture: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoletoPayment {
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
}
