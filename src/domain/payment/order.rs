use serde::Serialize;

use super::{Payment, SavedCreditCardPayment};
use crate::domain::customer::Customer;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub code: String,
    pub description: String,
    pub quantity: u32,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipping {
    pub amount: i64,
    pub description: String,
    pub recipient_name: String,
    pub recipient_phone: Option<String>,
}

/// Order submitted to the provider at checkout.
///
/// Serializes to the request body the provider expects; `shipping` is left out
/// entirely when the order has none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    customer: Option<Customer>,
    code: String,
    items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping: Option<Shipping>,
    payments: Vec<Payment>,
    closed: bool,
    antifraud_enabled: bool,
}

impl Default for PaymentOrder {
    fn default() -> Self {
        Self {
            customer: None,
            code: String::new(),
            items: Vec::new(),
            shipping: None,
            payments: Vec::new(),
            closed: true,
            antifraud_enabled: false,
        }
    }
}

impl PaymentOrder {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn set_customer(&mut self, customer: Option<Customer>) {
        self.customer = customer;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn shipping(&self) -> Option<&Shipping> {
        self.shipping.as_ref()
    }

    pub fn set_shipping(&mut self, shipping: Option<Shipping>) {
        self.shipping = shipping;
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Attaches a payment after running the validator for its kind. A payment
    /// that fails validation is not attached.
    pub fn add_payment(&mut self, payment: Payment) -> Result<(), AppError> {
        self.validate(&payment)?;
        self.payments.push(payment);
        Ok(())
    }

    fn validate(&self, payment: &Payment) -> Result<(), AppError> {
        match payment {
            Payment::SavedCreditCard(saved) => self.validate_saved_credit_card(saved),
            Payment::NewCreditCard(_) | Payment::Boleto(_) => Ok(()),
        }
    }

    fn validate_saved_credit_card(&self, payment: &SavedCreditCardPayment) -> Result<(), AppError> {
        let customer = self.customer.as_ref().ok_or_else(|| {
            AppError::domain(
                "To use a saved credit card payment in an order you must add a customer to it.",
                400,
            )
        })?;

        let customer_id = customer.pagarme_id.as_ref().ok_or_else(|| {
            AppError::domain(
                "You can't use a saved credit card of a fresh new customer",
                400,
            )
        })?;

        if *customer_id != payment.owner {
            return Err(AppError::domain(
                "The saved credit card informed doesn't belong to the informed customer.",
                400,
            ));
        }

        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn open(&mut self) {
        self.closed = false;
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_antifraud_enabled(&self) -> bool {
        self.antifraud_enabled
    }

    pub fn enable_antifraud(&mut self) {
        self.antifraud_enabled = true;
    }

    pub fn disable_antifraud(&mut self) {
        self.antifraud_enabled = false;
    }
}
