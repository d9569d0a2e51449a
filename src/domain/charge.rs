use serde::Serialize;

use super::ids::ChargeId;
use super::status::ChargeStatus;
use super::transaction::Transaction;

/// A billing attempt against a customer for part of an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charge {
    pub id: Option<i64>,
    pub pagarme_id: ChargeId,
    pub code: Option<String>,
    pub amount: i64,
    pub paid_amount: i64,
    pub canceled_amount: i64,
    pub refunded_amount: i64,
    pub status: ChargeStatus,
    pub transactions: Vec<Transaction>,
}

impl Charge {
    pub fn new(pagarme_id: ChargeId, amount: i64, status: ChargeStatus) -> Self {
        Self {
            id: None,
            pagarme_id,
            code: None,
            amount,
            paid_amount: 0,
            canceled_amount: 0,
            refunded_amount: 0,
            status,
            transactions: Vec::new(),
        }
    }

    /// Charges are identified by their provider id.
    pub fn is_same_charge(&self, other: &Charge) -> bool {
        self.pagarme_id == other.pagarme_id
    }

    pub fn add_transaction(&mut self, mut transaction: Transaction) {
        transaction.charge_id = Some(self.pagarme_id.clone());
        self.transactions.push(transaction);
    }

    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.transactions.last()
    }
}
