//! Transaction domain entity.
//! A single authorization/settlement record belonging to a charge.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{ChargeId, TransactionId};
use super::status::{TransactionStatus, TransactionType};

/// Amounts are integer cents, as the provider reports them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: Option<i64>,
    pub pagarme_id: TransactionId,
    pub charge_id: Option<ChargeId>,
    pub status: TransactionStatus,
    pub transaction_type: TransactionType,
    pub amount: i64,
    pub paid_amount: i64,
    pub acquirer_name: Option<String>,
    pub acquirer_message: Option<String>,
    pub acquirer_nsu: Option<String>,
    pub acquirer_tid: Option<String>,
    pub acquirer_auth_code: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(
        pagarme_id: TransactionId,
        status: TransactionStatus,
        transaction_type: TransactionType,
        amount: i64,
    ) -> Self {
        Self {
            id: None,
            pagarme_id,
            charge_id: None,
            status,
            transaction_type,
            amount,
            paid_amount: amount,
            acquirer_name: None,
            acquirer_message: None,
            acquirer_nsu: None,
            acquirer_tid: None,
            acquirer_auth_code: None,
            created_at: None,
        }
    }
}
