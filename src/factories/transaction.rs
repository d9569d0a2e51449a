use serde_json::Value;

use super::fields::Fields;
use super::{EntityFactory, API_DATETIME_FORMAT, DB_DATETIME_FORMAT};
use crate::domain::status::parse_code;
use crate::domain::{ChargeId, Transaction, TransactionId, TransactionStatus, TransactionType};
use crate::error::AppError;

#[derive(Debug, Default, Clone, Copy)]
pub struct TransactionFactory;

impl TransactionFactory {
    fn fill_acquirer(transaction: &mut Transaction, fields: &Fields<'_>) {
        transaction.acquirer_name = fields.string("acquirer_name");
        transaction.acquirer_message = fields.string("acquirer_message");
        transaction.acquirer_nsu = fields.string("acquirer_nsu");
        transaction.acquirer_tid = fields.string("acquirer_tid");
        transaction.acquirer_auth_code = fields.string("acquirer_auth_code");
    }
}

impl EntityFactory for TransactionFactory {
    type Entity = Transaction;

    fn create_from_post_data(&self, data: &Value) -> Result<Transaction, AppError> {
        let fields = Fields::of(data, "transaction")?;

        let pagarme_id = TransactionId::new(fields.required_string("id")?)?;
        let status: TransactionStatus = parse_code(&fields.required_string("status")?)?;
        let transaction_type: TransactionType =
            parse_code(&fields.required_string("transaction_type")?)?;
        let amount = fields.int_or_zero("amount")?;

        let mut transaction = Transaction::new(pagarme_id, status, transaction_type, amount);
        transaction.paid_amount = fields.int("paid_amount")?.unwrap_or(amount);
        Self::fill_acquirer(&mut transaction, &fields);
        transaction.created_at = fields.datetime("created_at", API_DATETIME_FORMAT)?;

        Ok(transaction)
    }

    fn create_from_db_data(&self, data: &Value) -> Result<Transaction, AppError> {
        let fields = Fields::of(data, "transaction")?;

        let pagarme_id = TransactionId::new(fields.required_string("mundipagg_id")?)?;
        let status: TransactionStatus = parse_code(&fields.required_string("status")?)?;
        let transaction_type: TransactionType = parse_code(&fields.required_string("type")?)?;
        let amount = fields.int_or_zero("amount")?;

        let mut transaction = Transaction::new(pagarme_id, status, transaction_type, amount);
        transaction.id = fields.int("id")?;
        transaction.charge_id = fields.string("charge_id").map(ChargeId::new).transpose()?;
        transaction.paid_amount = fields.int_or_zero("paid_amount")?;
        Self::fill_acquirer(&mut transaction, &fields);
        transaction.created_at = fields.datetime("created_at", DB_DATETIME_FORMAT)?;

        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    fn post_data() -> Value {
        json!({
            "id": "tran_9vLK2bqfJ1TzxM3P",
            "status": "authorized_pending_capture",
            "transaction_type": "credit_card",
            "amount": 15990,
            "paid_amount": 15000,
            "acquirer_name": "simulator",
            "acquirer_message": "Transação aprovada com sucesso",
            "acquirer_nsu": "38504",
            "acquirer_tid": "38504",
            "acquirer_auth_code": "123456",
            "created_at": "2019-10-01T10:12:00"
        })
    }

    #[test]
    fn builds_transaction_from_post_data() {
        let transaction = TransactionFactory.create_from_post_data(&post_data()).unwrap();

        assert_eq!(transaction.pagarme_id.value(), "tran_9vLK2bqfJ1TzxM3P");
        assert_eq!(transaction.status, TransactionStatus::AuthorizedPendingCapture);
        assert_eq!(transaction.transaction_type, TransactionType::CreditCard);
        assert_eq!(transaction.amount, 15990);
        assert_eq!(transaction.paid_amount, 15000);
        assert_eq!(transaction.acquirer_auth_code.as_deref(), Some("123456"));
        assert_eq!(transaction.created_at.unwrap().hour(), 10);
        assert_eq!(transaction.id, None);
    }

    #[test]
    fn paid_amount_falls_back_to_amount() {
        let mut data = post_data();
        data.as_object_mut().unwrap().remove("paid_amount");

        let transaction = TransactionFactory.create_from_post_data(&data).unwrap();

        assert_eq!(transaction.paid_amount, 15990);
    }

    #[test]
    fn unknown_status_is_rejected_by_name() {
        let mut data = post_data();
        data["status"] = json!("almost_paid");

        let err = TransactionFactory.create_from_post_data(&data).unwrap_err();

        assert_eq!(err.to_string(), "almost_paid is not a valid TransactionStatus!");
    }

    #[test]
    fn unknown_type_is_rejected_by_name() {
        let mut data = post_data();
        data["transaction_type"] = json!("cheque");

        let err = TransactionFactory.create_from_post_data(&data).unwrap_err();

        assert_eq!(err.to_string(), "cheque is not a valid TransactionType!");
    }

    #[test]
    fn malformed_timestamp_fails() {
        let mut data = post_data();
        data["created_at"] = json!("01/10/2019 10:12");

        assert!(TransactionFactory.create_from_post_data(&data).is_err());
    }

    #[test]
    fn builds_transaction_from_db_row() {
        let row = json!({
            "id": "12",
            "charge_id": "ch_d2kWy8aF6gT3nB0p",
            "mundipagg_id": "tran_9vLK2bqfJ1TzxM3P",
            "amount": "15990",
            "paid_amount": "0",
            "acquirer_name": "simulator",
            "acquirer_message": null,
            "acquirer_nsu": "38504",
            "acquirer_tid": "38504",
            "acquirer_auth_code": "123456",
            "status": "waiting_payment",
            "type": "boleto",
            "created_at": "2019-10-01 10:12:00"
        });

        let transaction = TransactionFactory.create_from_db_data(&row).unwrap();

        assert_eq!(transaction.id, Some(12));
        assert_eq!(
            transaction.charge_id.as_ref().map(|id| id.value()),
            Some("ch_d2kWy8aF6gT3nB0p")
        );
        assert_eq!(transaction.status, TransactionStatus::WaitingPayment);
        assert_eq!(transaction.transaction_type, TransactionType::Boleto);
        assert_eq!(transaction.paid_amount, 0);
        assert_eq!(transaction.acquirer_message, None);
        assert!(transaction.created_at.is_some());
    }

    #[test]
    fn db_row_with_api_timestamp_fails() {
        let row = json!({
            "mundipagg_id": "tran_9vLK2bqfJ1TzxM3P",
            "status": "paid",
            "type": "pix",
            "created_at": "2019-10-01T10:12:00"
        });

        assert!(TransactionFactory.create_from_db_data(&row).is_err());
    }

    #[test]
    fn non_object_payload_fails() {
        assert!(TransactionFactory.create_from_post_data(&json!("tran")).is_err());
    }
}
