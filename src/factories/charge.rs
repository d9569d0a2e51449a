use serde_json::Value;

use super::fields::Fields;
use super::{EntityFactory, TransactionFactory};
use crate::domain::status::parse_code;
use crate::domain::{Charge, ChargeId, ChargeStatus};
use crate::error::AppError;

#[derive(Debug, Default, Clone, Copy)]
pub struct ChargeFactory;

impl ChargeFactory {
    fn build(fields: &Fields<'_>, id_key: &str) -> Result<Charge, AppError> {
        let pagarme_id = ChargeId::new(fields.required_string(id_key)?)?;
        let status: ChargeStatus = parse_code(&fields.required_string("status")?)?;

        let mut charge = Charge::new(pagarme_id, fields.int_or_zero("amount")?, status);
        charge.code = fields.string("code");
        charge.paid_amount = fields.int_or_zero("paid_amount")?;
        charge.canceled_amount = fields.int_or_zero("canceled_amount")?;
        charge.refunded_amount = fields.int_or_zero("refunded_amount")?;
        Ok(charge)
    }
}

impl EntityFactory for ChargeFactory {
    type Entity = Charge;

    fn create_from_post_data(&self, data: &Value) -> Result<Charge, AppError> {
        let fields = Fields::of(data, "charge")?;
        let mut charge = Self::build(&fields, "id")?;

        if let Some(last_transaction) = fields.get("last_transaction") {
            let transaction = TransactionFactory.create_from_post_data(last_transaction)?;
            charge.add_transaction(transaction);
        }

        Ok(charge)
    }

    fn create_from_db_data(&self, data: &Value) -> Result<Charge, AppError> {
        let fields = Fields::of(data, "charge")?;
        let mut charge = Self::build(&fields, "mundipagg_id")?;
        charge.id = fields.int("id")?;

        for row in fields.array("transactions")? {
            let transaction = TransactionFactory.create_from_db_data(row)?;
            charge.add_transaction(transaction);
        }

        Ok(charge)
    }
}
