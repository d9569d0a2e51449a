use serde_json::Value;

use super::fields::Fields;
use super::EntityFactory;
use crate::domain::{Customer, CustomerId, CustomerType};
use crate::error::AppError;

#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerFactory;

impl CustomerFactory {
    fn build(fields: &Fields<'_>, id_key: &str) -> Result<Customer, AppError> {
        let customer_type = match fields.string("type").as_deref() {
            None | Some("individual") => CustomerType::Individual,
            Some("company") => CustomerType::Company,
            Some(other) => {
                return Err(AppError::invalid_param(
                    format!("{other} is not a valid CustomerType!"),
                    other,
                ))
            }
        };

        Ok(Customer {
            pagarme_id: fields.string(id_key).map(CustomerId::new).transpose()?,
            code: fields.string("code"),
            name: fields.string("name").unwrap_or_default(),
            email: fields.string("email").unwrap_or_default(),
            document: fields.string("document"),
            customer_type,
        })
    }
}

impl EntityFactory for CustomerFactory {
    type Entity = Customer;

    fn create_from_post_data(&self, data: &Value) -> Result<Customer, AppError> {
        Self::build(&Fields::of(data, "customer")?, "id")
    }

    fn create_from_db_data(&self, data: &Value) -> Result<Customer, AppError> {
        Self::build(&Fields::of(data, "customer")?, "mundipagg_id")
    }
}
