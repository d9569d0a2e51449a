use serde_json::Value;

use super::fields::Fields;
use super::{ChargeFactory, EntityFactory};
use crate::domain::status::parse_code;
use crate::domain::{Order, OrderId, OrderStatus, PlatformOrder};
use crate::error::AppError;

#[derive(Debug, Default, Clone, Copy)]
pub struct OrderFactory;

impl OrderFactory {
    /// Builds a local order for a platform order the connector has no record
    /// of yet. The platform status code goes through the same lookup as
    /// provider codes.
    pub fn create_from_platform_data(
        &self,
        platform_order: PlatformOrder,
        pagarme_id: OrderId,
    ) -> Result<Order, AppError> {
        let status: OrderStatus = parse_code(&platform_order.status)?;

        let mut order = Order::new(platform_order.increment_id.clone(), status);
        order.pagarme_id = Some(pagarme_id);
        order.platform_order = Some(platform_order);
        Ok(order)
    }

    fn build(fields: &Fields<'_>, id_key: &str) -> Result<Order, AppError> {
        let status: OrderStatus = parse_code(&fields.required_string("status")?)?;
        let mut order = Order::new(fields.string("code").unwrap_or_default(), status);
        order.pagarme_id = fields.string(id_key).map(OrderId::new).transpose()?;
        Ok(order)
    }
}

impl EntityFactory for OrderFactory {
    type Entity = Order;

    fn create_from_post_data(&self, data: &Value) -> Result<Order, AppError> {
        let fields = Fields::of(data, "order")?;
        let mut order = Self::build(&fields, "id")?;

        for charge in fields.array("charges")? {
            order.add_charge(ChargeFactory.create_from_post_data(charge)?);
        }

        Ok(order)
    }

    fn create_from_db_data(&self, data: &Value) -> Result<Order, AppError> {
        let fields = Fields::of(data, "order")?;
        let mut order = Self::build(&fields, "mundipagg_id")?;
        order.id = fields.int("id")?;

        for charge in fields.array("charges")? {
            order.add_charge(ChargeFactory.create_from_db_data(charge)?);
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChargeStatus, OrderState};
    use serde_json::json;

    #[test]
    fn builds_order_with_charges() {
        let data = json!({
            "id": "or_ZdnB5BBTrTPaqG3o",
            "code": "100000042",
            "status": "paid",
            "charges": [
                { "id": "ch_d2kWy8aF6gT3nB0p", "amount": 1000, "status": "paid" },
                { "id": "ch_K1gJ5mLr0QxY7sPa", "amount": 500, "status": "processing" }
            ]
        });

        let order = OrderFactory.create_from_post_data(&data).unwrap();

        assert_eq!(order.pagarme_id.as_ref().unwrap().value(), "or_ZdnB5BBTrTPaqG3o");
        assert_eq!(order.code, "100000042");
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.charges.len(), 2);
        assert_eq!(order.charges[1].status, ChargeStatus::Processing);
        assert!(order.platform_order.is_none());
    }

    #[test]
    fn builds_order_from_platform_data() {
        let platform_order = PlatformOrder::new("100000042", OrderState::New, "pending");
        let pagarme_id = OrderId::new("or_ZdnB5BBTrTPaqG3o").unwrap();

        let order = OrderFactory
            .create_from_platform_data(platform_order.clone(), pagarme_id.clone())
            .unwrap();

        assert_eq!(order.code, "100000042");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.pagarme_id, Some(pagarme_id));
        assert_eq!(order.platform_order, Some(platform_order));
    }

    #[test]
    fn platform_status_must_be_known() {
        let platform_order = PlatformOrder::new("100000042", OrderState::Holded, "on_hold");
        let pagarme_id = OrderId::new("or_ZdnB5BBTrTPaqG3o").unwrap();

        let err = OrderFactory
            .create_from_platform_data(platform_order, pagarme_id)
            .unwrap_err();

        assert_eq!(err.to_string(), "on_hold is not a valid OrderStatus!");
    }

    #[test]
    fn builds_order_from_db_row() {
        let row = json!({
            "id": "5",
            "mundipagg_id": "or_ZdnB5BBTrTPaqG3o",
            "code": "100000042",
            "status": "canceled"
        });

        let order = OrderFactory.create_from_db_data(&row).unwrap();

        assert_eq!(order.id, Some(5));
        assert!(order.is_canceled());
        assert!(order.charges.is_empty());
    }
}
