use chrono::{DateTime, Utc};
use serde_json::Value;

use super::fields::Fields;
use super::{EntityFactory, API_DATETIME_FORMAT, DB_DATETIME_FORMAT};
use crate::domain::{BillingType, Interval, Plan, PlanId, PlanStatus, SubProduct};
use crate::error::AppError;

/// Plans are built both from the admin form and from rows. Every field is
/// optional: an empty object yields an empty plan billed `PREPAID`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanFactory;

impl PlanFactory {
    fn build(fields: &Fields<'_>) -> Result<Plan, AppError> {
        let mut plan = Plan {
            id: fields.int("id")?,
            pagarme_id: fields.string("plan_id").map(PlanId::new).transpose()?,
            name: fields.string("name"),
            description: fields.string("description"),
            product_id: fields.string("product_id"),
            credit_card: fields.bool("credit_card")?,
            boleto: fields.bool("boleto")?,
            allow_installments: fields.bool("installments")?,
            status: fields.string("status").as_deref().map(PlanStatus::parse).transpose()?,
            created_at: Self::timestamp(fields, "created_at")?,
            updated_at: Self::timestamp(fields, "updated_at")?,
            ..Plan::default()
        };

        if let Some(billing_type) = fields.string("billing_type") {
            plan.billing_type = BillingType::parse(&billing_type)?;
        }

        if let Some(interval_type) = fields.string("interval_type") {
            let count = fields.int("interval_count")?.unwrap_or(1);
            plan.interval = Some(Interval::new(&interval_type, count)?);
        }

        for item in fields.array("items")? {
            plan.items.push(Self::sub_product(item)?);
        }

        Ok(plan)
    }

    /// The admin form posts row-style timestamps; provider payloads use the
    /// API layout. Either is accepted.
    fn timestamp(fields: &Fields<'_>, key: &str) -> Result<Option<DateTime<Utc>>, AppError> {
        fields
            .datetime(key, DB_DATETIME_FORMAT)
            .or_else(|_| fields.datetime(key, API_DATETIME_FORMAT))
    }

    fn sub_product(data: &Value) -> Result<SubProduct, AppError> {
        let fields = Fields::of(data, "plan item")?;
        let quantity = fields.int("quantity")?.unwrap_or(1);

        Ok(SubProduct {
            id: fields.int("id")?,
            product_id: fields
                .string("product_id")
                .or_else(|| fields.string("productId")),
            name: fields.string("name"),
            quantity: u32::try_from(quantity).map_err(|_| {
                AppError::invalid_param(
                    format!("quantity should be positive: {quantity}"),
                    quantity.to_string(),
                )
            })?,
        })
    }
}

impl EntityFactory for PlanFactory {
    type Entity = Plan;

    fn create_from_post_data(&self, data: &Value) -> Result<Plan, AppError> {
        Self::build(&Fields::of(data, "plan")?)
    }

    fn create_from_db_data(&self, data: &Value) -> Result<Plan, AppError> {
        Self::build(&Fields::of(data, "plan")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IntervalType;
    use serde_json::json;

    fn plan_data() -> Value {
        json!({
            "id": 456654,
            "plan_id": "plan_45asDadb8Xd95451",
            "name": "Product Name",
            "description": "Product Description",
            "billing_type": "PREPAID",
            "credit_card": false,
            "boleto": true,
            "installments": false,
            "product_id": "8081",
            "created_at": "2019-10-01 10:12:00",
            "updated_at": "2019-10-01 10:12:00",
            "status": "ACTIVE",
            "interval_type": "month",
            "interval_count": 5,
            "items": [
                { "id": 1, "productId": 10 }
            ]
        })
    }

    #[test]
    fn builds_plan_from_post_data() {
        let plan = PlanFactory.create_from_post_data(&plan_data()).unwrap();

        assert_eq!(plan.id, Some(456654));
        assert_eq!(plan.pagarme_id.as_ref().unwrap().value(), "plan_45asDadb8Xd95451");
        assert_eq!(plan.name.as_deref(), Some("Product Name"));
        assert!(plan.boleto);
        assert!(!plan.credit_card);
        assert_eq!(plan.status, Some(PlanStatus::Active));
        let interval = plan.interval.unwrap();
        assert_eq!(interval.interval_type, IntervalType::Month);
        assert_eq!(interval.count, 5);
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].product_id.as_deref(), Some("10"));
        assert!(plan.created_at.is_some());
    }

    #[test]
    fn empty_payload_yields_empty_plan() {
        let plan = PlanFactory.create_from_post_data(&json!({})).unwrap();

        assert_eq!(plan.id, None);
        assert_eq!(plan.name, None);
        assert_eq!(plan.description, None);
        assert_eq!(plan.interval, None);
        assert_eq!(plan.pagarme_id, None);
        assert_eq!(plan.product_id, None);
        assert!(!plan.credit_card);
        assert!(!plan.boleto);
        assert_eq!(plan.status, None);
        assert_eq!(plan.billing_type.as_str(), "PREPAID");
        assert!(!plan.allow_installments);
        assert_eq!(plan.created_at, None);
        assert_eq!(plan.updated_at, None);
    }

    #[test]
    fn non_object_payload_is_not_a_plan() {
        assert!(PlanFactory.create_from_post_data(&json!("")).is_err());
        assert!(PlanFactory.create_from_db_data(&json!("")).is_err());
    }

    #[test]
    fn builds_plan_from_db_row() {
        let plan = PlanFactory.create_from_db_data(&plan_data()).unwrap();
        assert_eq!(plan.billing_type, BillingType::Prepaid);
        assert_eq!(plan.product_id.as_deref(), Some("8081"));
    }

    #[test]
    fn accepts_api_timestamps() {
        let mut data = plan_data();
        data["created_at"] = json!("2019-10-01T10:12:00");
        let plan = PlanFactory.create_from_post_data(&data).unwrap();
        assert!(plan.created_at.is_some());
    }

    #[test]
    fn rejects_invalid_interval() {
        let mut data = plan_data();
        data["interval_type"] = json!("decade");
        assert!(PlanFactory.create_from_post_data(&data).is_err());
    }
}
