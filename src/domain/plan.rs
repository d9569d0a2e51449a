//! Recurrence plan entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::PlanId;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingType {
    #[default]
    Prepaid,
    Postpaid,
    ExactDay,
}

impl BillingType {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "PREPAID" => Ok(BillingType::Prepaid),
            "POSTPAID" => Ok(BillingType::Postpaid),
            "EXACT_DAY" => Ok(BillingType::ExactDay),
            other => Err(AppError::invalid_param(
                format!("{other} is not a valid BillingType!"),
                other,
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingType::Prepaid => "PREPAID",
            BillingType::Postpaid => "POSTPAID",
            BillingType::ExactDay => "EXACT_DAY",
        }
    }
}

impl fmt::Display for BillingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalType {
    Day,
    Week,
    Month,
    Year,
}

/// Billing period: every `count` `interval_type`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub interval_type: IntervalType,
    pub count: u32,
}

impl Interval {
    pub fn new(interval_type: &str, count: i64) -> Result<Self, AppError> {
        let interval_type = match interval_type {
            "day" => IntervalType::Day,
            "week" => IntervalType::Week,
            "month" => IntervalType::Month,
            "year" => IntervalType::Year,
            other => {
                return Err(AppError::invalid_param(
                    format!("{other} is not a valid interval type!"),
                    other,
                ))
            }
        };

        let count = u32::try_from(count)
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| {
                AppError::invalid_param(
                    format!("Interval count should be greater than 0: {count}"),
                    count.to_string(),
                )
            })?;

        Ok(Self {
            interval_type,
            count,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    Active,
    Inactive,
}

impl PlanStatus {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(PlanStatus::Active),
            "INACTIVE" => Ok(PlanStatus::Inactive),
            _ => Err(AppError::invalid_param(
                format!("{value} is not a valid PlanStatus!"),
                value,
            )),
        }
    }
}

/// A product bundled into the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubProduct {
    pub id: Option<i64>,
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub quantity: u32,
}

/// Every field is optional so that an empty payload maps to an empty plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Plan {
    pub id: Option<i64>,
    pub pagarme_id: Option<PlanId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub billing_type: BillingType,
    pub interval: Option<Interval>,
    pub product_id: Option<String>,
    pub credit_card: bool,
    pub boleto: bool,
    pub allow_installments: bool,
    pub status: Option<PlanStatus>,
    pub items: Vec<SubProduct>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
