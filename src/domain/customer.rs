use serde::Serialize;

use super::ids::CustomerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    #[default]
    Individual,
    Company,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Customer {
    /// Absent until the provider has registered the customer.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub pagarme_id: Option<CustomerId>,
    pub code: Option<String>,
    pub name: String,
    pub email: String,
    pub document: Option<String>,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_pagarme_id(mut self, id: CustomerId) -> Self {
        self.pagarme_id = Some(id);
        self
    }
}
