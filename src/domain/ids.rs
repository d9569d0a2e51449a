//! Provider-assigned identifiers.
//!
//! Every id the provider hands out is a fixed prefix followed by sixteen
//! alphanumeric characters (`ch_3Xq9...`). Constructing one from anything else
//! fails, so an id in hand is always well formed.

use std::fmt;

use serde::Serialize;

use crate::error::AppError;

const ID_BODY_LEN: usize = 16;

fn validate_id(kind: &str, prefix: &str, value: &str) -> Result<(), AppError> {
    let body = value.strip_prefix(prefix).ok_or_else(|| {
        AppError::invalid_param(format!("{value} is not a valid {kind}!"), value)
    })?;

    if body.len() != ID_BODY_LEN || !body.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return Err(AppError::invalid_param(
            format!("{value} is not a valid {kind}!"),
            value,
        ));
    }

    Ok(())
}

macro_rules! provider_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new(value: impl Into<String>) -> Result<Self, AppError> {
                let value = value.into();
                validate_id(stringify!($name), Self::PREFIX, &value)?;
                Ok(Self(value))
            }

            pub fn value(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

provider_id!(
    /// Id of a single authorization/settlement record.
    TransactionId,
    "tran_"
);
provider_id!(ChargeId, "ch_");
provider_id!(OrderId, "or_");
provider_id!(CustomerId, "cus_");
provider_id!(PlanId, "plan_");
provider_id!(
    /// Id of a card stored in the provider's wallet.
    CardId,
    "card_"
);
provider_id!(HookId, "hook_");
