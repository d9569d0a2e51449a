//! Enumerated values exchanged with the provider.
//!
//! On the wire every value is a snake_case code (`waiting_payment`). Lookup
//! goes through the camelCase name (`waitingPayment`), the same name the
//! provider SDKs use for their constants.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::AppError;

/// An enumeration that can be resolved from a provider code.
pub trait ProviderCode: Sized + Copy {
    /// Type name used in error messages.
    const KIND: &'static str;

    fn from_name(name: &str) -> Option<Self>;
    fn name(&self) -> &'static str;
    fn code(&self) -> &'static str;
}

/// `authorized_pending_capture` -> `authorizedPendingCapture`.
pub fn snake_to_camel(code: &str) -> String {
    let mut parts = code.split('_');
    let mut name = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

/// Resolves a snake_case provider code, failing with an invalid-param error
/// naming the code when it is not part of `T`.
pub fn parse_code<T: ProviderCode>(code: &str) -> Result<T, AppError> {
    T::from_name(&snake_to_camel(code)).ok_or_else(|| {
        AppError::invalid_param(format!("{code} is not a valid {}!", T::KIND), code)
    })
}

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $camel:literal, $code:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];
        }

        impl ProviderCode for $name {
            const KIND: &'static str = stringify!($name);

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($camel => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $camel,)+
                }
            }

            fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }
    };
}

coded_enum!(
    TransactionStatus {
        AuthorizedPendingCapture => "authorizedPendingCapture", "authorized_pending_capture";
        Captured => "captured", "captured";
        PartialCapture => "partialCapture", "partial_capture";
        NotAuthorized => "notAuthorized", "not_authorized";
        Voided => "voided", "voided";
        PartialVoid => "partialVoid", "partial_void";
        Refunded => "refunded", "refunded";
        PartialRefunded => "partialRefunded", "partial_refunded";
        WaitingPayment => "waitingPayment", "waiting_payment";
        Pending => "pending", "pending";
        Paid => "paid", "paid";
        Underpaid => "underpaid", "underpaid";
        Overpaid => "overpaid", "overpaid";
        Generated => "generated", "generated";
        WithError => "withError", "with_error";
        Failed => "failed", "failed";
        Chargedback => "chargedback", "chargedback";
    }
);

coded_enum!(
    TransactionType {
        CreditCard => "creditCard", "credit_card";
        DebitCard => "debitCard", "debit_card";
        Boleto => "boleto", "boleto";
        Voucher => "voucher", "voucher";
        Pix => "pix", "pix";
    }
);

coded_enum!(
    ChargeStatus {
        Pending => "pending", "pending";
        Processing => "processing", "processing";
        Paid => "paid", "paid";
        Underpaid => "underpaid", "underpaid";
        Overpaid => "overpaid", "overpaid";
        Canceled => "canceled", "canceled";
        Failed => "failed", "failed";
        Chargedback => "chargedback", "chargedback";
    }
);

impl ChargeStatus {
    /// An order cannot be considered paid while any charge is in one of these.
    pub fn blocks_payment(&self) -> bool {
        matches!(self, ChargeStatus::Pending | ChargeStatus::Processing)
    }
}

coded_enum!(
    /// Provider-side status of an order.
    OrderStatus {
        Pending => "pending", "pending";
        Processing => "processing", "processing";
        Paid => "paid", "paid";
        Canceled => "canceled", "canceled";
        Failed => "failed", "failed";
    }
);

coded_enum!(
    /// Lifecycle state of the order inside the host platform.
    OrderState {
        New => "new", "new";
        PendingPayment => "pendingPayment", "pending_payment";
        Processing => "processing", "processing";
        Complete => "complete", "complete";
        Closed => "closed", "closed";
        Canceled => "canceled", "canceled";
        Holded => "holded", "holded";
        PaymentReview => "paymentReview", "payment_review";
    }
);

coded_enum!(
    /// Action part of an `order.*` webhook type.
    OrderAction {
        Created => "created", "created";
        Paid => "paid", "paid";
        Canceled => "canceled", "canceled";
        PaymentFailed => "paymentFailed", "payment_failed";
        Closed => "closed", "closed";
    }
);
