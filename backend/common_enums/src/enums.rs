use serde::{Deserialize, Serialize};

/// Whether a connector expects amounts in the base (major) or minor unit of
/// the transaction currency.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CurrencyUnit {
    Base,
    Minor,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Zwg,
}

impl Currency {
    /// Number of digits after the decimal point in the currency's base unit.
    pub const fn number_of_decimal_digits(self) -> u32 {
        match self {
            Self::Usd | Self::Zwg => 2,
        }
    }
}

/// Status of a payment attempt as understood by the core, independent of any
/// one gateway's status vocabulary.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttemptStatus {
    #[default]
    Started,
    AuthenticationPending,
    Pending,
    Charged,
    Failure,
}

impl AttemptStatus {
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Charged)
    }
}

/// Payment method selectable on the Paynow channel form. Serialized exactly
/// as the form labels so persisted snapshots and request payloads match the
/// view's option values.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum PaymentMethod {
    #[serde(rename = "Paynow (Web Redirect)")]
    #[strum(serialize = "Paynow (Web Redirect)")]
    PaynowWebRedirect,
    #[default]
    EcoCash,
    OneMoney,
    TeleCash,
    InnBucks,
}

impl PaymentMethod {
    /// Mobile wallet methods are submitted with a subscriber phone number;
    /// the web redirect method is not.
    pub const fn is_mobile(self) -> bool {
        !matches!(self, Self::PaynowWebRedirect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_round_trips_form_labels() {
        let method: PaymentMethod = serde_json::from_str("\"Paynow (Web Redirect)\"").unwrap();
        assert_eq!(method, PaymentMethod::PaynowWebRedirect);
        assert!(!method.is_mobile());

        let method: PaymentMethod = serde_json::from_str("\"EcoCash\"").unwrap();
        assert_eq!(method, PaymentMethod::EcoCash);
        assert!(method.is_mobile());
    }

    #[test]
    fn currency_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        assert_eq!(Currency::Usd.to_string(), "USD");
    }
}
