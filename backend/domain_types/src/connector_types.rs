//! Flow-specific request and response data moved between the channel
//! workflows and the connector integrations.

use common_enums::{AttemptStatus, Currency, PaymentMethod};
use common_utils::MinorUnit;
use url::Url;

use crate::types::Connectors;

/// Data common to every payment flow against a connector.
#[derive(Clone, Debug)]
pub struct PaymentFlowData {
    /// Connector endpoint parameters from configuration.
    pub connectors: Connectors,
    /// Merchant-side reference for the attempt (the invoice name).
    pub reference_id: String,
    pub status: AttemptStatus,
}

#[derive(Clone, Debug)]
pub struct PaymentsAuthorizeData {
    /// Merchant-side reference for the attempt (the invoice name).
    pub reference_id: String,
    /// Label of the single line item carried as additional info.
    pub description: String,
    pub minor_amount: MinorUnit,
    pub currency: Currency,
    pub payment_method: PaymentMethod,
    /// Email the gateway attaches to the payment for auth purposes.
    pub email: String,
    /// Subscriber number, required for mobile wallet methods.
    pub phone: Option<String>,
}

#[derive(Clone, Debug)]
pub struct PaymentsSyncData {
    pub poll_url: Url,
}

#[derive(Clone, Debug)]
pub struct CheckoutSessionData {
    pub minor_amount: MinorUnit,
    pub currency: Currency,
    /// Name of the single line item on the checkout session.
    pub product_name: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Clone, Debug)]
pub enum ResponseId {
    ConnectorTransactionId(String),
    NoResponseId,
}

#[derive(Clone, Debug)]
pub enum PaymentsResponseData {
    /// Outcome of a Paynow initiate/remote transaction.
    TransactionResponse {
        resource_id: ResponseId,
        /// Browser URL for web-redirect payments.
        redirection_data: Option<Url>,
        /// Human-readable completion steps for mobile wallet payments.
        instructions: Option<String>,
        poll_url: Option<Url>,
        status_code: u16,
    },
    /// Outcome of a Stripe checkout-session create.
    CheckoutResponse {
        resource_id: String,
        checkout_url: Url,
        /// The full session object as returned by the gateway.
        session_payload: serde_json::Value,
        status_code: u16,
    },
}
