//! Channel-facing driver contracts. The channel workflows depend on these
//! traits only, so tests can stand in a scripted gateway.

use async_trait::async_trait;
use common_enums::AttemptStatus;
use common_utils::errors::CustomResult;
use domain_types::{
    connector_types::{CheckoutSessionData, PaymentsAuthorizeData, PaymentsResponseData},
    errors::ConnectorError,
    router_data::ConnectorAuthType,
};
use url::Url;

/// Payment creation and status polling against the Paynow gateway.
#[async_trait]
pub trait PaynowPaymentService: Send + Sync {
    /// Create a payment, selecting web redirect or mobile wallet from the
    /// request's payment method. A gateway-declined payment surfaces as a
    /// `FailedAtConnector` report carrying the gateway's error text.
    async fn initiate_payment(
        &self,
        auth: &ConnectorAuthType,
        request: PaymentsAuthorizeData,
    ) -> CustomResult<PaymentsResponseData, ConnectorError>;

    /// Query the gateway-issued poll endpoint for the transaction status.
    async fn poll_transaction(
        &self,
        auth: &ConnectorAuthType,
        poll_url: &Url,
    ) -> CustomResult<AttemptStatus, ConnectorError>;
}

/// Checkout session creation against the Stripe gateway.
#[async_trait]
pub trait StripeCheckoutService: Send + Sync {
    async fn create_checkout_session(
        &self,
        auth: &ConnectorAuthType,
        request: CheckoutSessionData,
    ) -> CustomResult<PaymentsResponseData, ConnectorError>;
}
