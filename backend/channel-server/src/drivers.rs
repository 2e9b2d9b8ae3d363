//! Production drivers wiring the channel workflows to the connector
//! integrations through the outbound HTTP client.

use async_trait::async_trait;
use common_enums::AttemptStatus;
use common_utils::errors::CustomResult;
use connector_integration::{Paynow, Stripe};
use domain_types::{
    connector_flow::{Authorize, CreateCheckoutSession, PSync},
    connector_types::{
        CheckoutSessionData, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData,
        PaymentsSyncData,
    },
    errors::ConnectorError,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    types::{Connectors, Proxy},
};
use error_stack::report;
use external_services::service::execute_connector_processing_step;
use interfaces::connector_types::{PaynowPaymentService, StripeCheckoutService};
use url::Url;

fn payment_flow_data(connectors: &Connectors, reference_id: String) -> PaymentFlowData {
    PaymentFlowData {
        connectors: connectors.clone(),
        reference_id,
        status: AttemptStatus::Started,
    }
}

fn failed_at_connector(error: ErrorResponse) -> error_stack::Report<ConnectorError> {
    report!(ConnectorError::FailedAtConnector {
        message: error.message,
        code: error.code,
    })
}

pub struct PaynowDriver {
    proxy: Proxy,
    connectors: Connectors,
}

impl PaynowDriver {
    pub fn new(proxy: Proxy, connectors: Connectors) -> Self {
        Self { proxy, connectors }
    }
}

#[async_trait]
impl PaynowPaymentService for PaynowDriver {
    async fn initiate_payment(
        &self,
        auth: &ConnectorAuthType,
        request: PaymentsAuthorizeData,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        let connector = Paynow;
        let router_data: RouterDataV2<
            Authorize,
            PaymentFlowData,
            PaymentsAuthorizeData,
            PaymentsResponseData,
        > = RouterDataV2::new(
            payment_flow_data(&self.connectors, request.reference_id.clone()),
            auth.clone(),
            request,
        );

        let router_data =
            execute_connector_processing_step(&self.proxy, &connector, router_data).await?;

        router_data.response.map_err(failed_at_connector)
    }

    async fn poll_transaction(
        &self,
        auth: &ConnectorAuthType,
        poll_url: &Url,
    ) -> CustomResult<AttemptStatus, ConnectorError> {
        let connector = Paynow;
        let router_data: RouterDataV2<
            PSync,
            PaymentFlowData,
            PaymentsSyncData,
            PaymentsResponseData,
        > = RouterDataV2::new(
            payment_flow_data(&self.connectors, String::new()),
            auth.clone(),
            PaymentsSyncData {
                poll_url: poll_url.clone(),
            },
        );

        let router_data =
            execute_connector_processing_step(&self.proxy, &connector, router_data).await?;

        match router_data.response {
            Ok(_) => Ok(router_data.resource_common_data.status),
            Err(error) => Err(failed_at_connector(error)),
        }
    }
}

pub struct StripeDriver {
    proxy: Proxy,
    connectors: Connectors,
}

impl StripeDriver {
    pub fn new(proxy: Proxy, connectors: Connectors) -> Self {
        Self { proxy, connectors }
    }
}

#[async_trait]
impl StripeCheckoutService for StripeDriver {
    async fn create_checkout_session(
        &self,
        auth: &ConnectorAuthType,
        request: CheckoutSessionData,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        let connector = Stripe;
        let router_data: RouterDataV2<
            CreateCheckoutSession,
            PaymentFlowData,
            CheckoutSessionData,
            PaymentsResponseData,
        > = RouterDataV2::new(
            payment_flow_data(&self.connectors, request.product_name.clone()),
            auth.clone(),
            request,
        );

        let router_data =
            execute_connector_processing_step(&self.proxy, &connector, router_data).await?;

        router_data.response.map_err(failed_at_connector)
    }
}
