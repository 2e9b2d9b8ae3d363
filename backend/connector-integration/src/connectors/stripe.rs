#[cfg(test)]
mod test;
pub mod transformers;

use common_enums::CurrencyUnit;
use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    request::{Method, RequestContent},
    Mask, Maskable, PeekInterface,
};
use domain_types::{
    connector_flow::CreateCheckoutSession,
    connector_types::{CheckoutSessionData, PaymentFlowData, PaymentsResponseData},
    errors::ConnectorError,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Connectors,
};
use error_stack::ResultExt;
use interfaces::{
    api::{ConnectorCommon, NO_ERROR_CODE, NO_ERROR_MESSAGE},
    connector_integration_v2::ConnectorIntegrationV2,
};
use transformers::{self as stripe, CheckoutSessionRequest, StripeAuthType};

use crate::types::ResponseRouterData;

pub(crate) mod headers {
    pub(crate) const AUTHORIZATION: &str = "Authorization";
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}

pub mod auth_headers {
    pub const STRIPE_API_VERSION: &str = "stripe-version";
    pub const STRIPE_VERSION: &str = "2022-11-15";
}

#[derive(Clone, Debug, Default)]
pub struct Stripe;

impl ConnectorCommon for Stripe {
    fn id(&self) -> &'static str {
        "stripe"
    }

    fn get_currency_unit(&self) -> CurrencyUnit {
        CurrencyUnit::Minor
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.stripe.base_url.as_ref()
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        let auth = StripeAuthType::try_from(auth_type)?;
        Ok(vec![(
            headers::AUTHORIZATION.to_string(),
            format!("Bearer {}", auth.api_key.peek()).into_masked(),
        )])
    }

    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        let response: stripe::StripeErrorResponse = res
            .response
            .parse_struct("StripeErrorResponse")
            .change_context(ConnectorError::ResponseDeserializationFailed)?;

        Ok(ErrorResponse {
            status_code: res.status_code,
            code: response
                .error
                .code
                .unwrap_or_else(|| NO_ERROR_CODE.to_string()),
            message: response
                .error
                .message
                .clone()
                .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
            reason: response.error.message,
        })
    }
}

impl
    ConnectorIntegrationV2<
        CreateCheckoutSession,
        PaymentFlowData,
        CheckoutSessionData,
        PaymentsResponseData,
    > for Stripe
{
    fn get_headers(
        &self,
        req: &RouterDataV2<
            CreateCheckoutSession,
            PaymentFlowData,
            CheckoutSessionData,
            PaymentsResponseData,
        >,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        let mut header = vec![
            (
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            ),
            (
                auth_headers::STRIPE_API_VERSION.to_string(),
                auth_headers::STRIPE_VERSION.to_string().into(),
            ),
        ];
        let mut api_key = self.get_auth_header(&req.connector_auth_type)?;
        header.append(&mut api_key);
        Ok(header)
    }

    fn get_http_method(&self) -> Method {
        Method::Post
    }

    fn get_url(
        &self,
        req: &RouterDataV2<
            CreateCheckoutSession,
            PaymentFlowData,
            CheckoutSessionData,
            PaymentsResponseData,
        >,
    ) -> CustomResult<String, ConnectorError> {
        Ok(format!(
            "{}{}",
            self.base_url(&req.resource_common_data.connectors),
            "v1/checkout/sessions"
        ))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<
            CreateCheckoutSession,
            PaymentFlowData,
            CheckoutSessionData,
            PaymentsResponseData,
        >,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let connector_req = CheckoutSessionRequest::try_from(req)?;
        Ok(Some(RequestContent::FormUrlEncoded(Box::new(connector_req))))
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<
            CreateCheckoutSession,
            PaymentFlowData,
            CheckoutSessionData,
            PaymentsResponseData,
        >,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<
            CreateCheckoutSession,
            PaymentFlowData,
            CheckoutSessionData,
            PaymentsResponseData,
        >,
        ConnectorError,
    > {
        let session_payload: serde_json::Value = res
            .response
            .parse_struct("CheckoutSessionPayload")
            .change_context(ConnectorError::ResponseDeserializationFailed)?;
        let response: stripe::CheckoutSessionResponse =
            serde_json::from_value(session_payload.clone())
                .change_context(ConnectorError::ResponseDeserializationFailed)?;

        RouterDataV2::try_from(ResponseRouterData {
            response: stripe::CheckoutSessionWithPayload {
                session: response,
                payload: session_payload,
            },
            router_data: data.clone(),
            http_code: res.status_code,
        })
    }
}
