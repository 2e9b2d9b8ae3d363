use common_enums::Currency;
use common_utils::{
    types::{AmountConvertor, MinorUnit, MinorUnitForConnector},
    Secret,
};
use domain_types::{
    connector_flow::CreateCheckoutSession,
    connector_types::{CheckoutSessionData, PaymentFlowData, PaymentsResponseData},
    errors::ConnectorError,
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
};
use error_stack::{report, ResultExt};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::ResponseRouterData;

// Auth
pub struct StripeAuthType {
    pub(super) api_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for StripeAuthType {
    type Error = error_stack::Report<ConnectorError>;
    fn try_from(item: &ConnectorAuthType) -> Result<Self, Self::Error> {
        if let ConnectorAuthType::HeaderKey { api_key } = item {
            Ok(Self {
                api_key: api_key.to_owned(),
            })
        } else {
            Err(ConnectorError::FailedToObtainAuthType.into())
        }
    }
}

#[derive(Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StripeCheckoutMode {
    #[default]
    Payment,
}

// Requests
//
// Checkout sessions take a single fixed line item; the nested bracket keys
// are spelled out through renames since the body is form-urlencoded.
#[derive(Debug, Serialize)]
pub struct CheckoutSessionRequest {
    #[serde(rename = "line_items[0][price_data][currency]")]
    pub currency: Currency,
    #[serde(rename = "line_items[0][price_data][unit_amount]")]
    pub unit_amount: MinorUnit,
    #[serde(rename = "line_items[0][price_data][product_data][name]")]
    pub product_name: String,
    #[serde(rename = "line_items[0][quantity]")]
    pub quantity: u32,
    pub mode: StripeCheckoutMode,
    pub success_url: String,
    pub cancel_url: String,
}

impl
    TryFrom<
        &RouterDataV2<
            CreateCheckoutSession,
            PaymentFlowData,
            CheckoutSessionData,
            PaymentsResponseData,
        >,
    > for CheckoutSessionRequest
{
    type Error = error_stack::Report<ConnectorError>;
    fn try_from(
        item: &RouterDataV2<
            CreateCheckoutSession,
            PaymentFlowData,
            CheckoutSessionData,
            PaymentsResponseData,
        >,
    ) -> Result<Self, Self::Error> {
        let unit_amount = MinorUnitForConnector
            .convert(item.request.minor_amount, item.request.currency)
            .change_context(ConnectorError::AmountConversionFailed)?;

        Ok(Self {
            currency: item.request.currency,
            unit_amount,
            product_name: item.request.product_name.clone(),
            quantity: 1,
            mode: StripeCheckoutMode::Payment,
            success_url: item.request.success_url.clone(),
            cancel_url: item.request.cancel_url.clone(),
        })
    }
}

// Responses
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutSessionResponse {
    pub id: String,
    pub url: Option<Url>,
}

/// Parsed session plus the raw payload the workflow logs verbatim.
#[derive(Clone, Debug)]
pub struct CheckoutSessionWithPayload {
    pub session: CheckoutSessionResponse,
    pub payload: serde_json::Value,
}

impl
    TryFrom<
        ResponseRouterData<
            CheckoutSessionWithPayload,
            RouterDataV2<
                CreateCheckoutSession,
                PaymentFlowData,
                CheckoutSessionData,
                PaymentsResponseData,
            >,
        >,
    >
    for RouterDataV2<CreateCheckoutSession, PaymentFlowData, CheckoutSessionData, PaymentsResponseData>
{
    type Error = error_stack::Report<ConnectorError>;
    fn try_from(
        item: ResponseRouterData<
            CheckoutSessionWithPayload,
            RouterDataV2<
                CreateCheckoutSession,
                PaymentFlowData,
                CheckoutSessionData,
                PaymentsResponseData,
            >,
        >,
    ) -> Result<Self, Self::Error> {
        let checkout_url = item
            .response
            .session
            .url
            .ok_or(report!(ConnectorError::MissingRequiredField {
                field_name: "url"
            }))?;

        let response = Ok(PaymentsResponseData::CheckoutResponse {
            resource_id: item.response.session.id,
            checkout_url,
            session_payload: item.response.payload,
            status_code: item.http_code,
        });

        Ok(Self {
            response,
            ..item.router_data
        })
    }
}

// Error
#[derive(Clone, Debug, Deserialize)]
pub struct StripeErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ErrorDetails {
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub message: Option<String>,
    pub decline_code: Option<String>,
    pub param: Option<String>,
}
