use std::collections::HashMap;

use common_enums::{AttemptStatus, PaymentMethod};
use common_utils::{
    types::{AmountConvertor, StringMajorUnit, StringMajorUnitForConnector},
    PeekInterface, Secret,
};
use domain_types::{
    connector_flow::{Authorize, PSync},
    connector_types::{
        PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData, PaymentsSyncData, ResponseId,
    },
    errors::ConnectorError,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
};
use error_stack::{report, ResultExt};
use serde::Serialize;
use url::Url;

use crate::types::ResponseRouterData;

/// Marker the gateway expects in the `status` field of every request.
const STATUS_MESSAGE: &str = "Message";

// Auth
pub struct PaynowAuthType {
    pub(super) integration_id: Secret<String>,
    pub(super) integration_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for PaynowAuthType {
    type Error = error_stack::Report<ConnectorError>;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                integration_id: key1.to_owned(),
                integration_key: api_key.to_owned(),
            }),
            _ => Err(ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

/// Mobile wallet identifiers as the gateway spells them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum::AsRefStr, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaynowMobileMethod {
    Ecocash,
    Onemoney,
    Telecash,
    Innbucks,
}

impl TryFrom<PaymentMethod> for PaynowMobileMethod {
    type Error = error_stack::Report<ConnectorError>;
    fn try_from(method: PaymentMethod) -> Result<Self, Self::Error> {
        match method {
            PaymentMethod::EcoCash => Ok(Self::Ecocash),
            PaymentMethod::OneMoney => Ok(Self::Onemoney),
            PaymentMethod::TeleCash => Ok(Self::Telecash),
            PaymentMethod::InnBucks => Ok(Self::Innbucks),
            PaymentMethod::PaynowWebRedirect => Err(ConnectorError::MissingRequiredField {
                field_name: "method",
            }
            .into()),
        }
    }
}

// Requests
//
// Field order is the transmitted order; the integrity hash covers the values
// in exactly this order followed by the integration key.
#[derive(Debug, Serialize)]
pub struct PaynowPaymentsRequest {
    pub id: Secret<String>,
    pub reference: String,
    pub amount: StringMajorUnit,
    pub additionalinfo: String,
    pub returnurl: String,
    pub resulturl: String,
    pub authemail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<PaynowMobileMethod>,
    pub status: String,
    pub hash: String,
}

impl TryFrom<&RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>>
    for PaynowPaymentsRequest
{
    type Error = error_stack::Report<ConnectorError>;
    fn try_from(
        item: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let auth = PaynowAuthType::try_from(&item.connector_auth_type)?;
        let amount = StringMajorUnitForConnector
            .convert(item.request.minor_amount, item.request.currency)
            .change_context(ConnectorError::AmountConversionFailed)?;

        let (phone, method) = if item.request.payment_method.is_mobile() {
            let phone = item
                .request
                .phone
                .clone()
                .ok_or(report!(ConnectorError::MissingRequiredField {
                    field_name: "phone"
                }))?;
            (
                Some(phone),
                Some(PaynowMobileMethod::try_from(item.request.payment_method)?),
            )
        } else {
            (None, None)
        };

        let paynow_params = &item.resource_common_data.connectors.paynow;

        Ok(Self::new(
            auth,
            item.request.reference_id.clone(),
            amount,
            item.request.description.clone(),
            paynow_params.return_url.clone(),
            paynow_params.result_url.clone(),
            item.request.email.clone(),
            phone,
            method,
        ))
    }
}

impl PaynowPaymentsRequest {
    #[allow(clippy::too_many_arguments)]
    fn new(
        auth: PaynowAuthType,
        reference: String,
        amount: StringMajorUnit,
        additionalinfo: String,
        returnurl: String,
        resulturl: String,
        authemail: String,
        phone: Option<String>,
        method: Option<PaynowMobileMethod>,
    ) -> Self {
        let mut values: Vec<&str> = vec![
            auth.integration_id.peek(),
            &reference,
            amount.get_amount_as_string(),
            &additionalinfo,
            &returnurl,
            &resulturl,
            &authemail,
        ];
        if let Some(phone) = &phone {
            values.push(phone);
        }
        if let Some(method) = &method {
            values.push(method.as_ref());
        }
        values.push(STATUS_MESSAGE);
        let hash = generate_hash(&values, &auth.integration_key);

        Self {
            id: auth.integration_id,
            reference,
            amount,
            additionalinfo,
            returnurl,
            resulturl,
            authemail,
            phone,
            method,
            status: STATUS_MESSAGE.to_string(),
            hash,
        }
    }
}

/// SHA-512 over the transmitted values in order plus the integration key,
/// rendered as uppercase hex — the gateway's message integrity check.
pub(crate) fn generate_hash(values: &[&str], integration_key: &Secret<String>) -> String {
    let mut data = String::new();
    for value in values {
        data.push_str(value);
    }
    data.push_str(integration_key.peek());

    let digest = ring::digest::digest(&ring::digest::SHA512, data.as_bytes());
    hex::encode_upper(digest.as_ref())
}

// Responses
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
pub enum PaynowResponseStatus {
    Ok,
    Error,
}

#[derive(Clone, Debug)]
pub struct PaynowPaymentsResponse {
    pub status: PaynowResponseStatus,
    pub browser_url: Option<Url>,
    pub poll_url: Option<Url>,
    pub instructions: Option<String>,
    pub error: Option<String>,
    pub hash: Option<String>,
}

fn parse_url_fields(bytes: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(bytes)
        .into_owned()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect()
}

fn parse_optional_url(
    fields: &HashMap<String, String>,
    key: &str,
) -> Result<Option<Url>, error_stack::Report<ConnectorError>> {
    fields
        .get(key)
        .map(|value| Url::parse(value))
        .transpose()
        .change_context(ConnectorError::ResponseDeserializationFailed)
}

impl PaynowPaymentsResponse {
    pub fn parse(bytes: &[u8]) -> Result<Self, error_stack::Report<ConnectorError>> {
        let fields = parse_url_fields(bytes);
        let status = fields
            .get("status")
            .ok_or(report!(ConnectorError::ResponseDeserializationFailed))?
            .parse::<PaynowResponseStatus>()
            .change_context(ConnectorError::ResponseDeserializationFailed)?;

        Ok(Self {
            status,
            browser_url: parse_optional_url(&fields, "browserurl")?,
            poll_url: parse_optional_url(&fields, "pollurl")?,
            instructions: fields.get("instructions").cloned(),
            error: fields.get("error").cloned(),
            hash: fields.get("hash").cloned(),
        })
    }
}

/// Transaction status vocabulary of the gateway's poll endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
pub enum PaynowPaymentStatus {
    Paid,
    #[strum(serialize = "Awaiting Delivery")]
    AwaitingDelivery,
    Delivered,
    Created,
    Sent,
    Cancelled,
    Disputed,
    Refunded,
    Failed,
}

impl From<PaynowPaymentStatus> for AttemptStatus {
    fn from(item: PaynowPaymentStatus) -> Self {
        match item {
            PaynowPaymentStatus::Paid
            | PaynowPaymentStatus::AwaitingDelivery
            | PaynowPaymentStatus::Delivered => Self::Charged,
            PaynowPaymentStatus::Created | PaynowPaymentStatus::Sent => {
                Self::AuthenticationPending
            }
            PaynowPaymentStatus::Disputed | PaynowPaymentStatus::Refunded => Self::Pending,
            PaynowPaymentStatus::Cancelled | PaynowPaymentStatus::Failed => Self::Failure,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PaynowSyncResponse {
    pub status: PaynowPaymentStatus,
    pub paynow_reference: Option<String>,
    pub hash: Option<String>,
}

impl PaynowSyncResponse {
    pub fn parse(bytes: &[u8]) -> Result<Self, error_stack::Report<ConnectorError>> {
        let fields = parse_url_fields(bytes);
        let status = fields
            .get("status")
            .ok_or(report!(ConnectorError::ResponseDeserializationFailed))?
            .parse::<PaynowPaymentStatus>()
            .change_context(ConnectorError::ResponseDeserializationFailed)?;

        Ok(Self {
            status,
            paynow_reference: fields.get("paynowreference").cloned(),
            hash: fields.get("hash").cloned(),
        })
    }
}

// Response TryFrom implementations
impl
    TryFrom<
        ResponseRouterData<
            PaynowPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = error_stack::Report<ConnectorError>;
    fn try_from(
        item: ResponseRouterData<
            PaynowPaymentsResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        match item.response.status {
            PaynowResponseStatus::Ok => {
                let poll_url = item
                    .response
                    .poll_url
                    .ok_or(report!(ConnectorError::MissingRequiredField {
                        field_name: "pollurl"
                    }))?;
                let response = Ok(PaymentsResponseData::TransactionResponse {
                    resource_id: ResponseId::NoResponseId,
                    redirection_data: item.response.browser_url,
                    instructions: item.response.instructions,
                    poll_url: Some(poll_url),
                    status_code: item.http_code,
                });

                Ok(Self {
                    response,
                    resource_common_data: PaymentFlowData {
                        status: AttemptStatus::AuthenticationPending,
                        ..item.router_data.resource_common_data
                    },
                    ..item.router_data
                })
            }
            PaynowResponseStatus::Error => {
                let message = item
                    .response
                    .error
                    .unwrap_or_else(|| interfaces::api::NO_ERROR_MESSAGE.to_string());

                Ok(Self {
                    response: Err(ErrorResponse {
                        status_code: item.http_code,
                        code: PaynowResponseStatus::Error.to_string(),
                        message: message.clone(),
                        reason: Some(message),
                    }),
                    resource_common_data: PaymentFlowData {
                        status: AttemptStatus::Failure,
                        ..item.router_data.resource_common_data
                    },
                    ..item.router_data
                })
            }
        }
    }
}

impl
    TryFrom<
        ResponseRouterData<
            PaynowSyncResponse,
            RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        >,
    > for RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
{
    type Error = error_stack::Report<ConnectorError>;
    fn try_from(
        item: ResponseRouterData<
            PaynowSyncResponse,
            RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let resource_id = match item.response.paynow_reference {
            Some(reference) => ResponseId::ConnectorTransactionId(reference),
            None => ResponseId::NoResponseId,
        };
        let response = Ok(PaymentsResponseData::TransactionResponse {
            resource_id,
            redirection_data: None,
            instructions: None,
            poll_url: Some(item.router_data.request.poll_url.clone()),
            status_code: item.http_code,
        });

        Ok(Self {
            response,
            resource_common_data: PaymentFlowData {
                status: AttemptStatus::from(item.response.status),
                ..item.router_data.resource_common_data
            },
            ..item.router_data
        })
    }
}
