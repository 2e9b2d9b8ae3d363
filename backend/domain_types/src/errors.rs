//! Error contexts raised across the connector and application boundaries.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConnectorError {
    #[error("Error while obtaining URL for the integration")]
    FailedToObtainIntegrationUrl,
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to handle connector response")]
    ResponseHandlingFailed,
    #[error("The connector returned an unexpected response: {0}")]
    UnexpectedResponseError(String),
    #[error("Failed at the connector's end with code '{code}': {message}")]
    FailedAtConnector { message: String, code: String },
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Amount conversion failed")]
    AmountConversionFailed,
    #[error("Failed to execute a processing step: {0}")]
    ProcessingStepFailed(String),
    #[error("Did not receive a timely response from the connector")]
    RequestTimeoutReceived,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
    #[error("Failed to send the request to the connector: {0}")]
    RequestNotSent(String),
    #[error("Failed to decode the response body")]
    ResponseDecodingFailed,
    #[error("Did not receive a timely response from the connector")]
    RequestTimeoutReceived,
}

/// Body of an application-level error surfaced over HTTP.
#[derive(Clone, Debug, Serialize)]
pub struct ApiError {
    pub sub_code: String,
    pub error_identifier: u16,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_object: Option<serde_json::Value>,
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum ApplicationErrorResponse {
    #[error("Unauthorized: {}", .0.error_message)]
    Unauthorized(ApiError),
    #[error("Bad request: {}", .0.error_message)]
    BadRequest(ApiError),
    #[error("Not found: {}", .0.error_message)]
    NotFound(ApiError),
    #[error("Internal server error: {}", .0.error_message)]
    InternalServerError(ApiError),
}
