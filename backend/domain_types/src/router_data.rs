use common_utils::Secret;
use serde::{Deserialize, Serialize};

/// Credentials as captured on the channel form, shaped for the connector.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum ConnectorAuthType {
    /// A single API key sent in a header (Stripe secret key).
    HeaderKey { api_key: Secret<String> },
    /// A key plus an account identifier sent in the body (Paynow
    /// integration key + integration id).
    BodyKey {
        api_key: Secret<String>,
        key1: Secret<String>,
    },
    NoKey,
}

/// Error reported by a connector, normalized for the workflow layer.
#[derive(Clone, Debug)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub code: String,
    pub message: String,
    pub reason: Option<String>,
}

impl ErrorResponse {
    pub fn new(status_code: u16, code: String, message: String) -> Self {
        Self {
            status_code,
            code,
            message,
            reason: None,
        }
    }
}
