//! Connector endpoint parameters and outbound proxy settings, deserialized
//! from the service configuration.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Connectors {
    pub paynow: PaynowParams,
    pub stripe: ConnectorParams,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ConnectorParams {
    pub base_url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PaynowParams {
    pub base_url: String,
    /// Where the gateway sends the payer's browser back after payment.
    pub return_url: String,
    /// Where the gateway posts the server-to-server status update.
    pub result_url: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
}
