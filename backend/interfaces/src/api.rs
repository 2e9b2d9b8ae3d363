//! Connector-wide behavior shared by every flow.

use common_enums::CurrencyUnit;
use common_utils::{errors::CustomResult, Maskable};
use domain_types::{
    errors::ConnectorError,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_response_types::Response,
    types::Connectors,
};

pub const NO_ERROR_CODE: &str = "No error code";
pub const NO_ERROR_MESSAGE: &str = "No error message";

pub trait ConnectorCommon {
    /// Name of the connector as it appears in configuration and logs.
    fn id(&self) -> &'static str;

    /// Unit in which this connector expects amounts on the wire.
    fn get_currency_unit(&self) -> CurrencyUnit;

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str;

    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(Vec::new())
    }

    /// Turn a non-success response body into a normalized [`ErrorResponse`].
    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        Ok(ErrorResponse {
            status_code: res.status_code,
            code: NO_ERROR_CODE.to_string(),
            message: NO_ERROR_MESSAGE.to_string(),
            reason: None,
        })
    }
}
