use std::marker::PhantomData;

use crate::router_data::{ConnectorAuthType, ErrorResponse};

/// Everything a connector integration needs to run one flow: common flow
/// data, credentials, the flow-specific request, and (after the call) the
/// flow-specific response.
#[derive(Clone, Debug)]
pub struct RouterDataV2<Flow, ResourceCommonData, FlowSpecificRequest, FlowSpecificResponse> {
    pub flow: PhantomData<Flow>,
    pub resource_common_data: ResourceCommonData,
    pub connector_auth_type: ConnectorAuthType,
    pub request: FlowSpecificRequest,
    pub response: Result<FlowSpecificResponse, ErrorResponse>,
}

impl<Flow, ResourceCommonData, FlowSpecificRequest, FlowSpecificResponse>
    RouterDataV2<Flow, ResourceCommonData, FlowSpecificRequest, FlowSpecificResponse>
{
    pub fn new(
        resource_common_data: ResourceCommonData,
        connector_auth_type: ConnectorAuthType,
        request: FlowSpecificRequest,
    ) -> Self {
        Self {
            flow: PhantomData,
            resource_common_data,
            connector_auth_type,
            request,
            response: Err(ErrorResponse::new(
                0,
                "NO_RESPONSE".to_string(),
                "The connector has not been called yet".to_string(),
            )),
        }
    }
}
