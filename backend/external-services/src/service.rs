//! Dispatches connector-built requests to the gateways and routes the raw
//! responses back through the connector's response handling.

use std::time::Duration;

use common_utils::{
    errors::CustomResult,
    request::{Method, Request},
};
use domain_types::{
    errors::{ApiClientError, ConnectorError},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Proxy,
};
use error_stack::{report, ResultExt};
use interfaces::connector_integration_v2::BoxedConnectorIntegrationV2;
use once_cell::sync::OnceCell;
use reqwest::Client;

use crate::shared_metrics as metrics;

const DEFAULT_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

static DEFAULT_CLIENT: OnceCell<Client> = OnceCell::new();

/// The shared outbound client. Constructed once, proxy-aware, connection
/// pooling left to reqwest.
pub fn get_client(proxy: &Proxy) -> CustomResult<Client, ApiClientError> {
    DEFAULT_CLIENT
        .get_or_try_init(|| construct_client(proxy))
        .cloned()
}

fn construct_client(proxy: &Proxy) -> CustomResult<Client, ApiClientError> {
    let mut builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy
                .idle_pool_connection_timeout
                .unwrap_or(DEFAULT_POOL_IDLE_TIMEOUT_SECS),
        ));

    if let Some(url) = proxy.http_url.as_deref() {
        builder = builder.proxy(
            reqwest::Proxy::http(url).change_context(ApiClientError::ClientConstructionFailed)?,
        );
    }
    if let Some(url) = proxy.https_url.as_deref() {
        builder = builder.proxy(
            reqwest::Proxy::https(url).change_context(ApiClientError::ClientConstructionFailed)?,
        );
    }

    builder
        .build()
        .change_context(ApiClientError::ClientConstructionFailed)
}

pub async fn send_request(client: &Client, request: Request) -> CustomResult<Response, ApiClientError> {
    metrics::EXTERNAL_REQUEST_COUNT.inc();
    let timer = metrics::EXTERNAL_REQUEST_LATENCY.start_timer();

    tracing::info!(url = %request.url, method = %request.method, "calling connector");

    let method = match request.method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    };

    let mut request_builder = client.request(method, &request.url);
    for (name, value) in request.get_headers_map() {
        request_builder = request_builder.header(name, value);
    }
    if let Some(body) = &request.body {
        request_builder = request_builder.body(body.get_inner_value());
    }

    let response = request_builder.send().await.map_err(|error| {
        metrics::EXTERNAL_REQUEST_FAILURES.inc();
        if error.is_timeout() {
            report!(ApiClientError::RequestTimeoutReceived)
        } else {
            report!(ApiClientError::RequestNotSent(error.to_string()))
        }
    })?;

    let status_code = response.status().as_u16();
    let headers = Some(response.headers().to_owned());
    let body = response
        .bytes()
        .await
        .change_context(ApiClientError::ResponseDecodingFailed)?;

    timer.observe_duration();

    Ok(Response {
        headers,
        response: body,
        status_code,
    })
}

/// Run one connector flow end to end: build the wire request, send it, and
/// hand the response to the connector for interpretation. Non-2xx responses
/// land in the router data's `response` as a normalized error rather than
/// failing the call.
pub async fn execute_connector_processing_step<F, ResourceCommonData, Req, Res>(
    proxy: &Proxy,
    connector_integration: BoxedConnectorIntegrationV2<'_, F, ResourceCommonData, Req, Res>,
    router_data: RouterDataV2<F, ResourceCommonData, Req, Res>,
) -> CustomResult<RouterDataV2<F, ResourceCommonData, Req, Res>, ConnectorError>
where
    F: Clone,
    ResourceCommonData: Clone,
    Req: Clone,
    Res: Clone,
{
    let request = match connector_integration.build_request_v2(&router_data)? {
        Some(request) => request,
        None => return Ok(router_data),
    };

    let client = get_client(proxy)
        .map_err(|error| error.change_context(ConnectorError::RequestEncodingFailed))?;

    let response = send_request(&client, request).await.map_err(|error| {
        if matches!(
            error.current_context(),
            ApiClientError::RequestTimeoutReceived
        ) {
            error.change_context(ConnectorError::RequestTimeoutReceived)
        } else {
            error.change_context(ConnectorError::ProcessingStepFailed(
                "failed to reach the connector".to_string(),
            ))
        }
    })?;

    tracing::info!(status_code = response.status_code, "connector responded");

    if (200..300).contains(&response.status_code) {
        connector_integration.handle_response_v2(&router_data, response)
    } else {
        let error_response = connector_integration.get_error_response_v2(response)?;
        let mut router_data = router_data;
        router_data.response = Err(error_response);
        Ok(router_data)
    }
}
