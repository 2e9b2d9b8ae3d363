//! Shared scaffolding for the channel flow tests: scripted gateway drivers
//! and an app wired against in-memory stores.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use channel_server::{
    configs::Config,
    http::{create_router, AppState},
    storage::in_memory::{InMemorySessionCache, InMemoryUserStore},
};
use common_enums::AttemptStatus;
use common_utils::errors::CustomResult;
use domain_types::{
    connector_types::{
        CheckoutSessionData, PaymentsAuthorizeData, PaymentsResponseData, ResponseId,
    },
    errors::ConnectorError,
    router_data::ConnectorAuthType,
    user::UserRecord,
};
use error_stack::report;
use interfaces::connector_types::{PaynowPaymentService, StripeCheckoutService};
use tower::ServiceExt;
use url::Url;

pub const MOCK_POLL_URL: &str = "https://www.paynow.co.zw/interface/poll/abc123";
pub const MOCK_CHECKOUT_URL: &str = "https://checkout.stripe.com/c/pay/cs_test_a1b2";

#[derive(Default)]
pub struct ScriptedPaynowGateway {
    pub decline_with: Option<String>,
    pub paid: bool,
}

#[async_trait]
impl PaynowPaymentService for ScriptedPaynowGateway {
    async fn initiate_payment(
        &self,
        _auth: &ConnectorAuthType,
        request: PaymentsAuthorizeData,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        if let Some(message) = &self.decline_with {
            return Err(report!(ConnectorError::FailedAtConnector {
                message: message.clone(),
                code: "Error".to_string(),
            }));
        }

        let mobile = request.payment_method.is_mobile();
        Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::NoResponseId,
            redirection_data: (!mobile)
                .then(|| Url::parse("https://www.paynow.co.zw/payment/123").unwrap()),
            instructions: mobile.then(|| "Dial *151*2*4# and approve the payment".to_string()),
            poll_url: Some(Url::parse(MOCK_POLL_URL).unwrap()),
            status_code: 200,
        })
    }

    async fn poll_transaction(
        &self,
        _auth: &ConnectorAuthType,
        _poll_url: &Url,
    ) -> CustomResult<AttemptStatus, ConnectorError> {
        Ok(if self.paid {
            AttemptStatus::Charged
        } else {
            AttemptStatus::AuthenticationPending
        })
    }
}

#[derive(Default)]
pub struct ScriptedStripeGateway {
    pub decline_with: Option<String>,
}

#[async_trait]
impl StripeCheckoutService for ScriptedStripeGateway {
    async fn create_checkout_session(
        &self,
        _auth: &ConnectorAuthType,
        request: CheckoutSessionData,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        if let Some(message) = &self.decline_with {
            return Err(report!(ConnectorError::FailedAtConnector {
                message: message.clone(),
                code: "invalid_request_error".to_string(),
            }));
        }

        Ok(PaymentsResponseData::CheckoutResponse {
            resource_id: "cs_test_a1b2".to_string(),
            checkout_url: Url::parse(MOCK_CHECKOUT_URL).unwrap(),
            session_payload: serde_json::json!({
                "id": "cs_test_a1b2",
                "object": "checkout.session",
                "amount_total": request.minor_amount.get_amount_as_i64(),
                "url": MOCK_CHECKOUT_URL,
            }),
            status_code: 200,
        })
    }
}

pub fn app_with(
    paynow: Arc<dyn PaynowPaymentService>,
    stripe: Arc<dyn StripeCheckoutService>,
) -> Router {
    let config = Arc::new(Config::new().expect("Failed while parsing config"));
    let user = UserRecord::new(config.user.name.clone(), config.user.email.clone());

    let state = AppState::new(
        config,
        Arc::new(InMemorySessionCache::new()),
        Arc::new(InMemoryUserStore::seeded(user)),
        paynow,
        stripe,
    );

    create_router(state)
}

pub fn default_app() -> Router {
    app_with(
        Arc::new(ScriptedPaynowGateway::default()),
        Arc::new(ScriptedStripeGateway::default()),
    )
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build the request"),
        )
        .await
        .expect("Failed to call the router");

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read the response body");
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("Response body was not JSON")
    };

    (status, json)
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("Failed to build the request"),
        )
        .await
        .expect("Failed to call the router");

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read the response body");
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("Response body was not JSON")
    };

    (status, json)
}
