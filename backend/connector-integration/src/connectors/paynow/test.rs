use common_enums::{AttemptStatus, Currency, PaymentMethod};
use common_utils::{types::MinorUnit, Secret};
use domain_types::{
    connector_flow::{Authorize, PSync},
    connector_types::{
        PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData, PaymentsSyncData,
    },
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
    types::{ConnectorParams, Connectors, PaynowParams},
};
use url::Url;

use super::transformers::{
    PaynowPaymentStatus, PaynowPaymentsRequest, PaynowPaymentsResponse, PaynowResponseStatus,
    PaynowSyncResponse,
};
use crate::types::ResponseRouterData;

fn connectors() -> Connectors {
    Connectors {
        paynow: PaynowParams {
            base_url: "https://www.paynow.co.zw/".to_string(),
            return_url: "http://example.com/return?gateway=paynow".to_string(),
            result_url: "http://example.com/gateways/paynow/update".to_string(),
        },
        stripe: ConnectorParams {
            base_url: "https://api.stripe.com/".to_string(),
        },
    }
}

fn auth() -> ConnectorAuthType {
    ConnectorAuthType::BodyKey {
        api_key: Secret::new("a1b2c3-d4e5f6".to_string()),
        key1: Secret::new("12345".to_string()),
    }
}

fn authorize_router_data(
    method: PaymentMethod,
    phone: Option<&str>,
) -> RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData> {
    RouterDataV2::new(
        PaymentFlowData {
            connectors: connectors(),
            reference_id: "Invoice 42".to_string(),
            status: AttemptStatus::Started,
        },
        auth(),
        PaymentsAuthorizeData {
            reference_id: "Invoice 42".to_string(),
            description: "Test".to_string(),
            minor_amount: MinorUnit::new(100),
            currency: Currency::Usd,
            payment_method: method,
            email: "user@example.com".to_string(),
            phone: phone.map(str::to_string),
        },
    )
}

#[test]
fn builds_web_redirect_request() {
    let router_data = authorize_router_data(PaymentMethod::PaynowWebRedirect, None);
    let request = PaynowPaymentsRequest::try_from(&router_data).unwrap();

    assert!(request.phone.is_none());
    assert!(request.method.is_none());
    assert_eq!(request.status, "Message");
    assert_eq!(request.amount.get_amount_as_string(), "1.00");
    assert_eq!(request.hash.len(), 128);
    assert!(request
        .hash
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));

    let body = serde_urlencoded::to_string(&request).unwrap();
    assert!(body.starts_with("id=12345&reference=Invoice+42&amount=1.00&additionalinfo=Test"));
    assert!(body.contains("authemail=user%40example.com"));
    assert!(!body.contains("phone="));
}

#[test]
fn builds_mobile_wallet_request() {
    let router_data = authorize_router_data(PaymentMethod::EcoCash, Some("0771111111"));
    let request = PaynowPaymentsRequest::try_from(&router_data).unwrap();

    let body = serde_urlencoded::to_string(&request).unwrap();
    assert!(body.contains("phone=0771111111"));
    assert!(body.contains("method=ecocash"));
}

#[test]
fn mobile_request_without_phone_is_rejected() {
    let router_data = authorize_router_data(PaymentMethod::EcoCash, None);
    assert!(PaynowPaymentsRequest::try_from(&router_data).is_err());
}

#[test]
fn hash_depends_on_the_integration_key() {
    let with_first_key = super::transformers::generate_hash(
        &["12345", "Invoice 42", "1.00"],
        &Secret::new("key-one".to_string()),
    );
    let with_second_key = super::transformers::generate_hash(
        &["12345", "Invoice 42", "1.00"],
        &Secret::new("key-two".to_string()),
    );
    assert_ne!(with_first_key, with_second_key);

    let repeated = super::transformers::generate_hash(
        &["12345", "Invoice 42", "1.00"],
        &Secret::new("key-one".to_string()),
    );
    assert_eq!(with_first_key, repeated);
}

#[test]
fn parses_successful_web_response() {
    let body = b"status=Ok&browserurl=https%3A%2F%2Fwww.paynow.co.zw%2Fpayment%2F123\
&pollurl=https%3A%2F%2Fwww.paynow.co.zw%2Finterface%2Fpoll%2F123&hash=AABB";
    let response = PaynowPaymentsResponse::parse(body).unwrap();

    assert_eq!(response.status, PaynowResponseStatus::Ok);
    assert_eq!(
        response.browser_url,
        Some(Url::parse("https://www.paynow.co.zw/payment/123").unwrap())
    );
    assert_eq!(
        response.poll_url,
        Some(Url::parse("https://www.paynow.co.zw/interface/poll/123").unwrap())
    );
    assert!(response.error.is_none());
}

#[test]
fn parses_error_response() {
    let body = b"status=Error&error=Invalid+integration+id";
    let response = PaynowPaymentsResponse::parse(body).unwrap();

    assert_eq!(response.status, PaynowResponseStatus::Error);
    assert_eq!(response.error.as_deref(), Some("Invalid integration id"));
}

#[test]
fn successful_response_populates_transaction_data() {
    let router_data = authorize_router_data(PaymentMethod::EcoCash, Some("0771111111"));
    let body = b"status=Ok&instructions=Dial+%2A151%2A2%2A4%23&pollurl=https%3A%2F%2Fwww.paynow.co.zw%2Finterface%2Fpoll%2F9";
    let response = PaynowPaymentsResponse::parse(body).unwrap();

    let updated = RouterDataV2::try_from(ResponseRouterData {
        response,
        router_data,
        http_code: 200,
    })
    .unwrap();

    assert_eq!(
        updated.resource_common_data.status,
        AttemptStatus::AuthenticationPending
    );
    match updated.response.unwrap() {
        PaymentsResponseData::TransactionResponse {
            instructions,
            poll_url,
            ..
        } => {
            assert_eq!(instructions.as_deref(), Some("Dial *151*2*4#"));
            assert_eq!(
                poll_url,
                Some(Url::parse("https://www.paynow.co.zw/interface/poll/9").unwrap())
            );
        }
        other => panic!("unexpected response data: {other:?}"),
    }
}

#[test]
fn declined_response_becomes_error_response() {
    let router_data = authorize_router_data(PaymentMethod::EcoCash, Some("0774444444"));
    let response = PaynowPaymentsResponse::parse(b"status=Error&error=Insufficient+balance").unwrap();

    let updated = RouterDataV2::try_from(ResponseRouterData {
        response,
        router_data,
        http_code: 200,
    })
    .unwrap();

    assert_eq!(updated.resource_common_data.status, AttemptStatus::Failure);
    let error = updated.response.unwrap_err();
    assert_eq!(error.message, "Insufficient balance");
}

#[test]
fn sync_statuses_map_to_attempt_statuses() {
    for (wire, expected) in [
        ("Paid", AttemptStatus::Charged),
        ("Awaiting Delivery", AttemptStatus::Charged),
        ("Delivered", AttemptStatus::Charged),
        ("Created", AttemptStatus::AuthenticationPending),
        ("Sent", AttemptStatus::AuthenticationPending),
        ("Cancelled", AttemptStatus::Failure),
        ("Failed", AttemptStatus::Failure),
        ("Disputed", AttemptStatus::Pending),
        ("Refunded", AttemptStatus::Pending),
    ] {
        let status: PaynowPaymentStatus = wire.parse().unwrap();
        assert_eq!(AttemptStatus::from(status), expected, "status {wire}");
    }
}

#[test]
fn sync_response_updates_flow_status() {
    let poll_url = Url::parse("https://www.paynow.co.zw/interface/poll/9").unwrap();
    let router_data: RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData> =
        RouterDataV2::new(
            PaymentFlowData {
                connectors: connectors(),
                reference_id: "Invoice 42".to_string(),
                status: AttemptStatus::AuthenticationPending,
            },
            auth(),
            PaymentsSyncData {
                poll_url: poll_url.clone(),
            },
        );

    let response =
        PaynowSyncResponse::parse(b"status=Paid&paynowreference=778899&hash=AA").unwrap();
    let updated = RouterDataV2::try_from(ResponseRouterData {
        response,
        router_data,
        http_code: 200,
    })
    .unwrap();

    assert_eq!(updated.resource_common_data.status, AttemptStatus::Charged);
    assert!(updated.resource_common_data.status.is_paid());
}
