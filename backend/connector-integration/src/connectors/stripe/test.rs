use common_enums::{AttemptStatus, Currency};
use common_utils::{types::MinorUnit, Secret};
use domain_types::{
    connector_flow::CreateCheckoutSession,
    connector_types::{CheckoutSessionData, PaymentFlowData, PaymentsResponseData},
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::{ConnectorParams, Connectors, PaynowParams},
};
use interfaces::api::ConnectorCommon;

use super::{transformers::CheckoutSessionRequest, Stripe};
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

fn checkout_router_data(
) -> RouterDataV2<CreateCheckoutSession, PaymentFlowData, CheckoutSessionData, PaymentsResponseData>
{
    RouterDataV2::new(
        PaymentFlowData {
            connectors: connectors(),
            reference_id: "Invoice 7".to_string(),
            status: AttemptStatus::Started,
        },
        ConnectorAuthType::HeaderKey {
            api_key: Secret::new("sk_test_123".to_string()),
        },
        CheckoutSessionData {
            minor_amount: MinorUnit::new(100),
            currency: Currency::Usd,
            product_name: "Invoice 7".to_string(),
            success_url: "http://localhost:8080/stripe/abc?success=true".to_string(),
            cancel_url: "http://localhost:8080/stripe/abc".to_string(),
        },
    )
}

#[test]
fn builds_checkout_session_form_body() {
    let router_data = checkout_router_data();
    let request = CheckoutSessionRequest::try_from(&router_data).unwrap();
    let body = serde_urlencoded::to_string(&request).unwrap();

    assert!(body.contains("line_items%5B0%5D%5Bprice_data%5D%5Bcurrency%5D=USD"));
    assert!(body.contains("line_items%5B0%5D%5Bprice_data%5D%5Bunit_amount%5D=100"));
    assert!(body.contains("line_items%5B0%5D%5Bprice_data%5D%5Bproduct_data%5D%5Bname%5D=Invoice+7"));
    assert!(body.contains("line_items%5B0%5D%5Bquantity%5D=1"));
    assert!(body.contains("mode=payment"));
    assert!(body.contains("success_url=http%3A%2F%2Flocalhost%3A8080%2Fstripe%2Fabc%3Fsuccess%3Dtrue"));
}

#[test]
fn successful_response_carries_checkout_url_and_payload() {
    let payload = serde_json::json!({
        "id": "cs_test_a1b2",
        "object": "checkout.session",
        "amount_total": 100,
        "currency": "usd",
        "mode": "payment",
        "payment_status": "unpaid",
        "url": "https://checkout.stripe.com/c/pay/cs_test_a1b2",
    });
    let session: super::transformers::CheckoutSessionResponse =
        serde_json::from_value(payload.clone()).unwrap();

    let updated = RouterDataV2::try_from(ResponseRouterData {
        response: super::transformers::CheckoutSessionWithPayload {
            session,
            payload: payload.clone(),
        },
        router_data: checkout_router_data(),
        http_code: 200,
    })
    .unwrap();

    match updated.response.unwrap() {
        PaymentsResponseData::CheckoutResponse {
            resource_id,
            checkout_url,
            session_payload,
            status_code,
        } => {
            assert_eq!(resource_id, "cs_test_a1b2");
            assert_eq!(
                checkout_url.as_str(),
                "https://checkout.stripe.com/c/pay/cs_test_a1b2"
            );
            assert_eq!(session_payload, payload);
            assert_eq!(status_code, 200);
        }
        other => panic!("unexpected response data: {other:?}"),
    }
}

#[test]
fn error_envelope_is_normalized() {
    let body = serde_json::json!({
        "error": {
            "code": "api_key_expired",
            "type": "invalid_request_error",
            "message": "Expired API Key provided",
        }
    });
    let res = Response {
        headers: None,
        response: bytes::Bytes::from(serde_json::to_vec(&body).unwrap()),
        status_code: 401,
    };

    let error = Stripe.build_error_response(res).unwrap();
    assert_eq!(error.status_code, 401);
    assert_eq!(error.code, "api_key_expired");
    assert_eq!(error.message, "Expired API Key provided");
}
