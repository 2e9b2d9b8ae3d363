//! The Stripe channel workflow: mount, pay (checkout session), save, clear.

use std::sync::Arc;

use common_enums::Currency;
use common_utils::{errors::CustomResult, FloatMajorUnit, Secret};
use domain_types::{
    connector_types::{CheckoutSessionData, PaymentsResponseData},
    errors::{ApplicationErrorResponse, ConnectorError},
    router_data::ConnectorAuthType,
    session::{LogSeverity, SessionId, StripeSessionState},
    user::{ChannelRoute, SessionPointer, UserRecord},
};
use error_stack::ResultExt;
use interfaces::connector_types::StripeCheckoutService;
use rand::Rng;
use serde::Deserialize;

use crate::{
    error::internal_error,
    logger, metrics,
    storage::{SessionCache, UserStore},
};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StripeForm {
    pub name: Option<String>,
    pub secret_key: Option<Secret<String>>,
    pub amount: Option<FloatMajorUnit>,
}

impl StripeForm {
    pub fn apply(self, state: &mut StripeSessionState) {
        if let Some(name) = self.name {
            state.name = name;
        }
        if let Some(secret_key) = self.secret_key {
            state.secret_key = secret_key;
        }
        if let Some(amount) = self.amount {
            state.amount = amount;
        }
    }
}

pub struct StripeChannel {
    driver: Arc<dyn StripeCheckoutService>,
    cache: Arc<dyn SessionCache>,
    users: Arc<dyn UserStore>,
    /// Externally visible base URL of this service, for the success/cancel
    /// URLs handed to the gateway.
    base_url: String,
}

impl StripeChannel {
    pub fn new(
        driver: Arc<dyn StripeCheckoutService>,
        cache: Arc<dyn SessionCache>,
        users: Arc<dyn UserStore>,
        base_url: String,
    ) -> Self {
        Self {
            driver,
            cache,
            users,
            base_url,
        }
    }

    /// Restore the session for `id`, or start a fresh one with a welcome
    /// entry. A `success=true` return from the gateway is reflected as one
    /// success entry.
    pub async fn mount(
        &self,
        user: &UserRecord,
        id: &SessionId,
        success: bool,
    ) -> CustomResult<StripeSessionState, ApplicationErrorResponse> {
        let restored = self
            .cache
            .get(id)
            .await
            .change_context(internal_error("failed to read the session cache"))?;

        let mut state = match restored {
            Some(snapshot) => serde_json::from_value(snapshot)
                .change_context(internal_error("stored session snapshot is corrupt"))?,
            None => {
                let mut state = StripeSessionState::new(id.clone());
                state.log.write(
                    format!("Welcome to stripe playground, {}", user.email),
                    LogSeverity::Default,
                );
                state
            }
        };

        if success {
            state.log.write(
                "Last transaction was paid successfully",
                LogSeverity::Success,
            );
        }

        Ok(state)
    }

    /// Create a checkout session for the current amount and log the full
    /// gateway payload plus a clickable checkout link. Autosaves either way.
    pub async fn pay(
        &self,
        user: &UserRecord,
        state: &mut StripeSessionState,
    ) -> CustomResult<(), ApplicationErrorResponse> {
        let invoice_name = format!("Invoice {}", rand::thread_rng().gen::<u32>());
        state.log.write(
            format!(
                "Initiating payment for invoice {invoice_name} for ${:.2}",
                state.amount.get_amount_as_f64()
            ),
            LogSeverity::Default,
        );

        metrics::PAYMENTS_INITIATED.inc();

        match self.create_session(state, invoice_name).await {
            Ok(PaymentsResponseData::CheckoutResponse {
                checkout_url,
                session_payload,
                ..
            }) => {
                let pretty_payload =
                    serde_json::to_string_pretty(&session_payload).unwrap_or_default();
                state.log.write(
                    format!(
                        "<details><summary>View response json</summary><pre><code>{pretty_payload}</code></pre></details>"
                    ),
                    LogSeverity::Default,
                );
                state.log.write(
                    format!(
                        "Complete payment at <a target=\"_blank\" href=\"{checkout_url}\">{checkout_url}</a>"
                    ),
                    LogSeverity::Success,
                );
            }
            Ok(other) => {
                logger::warn!(response = ?other, "unexpected gateway response shape");
                metrics::PAYMENTS_FAILED.inc();
                state.log.write(
                    "Failed to make payment: unexpected gateway response",
                    LogSeverity::Error,
                );
            }
            Err(error) => {
                metrics::PAYMENTS_FAILED.inc();
                state.log.write(
                    format!("Failed to make payment: {}", gateway_error_text(&error)),
                    LogSeverity::Error,
                );
            }
        }

        self.save(user, state, "Autosave -", false).await
    }

    async fn create_session(
        &self,
        state: &StripeSessionState,
        invoice_name: String,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        let minor_amount = state
            .amount
            .to_minor_unit_as_i64(Currency::Usd)
            .change_context(ConnectorError::AmountConversionFailed)?;

        let base_url = self.base_url.trim_end_matches('/');
        let request = CheckoutSessionData {
            minor_amount,
            currency: Currency::Usd,
            product_name: invoice_name,
            success_url: format!("{base_url}/stripe/{}?success=true", state.session_id),
            cancel_url: format!("{base_url}/stripe/{}", state.session_id),
        };

        let auth = ConnectorAuthType::HeaderKey {
            api_key: state.secret_key.clone(),
        };
        self.driver.create_checkout_session(&auth, request).await
    }

    pub async fn save(
        &self,
        user: &UserRecord,
        state: &mut StripeSessionState,
        trigger: &str,
        silent: bool,
    ) -> CustomResult<(), ApplicationErrorResponse> {
        if !silent {
            state.log.write(
                format!("{trigger} Saving session [{}]", state.session_id),
                LogSeverity::Default,
            );
        }

        let snapshot = serde_json::to_value(&*state)
            .change_context(internal_error("failed to serialize the session snapshot"))?;
        self.cache
            .put(&state.session_id, snapshot)
            .await
            .change_context(internal_error("failed to write the session cache"))?;
        metrics::SESSIONS_PERSISTED.inc();

        let mut user = user.clone();
        user.active_session_id = Some(state.session_id.clone());
        user.upsert_session(
            &state.name,
            SessionPointer {
                id: state.session_id.clone(),
                route: ChannelRoute::Stripe,
            },
        );
        self.users
            .upsert(user)
            .await
            .change_context(internal_error("failed to update the user record"))?;

        Ok(())
    }

    pub async fn clear(
        &self,
        user: &UserRecord,
        state: &mut StripeSessionState,
    ) -> CustomResult<(), ApplicationErrorResponse> {
        state.log.clear();
        self.save(user, state, "", true).await
    }
}

fn gateway_error_text(report: &error_stack::Report<ConnectorError>) -> String {
    match report.current_context() {
        ConnectorError::FailedAtConnector { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use error_stack::report;
    use url::Url;

    use super::*;
    use crate::storage::in_memory::{InMemorySessionCache, InMemoryUserStore};

    struct ScriptedCheckout {
        decline_with: Option<String>,
    }

    #[async_trait]
    impl StripeCheckoutService for ScriptedCheckout {
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

            assert!(request.success_url.ends_with("?success=true"));
            Ok(PaymentsResponseData::CheckoutResponse {
                resource_id: "cs_test_a1b2".to_string(),
                checkout_url: Url::parse("https://checkout.stripe.com/c/pay/cs_test_a1b2")
                    .unwrap(),
                session_payload: serde_json::json!({
                    "id": "cs_test_a1b2",
                    "amount_total": request.minor_amount.get_amount_as_i64(),
                }),
                status_code: 200,
            })
        }
    }

    fn channel(gateway: ScriptedCheckout) -> (StripeChannel, Arc<InMemorySessionCache>) {
        let cache = Arc::new(InMemorySessionCache::new());
        let users = Arc::new(InMemoryUserStore::seeded(demo_user()));
        (
            StripeChannel::new(
                Arc::new(gateway),
                cache.clone(),
                users,
                "http://localhost:8080".to_string(),
            ),
            cache,
        )
    }

    fn demo_user() -> UserRecord {
        UserRecord::new("Demo".to_string(), "demo@example.com".to_string())
    }

    #[tokio::test]
    async fn mount_of_unknown_id_writes_one_welcome_entry() {
        let (channel, _) = channel(ScriptedCheckout { decline_with: None });
        let state = channel
            .mount(&demo_user(), &SessionId::generate(), false)
            .await
            .unwrap();

        assert_eq!(state.log.len(), 1);
        assert_eq!(
            state.log.entries()[0].message,
            "Welcome to stripe playground, demo@example.com"
        );
        assert!(state.name.starts_with("Stripe "));
    }

    #[tokio::test]
    async fn success_flag_adds_a_paid_entry() {
        let (channel, _) = channel(ScriptedCheckout { decline_with: None });
        let state = channel
            .mount(&demo_user(), &SessionId::generate(), true)
            .await
            .unwrap();

        let last = state.log.entries().last().unwrap();
        assert_eq!(last.message, "Last transaction was paid successfully");
        assert_eq!(last.severity, LogSeverity::Success);
    }

    #[tokio::test]
    async fn pay_logs_payload_and_checkout_link_then_autosaves() {
        let (channel, cache) = channel(ScriptedCheckout { decline_with: None });
        let user = demo_user();
        let mut state = StripeSessionState::new(SessionId::generate());
        state.secret_key = Secret::new("sk_test_123".to_string());

        channel.pay(&user, &mut state).await.unwrap();

        let entries = state.log.entries();
        assert!(entries
            .iter()
            .any(|entry| entry.message.starts_with("<details>")));
        let link = entries
            .iter()
            .find(|entry| entry.message.starts_with("Complete payment at"))
            .unwrap();
        assert_eq!(link.severity, LogSeverity::Success);
        assert!(link
            .message
            .contains("https://checkout.stripe.com/c/pay/cs_test_a1b2"));

        assert!(cache.get(&state.session_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn declined_checkout_logs_one_error_and_still_saves() {
        let (channel, cache) = channel(ScriptedCheckout {
            decline_with: Some("Expired API Key provided".to_string()),
        });
        let user = demo_user();
        let mut state = StripeSessionState::new(SessionId::generate());

        channel.pay(&user, &mut state).await.unwrap();

        let errors: Vec<_> = state
            .log
            .entries()
            .iter()
            .filter(|entry| entry.severity == LogSeverity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Failed to make payment: Expired API Key provided"
        );
        assert!(cache.get(&state.session_id).await.unwrap().is_some());
    }
}
