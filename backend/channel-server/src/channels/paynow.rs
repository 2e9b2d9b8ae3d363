//! The Paynow channel workflow: mount, pay, check, save, clear, go-live.

use std::sync::Arc;

use common_enums::{Currency, PaymentMethod};
use common_utils::{errors::CustomResult, FloatMajorUnit, Secret};
use domain_types::{
    connector_types::{PaymentsAuthorizeData, PaymentsResponseData},
    errors::{ApplicationErrorResponse, ConnectorError},
    router_data::ConnectorAuthType,
    session::{LogSeverity, PaynowSessionState, SessionId},
    user::{ChannelRoute, SessionPointer, UserRecord},
};
use error_stack::ResultExt;
use interfaces::connector_types::PaynowPaymentService;
use rand::Rng;
use serde::Deserialize;

use crate::{
    error::internal_error,
    logger, metrics,
    storage::{SessionCache, UserStore},
};

/// Fixed line-item label attached to every test payment.
const LINE_ITEM_LABEL: &str = "Test";
/// Email handed to the gateway when the form leaves the integration email empty.
const FALLBACK_EMAIL: &str = "user@example.com";

/// Mobile methods the go-live batch walks through.
const LIVE_METHODS: [PaymentMethod; 3] = [
    PaymentMethod::EcoCash,
    PaymentMethod::OneMoney,
    PaymentMethod::TeleCash,
];

/// Sandbox phone numbers, each scripted by the gateway to a fixed outcome.
const LIVE_TEST_PHONES: [(&str, &str); 4] = [
    ("Running success: 0771111111", "0771111111"),
    ("Running delayed success: 0772222222", "0772222222"),
    ("Running user cancelled: 0773333333", "0773333333"),
    ("Running insufficient balance: 0774444444", "0774444444"),
];

/// Form fields submitted with an action; unset fields keep their current
/// value, the way the view's bindings would have left them.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaynowForm {
    pub name: Option<String>,
    pub integration_id: Option<String>,
    pub integration_key: Option<Secret<String>>,
    pub integration_email: Option<String>,
    pub amount: Option<FloatMajorUnit>,
    pub phone: Option<String>,
    pub method: Option<PaymentMethod>,
}

impl PaynowForm {
    pub fn apply(self, state: &mut PaynowSessionState) {
        if let Some(name) = self.name {
            state.name = name;
        }
        if let Some(integration_id) = self.integration_id {
            state.integration_id = integration_id;
        }
        if let Some(integration_key) = self.integration_key {
            state.integration_key = integration_key;
        }
        if let Some(integration_email) = self.integration_email {
            state.integration_email = Some(integration_email);
        }
        if let Some(amount) = self.amount {
            state.amount = amount;
        }
        if let Some(phone) = self.phone {
            state.phone = phone;
        }
        if let Some(method) = self.method {
            state.method = method;
        }
    }
}

pub struct PaynowChannel {
    driver: Arc<dyn PaynowPaymentService>,
    cache: Arc<dyn SessionCache>,
    users: Arc<dyn UserStore>,
}

impl PaynowChannel {
    pub fn new(
        driver: Arc<dyn PaynowPaymentService>,
        cache: Arc<dyn SessionCache>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            driver,
            cache,
            users,
        }
    }

    /// Restore the session for `id`, or start a fresh one with a welcome
    /// entry. A missing snapshot is not an error.
    pub async fn mount(
        &self,
        user: &UserRecord,
        id: &SessionId,
    ) -> CustomResult<PaynowSessionState, ApplicationErrorResponse> {
        let restored = self
            .cache
            .get(id)
            .await
            .change_context(internal_error("failed to read the session cache"))?;

        match restored {
            Some(snapshot) => serde_json::from_value(snapshot)
                .change_context(internal_error("stored session snapshot is corrupt")),
            None => {
                let mut state = PaynowSessionState::new(id.clone(), user.name.clone());
                state
                    .log
                    .write(format!("Welcome, {}", user.email), LogSeverity::Default);
                Ok(state)
            }
        }
    }

    /// Submit a payment with the current form state, then immediately probe
    /// its status once. The session is autosaved whether the gateway
    /// accepted the payment or not.
    pub async fn pay(
        &self,
        user: &UserRecord,
        state: &mut PaynowSessionState,
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

        match self.initiate(state, invoice_name).await {
            Ok(PaymentsResponseData::TransactionResponse {
                redirection_data,
                instructions,
                poll_url,
                ..
            }) => {
                if state.method.is_mobile() {
                    let instructions = instructions.unwrap_or_default();
                    state.log.write(
                        format!("Payment instructions: {instructions}"),
                        LogSeverity::Success,
                    );
                } else {
                    let redirect_url = redirection_data
                        .map(|url| url.to_string())
                        .unwrap_or_default();
                    state.log.write(
                        format!("Payment ready on {redirect_url}"),
                        LogSeverity::Success,
                    );
                }

                state.poll_url = poll_url;
                self.check(state).await;
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

    async fn initiate(
        &self,
        state: &PaynowSessionState,
        invoice_name: String,
    ) -> CustomResult<PaymentsResponseData, ConnectorError> {
        let minor_amount = state
            .amount
            .to_minor_unit_as_i64(Currency::Usd)
            .change_context(ConnectorError::AmountConversionFailed)?;

        let request = PaymentsAuthorizeData {
            reference_id: invoice_name,
            description: LINE_ITEM_LABEL.to_string(),
            minor_amount,
            currency: Currency::Usd,
            payment_method: state.method,
            email: state
                .integration_email
                .clone()
                .unwrap_or_else(|| FALLBACK_EMAIL.to_string()),
            phone: state.method.is_mobile().then(|| state.phone.clone()),
        };

        self.driver
            .initiate_payment(&auth_from_state(state), request)
            .await
    }

    /// One paid/not-paid probe against the stored poll URL, logged with the
    /// matching severity.
    pub async fn check(&self, state: &mut PaynowSessionState) {
        let paid = self.paid(state).await;
        state.log.write(
            format!(
                "Last transaction was {}",
                if paid { "paid successfully" } else { "not paid" }
            ),
            if paid {
                LogSeverity::Success
            } else {
                LogSeverity::Warn
            },
        );
    }

    /// Whether the last transaction has been paid. False when no poll URL is
    /// held or the gateway cannot be reached.
    pub async fn paid(&self, state: &PaynowSessionState) -> bool {
        let Some(poll_url) = &state.poll_url else {
            return false;
        };

        metrics::PAYMENT_STATUS_CHECKS.inc();
        match self
            .driver
            .poll_transaction(&auth_from_state(state), poll_url)
            .await
        {
            Ok(status) => status.is_paid(),
            Err(error) => {
                logger::warn!(error = ?error, "failed to poll the transaction status");
                false
            }
        }
    }

    /// Persist the full snapshot and mirror the session into the user's
    /// index. Unconditional overwrite; the last writer wins.
    pub async fn save(
        &self,
        user: &UserRecord,
        state: &mut PaynowSessionState,
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
                route: ChannelRoute::Paynow,
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
        state: &mut PaynowSessionState,
    ) -> CustomResult<(), ApplicationErrorResponse> {
        state.log.clear();
        self.save(user, state, "", true).await
    }

    /// Walk every mobile method through the gateway's scripted sandbox
    /// outcomes. Strictly sequential, no retries; each call runs inline
    /// against whatever the sandbox returns for that phone number.
    pub async fn live(
        &self,
        user: &UserRecord,
        state: &mut PaynowSessionState,
    ) -> CustomResult<(), ApplicationErrorResponse> {
        self.clear(user, state).await?;
        state
            .log
            .write("Running mobile live transactions", LogSeverity::Warn);

        for method in LIVE_METHODS {
            state.method = method;
            state.log.write(
                format!(
                    "Running mobile live transactions: {}",
                    method.to_string().to_lowercase()
                ),
                LogSeverity::Warn,
            );

            for (label, phone) in LIVE_TEST_PHONES {
                state.log.write(label, LogSeverity::Info);
                state.phone = phone.to_string();
                self.pay(user, state).await?;
            }
        }

        state.poll_url = None;
        self.save(user, state, "Live -", false).await
    }
}

fn auth_from_state(state: &PaynowSessionState) -> ConnectorAuthType {
    ConnectorAuthType::BodyKey {
        api_key: state.integration_key.clone(),
        key1: Secret::new(state.integration_id.clone()),
    }
}

fn gateway_error_text(report: &error_stack::Report<ConnectorError>) -> String {
    match report.current_context() {
        ConnectorError::FailedAtConnector { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
