//! Session form state and its running log.

use common_enums::PaymentMethod;
use common_utils::{id_type, FloatMajorUnit, Secret};
use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};
use url::Url;

/// Opaque session identifier, visible in the channel URL. Distinct from the
/// authentication session.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(id_type::generate_session_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogSeverity {
    #[default]
    Default,
    Success,
    Error,
    Warn,
    Info,
}

impl LogSeverity {
    /// Style class the view attaches to an entry of this severity.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "text-green-500",
            Self::Error => "text-red-500",
            Self::Warn => "text-amber-500",
            Self::Info => "text-blue-500",
            Self::Default => "",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Wall-clock time the entry was written, already formatted for display.
    pub time: String,
    /// May contain markup; the view renders it unescaped.
    pub message: String,
    pub severity: LogSeverity,
}

/// Append-only log of a session's activity. Entries are stored oldest-first;
/// the view renders them most-recent-first.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog(Vec<LogEntry>);

impl SessionLog {
    pub fn write(&mut self, message: impl Into<String>, severity: LogSeverity) {
        self.0.push(LogEntry {
            time: formatted_now(),
            message: message.into(),
            severity,
        });
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn formatted_now() -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_default()
}

/// Form state of a Paynow channel session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaynowSessionState {
    pub session_id: SessionId,
    pub name: String,
    pub integration_id: String,
    pub integration_key: Secret<String>,
    pub integration_email: Option<String>,
    pub amount: FloatMajorUnit,
    pub phone: String,
    pub method: PaymentMethod,
    pub poll_url: Option<Url>,
    pub log: SessionLog,
}

impl PaynowSessionState {
    pub fn new(session_id: SessionId, name: String) -> Self {
        Self {
            session_id,
            name,
            integration_id: String::new(),
            integration_key: Secret::default(),
            integration_email: None,
            amount: FloatMajorUnit::new(1.0),
            phone: String::new(),
            method: PaymentMethod::default(),
            poll_url: None,
            log: SessionLog::default(),
        }
    }
}

/// Form state of a Stripe channel session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StripeSessionState {
    pub session_id: SessionId,
    pub name: String,
    pub secret_key: Secret<String>,
    pub amount: FloatMajorUnit,
    pub log: SessionLog,
}

impl StripeSessionState {
    pub fn new(session_id: SessionId) -> Self {
        let name = format!("Stripe {session_id}");
        Self {
            session_id,
            name,
            secret_key: Secret::default(),
            amount: FloatMajorUnit::new(1.0),
            log: SessionLog::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classes_are_exhaustive() {
        assert_eq!(LogSeverity::Success.css_class(), "text-green-500");
        assert_eq!(LogSeverity::Error.css_class(), "text-red-500");
        assert_eq!(LogSeverity::Warn.css_class(), "text-amber-500");
        assert_eq!(LogSeverity::Info.css_class(), "text-blue-500");
        assert_eq!(LogSeverity::Default.css_class(), "");
    }

    #[test]
    fn log_appends_in_order_and_clears_in_bulk() {
        let mut log = SessionLog::default();
        log.write("first", LogSeverity::Default);
        log.write("second", LogSeverity::Success);

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].message, "first");
        assert_eq!(log.entries()[1].severity, LogSeverity::Success);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn paynow_state_round_trips_through_json() {
        let state = PaynowSessionState::new(SessionId::generate(), "Demo".to_string());
        let snapshot = serde_json::to_value(&state).unwrap();
        let restored: PaynowSessionState = serde_json::from_value(snapshot).unwrap();
        assert_eq!(restored, state);
    }
}
