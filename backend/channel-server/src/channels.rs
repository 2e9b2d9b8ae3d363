//! The two channel workflows and the snapshot shape the view renders from.

pub mod paynow;
pub mod stripe;

use domain_types::session::{LogEntry, LogSeverity, SessionLog};
use serde::Serialize;

pub use paynow::{PaynowChannel, PaynowForm};
pub use stripe::{StripeChannel, StripeForm};

/// One log entry as the view renders it, style class resolved.
#[derive(Debug, Serialize)]
pub struct LogEntryView {
    pub time: String,
    pub message: String,
    pub severity: LogSeverity,
    pub class: &'static str,
}

impl From<&LogEntry> for LogEntryView {
    fn from(entry: &LogEntry) -> Self {
        Self {
            time: entry.time.clone(),
            message: entry.message.clone(),
            severity: entry.severity,
            class: entry.severity.css_class(),
        }
    }
}

/// What a channel action hands back: the mutated state plus the log in
/// render order.
#[derive(Debug, Serialize)]
pub struct ChannelSnapshot<S> {
    pub state: S,
    /// Most recent entries first.
    pub log: Vec<LogEntryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
}

pub fn render_log(log: &SessionLog) -> Vec<LogEntryView> {
    log.entries().iter().rev().map(LogEntryView::from).collect()
}
