//! The authenticated user's record, extended with the saved-session index.

use serde::{Deserialize, Serialize};

use crate::session::SessionId;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChannelRoute {
    Paynow,
    Stripe,
}

impl ChannelRoute {
    pub const fn base_path(self) -> &'static str {
        match self {
            Self::Paynow => "/paynow",
            Self::Stripe => "/stripe",
        }
    }
}

/// Reference to a saved session: which id, reachable on which channel.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionPointer {
    pub id: SessionId,
    pub route: ChannelRoute,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    /// Saved sessions by name, most recently saved first. Saving under an
    /// existing name replaces that entry rather than stacking duplicates.
    #[serde(default)]
    pub sessions: Vec<(String, SessionPointer)>,
    /// Last session persisted from any channel.
    #[serde(default)]
    pub active_session_id: Option<SessionId>,
}

impl UserRecord {
    pub fn new(name: String, email: String) -> Self {
        Self {
            name,
            email,
            sessions: Vec::new(),
            active_session_id: None,
        }
    }

    pub fn upsert_session(&mut self, name: &str, pointer: SessionPointer) {
        self.sessions.retain(|(existing, _)| existing != name);
        self.sessions.insert(0, (name.to_string(), pointer));
    }
}
