//! Shared constants.

use serde::Deserialize;

/// Length of generated session identifiers.
pub const ID_LENGTH: usize = 20;

/// Characters to use for generating identifiers.
pub(crate) const ALPHABETS: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Header carrying the request identifier through the middleware stack.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Header a caller may use to identify itself to the playground.
pub const X_USER_EMAIL: &str = "x-user-email";

/// Prefix for environment-variable configuration overrides.
pub const ENV_PREFIX: &str = "PLAYGROUND";

/// Environment variable selecting the runtime environment.
pub const RUN_ENV: &str = "RUN_ENV";

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Environment the service is running in, falling back to development.
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Name of the configuration file for this environment.
    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
