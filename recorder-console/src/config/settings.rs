//! Environment-driven console settings.

use std::sync::LazyLock;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use url::Url;

use crate::logging::DEFAULT_LOG_FILTER;
use crate::{Error, Result};

/// Backend address used when `CONSOLE_API_SERVER` is unset.
pub const DEFAULT_API_SERVER: &str = "http://127.0.0.1:19159";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

static DEFAULT_API_URL: LazyLock<Url> = LazyLock::new(|| Url::parse(DEFAULT_API_SERVER).unwrap());

/// Where and how the console reaches the recorder backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleSettings {
    /// Backend base url.
    pub api_server: Url,
    /// Pre-encoded basic auth token, sent as `Authorization: Basic <token>`.
    pub auth: Option<String>,
    /// Zero disables the timeout.
    pub request_timeout: Duration,
    pub log_filter: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            api_server: DEFAULT_API_URL.clone(),
            auth: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConsoleSettings {
    /// Load settings from the process environment, reading `.env` first.
    ///
    /// Supported env vars:
    /// - `CONSOLE_API_SERVER` (e.g. "http://192.168.1.2:19159")
    /// - `CONSOLE_AUTH`, or `CONSOLE_USERNAME` + `CONSOLE_PASSWORD`
    /// - `CONSOLE_REQUEST_TIMEOUT_SECS`
    /// - `CONSOLE_LOG_FILTER`
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(server) = get("CONSOLE_API_SERVER") {
            settings.api_server = parse_api_server(server.trim())?;
        }

        settings.auth = match (get("CONSOLE_AUTH"), get("CONSOLE_USERNAME"), get("CONSOLE_PASSWORD")) {
            (Some(token), _, _) => Some(token.trim().to_string()),
            (None, Some(user), Some(password)) => Some(basic_auth_token(&user, &password)),
            (None, Some(_), None) | (None, None, Some(_)) => {
                return Err(Error::config(
                    "CONSOLE_USERNAME and CONSOLE_PASSWORD must be set together",
                ));
            }
            (None, None, None) => None,
        };

        if let Some(raw) = get("CONSOLE_REQUEST_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                Error::config(format!("invalid CONSOLE_REQUEST_TIMEOUT_SECS `{raw}`: {e}"))
            })?;
            settings.request_timeout = Duration::from_secs(secs);
        }

        if let Some(filter) = get("CONSOLE_LOG_FILTER") {
            settings.log_filter = filter;
        }

        Ok(settings)
    }

    /// Base url without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.api_server.as_str().trim_end_matches('/')
    }
}

fn parse_api_server(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::config(format!(
            "CONSOLE_API_SERVER must be an http(s) url, got scheme `{other}`"
        ))),
    }
}

/// Encode `user:password` for basic auth.
pub(crate) fn basic_auth_token(user: &str, password: &str) -> String {
    STANDARD.encode(format!("{user}:{password}"))
}
