//! CLI command handlers.

pub mod articles;
pub mod auth;
pub mod config;

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use shelf_core::{ApiClient, ApiResult, Config, Session, messages};

/// State shared by the one-shot commands: the session and a client for the
/// configured backend.
pub struct Context {
    pub session: Session,
    client: ApiClient,
}

impl Context {
    pub fn new(config: &Config, session: Session) -> Result<Self> {
        let client = ApiClient::new(config.base_url()?)?;
        Ok(Self { session, client })
    }

    /// Client for `/token` and `/register`.
    pub fn anonymous(&self) -> ApiClient {
        self.client.clone()
    }

    /// Client carrying the session token.
    ///
    /// # Errors
    /// Fails when no session is stored.
    pub fn authenticated(&self) -> Result<ApiClient> {
        match self.session.token() {
            Some(token) => Ok(self.client.clone().with_token(Some(token.to_string()))),
            None => bail!(messages::NOT_LOGGED_IN),
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Unwraps a protected call, replacing backend failures with `failure`.
    /// A 401 ends the session.
    pub fn check<T>(&mut self, result: ApiResult<T>, failure: &str) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) if err.is_unauthorized() => {
                tracing::warn!(error = %err, "session rejected by backend");
                if let Err(e) = self.session.expire() {
                    tracing::warn!("Failed to clear session: {e:#}");
                }
                bail!(messages::SESSION_EXPIRED)
            }
            Err(err) => {
                tracing::warn!(error = %err, "{failure}");
                bail!("{failure}")
            }
        }
    }
}

/// Prints `label` and reads one trimmed line from stdin.
pub fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Uses `value` when given, otherwise prompts. Empty answers are rejected.
pub fn value_or_prompt(value: Option<String>, label: &str, field: &str) -> Result<String> {
    let value = match value {
        Some(value) => value,
        None => prompt(label)?,
    };
    if value.trim().is_empty() {
        bail!("{field} cannot be empty");
    }
    Ok(value)
}
