//! Connection settings for the Jira field client.
//!
//! The base URL may come from the `$JIRA_HOST` environment variable. Hosts
//! given without a scheme are assumed to be served over https.

use std::env::VarError;
use std::time::Duration;

use thiserror::Error;
use url::{Position, Url};

use crate::consts::{ENV_JIRA_HOST, USER_AGENT};
use crate::models::JiraAuth;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Jira host environment variable '{}' not set", ENV_JIRA_HOST)]
  MissingHost,

  #[error("Jira host environment variable '{}' is not valid unicode", ENV_JIRA_HOST)]
  NonUnicodeHost,

  #[error("Host cannot be empty")]
  EmptyHost,

  #[error("Failed to parse URL: '{input}'. Ensure it has a valid scheme.")]
  InvalidHost {
    input: String,
    #[source]
    source: url::ParseError,
  },
}

/// Settings used to build a [`crate::ReqwestTransport`]
#[derive(Debug, Clone)]
pub struct JiraConfig {
  pub base_url: String,
  pub auth: Option<JiraAuth>,
  /// Applied to every request; `None` leaves reqwest's default (no timeout)
  pub timeout: Option<Duration>,
  pub user_agent: String,
}

impl JiraConfig {
  pub fn new(base_url: &str) -> Self {
    Self {
      base_url: base_url.to_string(),
      auth: None,
      timeout: None,
      user_agent: USER_AGENT.to_string(),
    }
  }

  /// Build a configuration from `$JIRA_HOST`.
  pub fn from_env() -> Result<Self, ConfigError> {
    match std::env::var(ENV_JIRA_HOST) {
      Ok(host) => Ok(Self::new(&ensure_url_scheme(&host)?)),
      Err(VarError::NotPresent) => Err(ConfigError::MissingHost),
      Err(VarError::NotUnicode(_)) => Err(ConfigError::NonUnicodeHost),
    }
  }

  pub fn with_auth(mut self, auth: JiraAuth) -> Self {
    self.auth = Some(auth);
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  pub fn with_user_agent(mut self, user_agent: &str) -> Self {
    self.user_agent = user_agent.to_string();
    self
  }
}

/// Ensure a host has an http(s) scheme, defaulting to https.
///
/// Also repairs a scheme missing its slashes (`https:example.com`) and drops
/// a trailing `/` when it is the whole path.
pub fn ensure_url_scheme(input: &str) -> Result<String, ConfigError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(ConfigError::EmptyHost);
  }

  let lowered = trimmed.to_ascii_lowercase();
  for scheme in ["http:", "https:"] {
    if lowered.starts_with(scheme) && !lowered.starts_with(&format!("{scheme}//")) {
      let remainder = &trimmed[scheme.len()..];
      return parse_with_https_prefix(input, remainder.trim_start_matches('/')).map(|url| normalize_url(&url));
    }
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.scheme().len() > 1 && url.host().is_some() => url,
    _ => parse_with_https_prefix(input, trimmed)?,
  };

  Ok(normalize_url(&url))
}

fn parse_with_https_prefix(input: &str, candidate: &str) -> Result<Url, ConfigError> {
  Url::parse(&format!("https://{candidate}")).map_err(|source| ConfigError::InvalidHost {
    input: input.to_string(),
    source,
  })
}

fn normalize_url(url: &Url) -> String {
  let mut result = url[..Position::BeforePath].to_string();

  let path = url.path();
  if path != "/" {
    result.push_str(path);
  }
  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  result
}
