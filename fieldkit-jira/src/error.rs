//! Error types for the Jira field client.
//!
//! Failures are split by whether any I/O happened. A [`ConstructionError`]
//! means the request could not be built and nothing was sent. Everything
//! that goes wrong once the request is on the wire is reported by the
//! transport as a [`TransportFailure`], which [`Error::remote`] turns into
//! [`Error::Remote`] while keeping the raw response around for inspection.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// A request could not be built; no network activity took place.
#[derive(Debug, Error)]
pub enum ConstructionError {
  #[error("Invalid Jira base URL '{url}': {source}")]
  InvalidBaseUrl {
    url: String,
    #[source]
    source: url::ParseError,
  },

  #[error("Invalid API path '{path}': {source}")]
  InvalidPath {
    path: String,
    #[source]
    source: url::ParseError,
  },

  #[error("Failed to build request: {0}")]
  Build(#[source] reqwest::Error),
}

/// The underlying cause of a failed exchange with Jira.
#[derive(Debug, Error)]
pub enum TransportError {
  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Unexpected HTTP status {0}")]
  Status(StatusCode),

  #[error("Failed to decode response body: {0}")]
  Decode(#[from] serde_json::Error),
}

/// Raw response captured from a failed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
  pub status: StatusCode,
  pub body: String,
}

impl ApiResponse {
  pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  /// Parse Jira's standard error payload out of the body, if it has one.
  pub fn error_body(&self) -> Option<JiraErrorBody> {
    let parsed = serde_json::from_str::<JiraErrorBody>(&self.body).ok()?;
    (!parsed.is_empty()).then_some(parsed)
  }
}

/// Jira's error payload: `{"errorMessages": [...], "errors": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JiraErrorBody {
  pub error_messages: Vec<String>,
  pub errors: BTreeMap<String, String>,
}

impl JiraErrorBody {
  pub fn is_empty(&self) -> bool {
    self.error_messages.is_empty() && self.errors.is_empty()
  }

  /// All messages joined into one line, field errors as `key: message`
  pub fn summary(&self) -> String {
    self
      .error_messages
      .iter()
      .cloned()
      .chain(self.errors.iter().map(|(key, message)| format!("{key}: {message}")))
      .collect::<Vec<_>>()
      .join("; ")
  }
}

/// What a [`crate::Transport`] hands back when a sent request fails.
#[derive(Debug)]
pub struct TransportFailure {
  /// Absent when the failure happened before any response arrived
  pub response: Option<ApiResponse>,
  pub cause: TransportError,
}

impl TransportFailure {
  pub const fn new(response: Option<ApiResponse>, cause: TransportError) -> Self {
    Self { response, cause }
  }
}

/// Errors returned by [`crate::FieldClient`] operations.
#[derive(Debug, Error)]
pub enum Error {
  /// The request could not be built. Passed through untouched.
  #[error(transparent)]
  Construction(#[from] ConstructionError),

  /// Jira answered with an error, or the exchange itself failed.
  #[error("{}", describe_remote(.response.as_ref(), .cause))]
  Remote {
    response: Option<ApiResponse>,
    #[source]
    cause: TransportError,
  },
}

impl Error {
  /// Build the domain error for a failed exchange.
  pub fn remote(response: Option<ApiResponse>, cause: TransportError) -> Self {
    match &response {
      Some(response) => warn!("Jira API error: HTTP {} - {}", response.status, cause),
      None => warn!("Jira request failed: {}", cause),
    }
    Self::Remote { response, cause }
  }

  /// The raw response, when the failure carried one.
  pub const fn response(&self) -> Option<&ApiResponse> {
    match self {
      Self::Remote { response, .. } => response.as_ref(),
      Self::Construction(_) => None,
    }
  }

  /// HTTP status of the response, when the failure carried one.
  pub fn status(&self) -> Option<StatusCode> {
    self.response().map(|response| response.status)
  }

  pub fn is_not_found(&self) -> bool {
    self.status() == Some(StatusCode::NOT_FOUND)
  }
}

impl From<TransportFailure> for Error {
  fn from(failure: TransportFailure) -> Self {
    Self::remote(failure.response, failure.cause)
  }
}

fn describe_remote(response: Option<&ApiResponse>, cause: &TransportError) -> String {
  let Some(response) = response else {
    return format!("Jira request failed: {cause}");
  };

  match response.error_body() {
    Some(body) => format!("Jira API error (HTTP {}): {}", response.status, body.summary()),
    None => format!("Jira API error (HTTP {}): {cause}", response.status),
  }
}

/// Result type for Jira field operations
pub type Result<T> = std::result::Result<T, Error>;
