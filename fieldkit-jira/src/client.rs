use std::sync::Arc;

use crate::config::JiraConfig;
use crate::error::Result;
use crate::models::JiraAuth;
use crate::transport::{ReqwestTransport, Transport};

/// Client for Jira's field metadata endpoints.
///
/// The transport is shared, so cloning a client is cheap and clones may be
/// used concurrently.
pub struct FieldClient<T = ReqwestTransport> {
  pub(crate) transport: Arc<T>,
}

impl<T> Clone for FieldClient<T> {
  fn clone(&self) -> Self {
    Self {
      transport: Arc::clone(&self.transport),
    }
  }
}

impl<T: Transport> FieldClient<T> {
  /// Create a client on top of an existing transport
  pub const fn new(transport: Arc<T>) -> Self {
    Self { transport }
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }
}

impl FieldClient<ReqwestTransport> {
  /// Create a client with a reqwest transport built from `config`
  pub fn from_config(config: &JiraConfig) -> Result<Self> {
    let transport = ReqwestTransport::from_config(config)?;
    Ok(Self::new(Arc::new(transport)))
  }
}

/// Create a field client from credentials
pub fn create_field_client(base_url: &str, username: &str, api_token: &str) -> FieldClient {
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  FieldClient::new(Arc::new(ReqwestTransport::new(base_url, Some(auth))))
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  #[test]
  fn test_field_client_creation() {
    let client = create_field_client("https://test.atlassian.net", "test_user", "test_token");
    let transport = client.transport();

    assert_eq!(transport.base_url(), "https://test.atlassian.net");
    let auth = transport.auth.as_ref().unwrap();
    assert_eq!(auth.username, "test_user");
    assert_eq!(auth.api_token, "test_token");
  }

  #[test]
  fn test_field_client_from_config() {
    let config = JiraConfig::new("https://test.atlassian.net").with_timeout(Duration::from_secs(10));
    let client = FieldClient::from_config(&config).unwrap();

    assert_eq!(client.transport().base_url(), "https://test.atlassian.net");
    assert!(client.transport().auth.is_none());
  }

  #[test]
  fn test_field_client_clones_share_transport() {
    let client = create_field_client("https://test.atlassian.net", "test_user", "test_token");
    let clone = client.clone();

    assert!(Arc::ptr_eq(&client.transport, &clone.transport));
  }
}
