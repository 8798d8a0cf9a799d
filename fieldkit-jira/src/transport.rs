//! # HTTP Transport
//!
//! The [`Transport`] trait is the seam between the field client and the
//! network: it builds requests against a base URL and executes them,
//! decoding successful JSON bodies into the caller's destination type.
//! [`ReqwestTransport`] is the production implementation.

use std::future::Future;

use reqwest::{Client, Method, header};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::config::JiraConfig;
use crate::consts::{ACCEPT, USER_AGENT};
use crate::error::{ApiResponse, ConstructionError, TransportError, TransportFailure};
use crate::models::JiraAuth;

/// Builds and executes Jira API requests.
///
/// Implementations are shared between clients and may be used from several
/// tasks at once, hence the `Send + Sync` bound.
pub trait Transport: Send + Sync {
  /// A fully built request, ready to send
  type Request: Send;

  /// Build a request for `path`, relative to the transport's base URL.
  ///
  /// Performs no I/O.
  fn new_request(
    &self,
    method: Method,
    path: &str,
    body: Option<&serde_json::Value>,
  ) -> Result<Self::Request, ConstructionError>;

  /// Execute `request` and decode a successful JSON body into `D`.
  fn send<D>(&self, request: Self::Request) -> impl Future<Output = Result<D, TransportFailure>> + Send
  where
    D: DeserializeOwned + Send;
}

/// [`Transport`] backed by a shared [`reqwest::Client`]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: Option<JiraAuth>,
  pub(crate) user_agent: String,
}

impl ReqwestTransport {
  /// Create a transport for `base_url` with default client settings
  pub fn new(base_url: &str, auth: Option<JiraAuth>) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.to_string(),
      auth,
      user_agent: USER_AGENT.to_string(),
    }
  }

  /// Create a transport from configuration, applying the timeout if set
  pub fn from_config(config: &JiraConfig) -> Result<Self, ConstructionError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(ConstructionError::Build)?;

    Ok(Self {
      client,
      base_url: config.base_url.clone(),
      auth: config.auth.clone(),
      user_agent: config.user_agent.clone(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Resolve `path` against the base URL.
  ///
  /// The base is treated as a directory so that paths stay below any
  /// context path the Jira instance is mounted under.
  pub(crate) fn resolve(&self, path: &str) -> Result<Url, ConstructionError> {
    let mut base = Url::parse(&self.base_url).map_err(|source| ConstructionError::InvalidBaseUrl {
      url: self.base_url.clone(),
      source,
    })?;
    if !base.path().ends_with('/') {
      let dir = format!("{}/", base.path());
      base.set_path(&dir);
    }

    base
      .join(path.trim_start_matches('/'))
      .map_err(|source| ConstructionError::InvalidPath {
        path: path.to_string(),
        source,
      })
  }
}

impl Transport for ReqwestTransport {
  type Request = reqwest::Request;

  fn new_request(
    &self,
    method: Method,
    path: &str,
    body: Option<&serde_json::Value>,
  ) -> Result<Self::Request, ConstructionError> {
    let url = self.resolve(path)?;
    trace!("Jira API URL: {}", url);

    let mut builder = self
      .client
      .request(method, url)
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, &self.user_agent);
    if let Some(auth) = &self.auth {
      builder = builder.basic_auth(&auth.username, Some(&auth.api_token));
    }
    if let Some(body) = body {
      builder = builder.json(body);
    }

    builder.build().map_err(ConstructionError::Build)
  }

  async fn send<D>(&self, request: Self::Request) -> Result<D, TransportFailure>
  where
    D: DeserializeOwned + Send,
  {
    let response = self
      .client
      .execute(request)
      .await
      .map_err(|e| TransportFailure::new(None, TransportError::Http(e)))?;

    let status = response.status();
    debug!("Jira API response status: {}", status);

    let body = response.text().await.map_err(|e| {
      TransportFailure::new(Some(ApiResponse::new(status, String::new())), TransportError::Http(e))
    })?;

    if !status.is_success() {
      return Err(TransportFailure::new(
        Some(ApiResponse::new(status, body)),
        TransportError::Status(status),
      ));
    }

    serde_json::from_str::<D>(&body)
      .map_err(|e| TransportFailure::new(Some(ApiResponse::new(status, body.clone())), TransportError::Decode(e)))
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use reqwest::StatusCode;
  use wiremock::matchers::{basic_auth, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

  use super::*;

  fn auth() -> JiraAuth {
    JiraAuth {
      username: "test_user".to_string(),
      api_token: "test_token".to_string(),
    }
  }

  #[test]
  fn test_resolve_joins_relative_path() {
    let transport = ReqwestTransport::new("https://test.atlassian.net", None);
    let url = transport.resolve("rest/api/2/field").unwrap();
    assert_eq!(url.as_str(), "https://test.atlassian.net/rest/api/2/field");
  }

  #[test]
  fn test_resolve_keeps_context_path() {
    let transport = ReqwestTransport::new("https://example.com/jira", None);
    let url = transport.resolve("rest/api/2/field").unwrap();
    assert_eq!(url.as_str(), "https://example.com/jira/rest/api/2/field");

    let transport = ReqwestTransport::new("https://example.com/jira/", None);
    let url = transport.resolve("/rest/api/2/field").unwrap();
    assert_eq!(url.as_str(), "https://example.com/jira/rest/api/2/field");
  }

  #[test]
  fn test_new_request_rejects_invalid_base_url() {
    let transport = ReqwestTransport::new("not a url", None);
    let result = transport.new_request(Method::GET, "rest/api/2/field", None);

    assert!(matches!(result, Err(ConstructionError::InvalidBaseUrl { .. })));
  }

  #[test]
  fn test_new_request_sets_headers_and_auth() {
    let transport = ReqwestTransport::new("https://test.atlassian.net", Some(auth()));
    let request = transport.new_request(Method::GET, "rest/api/2/field", None).unwrap();

    assert_eq!(request.method(), &Method::GET);
    assert_eq!(request.url().path(), "/rest/api/2/field");
    assert_eq!(request.headers()[header::ACCEPT], "application/json");
    assert_eq!(request.headers()[header::USER_AGENT], USER_AGENT);
    // test_user:test_token in base64
    assert_eq!(
      request.headers()[header::AUTHORIZATION],
      "Basic dGVzdF91c2VyOnRlc3RfdG9rZW4="
    );
    assert!(request.body().is_none());
  }

  #[test]
  fn test_new_request_with_json_body() {
    let transport = ReqwestTransport::new("https://test.atlassian.net", None);
    let body = serde_json::json!({ "name": "Story Points" });
    let request = transport.new_request(Method::POST, "rest/api/2/field", Some(&body)).unwrap();

    assert_eq!(request.headers()[header::CONTENT_TYPE], "application/json");
    assert!(!request.headers().contains_key(header::AUTHORIZATION));
    let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
    let sent: serde_json::Value = serde_json::from_slice(bytes).unwrap();
    assert_eq!(sent, body);
  }

  #[test]
  fn test_from_config() {
    let config = JiraConfig::new("https://test.atlassian.net")
      .with_auth(auth())
      .with_timeout(Duration::from_secs(5))
      .with_user_agent("custom-agent");
    let transport = ReqwestTransport::from_config(&config).unwrap();

    assert_eq!(transport.base_url(), "https://test.atlassian.net");
    assert_eq!(transport.user_agent, "custom-agent");
    assert_eq!(transport.auth.as_ref().map(|a| a.username.as_str()), Some("test_user"));
  }

  #[tokio::test]
  async fn test_send_decodes_json() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let transport = ReqwestTransport::new(&mock_server.uri(), Some(auth()));

    Mock::given(method("GET"))
      .and(path("/rest/api/2/field"))
      .and(basic_auth("test_user", "test_token"))
      .and(matchers::header("Accept", "application/json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "id": "summary" }])))
      .mount(&mock_server)
      .await;

    let request = transport.new_request(Method::GET, "rest/api/2/field", None)?;
    let decoded: serde_json::Value = transport.send(request).await.map_err(|f| anyhow::anyhow!("{}", f.cause))?;
    assert_eq!(decoded, serde_json::json!([{ "id": "summary" }]));

    Ok(())
  }

  #[tokio::test]
  async fn test_send_keeps_response_on_error_status() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let transport = ReqwestTransport::new(&mock_server.uri(), None);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/field"))
      .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
      .mount(&mock_server)
      .await;

    let request = transport.new_request(Method::GET, "rest/api/2/field", None)?;
    let failure = transport.send::<serde_json::Value>(request).await.unwrap_err();

    assert!(matches!(failure.cause, TransportError::Status(StatusCode::UNAUTHORIZED)));
    let response = failure.response.unwrap();
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, "Unauthorized");

    Ok(())
  }

  #[tokio::test]
  async fn test_send_reports_undecodable_body() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let transport = ReqwestTransport::new(&mock_server.uri(), None);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/field"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
      .mount(&mock_server)
      .await;

    let request = transport.new_request(Method::GET, "rest/api/2/field", None)?;
    let failure = transport.send::<Vec<serde_json::Value>>(request).await.unwrap_err();

    assert!(matches!(failure.cause, TransportError::Decode(_)));
    assert_eq!(failure.response.map(|r| r.status), Some(StatusCode::OK));

    Ok(())
  }

  #[tokio::test]
  async fn test_send_keeps_status_when_body_is_truncated() -> anyhow::Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await?;
      let mut buf = [0u8; 1024];
      let _ = socket.read(&mut buf).await?;
      // Promise more bytes than are sent, then hang up mid-body
      socket
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n[{\"id\"")
        .await?;
      socket.shutdown().await?;
      anyhow::Ok(())
    });

    let transport = ReqwestTransport::new(&format!("http://{addr}"), None);
    let request = transport.new_request(Method::GET, "rest/api/2/field", None)?;
    let failure = transport.send::<serde_json::Value>(request).await.unwrap_err();

    assert!(matches!(failure.cause, TransportError::Http(_)));
    let response = failure.response.unwrap();
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());

    server.await??;
    Ok(())
  }

  #[tokio::test]
  async fn test_send_connection_refused() -> anyhow::Result<()> {
    let transport = ReqwestTransport::new("http://127.0.0.1:1", None);
    let request = transport.new_request(Method::GET, "rest/api/2/field", None)?;
    let failure = transport.send::<serde_json::Value>(request).await.unwrap_err();

    assert!(failure.response.is_none());
    assert!(matches!(failure.cause, TransportError::Http(_)));

    Ok(())
  }
}
