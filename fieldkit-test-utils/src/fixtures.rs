//! Canned Jira payloads and helpers for serving them from a mock server.

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The field list used in client tests: one built-in and one custom field
pub fn field_list() -> Value {
  json!([
      {
          "id": "10000",
          "name": "Summary",
          "custom": false
      },
      {
          "id": "customfield_100",
          "name": "Story Points",
          "custom": true,
          "schema": {
              "type": "number"
          }
      }
  ])
}

/// An option set with three ordered values
pub fn field_option(base_url: &str, field_id: &str) -> Value {
  json!({
      "self": format!("{base_url}/rest/api/2/field/{field_id}/option"),
      "id": "10100",
      "name": "Priority Level",
      "values": [
          { "id": 1, "value": "Low" },
          { "id": 2, "value": "Medium" },
          { "id": 3, "value": "High" }
      ]
  })
}

/// Jira's error payload carrying a single message
pub fn error_body(message: &str) -> Value {
  json!({
      "errorMessages": [message],
      "errors": {}
  })
}

/// Start a mock Jira server
pub async fn start_jira_mock() -> MockServer {
  MockServer::start().await
}

/// Answer `GET route` with `status` and a JSON body
pub async fn mount_json(server: &MockServer, route: &str, status: u16, body: Value) {
  Mock::given(method("GET"))
    .and(path(route))
    .respond_with(ResponseTemplate::new(status).set_body_json(body))
    .mount(server)
    .await;
}
