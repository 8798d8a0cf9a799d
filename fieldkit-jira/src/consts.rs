//! Constants for the fieldkit-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("fieldkit/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the Jira REST API
pub const ACCEPT: &str = "application/json";

/// Environment variable storing the Jira host configuration.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Relative path listing every field known to the Jira instance.
pub const FIELD_PATH: &str = "rest/api/2/field";

/// Relative path of the option set configured for `field_id`.
///
/// The identifier is substituted verbatim; escaping is the caller's concern.
pub fn field_option_path(field_id: &str) -> String {
  format!("{FIELD_PATH}/{field_id}/option")
}
