//! # Jira Field Endpoints
//!
//! Read-only access to field metadata: every field known to the instance,
//! and the options configured for a single field.

use reqwest::Method;
use tracing::{debug, instrument, trace};

use crate::client::FieldClient;
use crate::consts::{FIELD_PATH, field_option_path};
use crate::error::Result;
use crate::models::{Field, FieldOption};
use crate::transport::Transport;

impl<T: Transport> FieldClient<T> {
  /// List all fields, built-in and custom, in the order Jira returns them.
  ///
  /// # Errors
  ///
  /// Returns [`crate::Error::Construction`] if the request cannot be built, and
  /// [`crate::Error::Remote`] if the request fails, Jira answers with a non-2xx
  /// status, or the body cannot be decoded.
  #[instrument(skip(self), level = "debug")]
  pub async fn list_fields(&self) -> Result<Vec<Field>> {
    trace!("Listing Jira fields from {}", FIELD_PATH);

    let request = self.transport.new_request(Method::GET, FIELD_PATH, None)?;
    let fields = self.transport.send::<Vec<Field>>(request).await?;

    debug!("Received {} fields", fields.len());
    Ok(fields)
  }

  /// Get the option set configured for `field_id`.
  ///
  /// The identifier is not validated locally; an empty or unknown id is
  /// sent as is and Jira's answer is surfaced as [`crate::Error::Remote`].
  ///
  /// # Errors
  ///
  /// Same as [`FieldClient::list_fields`].
  #[instrument(skip(self), level = "debug")]
  pub async fn get_field_options(&self, field_id: &str) -> Result<FieldOption> {
    let path = field_option_path(field_id);
    trace!("Fetching Jira field options from {}", path);

    let request = self.transport.new_request(Method::GET, &path, None)?;
    let option = self.transport.send::<FieldOption>(request).await?;

    debug!("Received {} option values for {}", option.values.len(), field_id);
    Ok(option)
  }
}
