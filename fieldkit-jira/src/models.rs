use serde::{Deserialize, Deserializer, Serialize};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

impl std::fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraAuth")
      .field("username", &self.username)
      .field("api_token", &"<redacted>")
      .finish()
  }
}

/// Represents a single Jira field, built-in or custom
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
  #[serde(rename = "self", skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
  pub self_url: String,
  #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
  pub id: String,
  #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
  pub custom: bool,
  #[serde(skip_serializing_if = "FieldSchema::is_empty", deserialize_with = "null_as_default")]
  pub schema: FieldSchema,
}

/// Represents the declared type of a Jira field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSchema {
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub field_type: Option<String>,
  /// Set for built-in fields, e.g. `"summary"`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub system: Option<String>,
}

impl FieldSchema {
  /// True when neither the type nor the system marker is present
  pub const fn is_empty(&self) -> bool {
    self.field_type.is_none() && self.system.is_none()
  }
}

/// Represents the option set configured for a select-like field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOption {
  #[serde(rename = "self", skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
  pub self_url: String,
  #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
  pub id: String,
  #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
  pub values: Vec<OptionValue>,
}

/// A single selectable value of a [`FieldOption`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionValue {
  #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
  pub id: i64,
  #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
  pub value: String,
}

/// Jira sends `null` for some unset attributes; treat it like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

const fn is_false(value: &bool) -> bool {
  !*value
}

const fn is_zero(value: &i64) -> bool {
  *value == 0
}
