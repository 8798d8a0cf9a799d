//! # Jira Field Client
//!
//! Typed access to Jira's field metadata REST endpoints: listing every field
//! of an instance and reading the option set of a select-like field. HTTP is
//! delegated to a pluggable [`Transport`], with [`ReqwestTransport`] as the
//! default.

mod client;
pub mod config;
pub mod consts;
mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

// Re-export the client
pub use client::{FieldClient, create_field_client};
pub use config::{ConfigError, JiraConfig};
pub use error::{ApiResponse, ConstructionError, Error, JiraErrorBody, Result, TransportError, TransportFailure};
// Re-export models
pub use models::{Field, FieldOption, FieldSchema, JiraAuth, OptionValue};
pub use transport::{ReqwestTransport, Transport};
