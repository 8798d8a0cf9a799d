//! # Jira API Endpoints
//!
//! Endpoint implementations for the Jira field resource: listing fields and
//! fetching the option set of a select-like field.

pub mod fields;
