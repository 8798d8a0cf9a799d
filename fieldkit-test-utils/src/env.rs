//! Environment variable management for testing
//!
//! Tests that read configuration from the environment use [`EnvVarGuard`] so
//! the variable is put back the way it was once the test finishes.

use std::env;

/// Saves one environment variable on creation and restores it on drop
pub struct EnvVarGuard {
  name: String,
  /// The original value, if any
  original: Option<String>,
}

impl EnvVarGuard {
  /// Start guarding `name`; the current value is left untouched
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  /// Set the guarded variable for the rest of the test
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  /// Unset the guarded variable for the rest of the test
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}
