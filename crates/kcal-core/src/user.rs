//! User account types.
//!
//! Passwords are stored and compared as plain text for parity with the data
//! already on disk; see DESIGN.md before changing this.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A user row as persisted in the store.
///
/// `email` is the natural lookup key. The store enforces no uniqueness
/// constraint on it; lookups return the first matching row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:           i64,
  pub name:         String,
  pub email:        String,
  pub password:     String,
  /// Daily calorie target; absent until the user first sets one. Always > 0
  /// when present.
  pub calorie_goal: Option<i64>,
}

/// Input for creating a user. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:     String,
  pub email:    String,
  pub password: String,
}

/// A partial update over the mutable user columns.
///
/// Only the populated fields are written; an empty patch is a no-op that
/// never reaches the store.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
  pub name:     Option<String>,
  pub email:    Option<String>,
  pub password: Option<String>,
}

impl UserPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.email.is_none() && self.password.is_none()
  }
}

/// Check that `email` has a basic `local@domain` shape: no whitespace, a
/// non-empty local part, and a domain containing a dot.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
  let invalid = || ValidationError::InvalidEmail(email.to_owned());

  if email.is_empty() || email.chars().any(char::is_whitespace) {
    return Err(invalid());
  }

  let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
  if local.is_empty() {
    return Err(invalid());
  }

  match domain.split_once('.') {
    Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
    _ => Err(invalid()),
  }
}
