//! Error type for `kcal-session`.

use kcal_core::ValidationError;
use thiserror::Error;

/// Identity and authorization failures, plus the inputs and store failures
/// that surface through session operations.
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("user not found")]
  NotFound,

  #[error("incorrect password")]
  BadCredential,

  #[error("email already registered")]
  Duplicate,

  /// The row written by sign-up could not be read back.
  #[error("user creation could not be confirmed")]
  CreationFailed,

  #[error("current password does not match")]
  Mismatch,

  #[error("no authenticated session")]
  NoSession,

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = AuthError> = std::result::Result<T, E>;
