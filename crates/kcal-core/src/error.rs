//! Error types for `kcal-core`.

use thiserror::Error;

/// Malformed or missing input, caught before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("email and password are required")]
  MissingCredentials,

  #[error("name must not be empty")]
  EmptyName,

  #[error("password must not be empty")]
  EmptyPassword,

  #[error("not a valid email address: {0:?}")]
  InvalidEmail(String),

  #[error("calories must be positive, got {0}")]
  NonPositiveCalories(i64),

  #[error("calorie goal must be positive, got {0}")]
  NonPositiveGoal(i64),
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
