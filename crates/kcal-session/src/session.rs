//! [`Session`] — the in-memory authentication context.

use std::sync::Arc;

use serde::Serialize;

use kcal_core::{
  ValidationError,
  store::DiaryStore,
  user::{NewUser, User, UserPatch, validate_email},
};

use crate::error::{AuthError, Result};

// ─── Session user ────────────────────────────────────────────────────────────

/// The session's view of the signed-in user. Holds no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
  pub id:           i64,
  pub name:         String,
  pub email:        String,
  pub calorie_goal: Option<i64>,
}

impl From<User> for SessionUser {
  fn from(user: User) -> Self {
    Self {
      id:           user.id,
      name:         user.name,
      email:        user.email,
      calorie_goal: user.calorie_goal,
    }
  }
}

/// A partial update over the session user's mutable profile fields.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
  pub name:  Option<String>,
  pub email: Option<String>,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// The authentication context: Anonymous, or Authenticated with a
/// [`SessionUser`] snapshot kept consistent with the store after every
/// mutation performed through it.
///
/// Failed operations never leave a partially-updated session behind.
pub struct Session<S> {
  store: Arc<S>,
  user:  Option<SessionUser>,
}

impl<S> Session<S>
where
  S: DiaryStore,
{
  pub fn new(store: Arc<S>) -> Self {
    Self { store, user: None }
  }

  /// The signed-in user, or `None` while anonymous.
  pub fn current_user(&self) -> Option<&SessionUser> {
    self.user.as_ref()
  }

  pub fn is_authenticated(&self) -> bool {
    self.user.is_some()
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Authenticate by email and plain-text password comparison.
  pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<()> {
    let user = self
      .store
      .find_user_by_email(email)
      .await
      .map_err(store_err)?
      .ok_or_else(|| {
        tracing::warn!(email, "sign-in failed: user not found");
        AuthError::NotFound
      })?;

    if user.password != password {
      tracing::warn!(email, "sign-in failed: incorrect password");
      return Err(AuthError::BadCredential);
    }

    self.user = Some(user.into());
    Ok(())
  }

  /// Register a new account and authenticate as it.
  ///
  /// The store assigns the id, so the just-created row is read back by
  /// email; a miss on that read is reported as [`AuthError::CreationFailed`].
  pub async fn sign_up(&mut self, name: &str, email: &str, password: &str) -> Result<()> {
    if name.is_empty() {
      return Err(ValidationError::EmptyName.into());
    }
    if password.is_empty() {
      return Err(ValidationError::EmptyPassword.into());
    }
    validate_email(email)?;

    if self
      .store
      .find_user_by_email(email)
      .await
      .map_err(store_err)?
      .is_some()
    {
      tracing::warn!(email, "sign-up failed: email already registered");
      return Err(AuthError::Duplicate);
    }

    self
      .store
      .create_user(NewUser {
        name:     name.to_owned(),
        email:    email.to_owned(),
        password: password.to_owned(),
      })
      .await
      .map_err(store_err)?;

    let created = self
      .store
      .find_user_by_email(email)
      .await
      .map_err(store_err)?
      .ok_or_else(|| {
        tracing::error!(email, "sign-up failed: created row not found on re-read");
        AuthError::CreationFailed
      })?;

    self.user = Some(created.into());
    Ok(())
  }

  /// Clear the session from any state.
  pub fn sign_out(&mut self) {
    self.user = None;
  }

  // ── Authenticated operations ──────────────────────────────────────────────

  /// Update name and/or email, then merge the accepted fields into the
  /// session snapshot.
  pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<()> {
    let id = self.user.as_ref().ok_or(AuthError::NoSession)?.id;

    if let Some(email) = &update.email {
      validate_email(email)?;
    }

    self
      .store
      .update_user(
        id,
        UserPatch {
          name:     update.name.clone(),
          email:    update.email.clone(),
          password: None,
        },
      )
      .await
      .map_err(store_err)?;

    if let Some(user) = self.user.as_mut() {
      if let Some(name) = update.name {
        user.name = name;
      }
      if let Some(email) = update.email {
        user.email = email;
      }
    }
    Ok(())
  }

  /// Change the password after verifying the current one against the store.
  ///
  /// The snapshot is untouched — it holds no password.
  pub async fn change_password(&mut self, current: &str, new: &str) -> Result<()> {
    let (id, email) = match &self.user {
      Some(user) => (user.id, user.email.clone()),
      None => return Err(AuthError::NoSession),
    };

    let stored = self
      .store
      .find_user_by_email(&email)
      .await
      .map_err(store_err)?
      .ok_or(AuthError::NotFound)?;

    if stored.password != current {
      tracing::warn!(email, "password change failed: current password mismatch");
      return Err(AuthError::Mismatch);
    }

    self
      .store
      .update_user(id, UserPatch { password: Some(new.to_owned()), ..Default::default() })
      .await
      .map_err(store_err)?;

    Ok(())
  }

  /// Set the daily calorie goal and merge it into the session snapshot.
  /// Non-positive goals are rejected before the store is reached.
  pub async fn update_calorie_goal(&mut self, goal: i64) -> Result<()> {
    let id = self.user.as_ref().ok_or(AuthError::NoSession)?.id;

    if goal <= 0 {
      return Err(ValidationError::NonPositiveGoal(goal).into());
    }

    self
      .store
      .update_calorie_goal(id, goal)
      .await
      .map_err(store_err)?;

    if let Some(user) = self.user.as_mut() {
      user.calorie_goal = Some(goal);
    }
    Ok(())
  }
}

/// Log a store failure, then wrap it for propagation to the caller.
fn store_err<E>(err: E) -> AuthError
where
  E: std::error::Error + Send + Sync + 'static,
{
  tracing::error!(error = %err, "store operation failed");
  AuthError::Store(Box::new(err))
}
