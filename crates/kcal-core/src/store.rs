//! The `DiaryStore` trait — the persistence gateway abstraction.
//!
//! The trait is implemented by storage backends (e.g. `kcal-store-sqlite`).
//! Higher layers (`kcal-session`, `kcal-cli`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  food::{Food, NewFood},
  user::{NewUser, User, UserPatch},
};

/// Abstraction over the calorie diary's storage backend.
///
/// Pure CRUD: no business logic lives here. Identity and authorization
/// checks are the session layer's responsibility; callers of the bare trait
/// get exactly the statement semantics described on each method.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait DiaryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Insert a user and return the store-assigned id.
  ///
  /// No duplicate-email check happens at this layer; callers must check
  /// first if they care.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Look a user up by exact, case-sensitive email match.
  ///
  /// Duplicate emails are representable; the first matching row wins.
  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Apply a partial update to a user row.
  ///
  /// An empty patch returns without touching the store. A non-empty patch
  /// against an id with no row is an error.
  fn update_user(
    &self,
    id: i64,
    patch: UserPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Unconditionally set the password of every row matching `email`.
  ///
  /// Returns the number of rows affected; zero means the email is unknown.
  /// No prior credential is verified — this is the recovery path, and the
  /// authorization gap is deliberate (see DESIGN.md).
  fn update_password_by_email<'a>(
    &'a self,
    email: &'a str,
    new_password: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Set the daily calorie goal for a user. The caller has already
  /// validated `goal > 0`. Returns whether a row was updated.
  fn update_calorie_goal(
    &self,
    id: i64,
    goal: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Find users matching both `email` and `password` exactly.
  ///
  /// Rejects empty credentials before querying. An empty result is the
  /// authentication-failure signal.
  fn search_user<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + 'a;

  // ── Foods ─────────────────────────────────────────────────────────────

  /// Insert a food entry and return the store-assigned id. The timestamp is
  /// assigned by the store. Rejects `calories <= 0` before inserting.
  fn create_food(
    &self,
    input: NewFood,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// List the entries logged today (current calendar day) by `owner_id`,
  /// in insertion order.
  fn list_foods_for_today(
    &self,
    owner_id: i64,
  ) -> impl Future<Output = Result<Vec<Food>, Self::Error>> + Send + '_;

  /// Delete an entry by id, regardless of owner. Returns whether a row was
  /// deleted.
  fn delete_food(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
