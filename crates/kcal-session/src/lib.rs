//! Session management for the kcal calorie diary.
//!
//! Holds the single signed-in user (or none) in process memory and mediates
//! every identity-touching operation: sign-in, sign-up, sign-out, profile
//! update, password change, and calorie-goal update. All storage is
//! delegated to a [`kcal_core::store::DiaryStore`] backend.
//!
//! The session is an explicit context object owned by the application's
//! composition root — there is no hidden global. It lives only in volatile
//! memory and does not survive a restart.

pub mod error;
pub mod session;

pub use error::AuthError;
pub use session::{ProfileUpdate, Session, SessionUser};
