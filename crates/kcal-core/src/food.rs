//! Food diary entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged food entry. Entries are never updated in place; they are created
/// and deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
  pub id:        i64,
  pub name:      String,
  pub calories:  i64,
  /// Insertion instant, assigned by the store.
  pub logged_at: DateTime<Utc>,
  /// The user this entry belongs to.
  pub owner_id:  i64,
}

/// Input for logging a food entry. Id and timestamp are assigned by the
/// store.
#[derive(Debug, Clone)]
pub struct NewFood {
  pub name:     String,
  pub calories: i64,
  pub owner_id: i64,
}

/// Sum of calories over a day's entries.
pub fn daily_total(foods: &[Food]) -> i64 {
  foods.iter().map(|f| f.calories).sum()
}
