//! Decoding helpers between SQLite column values and the domain types.
//!
//! SQLite's `CURRENT_TIMESTAMP` default writes `YYYY-MM-DD HH:MM:SS` in UTC;
//! that is the only timestamp format this store ever reads back.

use chrono::{DateTime, NaiveDateTime, Utc};
use kcal_core::food::Food;

use crate::{Error, Result};

const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn decode_timestamp(s: &str) -> Result<DateTime<Utc>> {
  NaiveDateTime::parse_from_str(s, SQLITE_TIMESTAMP_FORMAT)
    .map(|naive| naive.and_utc())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// Raw values read directly from a `foods` row.
pub struct RawFood {
  pub id:        i64,
  pub name:      String,
  pub calories:  i64,
  pub logged_at: String,
  pub owner_id:  i64,
}

impl RawFood {
  pub fn into_food(self) -> Result<Food> {
    Ok(Food {
      id:        self.id,
      name:      self.name,
      calories:  self.calories,
      logged_at: decode_timestamp(&self.logged_at)?,
      owner_id:  self.owner_id,
    })
  }
}
