//! [`SqliteStore`] — the SQLite implementation of [`DiaryStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, types::Value};

use kcal_core::{
  ValidationError,
  food::{Food, NewFood},
  store::DiaryStore,
  user::{NewUser, User, UserPatch},
};

use crate::{
  Error, Result,
  encode::RawFood,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A calorie diary backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Statements
/// are prepared, executed, and finalized within each call; nothing is
/// wrapped in an explicit transaction.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DiaryStore impl ─────────────────────────────────────────────────────────

impl DiaryStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<i64> {
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (name, email, password) VALUES (?1, ?2, ?3)",
          rusqlite::params![input.name, input.email, input.password],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let user: Option<User> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, email, password, metaDiary
               FROM users WHERE email = ?1",
              rusqlite::params![email],
              |row| {
                Ok(User {
                  id:           row.get(0)?,
                  name:         row.get(1)?,
                  email:        row.get(2)?,
                  password:     row.get(3)?,
                  calorie_goal: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(user)
  }

  async fn update_user(&self, id: i64, patch: UserPatch) -> Result<()> {
    if patch.is_empty() {
      return Ok(());
    }

    let changed = self
      .conn
      .call(move |conn| {
        // SET clause covers exactly the populated fields, bound positionally.
        let mut sets: Vec<&'static str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(name) = patch.name {
          sets.push("name = ?");
          values.push(Value::Text(name));
        }
        if let Some(email) = patch.email {
          sets.push("email = ?");
          values.push(Value::Text(email));
        }
        if let Some(password) = patch.password {
          sets.push("password = ?");
          values.push(Value::Text(password));
        }
        values.push(Value::Integer(id));

        let sql = format!("UPDATE users SET {} WHERE id = ?", sets.join(", "));
        let changed = conn.execute(&sql, rusqlite::params_from_iter(values))?;
        Ok(changed)
      })
      .await?;

    if changed == 0 {
      return Err(Error::UserNotFound(id));
    }
    Ok(())
  }

  async fn update_password_by_email(
    &self,
    email: &str,
    new_password: &str,
  ) -> Result<usize> {
    let email = email.to_owned();
    let new_password = new_password.to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE users SET password = ?1 WHERE email = ?2",
          rusqlite::params![new_password, email],
        )?;
        Ok(changed)
      })
      .await?;

    Ok(changed)
  }

  async fn update_calorie_goal(&self, id: i64, goal: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE users SET metaDiary = ?1 WHERE id = ?2",
          rusqlite::params![goal, id],
        )?;
        Ok(changed)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn search_user(&self, email: &str, password: &str) -> Result<Vec<User>> {
    if email.is_empty() || password.is_empty() {
      return Err(ValidationError::MissingCredentials.into());
    }

    let email = email.to_owned();
    let password = password.to_owned();

    let users = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, email, password, metaDiary
           FROM users WHERE email = ?1 AND password = ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![email, password], |row| {
            Ok(User {
              id:           row.get(0)?,
              name:         row.get(1)?,
              email:        row.get(2)?,
              password:     row.get(3)?,
              calorie_goal: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(users)
  }

  // ── Foods ─────────────────────────────────────────────────────────────────

  async fn create_food(&self, input: NewFood) -> Result<i64> {
    if input.calories <= 0 {
      return Err(ValidationError::NonPositiveCalories(input.calories).into());
    }

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO foods (name, calories, id_user) VALUES (?1, ?2, ?3)",
          rusqlite::params![input.name, input.calories, input.owner_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn list_foods_for_today(&self, owner_id: i64) -> Result<Vec<Food>> {
    let raws: Vec<RawFood> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          r#"SELECT id, name, calories, "current_date", id_user
             FROM foods
             WHERE DATE("current_date") = DATE('now') AND id_user = ?1"#,
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_id], |row| {
            Ok(RawFood {
              id:        row.get(0)?,
              name:      row.get(1)?,
              calories:  row.get(2)?,
              logged_at: row.get(3)?,
              owner_id:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFood::into_food).collect()
  }

  async fn delete_food(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        let changed =
          conn.execute("DELETE FROM foods WHERE id = ?1", rusqlite::params![id])?;
        Ok(changed)
      })
      .await?;

    Ok(changed > 0)
  }
}
