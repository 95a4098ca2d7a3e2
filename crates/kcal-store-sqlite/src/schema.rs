//! SQL schema for the kcal SQLite store.
//!
//! Executed once at connection startup. The column and table names are fixed
//! by databases already in the field and must not be renamed.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The foods timestamp column is literally named `current_date`, which
/// collides with the SQLite keyword; every reference to it is double-quoted
/// so it resolves to the column, not to `CURRENT_DATE`.
pub const SCHEMA: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT NOT NULL,
    email     TEXT NOT NULL,   -- lookup key; intentionally NOT unique
    password  TEXT NOT NULL,   -- plain text, compared byte-for-byte
    metaDiary INTEGER NULL     -- daily calorie goal; NULL until first set
);

CREATE TABLE IF NOT EXISTS foods (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    calories       INTEGER NOT NULL,
    "current_date" TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    id_user        INTEGER NOT NULL,
    FOREIGN KEY (id_user) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS foods_user_idx ON foods(id_user);

PRAGMA user_version = 1;
"#;
