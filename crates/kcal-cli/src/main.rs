//! kcal interactive shell.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite diary, and drops into a line-oriented shell. The session lives
//! exactly as long as the process; there is no persisted login.

mod repl;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use kcal_session::Session;
use kcal_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "kcal — local daily calorie diary")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Database path; overrides the config file.
  #[arg(short, long)]
  database: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct AppConfig {
  #[serde(default = "default_database_path")]
  database_path: PathBuf,

  /// Emit `today` listings as JSON instead of a table.
  #[serde(default)]
  json_output: bool,
}

fn default_database_path() -> PathBuf {
  PathBuf::from("kcal.db")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("KCAL"))
    .build()
    .context("failed to read config file")?;

  let app_cfg: AppConfig = settings
    .try_deserialize()
    .context("failed to deserialise AppConfig")?;

  let db_path = cli.database.unwrap_or_else(|| app_cfg.database_path.clone());

  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open diary at {db_path:?}"))?;
  let store = Arc::new(store);

  let session = Session::new(store.clone());

  repl::run(session, store, app_cfg.json_output).await
}
