//! heritage-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), points a
//! [`JsonFileSource`] at the configured snapshot, and serves the analytics
//! API over HTTP.
//!
//! # One-off export
//!
//! To write the preservation priority CSV without starting the server:
//!
//! ```
//! cargo run -p heritage-server -- --export-priorities priorities.csv
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use chrono::{Datelike, Utc};
use clap::Parser;
use heritage_analytics::{
  export::{export_file_name, priorities_csv},
  priority::PriorityScorer,
};
use heritage_core::store::SnapshotSource as _;
use heritage_server::{AppState, ServerConfig};
use heritage_store_file::JsonFileSource;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Lombok heritage analytics server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Write the preservation priority CSV and exit. Pass a directory to use
  /// the dated default file name.
  #[arg(long, value_name = "FILE")]
  export_priorities: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("HERITAGE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let snapshot_path = expand_tilde(&server_cfg.snapshot_path);
  let source = JsonFileSource::new(&snapshot_path);

  // Helper mode: export priorities and exit.
  if let Some(target) = cli.export_priorities {
    return export_priorities(&source, &target).await;
  }

  let state = AppState {
    source: Arc::new(source),
    config: Arc::new(server_cfg.clone()),
  };

  let app = heritage_server::router(state);
  let address = server_cfg.address();

  tracing::info!(snapshot = ?snapshot_path, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Score every site against the current year and write the CSV to `target`.
async fn export_priorities(
  source: &JsonFileSource,
  target: &Path,
) -> anyhow::Result<()> {
  let snapshot = source
    .snapshot()
    .await
    .with_context(|| format!("failed to load snapshot {:?}", source.path()))?;

  let today = Utc::now();
  let priorities =
    PriorityScorer::new(today.year()).score_all(&snapshot.sites);
  let body = priorities_csv(&priorities).context("failed to render CSV")?;

  let target = if target.is_dir() {
    target.join(export_file_name(today.date_naive()))
  } else {
    target.to_path_buf()
  };
  tokio::fs::write(&target, body)
    .await
    .with_context(|| format!("failed to write {target:?}"))?;

  tracing::info!(rows = priorities.len(), path = ?target, "exported priorities");
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
