//! SQLite pool setup. One connection, never recycled, so every statement is serialized and
//! connection state (attached schemas, loaded extensions, temp tables) survives between requests.

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Executor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// In-memory schema attached on every connection as scratch space for extensions.
pub const EXTENSION_SCHEMA: &str = "extension_mem";

const ATTACH_EXTENSION_SCHEMA: &str = "ATTACH DATABASE ':memory:' AS extension_mem";

/// `:memory:` gives a private in-memory database; anything else is a file created if missing.
pub fn connect_options(path: &str) -> Result<SqliteConnectOptions, AppError> {
    if path == ":memory:" {
        return Ok(SqliteConnectOptions::from_str("sqlite::memory:")?);
    }
    Ok(SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true))
}

async fn connect(options: SqliteConnectOptions) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute(ATTACH_EXTENSION_SCHEMA).await?;
                Ok(())
            })
        })
        .connect_with(options)
        .await
}

/// Absolute path with execute permission (the dynamic loader on Linux wants it).
fn prepare_extension(path: &Path) -> PathBuf {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(e) => {
                tracing::warn!("failed to resolve working directory: {}", e);
                path.to_path_buf()
            }
        }
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = std::fs::set_permissions(&abs, std::fs::Permissions::from_mode(0o755)) {
            tracing::warn!("failed to set execute permissions on {}: {}", abs.display(), e);
        }
    }
    abs
}

/// Open the gateway database. A failing extension is logged and the database is reopened without it.
pub async fn open_database(path: &str, extension: Option<&Path>) -> Result<SqlitePool, AppError> {
    tracing::info!("Opening SQLite database at: {}", path);
    let options = connect_options(path)?;
    let pool = match extension {
        Some(ext) => {
            let ext_path = prepare_extension(ext);
            tracing::info!("Trying to load extension: {}", ext_path.display());
            let with_ext = options
                .clone()
                .extension(ext_path.to_string_lossy().into_owned());
            match connect(with_ext).await {
                Ok(pool) => {
                    tracing::info!("Extension loaded successfully");
                    pool
                }
                Err(e) => {
                    tracing::warn!("Extension loading failed: {}", e);
                    connect(options).await?
                }
            }
        }
        None => connect(options).await?,
    };

    let opts = compile_options(&pool).await?;
    if !extension_loading_available(&opts) {
        tracing::warn!("SQLite was built with OMIT_LOAD_EXTENSION; --extension will not work");
    }
    Ok(pool)
}

/// `PRAGMA compile_options` of the linked SQLite.
pub async fn compile_options(pool: &SqlitePool) -> Result<Vec<String>, AppError> {
    let rows = sqlx::query_scalar::<_, String>("PRAGMA compile_options")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub fn extension_loading_available(compile_options: &[String]) -> bool {
    !compile_options
        .iter()
        .any(|o| o.contains("OMIT_LOAD_EXTENSION"))
}
