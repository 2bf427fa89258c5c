//! Shared application state for all routes.

use crate::config::{load_api, ResolvedApi};
use crate::error::AppError;
use crate::settings::Settings;
use crate::store::open_database;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Present when `--api` pointed at an existing description.
    pub api: Option<Arc<ResolvedApi>>,
    /// Client for /proxy; does not follow redirects so the browser sees them.
    pub http: reqwest::Client,
    pub files: ServeDir,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: SqlitePool, api: Option<ResolvedApi>, settings: Settings) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(30))
            .build()?;
        Ok(AppState {
            pool,
            api: api.map(Arc::new),
            http,
            files: ServeDir::new(&settings.root),
            settings: Arc::new(settings),
        })
    }

    /// Open the database and load the API description named by `settings`.
    /// An API file that cannot be loaded is logged and the gateway runs without it.
    pub async fn from_settings(settings: Settings) -> Result<Self, AppError> {
        let pool = open_database(&settings.db, settings.extension.as_deref()).await?;
        let api = match &settings.api {
            Some(path) => match load_api(path).await {
                Ok(api) => api,
                Err(e) => {
                    tracing::warn!("Failed to load API description: {}", e);
                    None
                }
            },
            None => None,
        };
        Self::new(pool, api, settings)
    }

    pub fn show_responses(&self) -> bool {
        self.settings.show_responses
    }
}
