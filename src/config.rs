use anyhow::Result;
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Default cap on an image upload request body.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runtime settings, read from defaults, an optional `catapi.toml` and the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// Directory uploaded images are written to.
    pub media_root: PathBuf,
    /// How long a resolved API token stays cached.
    pub token_cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
    /// Largest accepted image upload request, in bytes.
    pub max_upload_bytes: usize,
}

impl Settings {
    /// Load settings. Environment variables (`DATABASE_URL`, `BIND_ADDRESS`,
    /// `MEDIA_ROOT`, ...) take precedence over the config file.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("database_url", "sqlite://catapi.db?mode=rwc")?
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("media_root", "media")?
            .set_default("token_cache_ttl_secs", 300)?
            .set_default("request_timeout_secs", 30)?
            .set_default("max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .add_source(config::File::with_name("catapi").required(false))
            .add_source(config::Environment::default().try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?;

        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Override the database URL and bind address when given on the command line.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Connect to the database and build the shared application state.
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    tokio::fs::create_dir_all(&settings.media_root).await?;
    debug!("Media root: {}", settings.media_root.display());

    let token_cache = Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(settings.token_cache_ttl_secs))
        .build();

    Ok(AppState {
        db,
        token_cache,
        media_root: settings.media_root.clone(),
    })
}
