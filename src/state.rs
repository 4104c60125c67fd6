use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::generation::{GeminiGenerator, ImageGenerator, ReferenceAssets, Style};
use crate::storage::{Storage, StorageClient};
use crate::users::directory::{PgUserDirectory, UserDirectory};

/// Process-wide dependencies, constructed once at startup and passed into the
/// handlers — no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn StorageClient>,
    pub generator: Arc<dyn ImageGenerator>,
    pub directory: Arc<dyn UserDirectory>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let storage = Arc::new(Storage::new(&config.aws).await?) as Arc<dyn StorageClient>;

        let assets = ReferenceAssets::load(&config.assets_dir)?;
        let generator = Arc::new(GeminiGenerator::new(
            config.google_api_key.clone(),
            Style::FlashEdit,
            assets,
        )) as Arc<dyn ImageGenerator>;

        let directory = Arc::new(PgUserDirectory::new(db.clone())) as Arc<dyn UserDirectory>;

        Ok(Self {
            db,
            config,
            storage,
            generator,
            directory,
        })
    }

    pub fn from_parts(
        db: PgPool,
        config: Arc<AppConfig>,
        storage: Arc<dyn StorageClient>,
        generator: Arc<dyn ImageGenerator>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            db,
            config,
            storage,
            generator,
            directory,
        }
    }
}
