//! Application state

use http::HeaderValue;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;
use crate::image_store::ImageStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Item image store
    pub images: ImageStore,
    /// Draft image store
    pub draft_images: ImageStore,
    /// Front-end origin allowed by CORS
    pub cors_origin: HeaderValue,
    /// Request body limit
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create a new AppState: open (or bootstrap) the database and prepare both image stores
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let cors_origin = HeaderValue::from_str(&config.front_url)
            .map_err(|e| format!("FRONT_URL {:?} is not a valid origin: {e}", config.front_url))?;

        let pool = db::connect(&config.database_path, config.db_max_connections).await?;
        tracing::info!(path = %config.database_path.display(), "Database ready");

        let images = ImageStore::new(&config.images_dir);
        images.init().await?;
        let draft_images = ImageStore::new(&config.draft_images_dir);
        draft_images.init().await?;

        Ok(Self {
            pool,
            images,
            draft_images,
            cors_origin,
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}
