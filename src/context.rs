/// Application context and dependency injection
///
/// All shared clients (pool, store, ledger, recorder) are constructed once
/// here and injected; lifetime is managed by the entry point, not ambient
/// module state.
use crate::{
    config::ServerConfig,
    day::DayKey,
    db,
    error::ApiResult,
    ledger::{HttpLedger, HttpLedgerConfig, Ledger, MemoryLedger},
    snapshot::SnapshotRecorder,
    store::ColorStore,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub db: SqlitePool,
    pub store: Arc<ColorStore>,
    pub ledger: Arc<dyn Ledger>,
    pub recorder: Arc<SnapshotRecorder>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> ApiResult<Self> {
        // Validate configuration
        config.validate()?;

        // Ensure the data directory exists
        if !config.storage.data_directory.exists() {
            tokio::fs::create_dir_all(&config.storage.data_directory).await?;
        }

        // Initialize selections database
        let pool = db::create_pool(
            &config.storage.selections_db,
            db::DatabaseOptions::default(),
        )
        .await?;

        // Run migrations and test the connection
        db::run_migrations(&pool).await?;
        db::test_connection(&pool).await?;

        let store = Arc::new(ColorStore::new(pool.clone()));

        // Initialize the ledger client. Without a gateway URL the service
        // falls back to an in-process ledger for local development.
        let ledger: Arc<dyn Ledger> = match &config.ledger.gateway_url {
            Some(url) => {
                tracing::info!("Ledger gateway configured at {}", url);
                Arc::new(HttpLedger::new(HttpLedgerConfig {
                    base_url: url.clone(),
                    api_token: config.ledger.api_token.clone(),
                    request_timeout: Duration::from_secs(config.ledger.request_timeout_secs),
                    write_timeout: Duration::from_secs(config.ledger.confirmation_timeout_secs),
                })?)
            }
            None => {
                tracing::warn!("No ledger gateway configured, using in-process ledger");
                Arc::new(MemoryLedger::new())
            }
        };

        let recorder = Arc::new(SnapshotRecorder::new(
            Arc::clone(&store),
            Arc::clone(&ledger),
            Duration::from_secs(config.ledger.confirmation_timeout_secs),
        ));

        Ok(Self {
            config: Arc::new(config),
            db: pool,
            store,
            ledger,
            recorder,
        })
    }

    /// Today's day key in the configured UTC offset
    pub fn today(&self) -> DayKey {
        DayKey::today(self.config.snapshot.utc_offset_hours)
    }
}
