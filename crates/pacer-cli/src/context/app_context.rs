use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use pacer_config::PacerConfig;
use pacer_db::{PacerDb, TaskStore};
use pacer_oracle::{HttpLlmClient, LlmClient, LlmOracle, UnconfiguredClient};
use pacer_rank::{Coordinator, PriorityCache, SystemClock, ttl_from_secs};

pub type Storage = Arc<PacerDb>;
pub type Oracle = Arc<LlmOracle<Arc<dyn LlmClient>>>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: PacerConfig,
    pub store: TaskStore<Storage>,
    pub coordinator: Coordinator<Oracle, Storage>,
    pub oracle: Oracle,
    pub db_path: PathBuf,
}

/// Database file for this run: `--db`, then `general.db_path`, then the
/// user data dir.
pub fn resolve_db_path(config: &PacerConfig, db_override: Option<&str>) -> anyhow::Result<PathBuf> {
    match db_override {
        Some(path) => Ok(PathBuf::from(path)),
        None => config
            .general
            .resolved_db_path()
            .context("no data directory available; set general.db_path or pass --db"),
    }
}

impl AppContext {
    /// Open the database and wire the store, cache, and coordinator to it,
    /// using the HTTP oracle when an API key is configured.
    pub async fn init(config: PacerConfig, db_path: PathBuf) -> anyhow::Result<Self> {
        let client: Arc<dyn LlmClient> = match HttpLlmClient::from_config(&config.oracle) {
            Ok(client) => Arc::new(client),
            Err(error) => {
                tracing::debug!(%error, "oracle not configured; ranking and capture are disabled");
                Arc::new(UnconfiguredClient::new(error.to_string()))
            }
        };
        Self::with_client(config, db_path, client).await
    }

    pub async fn with_client(
        config: PacerConfig,
        db_path: PathBuf,
        client: Arc<dyn LlmClient>,
    ) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let storage: Storage = Arc::new(
            PacerDb::open_local(&db_path.to_string_lossy())
                .await
                .with_context(|| format!("failed to open database at {}", db_path.display()))?,
        );

        let oracle: Oracle = Arc::new(LlmOracle::from_config(client, &config.oracle));
        let cache = PriorityCache::new(
            Arc::clone(&storage),
            Arc::new(SystemClock),
            ttl_from_secs(config.ranking.cache_ttl_secs),
        );
        let coordinator = Coordinator::new(Arc::clone(&oracle), cache)
            .with_min_active(config.ranking.min_active_tasks);

        Ok(Self {
            store: TaskStore::new(storage),
            coordinator,
            oracle,
            db_path,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use pacer_core::entities::TaskDraft;

    use super::*;

    #[tokio::test]
    async fn init_creates_database_under_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pacer.db");

        let ctx = AppContext::init(PacerConfig::default(), path.clone()).await.unwrap();
        ctx.store.create(TaskDraft::titled("hello")).await.unwrap();

        assert!(path.exists());
        assert_eq!(ctx.db_path, path);
    }

    #[tokio::test]
    async fn config_ttl_and_threshold_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PacerConfig::default();
        config.ranking.cache_ttl_secs = 120;
        config.general.db_path = dir.path().join("pacer.db").to_string_lossy().into_owned();

        let db_path = resolve_db_path(&config, None).unwrap();
        let ctx = AppContext::init(config, db_path).await.unwrap();
        assert_eq!(ctx.coordinator.cache().ttl(), chrono::TimeDelta::seconds(120));
        assert_eq!(ctx.db_path, dir.path().join("pacer.db"));
    }

    #[test]
    fn db_flag_overrides_config_path() {
        let mut config = PacerConfig::default();
        config.general.db_path = "/from/config.db".to_string();

        assert_eq!(
            resolve_db_path(&config, Some("/from/flag.db")).unwrap(),
            PathBuf::from("/from/flag.db")
        );
        assert_eq!(resolve_db_path(&config, None).unwrap(), PathBuf::from("/from/config.db"));
    }
}
