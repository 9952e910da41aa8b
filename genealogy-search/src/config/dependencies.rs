//! Dependency initialization and wiring for the genealogy search tool.

use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::AppError;
use genealogy_search_ingest::{ReindexConfig, Reindexer};
use genealogy_search_query::{Resolver, SuggestionRouter};
use genealogy_search_repository::{
    DocumentStore, JsonDumpStore, OpenSearchClient, SearchEngineClient,
};

/// Container for all initialized dependencies.
///
/// The store and the engine are built once and shared by every service.
pub struct Dependencies {
    pub store: Arc<dyn DocumentStore>,
    pub engine: Arc<dyn SearchEngineClient>,
    pub index_name: String,
    max_parallel_collections: usize,
}

impl Dependencies {
    /// Initialize all dependencies from the configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the OpenSearch URL is invalid
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        info!(
            opensearch_url = %config.opensearch_url,
            index_name = %config.index_name,
            data_dir = %config.data_dir.display(),
            "Initializing dependencies"
        );

        let engine = OpenSearchClient::new(&config.opensearch_url).map_err(|e| {
            AppError::config(format!("Failed to create OpenSearch client: {}", e))
        })?;
        let store = JsonDumpStore::new(&config.data_dir);

        Ok(Self {
            store: Arc::new(store),
            engine: Arc::new(engine),
            index_name: config.index_name.clone(),
            max_parallel_collections: config.max_parallel_collections,
        })
    }

    /// Verify that OpenSearch is reachable and healthy.
    pub async fn verify_engine(&self) -> Result<(), AppError> {
        let healthy = self
            .engine
            .health_check()
            .await
            .map_err(|e| AppError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(AppError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");
        Ok(())
    }

    pub fn reindexer(&self) -> Reindexer {
        let config = ReindexConfig {
            max_parallel_collections: self.max_parallel_collections,
            ..ReindexConfig::default()
        };
        Reindexer::with_config(self.store.clone(), self.engine.clone(), config)
    }

    pub fn router(&self) -> SuggestionRouter {
        SuggestionRouter::new(self.engine.clone(), self.store.clone(), &self.index_name)
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogFormat;
    use std::path::PathBuf;

    fn config(url: &str) -> AppConfig {
        AppConfig {
            opensearch_url: url.to_string(),
            index_name: "bhp6".to_string(),
            data_dir: PathBuf::from("./data"),
            max_parallel_collections: 2,
            log_format: LogFormat::Text,
        }
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = Dependencies::new(&config("not a url"));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_resolver_reads_dump_directory() {
        let deps = Dependencies::new(&config("http://localhost:9200")).unwrap();
        assert_eq!(deps.index_name, "bhp6");

        // No dump for the collection: the reference resolves to an empty mapping
        let resolved = deps
            .resolver()
            .resolve(&["nowhere.507f1f77bcf86cd799439011".to_string()])
            .await;
        assert_eq!(
            resolved,
            genealogy_search_query::Resolved::Single(Some(serde_json::json!({})))
        );
    }
}
