//! Settings read from the environment.

use std::env;
use std::path::PathBuf;

use crate::AppError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default index name.
const DEFAULT_INDEX_NAME: &str = "bhp6";

/// Default directory holding the collection dumps.
const DEFAULT_DATA_DIR: &str = "./data";

/// Default number of collections indexed at once.
const DEFAULT_MAX_PARALLEL_COLLECTIONS: usize = 1;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub opensearch_url: String,
    pub index_name: String,
    pub data_dir: PathBuf,
    pub max_parallel_collections: usize,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `INDEX_NAME`: Search index name (default: bhp6)
    /// - `DATA_DIR`: Directory of `<collection>.json` dumps (default: ./data)
    /// - `MAX_PARALLEL_COLLECTIONS`: Collections indexed at once (default: 1)
    /// - `LOG_FORMAT`: `json` for JSON logs, anything else for text
    ///
    /// # Returns
    ///
    /// * `Ok(AppConfig)` - The configuration
    /// * `Err(AppError)` - If a numeric variable does not parse
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_parallel_collections = match lookup("MAX_PARALLEL_COLLECTIONS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::config(format!(
                        "MAX_PARALLEL_COLLECTIONS must be a positive integer, got {:?}",
                        raw
                    )))
                }
            },
            None => DEFAULT_MAX_PARALLEL_COLLECTIONS,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            opensearch_url: lookup("OPENSEARCH_URL")
                .unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
            index_name: lookup("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            max_parallel_collections,
            log_format,
        })
    }
}
