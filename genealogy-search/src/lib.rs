//! # Genealogy Search
//!
//! Main library for the genealogy search indexer.
//!
//! This crate provides the configuration and dependency wiring used by the
//! `genealogy-search` command line tool.

pub mod config;

pub use config::{AppConfig, Dependencies, LogFormat};

use thiserror::Error;

/// Errors that can occur during initialization or execution.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Rebuild error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] genealogy_search_ingest::IngestError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] genealogy_search_repository::SearchError),

    /// Primary store error.
    #[error("Store error: {0}")]
    StoreError(#[from] genealogy_search_repository::StoreError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
