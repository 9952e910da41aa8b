//! Document store backed by a directory of `mongoexport` dumps.
//!
//! Each collection lives in `<dir>/<collection>.json`, one extended JSON
//! record per line.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing::debug;

use crate::errors::StoreError;
use crate::interfaces::{DocumentStore, RecordStream, StoreQuery};
use crate::store::{extended_json, ShowFilter};
use genealogy_search_shared::Document;

/// A read-only store over exported collection files.
#[derive(Debug, Clone)]
pub struct JsonDumpStore {
    dir: PathBuf,
}

impl JsonDumpStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    async fn open(&self, collection: &str) -> Result<RecordStream, StoreError> {
        let path = self.collection_path(collection);
        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::unknown_collection(collection));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), "Opened collection dump");

        let lines = LinesStream::new(BufReader::new(file).lines());
        let records = lines
            .map_err(StoreError::from)
            .try_filter(|line| futures::future::ready(!line.trim().is_empty()))
            .and_then(|line| futures::future::ready(extended_json::parse_record(&line)));

        Ok(records.boxed())
    }
}

#[async_trait]
impl DocumentStore for JsonDumpStore {
    async fn find(&self, collection: &str, filter: &ShowFilter) -> Result<RecordStream, StoreError> {
        let filter = filter.clone();
        let records = self.open(collection).await?;
        Ok(records
            .try_filter(move |record| futures::future::ready(filter.matches(record)))
            .boxed())
    }

    async fn find_one(
        &self,
        collection: &str,
        query: &StoreQuery,
    ) -> Result<Option<Document>, StoreError> {
        let mut records = match self.open(collection).await {
            Ok(records) => records,
            Err(StoreError::UnknownCollection(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        while let Some(record) = records.next().await {
            match record {
                Ok(record) if query.matches(&record) => return Ok(Some(record)),
                Ok(_) => {}
                // A broken line elsewhere in the dump does not hide a later match
                Err(StoreError::Parse(msg)) => {
                    debug!(collection = %collection, error = %msg, "Skipping undecodable record");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genealogy_search_shared::{ObjectId, SourceValue};
    use std::io::Write;
    use tempfile::TempDir;

    fn dump(dir: &TempDir, collection: &str, lines: &[&str]) {
        let mut file = std::fs::File::create(dir.path().join(format!("{}.json", collection))).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[tokio::test]
    async fn test_find_streams_matching_records() {
        let dir = TempDir::new().unwrap();
        dump(
            &dir,
            "places",
            &[
                r#"{"_id": {"$oid": "507f1f77bcf86cd799439011"}, "Header": {"En": "A"}}"#,
                "",
                r#"{"_id": {"$oid": "507f1f77bcf86cd799439012"}, "Header": {"En": "B"}}"#,
            ],
        );
        let store = JsonDumpStore::new(dir.path());

        let records: Vec<Document> = store
            .find("places", &ShowFilter::all())
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get_str("Header.En"), Some("B"));
    }

    #[tokio::test]
    async fn test_find_reports_bad_line_in_stream() {
        let dir = TempDir::new().unwrap();
        dump(&dir, "places", &[r#"{"Header": {"En": "A"}}"#, "{broken"]);
        let store = JsonDumpStore::new(dir.path());

        let results: Vec<Result<Document, StoreError>> = store
            .find("places", &ShowFilter::all())
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(StoreError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_dump_is_unknown_collection() {
        let dir = TempDir::new().unwrap();
        let store = JsonDumpStore::new(dir.path());
        let result = store.find("movies", &ShowFilter::all()).await;
        assert!(matches!(result, Err(StoreError::UnknownCollection(_))));
    }

    #[tokio::test]
    async fn test_find_one_by_id() {
        let dir = TempDir::new().unwrap();
        dump(
            &dir,
            "familyNames",
            &[
                "{broken",
                r#"{"_id": {"$oid": "507f1f77bcf86cd799439011"}, "Header": {"En": "COHEN"}}"#,
            ],
        );
        let store = JsonDumpStore::new(dir.path());
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();

        let record = store
            .find_one("familyNames", &StoreQuery::ById(oid))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.get("_id"), Some(&SourceValue::ObjectId(oid)));
        assert!(store
            .find_one("places", &StoreQuery::ById(oid))
            .await
            .unwrap()
            .is_none());
    }
}
