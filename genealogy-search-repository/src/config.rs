//! Configuration for the search index created by a rebuild.

/// Shard layout of a freshly created index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSettings {
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            number_of_shards: 1,
            number_of_replicas: 1,
        }
    }
}

impl IndexSettings {
    /// Single-node layout with no replicas, for local development.
    pub fn single_node() -> Self {
        Self {
            number_of_shards: 1,
            number_of_replicas: 0,
        }
    }
}
