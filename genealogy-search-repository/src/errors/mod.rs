//! Error types for the search repository.

mod search_error;
mod store_error;

pub use search_error::SearchError;
pub use store_error::StoreError;
