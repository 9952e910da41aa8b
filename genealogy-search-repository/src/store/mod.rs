//! Primary store implementations.

pub mod extended_json;
mod filter;
mod json_dump;
mod memory;

pub use filter::ShowFilter;
pub use json_dump::JsonDumpStore;
pub use memory::MemoryStore;
