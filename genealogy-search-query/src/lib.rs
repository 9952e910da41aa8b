//! # Genealogy Search Query
//!
//! Read-side services: resolving compound references and exact header
//! lookups against the primary store, and multi-strategy suggestions
//! against the search index.

pub mod resolver;
pub mod suggest;

pub use resolver::{Resolved, Resolver, MAX_REFERENCES_PER_REQUEST};
pub use suggest::{SuggestionRouter, Suggestions, WizardResult, MAX_SUGGESTIONS};
