//! Compound references of the form `"<collection>.<id>"`.

use std::fmt;

use crate::object_id::ObjectId;

/// A reference to one record across all collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundReference {
    pub collection: String,
    pub id: String,
}

impl CompoundReference {
    /// Split a reference on its first `.`. Returns `None` when there is no
    /// separator.
    pub fn parse(reference: &str) -> Option<Self> {
        let (collection, id) = reference.split_once('.')?;
        Some(Self {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }

    /// The identifier parsed into the store's native type, if valid.
    pub fn object_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.id).ok()
    }
}

impl fmt::Display for CompoundReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.collection, self.id)
    }
}
