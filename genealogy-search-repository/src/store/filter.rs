//! The "publishable" predicate applied when streaming records for indexing.

use genealogy_search_shared::Document;

/// Selects the records that may be exposed through search.
///
/// A record passes when every `required` field equals its value, no
/// `excluded` field equals its value, and, if `any_text` is non-empty, at
/// least one of those fields holds a non-empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowFilter {
    pub required: Vec<(String, String)>,
    pub excluded: Vec<(String, String)>,
    pub any_text: Vec<String>,
}

impl ShowFilter {
    /// The filter used for the public site: completed, fully licensed,
    /// not internal, with a description in at least one language.
    pub fn publishable() -> Self {
        Self {
            required: vec![
                ("StatusDesc".to_string(), "Completed".to_string()),
                ("RightsDesc".to_string(), "Full".to_string()),
            ],
            excluded: vec![("DisplayStatusDesc".to_string(), "Internal Use".to_string())],
            any_text: vec!["UnitText1.En".to_string(), "UnitText1.He".to_string()],
        }
    }

    /// Accept every record.
    pub fn all() -> Self {
        Self {
            required: Vec::new(),
            excluded: Vec::new(),
            any_text: Vec::new(),
        }
    }

    pub fn matches(&self, record: &Document) -> bool {
        let required = self
            .required
            .iter()
            .all(|(path, value)| record.get_str(path) == Some(value.as_str()));
        let excluded = self
            .excluded
            .iter()
            .any(|(path, value)| record.get_str(path) == Some(value.as_str()));
        let has_text = self.any_text.is_empty()
            || self
                .any_text
                .iter()
                .any(|path| record.get_str(path).is_some_and(|text| !text.is_empty()));

        required && !excluded && has_text
    }
}

impl Default for ShowFilter {
    fn default() -> Self {
        Self::publishable()
    }
}
