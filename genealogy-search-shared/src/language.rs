//! Script-based language detection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two header languages carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Latin script.
    En,
    /// Hebrew script.
    He,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::He];

    /// Classify a string by script: any Hebrew character routes it to
    /// [`Language::He`], everything else is [`Language::En`].
    pub fn detect(text: &str) -> Self {
        if is_hebrew(text) {
            Language::He
        } else {
            Language::En
        }
    }

    /// The key used for this language inside a `Header` mapping.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "En",
            Language::He => "He",
        }
    }

    /// Dotted path of this language's header field.
    pub fn header_path(&self) -> String {
        format!("Header.{}", self.tag())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Whether a code point belongs to the Hebrew block or the Hebrew
/// alphabetic presentation forms.
pub fn is_hebrew_char(c: char) -> bool {
    matches!(c, '\u{0590}'..='\u{05FF}' | '\u{FB1D}'..='\u{FB4F}')
}

/// Whether the text contains at least one Hebrew character.
pub fn is_hebrew(text: &str) -> bool {
    text.chars().any(is_hebrew_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_latin() {
        assert_eq!(Language::detect("Tel Aviv"), Language::En);
        assert_eq!(Language::detect(""), Language::En);
        assert_eq!(Language::detect("1234"), Language::En);
    }

    #[test]
    fn test_detect_hebrew() {
        assert_eq!(Language::detect("תל אביב"), Language::He);
        // A single Hebrew character is enough
        assert_eq!(Language::detect("Cohen כהן"), Language::He);
        // Presentation form (shin with shin dot)
        assert_eq!(Language::detect("\u{FB2A}"), Language::He);
    }

    #[test]
    fn test_header_path() {
        assert_eq!(Language::En.header_path(), "Header.En");
        assert_eq!(Language::He.header_path(), "Header.He");
    }
}
