//! # Genealogy Search Phonetic
//!
//! Phonetic ("sounds like") keys for names in Latin and Hebrew script.
//!
//! Keys follow the Daitch-Mokotoff soundex: six digit codes, where letters
//! with more than one plausible pronunciation produce several alternative
//! codes. Encoding is deterministic and total: when nothing in the input can
//! be coded the result is the single sentinel [`UNKNOWN`].
//!
//! ```
//! use genealogy_search_phonetic::encode;
//! use genealogy_search_shared::Language;
//!
//! assert_eq!(encode("Moskowitz", Language::En), vec!["645740"]);
//! assert_eq!(encode("", Language::He), vec!["UNKNOWN"]);
//! ```

mod english;
mod hebrew;
mod rules;

pub use english::encode_english;
pub use hebrew::encode_hebrew;
pub use rules::CODE_LENGTH;

use genealogy_search_shared::Language;

/// Code returned when no usable name is available.
pub const UNKNOWN: &str = "UNKNOWN";

/// Encode `text` with the coder for `language`.
///
/// Always returns at least one code.
pub fn encode(text: &str, language: Language) -> Vec<String> {
    or_unknown(encode_raw(text, language))
}

/// Detect the script of `text` and encode it accordingly.
pub fn encode_detected(text: &str) -> Vec<String> {
    encode(text, Language::detect(text))
}

/// Encode a bilingual header, preferring the Latin name and falling back to
/// the Hebrew one.
pub fn encode_header(en: Option<&str>, he: Option<&str>) -> Vec<String> {
    let candidates = [(en, Language::En), (he, Language::He)];
    let codes = candidates
        .into_iter()
        .filter_map(|(text, language)| text.filter(|t| !t.is_empty()).map(|t| (t, language)))
        .map(|(text, language)| encode_raw(text, language))
        .find(|codes| !codes.is_empty())
        .unwrap_or_default();
    or_unknown(codes)
}

fn encode_raw(text: &str, language: Language) -> Vec<String> {
    match language {
        Language::En => encode_english(text),
        Language::He => encode_hebrew(text),
    }
}

fn or_unknown(codes: Vec<String>) -> Vec<String> {
    if codes.is_empty() {
        vec![UNKNOWN.to_string()]
    } else {
        codes
    }
}
