//! Daitch-Mokotoff style coding for names in Hebrew script.
//!
//! Hebrew spells most vowels implicitly, so the letters that double as vowel
//! carriers (alef, he, vav, yod, ayin) are treated as vowels for positional
//! rules, and vav and yod fork between their consonant code and no code.
//! Final letter forms code like their regular forms. A geresh after gimel,
//! zayin or tsadi marks the borrowed sounds j, zh and ch.

use crate::rules::{self, Rule};

#[rustfmt::skip]
const RULES: &[Rule] = &[
    Rule::new("א", "0", "", ""),
    Rule::new("ע", "0", "", ""),
    Rule::new("ה", "5", "5", ""),
    Rule::new("וו", "7", "7", "7"),
    Rule::new("ו", "7", "7", "7|"),
    Rule::new("יי", "1", "1", ""),
    Rule::new("י", "1", "1", "1|"),
    Rule::new("ב", "7", "7", "7"),
    Rule::new("ג'", "4", "4", "4"),
    Rule::new("ג", "5", "5", "5"),
    Rule::new("דז", "4", "4", "4"),
    Rule::new("ד", "3", "3", "3"),
    Rule::new("ז'", "4", "4", "4"),
    Rule::new("ז", "4", "4", "4"),
    Rule::new("ח", "5", "5", "5"),
    Rule::new("טש", "4", "4", "4"),
    Rule::new("ט", "3", "3", "3"),
    Rule::new("כ", "5", "5", "5"),
    Rule::new("ך", "5", "5", "5"),
    Rule::new("ל", "8", "8", "8"),
    Rule::new("מ", "6", "6", "6"),
    Rule::new("ם", "6", "6", "6"),
    Rule::new("נ", "6", "6", "6"),
    Rule::new("ן", "6", "6", "6"),
    Rule::new("ס", "4", "4", "4"),
    Rule::new("פ", "7", "7", "7"),
    Rule::new("ף", "7", "7", "7"),
    Rule::new("צ'", "4", "4", "4"),
    Rule::new("צ", "4", "4", "4"),
    Rule::new("ץ'", "4", "4", "4"),
    Rule::new("ץ", "4", "4", "4"),
    Rule::new("ק", "5", "5", "5"),
    Rule::new("ר", "9", "9", "9"),
    Rule::new("שט", "2", "43", "43"),
    Rule::new("ש", "4", "4", "4"),
    Rule::new("ת", "3", "3", "3"),
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'א' | 'ה' | 'ו' | 'י' | 'ע')
}

/// Keep Hebrew letters, map geresh marks to `'`, drop points and
/// everything else.
fn normalize(text: &str) -> Vec<char> {
    text.chars()
        .filter_map(|c| match c {
            'א'..='ת' => Some(c),
            '\u{05F3}' | '\'' | '\u{2019}' => Some('\''),
            _ => None,
        })
        .collect()
}

/// Encode a Hebrew-script name. Returns every alternative code, or nothing
/// when the text holds no Hebrew letters.
pub fn encode_hebrew(text: &str) -> Vec<String> {
    rules::apply(RULES, &normalize(text), is_vowel)
}
