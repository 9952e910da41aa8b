//! Daitch-Mokotoff soundex for names in Latin script.

use crate::rules::{self, Rule};

#[rustfmt::skip]
const RULES: &[Rule] = &[
    Rule::new("AI", "0", "1", ""),
    Rule::new("AJ", "0", "1", ""),
    Rule::new("AY", "0", "1", ""),
    Rule::new("AU", "0", "7", ""),
    Rule::new("A", "0", "", ""),
    Rule::new("B", "7", "7", "7"),
    Rule::new("CHS", "5", "54", "54"),
    Rule::new("CH", "5|4", "5|4", "5|4"),
    Rule::new("CK", "5|45", "5|45", "5|45"),
    Rule::new("CSZ", "4", "4", "4"),
    Rule::new("CZS", "4", "4", "4"),
    Rule::new("CZ", "4", "4", "4"),
    Rule::new("CS", "4", "4", "4"),
    Rule::new("C", "5|4", "5|4", "5|4"),
    Rule::new("DRZ", "4", "4", "4"),
    Rule::new("DRS", "4", "4", "4"),
    Rule::new("DSH", "4", "4", "4"),
    Rule::new("DSZ", "4", "4", "4"),
    Rule::new("DZH", "4", "4", "4"),
    Rule::new("DZS", "4", "4", "4"),
    Rule::new("DS", "4", "4", "4"),
    Rule::new("DZ", "4", "4", "4"),
    Rule::new("DT", "3", "3", "3"),
    Rule::new("D", "3", "3", "3"),
    Rule::new("EI", "0", "1", ""),
    Rule::new("EJ", "0", "1", ""),
    Rule::new("EY", "0", "1", ""),
    Rule::new("EU", "1", "1", ""),
    Rule::new("E", "0", "", ""),
    Rule::new("FB", "7", "7", "7"),
    Rule::new("F", "7", "7", "7"),
    Rule::new("G", "5", "5", "5"),
    Rule::new("H", "5", "5", ""),
    Rule::new("IA", "1", "", ""),
    Rule::new("IE", "1", "", ""),
    Rule::new("IO", "1", "", ""),
    Rule::new("IU", "1", "", ""),
    Rule::new("I", "0", "", ""),
    Rule::new("J", "1|4", "1|4", "1|4"),
    Rule::new("KS", "5", "54", "54"),
    Rule::new("KH", "5", "5", "5"),
    Rule::new("K", "5", "5", "5"),
    Rule::new("L", "8", "8", "8"),
    Rule::new("MN", "66", "66", "66"),
    Rule::new("M", "6", "6", "6"),
    Rule::new("NM", "66", "66", "66"),
    Rule::new("N", "6", "6", "6"),
    Rule::new("OI", "0", "1", ""),
    Rule::new("OJ", "0", "1", ""),
    Rule::new("OY", "0", "1", ""),
    Rule::new("O", "0", "", ""),
    Rule::new("PF", "7", "7", "7"),
    Rule::new("PH", "7", "7", "7"),
    Rule::new("P", "7", "7", "7"),
    Rule::new("Q", "5", "5", "5"),
    Rule::new("RZ", "94|4", "94|4", "94|4"),
    Rule::new("RS", "94|4", "94|4", "94|4"),
    Rule::new("R", "9", "9", "9"),
    Rule::new("SCHTSCH", "2", "4", "4"),
    Rule::new("SCHTSH", "2", "4", "4"),
    Rule::new("SCHTCH", "2", "4", "4"),
    Rule::new("SHTSCH", "2", "4", "4"),
    Rule::new("SHTCH", "2", "4", "4"),
    Rule::new("SHTSH", "2", "4", "4"),
    Rule::new("STSCH", "2", "4", "4"),
    Rule::new("SCHT", "2", "43", "43"),
    Rule::new("SCHD", "2", "43", "43"),
    Rule::new("SHCH", "2", "4", "4"),
    Rule::new("STCH", "2", "4", "4"),
    Rule::new("STRZ", "2", "4", "4"),
    Rule::new("STRS", "2", "4", "4"),
    Rule::new("STSH", "2", "4", "4"),
    Rule::new("SZCZ", "2", "4", "4"),
    Rule::new("SZCS", "2", "4", "4"),
    Rule::new("SCH", "4", "4", "4"),
    Rule::new("SHT", "2", "43", "43"),
    Rule::new("SHD", "2", "43", "43"),
    Rule::new("SZT", "2", "43", "43"),
    Rule::new("SZD", "2", "43", "43"),
    Rule::new("SH", "4", "4", "4"),
    Rule::new("SC", "2", "4", "4"),
    Rule::new("ST", "2", "43", "43"),
    Rule::new("SD", "2", "43", "43"),
    Rule::new("SZ", "4", "4", "4"),
    Rule::new("S", "4", "4", "4"),
    Rule::new("TTSCH", "4", "4", "4"),
    Rule::new("TTCH", "4", "4", "4"),
    Rule::new("TTSZ", "4", "4", "4"),
    Rule::new("TSCH", "4", "4", "4"),
    Rule::new("TCH", "4", "4", "4"),
    Rule::new("TRZ", "4", "4", "4"),
    Rule::new("TRS", "4", "4", "4"),
    Rule::new("TSH", "4", "4", "4"),
    Rule::new("TTS", "4", "4", "4"),
    Rule::new("TTZ", "4", "4", "4"),
    Rule::new("TZS", "4", "4", "4"),
    Rule::new("TSZ", "4", "4", "4"),
    Rule::new("TH", "3", "3", "3"),
    Rule::new("TS", "4", "4", "4"),
    Rule::new("TC", "4", "4", "4"),
    Rule::new("TZ", "4", "4", "4"),
    Rule::new("T", "3", "3", "3"),
    Rule::new("UI", "0", "1", ""),
    Rule::new("UJ", "0", "1", ""),
    Rule::new("UY", "0", "1", ""),
    Rule::new("UE", "0", "", ""),
    Rule::new("U", "0", "", ""),
    Rule::new("V", "7", "7", "7"),
    Rule::new("W", "7", "7", "7"),
    Rule::new("X", "5", "54", "54"),
    Rule::new("Y", "1", "", ""),
    Rule::new("ZHDZH", "2", "4", "4"),
    Rule::new("ZDZH", "2", "4", "4"),
    Rule::new("ZSCH", "4", "4", "4"),
    Rule::new("ZDZ", "2", "4", "4"),
    Rule::new("ZHD", "2", "43", "43"),
    Rule::new("ZSH", "4", "4", "4"),
    Rule::new("ZD", "2", "43", "43"),
    Rule::new("ZH", "4", "4", "4"),
    Rule::new("ZS", "4", "4", "4"),
    Rule::new("Z", "4", "4", "4"),
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Fold an uppercase letter with a diacritic onto its base letter.
fn fold(c: char) -> Option<char> {
    let folded = match c {
        'A'..='Z' => c,
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ą' => 'A',
        'Ç' | 'Ć' | 'Č' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' | 'Ę' | 'Ě' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ł' => 'L',
        'Ñ' | 'Ń' => 'N',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'O',
        'Ř' => 'R',
        'Ś' | 'Š' => 'S',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ý' => 'Y',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        _ => return None,
    };
    Some(folded)
}

fn normalize(text: &str) -> Vec<char> {
    text.chars()
        .flat_map(char::to_uppercase)
        .filter_map(fold)
        .collect()
}

/// Encode a Latin-script name. Returns every alternative code, or nothing
/// when the text holds no codable letters.
pub fn encode_english(text: &str) -> Vec<String> {
    rules::apply(RULES, &normalize(text), is_vowel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_code() {
        assert_eq!(encode_english("Moskowitz"), vec!["645740"]);
    }

    #[test]
    fn test_branching_codes() {
        assert_eq!(encode_english("Auerbach"), vec!["097500", "097400"]);
        assert_eq!(encode_english("Peters"), vec!["739400", "734000"]);
    }

    #[test]
    fn test_vowel_separated_duplicates() {
        let codes = encode_english("Cohen");
        assert!(codes.contains(&"556000".to_string()));
        assert!(codes.contains(&"456000".to_string()));
    }

    #[test]
    fn test_case_spaces_and_diacritics_ignored() {
        assert_eq!(encode_english("tel aviv"), encode_english("TELAVIV"));
        assert_eq!(encode_english("Müller"), encode_english("MULLER"));
    }

    #[test]
    fn test_no_letters() {
        assert!(encode_english("").is_empty());
        assert!(encode_english("1234 -").is_empty());
    }
}
