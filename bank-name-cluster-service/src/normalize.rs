use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_LETTER: Regex = Regex::new(r"[^A-Z\s]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Canonical comparison form of a bank name: uppercase ASCII letters
/// separated by single spaces.
pub fn normalize(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let letters = NON_LETTER.replace_all(&upper, "");
    WHITESPACE.replace_all(&letters, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn uppercases_and_strips_punctuation() {
        assert_eq!(normalize("State Bank of India."), "STATE BANK OF INDIA");
        assert_eq!(normalize("H.D.F.C. Bank Ltd"), "HDFC BANK LTD");
        assert_eq!(normalize("Bank-123 of\tBaroda"), "BANK OF BARODA");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(normalize("  STATE BANK OF  INDIA \n"), "STATE BANK OF INDIA");
        assert_eq!(normalize("AXIS & CO"), "AXIS CO");
    }

    #[test]
    fn empty_and_letterless_inputs_normalize_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("12-34 (5)"), "");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "\\PC{0,40}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn output_is_letters_and_single_spaces(raw in "\\PC{0,40}") {
            let out = normalize(&raw);
            prop_assert!(out.chars().all(|c| c.is_ascii_uppercase() || c == ' '));
            prop_assert!(!out.contains("  "));
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
