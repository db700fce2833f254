//! Pairwise similarity scorers for normalized bank names.
//!
//! Every scorer takes two strings that have already been through
//! [`crate::normalize::normalize`] and returns a percentage in `[0, 100]`.
//! None of them normalize again.

use std::collections::BTreeSet;
use strsim::levenshtein;

/// Levenshtein similarity scaled by the longer string: `(1 - d / max_len) * 100`.
///
/// Two empty strings are identical and score 100.
pub fn edit_ratio(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100.0;
    }
    let distance = levenshtein(a, b);
    (1.0 - distance as f64 / max_len as f64) * 100.0
}

const WINKLER_PREFIX_CAP: usize = 4;
const WINKLER_SCALING: f64 = 0.1;

/// Jaro similarity in `[0, 1]`.
fn jaro(a: &[char], b: &[char]) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    // A window of -1 (longest string has one char) can never match.
    let window = match (a.len().max(b.len()) / 2).checked_sub(1) {
        Some(window) => window,
        None => return 0.0,
    };

    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;
    for (i, ca) in a.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window).min(b.len() - 1);
        if lo > hi {
            continue;
        }
        for j in lo..=hi {
            if !b_matched[j] && b[j] == *ca {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }
    if matches == 0 {
        return 0.0;
    }

    let a_seq = a.iter().zip(&a_matched).filter(|(_, hit)| **hit).map(|(c, _)| c);
    let b_seq = b.iter().zip(&b_matched).filter(|(_, hit)| **hit).map(|(c, _)| c);
    let half_transpositions = a_seq.zip(b_seq).filter(|(x, y)| x != y).count();
    let transpositions = half_transpositions as f64 / 2.0;

    let m = matches as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - transpositions) / m) / 3.0
}

/// Jaro-Winkler similarity with the common prefix boost capped at four characters.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let jaro = jaro(&a, &b);
    let prefix = a
        .iter()
        .zip(&b)
        .take(WINKLER_PREFIX_CAP)
        .take_while(|(x, y)| x == y)
        .count();
    let boosted = jaro + prefix as f64 * WINKLER_SCALING * (1.0 - jaro);
    (boosted * 100.0).clamp(0.0, 100.0)
}

/// Edit ratio after sorting each side's tokens, so word order stops mattering.
pub fn token_sort(a: &str, b: &str) -> f64 {
    edit_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Edit ratio over `shared ++ only_in_a` versus `shared ++ only_in_b`.
///
/// Tokens inside each segment are in lexicographic order.
pub fn token_set(a: &str, b: &str) -> f64 {
    let a_tokens: BTreeSet<&str> = a.split_whitespace().collect();
    let b_tokens: BTreeSet<&str> = b.split_whitespace().collect();

    let shared: Vec<&str> = a_tokens.intersection(&b_tokens).copied().collect();
    let left: Vec<&str> = shared
        .iter()
        .copied()
        .chain(a_tokens.difference(&b_tokens).copied())
        .collect();
    let right: Vec<&str> = shared
        .iter()
        .copied()
        .chain(b_tokens.difference(&a_tokens).copied())
        .collect();
    edit_ratio(&left.join(" "), &right.join(" "))
}

fn soundex_digit(letter: char) -> char {
    match letter {
        'B' | 'F' | 'P' | 'V' => '1',
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => '2',
        'D' | 'T' => '3',
        'L' => '4',
        'M' | 'N' => '5',
        'R' => '6',
        _ => '0',
    }
}

/// Four character Soundex code.
///
/// Non-letters are skipped. Runs of the same digit collapse before zeros
/// are dropped, so letters of one class separated by a vowel both count.
/// Input without any letter encodes to the empty string.
pub fn soundex(s: &str) -> String {
    let mut letters = s
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase());
    let first = match letters.next() {
        Some(first) => first,
        None => return String::new(),
    };

    let mut code = String::with_capacity(4);
    code.push(first);
    let mut previous = None;
    for digit in letters.map(soundex_digit) {
        if code.len() == 4 {
            break;
        }
        if previous == Some(digit) {
            continue;
        }
        previous = Some(digit);
        if digit != '0' {
            code.push(digit);
        }
    }
    while code.len() < 4 {
        code.push('0');
    }
    code
}

/// 100 when both names share a Soundex code, 0 otherwise.
///
/// Two letterless names both encode to "" and therefore agree.
pub fn phonetic(a: &str, b: &str) -> f64 {
    if soundex(a) == soundex(b) {
        100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn edit_ratio_matches_classic_distance() {
        approx(edit_ratio("KITTEN", "SITTING"), (1.0 - 3.0 / 7.0) * 100.0);
        approx(edit_ratio("KITTEN", "SITTING"), 57.14);
    }

    #[test]
    fn edit_ratio_edges() {
        assert_eq!(edit_ratio("", ""), 100.0);
        assert_eq!(edit_ratio("ABC", ""), 0.0);
        assert_eq!(edit_ratio("HDFC", "HDFC"), 100.0);
    }

    #[test]
    fn jaro_winkler_reference_pairs() {
        approx(jaro_winkler("MARTHA", "MARHTA"), 96.11);
        approx(jaro_winkler("DIXON", "DICKSONX"), 81.33);
        assert_eq!(jaro_winkler("ABC", "XYZ"), 0.0);
        assert_eq!(jaro_winkler("AXIS BANK", "AXIS BANK"), 100.0);
        assert_eq!(jaro_winkler("", ""), 100.0);
        assert_eq!(jaro_winkler("A", "B"), 0.0);
    }

    #[test]
    fn jaro_winkler_prefix_boost_stops_at_four() {
        // jaro = (1 + 14/18 + 1) / 3 with a shared prefix longer than four.
        let jaro = (1.0 + 14.0 / 18.0 + 1.0) / 3.0;
        let expected = (jaro + 4.0 * 0.1 * (1.0 - jaro)) * 100.0;
        approx(jaro_winkler("ICICI BANK LTD", "ICICI BANK LIMITED"), expected);
    }

    #[test]
    fn token_sort_ignores_word_order() {
        assert_eq!(token_sort("STATE BANK OF INDIA", "BANK OF INDIA STATE"), 100.0);
        assert!(edit_ratio("STATE BANK OF INDIA", "BANK OF INDIA STATE") < 100.0);
    }

    #[test]
    fn token_set_tolerates_extra_suffix() {
        // "BANK ICICI LTD" vs "BANK ICICI": four deletions over fourteen chars.
        approx(token_set("ICICI BANK LTD", "ICICI BANK"), (1.0 - 4.0 / 14.0) * 100.0);
        assert_eq!(token_set("BANK BANK OF INDIA", "BANK OF INDIA"), 100.0);
    }

    #[test]
    fn soundex_classic_pairs() {
        assert_eq!(soundex("SMITH"), "S530");
        assert_eq!(soundex("SMYTH"), "S530");
        assert_eq!(soundex("Smith"), soundex("Smyth"));
        assert_eq!(soundex("ROBERT"), "R163");
        assert_eq!(soundex("A"), "A000");
    }

    #[test]
    fn soundex_keeps_repeats_split_by_vowels() {
        // A-T-A-T gives 0, 3, 0, 3: the vowels break the run.
        assert_eq!(soundex("BATAT"), "B330");
        assert_eq!(soundex("BATT"), "B300");
    }

    #[test]
    fn soundex_of_letterless_input_is_empty() {
        assert_eq!(soundex(""), "");
        assert_eq!(soundex("123 ..."), "");
        assert_eq!(phonetic("", ""), 100.0);
        assert_eq!(phonetic("", "A"), 0.0);
    }

    #[test]
    fn phonetic_compares_whole_names() {
        assert_eq!(phonetic("ICICI BANK LTD", "ICICI BANK LIMITED"), 100.0);
        assert_eq!(phonetic("STATE BANK OF INDIA", "PUNJAB NATIONAL BANK"), 0.0);
    }

    proptest! {
        #[test]
        fn scores_stay_in_range(a in "[A-Z ]{0,24}", b in "[A-Z ]{0,24}") {
            for score in [
                edit_ratio(&a, &b),
                jaro_winkler(&a, &b),
                token_sort(&a, &b),
                token_set(&a, &b),
                phonetic(&a, &b),
            ] {
                prop_assert!((0.0..=100.0).contains(&score));
            }
        }

        #[test]
        fn scorers_are_symmetric_where_expected(a in "[A-Z ]{0,24}", b in "[A-Z ]{0,24}") {
            prop_assert_eq!(edit_ratio(&a, &b), edit_ratio(&b, &a));
            prop_assert_eq!(token_sort(&a, &b), token_sort(&b, &a));
            prop_assert_eq!(phonetic(&a, &b), phonetic(&b, &a));
        }
    }
}
