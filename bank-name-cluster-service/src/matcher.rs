use crate::metrics::{edit_ratio, jaro_winkler, phonetic, token_set, token_sort};
use crate::normalize::normalize;
use serde::Serialize;

pub const STRONG_MATCH_SCORE: f64 = 85.0;
pub const POSSIBLE_MATCH_SCORE: f64 = 70.0;
pub const WEAK_MATCH_SCORE: f64 = 60.0;

const EDIT_WEIGHT: f64 = 0.25;
const JARO_WINKLER_WEIGHT: f64 = 0.30;
const TOKEN_SORT_WEIGHT: f64 = 0.20;
const TOKEN_SET_WEIGHT: f64 = 0.15;
const PHONETIC_WEIGHT: f64 = 0.10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchCategory {
    StrongMatch,
    PossibleMatch,
    WeakMatch,
    NoMatch,
}

impl MatchCategory {
    /// Bands are inclusive at their lower bound.
    pub fn from_score(score: f64) -> Self {
        if score >= STRONG_MATCH_SCORE {
            MatchCategory::StrongMatch
        } else if score >= POSSIBLE_MATCH_SCORE {
            MatchCategory::PossibleMatch
        } else if score >= WEAK_MATCH_SCORE {
            MatchCategory::WeakMatch
        } else {
            MatchCategory::NoMatch
        }
    }
}

/// The five component scores, each in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MetricScores {
    pub edit_ratio: f64,
    pub jaro_winkler: f64,
    pub token_sort: f64,
    pub token_set: f64,
    pub phonetic: f64,
}

impl MetricScores {
    /// Scores two already normalized names.
    pub fn compute(a: &str, b: &str) -> Self {
        MetricScores {
            edit_ratio: edit_ratio(a, b),
            jaro_winkler: jaro_winkler(a, b),
            token_sort: token_sort(a, b),
            token_set: token_set(a, b),
            phonetic: phonetic(a, b),
        }
    }

    pub fn weighted(&self) -> f64 {
        self.edit_ratio * EDIT_WEIGHT
            + self.jaro_winkler * JARO_WINKLER_WEIGHT
            + self.token_sort * TOKEN_SORT_WEIGHT
            + self.token_set * TOKEN_SET_WEIGHT
            + self.phonetic * PHONETIC_WEIGHT
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// `None` when the comparison short-circuited before scoring.
    pub scores: Option<MetricScores>,
    pub final_score: f64,
    pub category: MatchCategory,
}

impl MatchResult {
    fn no_match() -> Self {
        MatchResult {
            scores: None,
            final_score: 0.0,
            category: MatchCategory::NoMatch,
        }
    }

    fn identical() -> Self {
        MatchResult {
            scores: None,
            final_score: 100.0,
            category: MatchCategory::StrongMatch,
        }
    }

    pub fn from_scores(scores: MetricScores) -> Self {
        let final_score = round2(scores.weighted());
        MatchResult {
            scores: Some(scores),
            final_score,
            category: MatchCategory::from_score(final_score),
        }
    }
}

/// Rounds to two decimals, halves away from zero.
fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Compares two raw bank names.
///
/// Blank input never matches. Names that normalize to the same string are a
/// strong match at 100 without running the scorers.
pub fn compare(raw_a: &str, raw_b: &str) -> MatchResult {
    if raw_a.trim().is_empty() || raw_b.trim().is_empty() {
        return MatchResult::no_match();
    }
    let a = normalize(raw_a);
    let b = normalize(raw_b);
    if a == b {
        return MatchResult::identical();
    }
    MatchResult::from_scores(MetricScores::compute(&a, &b))
}
