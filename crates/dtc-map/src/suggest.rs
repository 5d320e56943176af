//! Similarity suggestions for unmapped raw values.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a candidate to be suggested.
pub const SUGGESTION_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub candidate: String,
    pub score: f64,
}

/// Best standard candidate for `raw`, if any is similar enough.
///
/// Ties keep the candidate that sorts first, so results are stable.
pub fn suggest_standard<'a, I>(raw: &str, candidates: I) -> Option<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let score = jaro_winkler::similarity(raw.chars(), candidate.chars());
        if score < SUGGESTION_THRESHOLD {
            continue;
        }
        let better = match best {
            None => true,
            Some((current, current_score)) => match score.partial_cmp(&current_score) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => candidate < current,
                _ => false,
            },
        };
        if better {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, score)| Suggestion {
        candidate: candidate.to_string(),
        score,
    })
}
