//! Edit-distance matching for "did you mean" suggestions.
//!
//! Distances are Levenshtein distances over Unicode scalar values after NFKC normalization
//! and lowercasing, so `User` and `user` are the same name.

use unicode_normalization::UnicodeNormalization;

/// Maximum number of suggestions offered for an unknown token.
pub const MAX_SUGGESTIONS: usize = 3;

/// Minimum distance cutoff; the effective cutoff is `max(MIN_THRESHOLD, len(input) / 2)`.
pub const MIN_THRESHOLD: usize = 2;

fn normalize(s: &str) -> Vec<char> {
    s.nfkc().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive Levenshtein distance between two names.
pub fn distance(a: &str, b: &str) -> usize {
    let a = normalize(a);
    let b = normalize(b);
    // Keep the row as short as the shorter input.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Largest distance at which a candidate is still considered related to `input`.
pub fn threshold(input: &str) -> usize {
    MIN_THRESHOLD.max(normalize(input).len() / 2)
}

/// Rank `candidates` by distance to `input`, closest first, ties broken by name.
///
/// Candidates beyond [`threshold`] are dropped and duplicates collapse, so the result holds
/// at most `max` distinct names.
pub fn rank_candidates<S: AsRef<str>>(input: &str, candidates: &[S], max: usize) -> Vec<String> {
    let limit = threshold(input);
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(AsRef::as_ref)
        .map(|c| (distance(input, c), c))
        .filter(|(d, _)| *d <= limit)
        .collect();
    scored.sort_unstable();
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(max)
        .map(|(_, c)| c.to_string())
        .collect()
}
