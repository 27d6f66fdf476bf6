//! Fuzzy similarity scorers on a 0–100 scale.
//!
//! Everything here is built on the normalized Indel similarity from
//! `rapidfuzz::fuzz::ratio`. Strings are compared as sequences of `char`s, so
//! `ñ` counts as one character.
//!
//! - [`ratio`]: whole-string similarity.
//! - [`partial_ratio`]: best alignment of the shorter string inside the longer.
//! - [`token_sort_ratio`]: ratio after sorting whitespace tokens.
//! - [`token_set_ratio`]: ratio over token intersections and differences.

use std::collections::BTreeSet;

use rapidfuzz::fuzz;

/// Signature shared by all scorers, used by [`extract_one`].
pub type Scorer = fn(&str, &str) -> f64;

/// Whole-string similarity.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    chars_ratio(&a, &b)
}

fn chars_ratio(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    fuzz::ratio(a.iter().copied(), b.iter().copied()) * 100.0
}

/// Best [`ratio`] of the shorter string against every same-length window of
/// the longer one, including the partial windows hanging off either edge.
///
/// When both strings have the same length both directions are tried.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return chars_ratio(&a, &b);
    }
    if a.len() < b.len() {
        best_window(&a, &b)
    } else if a.len() > b.len() {
        best_window(&b, &a)
    } else {
        best_window(&a, &b).max(best_window(&b, &a))
    }
}

fn best_window(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let h = haystack.len();
    let prefixes = (1..n).map(|end| &haystack[..end]);
    let full = (0..=h - n).map(|start| &haystack[start..start + n]);
    let suffixes = (h - n + 1..h).map(|start| &haystack[start..]);

    let mut best = 0.0_f64;
    for window in prefixes.chain(full).chain(suffixes) {
        best = best.max(chars_ratio(needle, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// [`ratio`] after sorting the whitespace-separated tokens of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-set similarity.
///
/// Splits both strings into token sets and compares the sorted intersection
/// against intersection + remaining tokens of each side. Returns 100 when the
/// sets share tokens and one side has nothing extra, and 0 when either side
/// has no tokens.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let left: BTreeSet<&str> = a.split_whitespace().collect();
    let right: BTreeSet<&str> = b.split_whitespace().collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let sect: Vec<&str> = left.intersection(&right).copied().collect();
    let only_left: Vec<&str> = left.difference(&right).copied().collect();
    let only_right: Vec<&str> = right.difference(&left).copied().collect();

    if !sect.is_empty() && (only_left.is_empty() || only_right.is_empty()) {
        return 100.0;
    }

    let sect = sect.join(" ");
    let combined_left = join_non_empty(&sect, &only_left.join(" "));
    let combined_right = join_non_empty(&sect, &only_right.join(" "));

    let differences = ratio(&combined_left, &combined_right);
    if sect.is_empty() {
        return differences;
    }
    differences
        .max(ratio(&sect, &combined_left))
        .max(ratio(&sect, &combined_right))
}

fn join_non_empty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

/// A choice picked by [`extract_one`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch<'a> {
    pub index: usize,
    pub choice: &'a str,
    pub score: f64,
}

/// Highest-scoring choice for `query`. The first choice wins ties.
///
/// Returns `None` only when `choices` is empty.
pub fn extract_one<'a, I, S>(query: &str, choices: I, scorer: Scorer) -> Option<BestMatch<'a>>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + 'a + ?Sized,
{
    let mut best: Option<BestMatch<'a>> = None;
    for (index, choice) in choices.into_iter().enumerate() {
        let choice = choice.as_ref();
        let score = scorer(query, choice);
        if best.is_none_or(|current| score > current.score) {
            best = Some(BestMatch {
                index,
                choice,
                score,
            });
        }
    }
    best
}
