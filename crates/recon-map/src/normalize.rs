//! Text normalization for supplier names and comments.

use std::sync::LazyLock;

use regex::Regex;

/// Legal-entity suffixes, matched as whole words with optional periods.
static LEGAL_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(s\.?a\.?c\.?|s\.?a\.?|e\.?i\.?r\.?l\.?|s\.?r\.?l\.?|ltda)\b")
        .expect("legal suffix pattern")
});

/// Everything outside lowercase ASCII letters, digits, whitespace and `ñ`.
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\sñ]").expect("disallowed chars pattern"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// A week marker ("semana 5", "sem 12", "s. 4", "s4") followed by its number.
static WEEK_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(semana|sem|s\.?)\s*\d+").expect("week reference pattern"));

/// Canonical form of a supplier name.
///
/// Lower-cases, drops legal suffixes (`S.A.C.`, `S.R.L.`, `Ltda`, ...),
/// removes punctuation and collapses whitespace. A suffix can surface only
/// after punctuation is removed ("x s-a" becomes "x sa"), so the passes repeat
/// until the value is stable; this keeps `normalize` idempotent.
pub fn normalize(text: &str) -> String {
    let mut current = normalize_once(text);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// [`normalize`] for a cell that may be missing; missing values become `""`.
pub fn normalize_value(value: Option<&str>) -> String {
    value.map(normalize).unwrap_or_default()
}

fn normalize_once(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let without_suffix = LEGAL_SUFFIX_RE.replace_all(&lowered, "");
    let allowed = DISALLOWED_RE.replace_all(&without_suffix, "");
    collapse_whitespace(&allowed)
}

/// Working text for comment decoding.
///
/// Lower-cases, replaces week references with a space so week numbers are not
/// read as quantities, turns every disallowed character into a space and
/// collapses whitespace.
pub fn clean_comment(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_weeks = WEEK_REF_RE.replace_all(&lowered, " ");
    let allowed = DISALLOWED_RE.replace_all(&without_weeks, " ");
    collapse_whitespace(&allowed)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}
