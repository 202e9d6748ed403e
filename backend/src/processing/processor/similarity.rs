use std::collections::BTreeSet;

/// Lowercased whitespace tokens of a name, deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: BTreeSet<String>,
}

impl TokenSet {
    pub fn new(name: &str) -> Self {
        Self {
            tokens: name.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.map(String::as_str).collect::<Vec<&str>>().join(" ")
}

fn combine(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left} {right}"),
    }
}

#[inline]
fn ratio(left: &str, right: &str) -> f64 {
    strsim::normalized_levenshtein(left, right)
}

/// Order insensitive similarity of two token sets in `[0, 1]`.
///
/// Shared tokens are compared against shared tokens plus each side's extra
/// tokens, and the best edit distance ratio wins. When one side's tokens are
/// all contained in the other (`CNN` and `CNN International`) the score is 1.
pub fn token_set_ratio(left: &TokenSet, right: &TokenSet) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let intersection = join_tokens(left.tokens.intersection(&right.tokens));
    let diff_left = join_tokens(left.tokens.difference(&right.tokens));
    let diff_right = join_tokens(right.tokens.difference(&left.tokens));

    if !intersection.is_empty() && (diff_left.is_empty() || diff_right.is_empty()) {
        return 1.0;
    }

    let combined_left = combine(&intersection, &diff_left);
    let combined_right = combine(&intersection, &diff_right);
    let mut best = ratio(&combined_left, &combined_right);
    if !intersection.is_empty() {
        best = best
            .max(ratio(&intersection, &combined_left))
            .max(ratio(&intersection, &combined_right));
    }
    best.clamp(0.0, 1.0)
}
