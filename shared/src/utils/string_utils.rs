use crate::utils::CONSTANTS;
use deunicode::deunicode;

pub fn is_blank_optional_string(s: &Option<String>) -> bool {
    s.as_ref().is_none_or(|s| s.chars().all(char::is_whitespace))
}

/// Replaces every whitespace run with a single space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    CONSTANTS.re_whitespace.replace_all(text, " ").trim().to_string()
}

/// Length in characters, not bytes.
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn has_letter(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

pub fn has_alphanumeric(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

/// Builds an ASCII slug: "Télé Monde 2" -> "tele-monde-2".
///
/// Non-latin scripts are transliterated, so a Cyrillic name still yields a
/// non-empty slug. The result only depends on `text`.
pub fn slugify(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let folded = deunicode(text).to_lowercase();
    let cleaned = CONSTANTS.re_slug_invalid.replace_all(&folded, "");
    CONSTANTS.re_slug_separator.replace_all(&cleaned, "-").trim_matches('-').to_string()
}
