use crate::utils::trace_if_enabled;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use regex::{Match, Regex};
use shared::model::{ChannelRecord, EnrichedChannel, IdentityTags, ParsedIdentity, TagCategory};
use shared::utils::{char_len, collapse_whitespace, has_alphanumeric, has_letter, lookup_alias, slugify,
                    CONSTANTS, COUNTRY_ALIASES, LANGUAGE_ALIASES, QUALITY_ALIASES, TECHNICAL_ALIASES};
use std::sync::LazyLock;

const RATIO_WEIGHT: f64 = 0.6;
const TAG_WEIGHT: f64 = 0.08;
const MAX_TAG_SCORE: f64 = 0.3;
const READABLE_BONUS: f64 = 0.1;
const READABLE_MIN_LEN: usize = 3;
const OVER_STRIP_RATIO: f64 = 0.3;
const OVER_STRIP_FACTOR: f64 = 0.7;

type Canonicalizer = fn(&str) -> String;
type MatchGuard = fn(&str, &Match) -> bool;

struct TagExtractor {
    category: TagCategory,
    pattern: &'static Regex,
    canonicalize: Canonicalizer,
    accept: MatchGuard,
}

fn any_position(_working: &str, _found: &Match) -> bool {
    true
}

/// In an all-caps name every word looks like a code. There a code only
/// counts as the last word or when it stands alone in brackets.
fn code_position(working: &str, found: &Match) -> bool {
    if working.chars().any(char::is_lowercase) {
        return true;
    }
    let before = working[..found.start()].trim_end();
    let after = working[found.end()..].trim_start();
    !has_alphanumeric(after) || (before.ends_with(['(', '[']) && after.starts_with([')', ']']))
}

impl TagExtractor {
    fn for_category(category: TagCategory) -> Self {
        let patterns = &CONSTANTS.normalizer;
        let (pattern, canonicalize, accept): (&'static Regex, Canonicalizer, MatchGuard) = match category {
            TagCategory::Quality => (&patterns.quality, canonical_quality, any_position),
            TagCategory::Technical => (&patterns.technical, canonical_technical, any_position),
            TagCategory::Country => (&patterns.country, canonical_country, code_position),
            TagCategory::Language => (&patterns.language, canonical_language, code_position),
            TagCategory::Variant => (&patterns.variant, canonical_variant, any_position),
        };
        Self { category, pattern, canonicalize, accept }
    }

    /// Stores the canonical value of the first accepted match and erases
    /// every accepted match from `working`. Returns the rest of the string.
    fn apply(&self, working: String, tags: &mut IdentityTags) -> String {
        let found: Vec<Match> = self.pattern.find_iter(&working)
            .filter(|found| (self.accept)(&working, found))
            .collect();
        let Some(first) = found.first() else {
            return working;
        };
        let value = (self.canonicalize)(first.as_str());
        trace_if_enabled!("{}: {} -> {}", self.category, first.as_str(), value);
        tags.set(self.category, &value);

        let mut rest = String::with_capacity(working.len());
        let mut last = 0;
        for found in &found {
            rest.push_str(&working[last..found.start()]);
            rest.push(' ');
            last = found.end();
        }
        rest.push_str(&working[last..]);
        rest
    }
}

// Extraction runs in category declaration order.
static TAG_EXTRACTORS: LazyLock<Vec<TagExtractor>> = LazyLock::new(||
    enum_iterator::all::<TagCategory>().map(TagExtractor::for_category).collect()
);

fn with_alias(aliases: &[(&str, &str)], value: String) -> String {
    lookup_alias(aliases, &value).map_or(value, ToString::to_string)
}

fn canonical_quality(value: &str) -> String {
    let compact: String = value.to_lowercase().chars().filter(|c| *c != ' ' && *c != '-').collect();
    with_alias(QUALITY_ALIASES, compact)
}

fn canonical_technical(value: &str) -> String {
    let compact: String = value.to_lowercase().chars().filter(|c| *c != '.' && *c != '-').collect();
    with_alias(TECHNICAL_ALIASES, compact)
}

fn canonical_country(value: &str) -> String {
    with_alias(COUNTRY_ALIASES, value.trim().to_lowercase())
}

fn canonical_language(value: &str) -> String {
    with_alias(LANGUAGE_ALIASES, value.trim().to_lowercase())
}

fn canonical_variant(value: &str) -> String {
    let value = value.trim().to_lowercase();
    if value.starts_with(['+', '-']) {
        if let Some(stripped) = value.strip_suffix('h') {
            return stripped.to_string();
        }
    }
    value
}

fn unwrap_special_markers(name: &str) -> &str {
    CONSTANTS.normalizer.special_markers.captures(name)
        .and_then(|caps| caps.get(1))
        .map_or(name, |inner| inner.as_str())
}

/// Splits a leading country prefix like `UK|`, `DE:` or `US -` from the name.
/// Only known country codes are taken, and only when a name remains.
fn split_country_prefix(name: &str) -> (Option<String>, &str) {
    if let Some(caps) = CONSTANTS.normalizer.country_prefix.captures(name) {
        if let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) {
            let rest = &name[whole.end()..];
            let code = code.as_str().to_lowercase();
            if has_alphanumeric(rest) && CONSTANTS.country_codes.contains(code.as_str()) {
                return (Some(with_alias(COUNTRY_ALIASES, code)), rest);
            }
        }
    }
    (None, name)
}

fn remove_noise(name: &str) -> String {
    let patterns = &CONSTANTS.normalizer;
    let without_punctuation = patterns.noise_punctuation.replace_all(name, " ").into_owned();
    let without_words = patterns.noise_words.replace_all(&without_punctuation, " ").into_owned();
    if has_letter(&without_words) {
        without_words
    } else {
        without_punctuation
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_confidence(raw_name: &str, base_name: &str, tag_count: usize) -> f64 {
    let base_len = char_len(base_name);
    if base_len == 0 {
        return 0.0;
    }
    let ratio = base_len as f64 / char_len(raw_name).max(1) as f64;
    let mut confidence = RATIO_WEIGHT * ratio + (TAG_WEIGHT * tag_count as f64).min(MAX_TAG_SCORE);
    if base_len >= READABLE_MIN_LEN && has_letter(base_name) {
        confidence += READABLE_BONUS;
    }
    if ratio < OVER_STRIP_RATIO {
        confidence *= OVER_STRIP_FACTOR;
    }
    confidence.clamp(0.0, 1.0)
}

/// Parses a raw display name into its structured identity.
///
/// Never fails: an empty or blank name yields an empty identity with
/// confidence 0.
pub fn normalize(raw_name: &str) -> ParsedIdentity {
    if raw_name.trim().is_empty() {
        return ParsedIdentity::default();
    }

    let unwrapped = unwrap_special_markers(raw_name);
    let (prefix_country, body) = split_country_prefix(unwrapped);

    let mut tags = IdentityTags::default();
    if let Some(country) = prefix_country {
        tags.set(TagCategory::Country, &country);
    }
    let remainder = TAG_EXTRACTORS.iter().fold(body.to_string(), |working, extractor| extractor.apply(working, &mut tags));

    let base_name = collapse_whitespace(&remove_noise(&remainder));
    let normalized_name = base_name.to_lowercase();
    let canonical_id = slugify(&base_name);
    let confidence = compute_confidence(raw_name, &base_name, tags.len());

    ParsedIdentity {
        base_name,
        normalized_name,
        canonical_id,
        tags,
        confidence,
    }
}

/// Attaches a parsed identity to every record, keeping catalog order.
pub fn enrich_catalog(records: Vec<ChannelRecord>) -> Vec<EnrichedChannel> {
    records.into_par_iter()
        .map(|record| {
            let identity = normalize(&record.raw_name);
            EnrichedChannel::new(record, identity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_quality_and_country() {
        let identity = normalize("BBC One HD (UK)");
        assert_eq!(identity.base_name, "BBC One");
        assert_eq!(identity.normalized_name, "bbc one");
        assert_eq!(identity.canonical_id, "bbc-one");
        assert_eq!(identity.tag(TagCategory::Quality), Some("hd"));
        assert_eq!(identity.tag(TagCategory::Country), Some("uk"));
        assert_eq!(identity.tags.len(), 2);
        // 0.6 * 7/15 + 2 * 0.08 + 0.1
        assert_close(identity.confidence, 0.54);
    }

    #[test]
    fn test_special_markers() {
        let identity = normalize("||CNN International||");
        assert_eq!(identity.base_name, "CNN International");
        assert!(identity.tags.is_empty());
        assert!(identity.confidence > 0.0);
    }

    #[test]
    fn test_empty_name() {
        for raw in ["", "   ", "\t\n"] {
            let identity = normalize(raw);
            assert_eq!(identity, ParsedIdentity::default());
            assert_close(identity.confidence, 0.0);
        }
    }

    #[test]
    fn test_canonical_id_ignores_tags() {
        let ids: Vec<String> = ["CNN HD", "CNN SD", "CNN 4K", "CNN FHD HEVC", "CNN"]
            .iter().map(|raw| normalize(raw).canonical_id).collect();
        assert!(ids.iter().all(|id| id == "cnn"), "{ids:?}");
    }

    #[test]
    fn test_clean_name_is_fixed_point() {
        for raw in ["Discovery Science", "  Eurosport 2 ", "Первый"] {
            let identity = normalize(raw);
            assert_eq!(identity.base_name, raw.trim());
            assert!(identity.tags.is_empty());
            assert_eq!(normalize(&identity.base_name).base_name, identity.base_name);
        }
    }

    #[test]
    fn test_prefix_and_technical() {
        let identity = normalize("NL| NPO 3 FHD HEVC");
        assert_eq!(identity.base_name, "NPO 3");
        assert_eq!(identity.tag(TagCategory::Country), Some("nl"));
        assert_eq!(identity.tag(TagCategory::Quality), Some("fhd"));
        assert_eq!(identity.tag(TagCategory::Technical), Some("hevc"));

        let identity = normalize("GB: Sky News");
        assert_eq!(identity.base_name, "Sky News");
        assert_eq!(identity.tag(TagCategory::Country), Some("uk"));

        let identity = normalize("US - CNN");
        assert_eq!(identity.base_name, "CNN");
        assert_eq!(identity.tag(TagCategory::Country), Some("us"));
    }

    #[test]
    fn test_unknown_prefix_is_kept() {
        let identity = normalize("SAT: Odisea");
        assert_eq!(identity.base_name, "SAT Odisea");
        assert!(identity.tag(TagCategory::Country).is_none());

        let identity = normalize("UK:");
        assert_eq!(identity.base_name, "");
        assert_eq!(identity.tag(TagCategory::Country), Some("uk"));
    }

    #[test]
    fn test_body_country_overrides_prefix() {
        let identity = normalize("DE: ORF 1 AT");
        assert_eq!(identity.base_name, "ORF 1");
        assert_eq!(identity.tag(TagCategory::Country), Some("at"));
    }

    #[test]
    fn test_variant_and_country_alias() {
        let identity = normalize("ESPN USA East +1");
        assert_eq!(identity.base_name, "ESPN");
        assert_eq!(identity.tag(TagCategory::Country), Some("us"));
        assert_eq!(identity.tag(TagCategory::Variant), Some("east"));

        let identity = normalize("Comedy Central +1h");
        assert_eq!(identity.base_name, "Comedy Central");
        assert_eq!(identity.tag(TagCategory::Variant), Some("+1"));
    }

    #[test]
    fn test_brackets_and_codec_alias() {
        let identity = normalize("[BR] Globo SD H.264");
        assert_eq!(identity.base_name, "Globo");
        assert_eq!(identity.tag(TagCategory::Quality), Some("sd"));
        assert_eq!(identity.tag(TagCategory::Technical), Some("avc"));
        assert_eq!(identity.tag(TagCategory::Country), Some("br"));
    }

    #[test]
    fn test_language_and_noise_words() {
        let identity = normalize("Первый канал HD RUS");
        assert_eq!(identity.base_name, "Первый");
        assert_eq!(identity.tag(TagCategory::Quality), Some("hd"));
        assert_eq!(identity.tag(TagCategory::Language), Some("rus"));
        assert!(!identity.canonical_id.is_empty());

        let identity = normalize("Rai 1 ITA");
        assert_eq!(identity.base_name, "Rai 1");
        assert_eq!(identity.tag(TagCategory::Language), Some("ita"));

        let identity = normalize("Arte GER");
        assert_eq!(identity.tag(TagCategory::Language), Some("deu"));
    }

    #[test]
    fn test_noise_word_only_name_is_kept() {
        let identity = normalize("TV");
        assert_eq!(identity.base_name, "TV");
        let identity = normalize("Travel Channel");
        assert_eq!(identity.base_name, "Travel");
    }

    #[test]
    fn test_lowercase_words_are_not_codes() {
        let identity = normalize("Love in the Afternoon");
        assert_eq!(identity.base_name, "Love in the Afternoon");
        assert!(identity.tags.is_empty());
        // "HD" must be read as quality before the country table is consulted
        let identity = normalize("Nature HD");
        assert!(identity.tag(TagCategory::Country).is_none());
    }

    #[test]
    fn test_first_quality_match_wins() {
        let identity = normalize("Cinema HD 4K");
        assert_eq!(identity.base_name, "Cinema");
        assert_eq!(identity.tag(TagCategory::Quality), Some("hd"));

        let identity = normalize("Cinema Full HD");
        assert_eq!(identity.tag(TagCategory::Quality), Some("fhd"));
        let identity = normalize("Cinema 720p");
        assert_eq!(identity.tag(TagCategory::Quality), Some("hd"));
    }

    #[test]
    fn test_over_strip_penalty() {
        // 3 of 14 characters kept
        let identity = normalize("ZDF HD HEVC DE");
        assert_eq!(identity.base_name, "ZDF");
        let expected = (0.6 * 3.0 / 14.0 + 3.0 * 0.08 + 0.1) * 0.7;
        assert_close(identity.confidence, expected);
    }

    #[test]
    fn test_tags_keep_canonical_id() {
        let plain = normalize("Sky Sports News");
        let tagged = normalize("Sky Sports News HD");
        assert_eq!(plain.canonical_id, tagged.canonical_id);
        assert!(plain.confidence > 0.0);
        assert!(tagged.confidence <= 1.0);
    }

    #[test]
    fn test_confidence_non_decreasing_in_tag_count() {
        let confidence: Vec<f64> = (0..=5).map(|count| compute_confidence("Sky Sports News HD", "Sky Sports News", count)).collect();
        for pair in confidence.windows(2) {
            assert!(pair[1] >= pair[0], "{confidence:?}");
        }
        // 0.6 * 15/18 + 0.1
        assert_close(confidence[0], 0.6);
        assert_close(confidence[3], 0.84);
        // tag credit is capped at 0.3
        assert_close(confidence[4], 0.9);
        assert_close(confidence[5], 0.9);
        assert_close(compute_confidence("Sky Sports News HD", "", 5), 0.0);
    }

    #[test]
    fn test_digit_names_keep_noise_words() {
        let channel = normalize("Channel 4");
        assert_eq!(channel.base_name, "Channel 4");
        let tv = normalize("TV 4");
        assert_eq!(tv.base_name, "TV 4");
        assert_ne!(channel.normalized_name, tv.normalized_name);
        assert_eq!(normalize("Channel 4 HD").canonical_id, "channel-4");
    }

    #[test]
    fn test_all_caps_name_keeps_leading_words() {
        let identity = normalize("NO LIMIT TV");
        assert_eq!(identity.base_name, "NO LIMIT");
        assert!(identity.tag(TagCategory::Country).is_none());

        let identity = normalize("ITALIA 1 ITA");
        assert_eq!(identity.base_name, "ITALIA 1");
        assert_eq!(identity.tag(TagCategory::Language), Some("ita"));

        let identity = normalize("RTL (DE) HD");
        assert_eq!(identity.base_name, "RTL");
        assert_eq!(identity.tag(TagCategory::Country), Some("de"));
    }

    #[test]
    fn test_enrich_catalog_keeps_order() {
        let records = vec![
            ChannelRecord::new(3, "BBC One HD", 5),
            ChannelRecord::new(1, "CNN", 0),
            ChannelRecord::new("x", "", 0),
        ];
        let enriched = enrich_catalog(records);
        let ids: Vec<String> = enriched.iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "x"]);
        assert_eq!(enriched[0].identity.base_name, "BBC One");
        assert!(enriched[2].identity.is_empty());
    }
}
