use std::fmt::Display;
use enum_iterator::Sequence;

/// Attribute categories extracted from a channel name.
///
/// The declaration order is the extraction priority: quality and technical
/// markers are taken out before two-letter country codes are looked at.
#[derive(Debug, Copy, Clone, serde::Serialize, serde::Deserialize, Sequence, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Quality,
    Technical,
    Country,
    Language,
    Variant,
}

impl TagCategory {
    const QUALITY: &'static str = "quality";
    const TECHNICAL: &'static str = "technical";
    const COUNTRY: &'static str = "country";
    const LANGUAGE: &'static str = "language";
    const VARIANT: &'static str = "variant";
}

impl Display for TagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", match *self {
            Self::Quality => Self::QUALITY,
            Self::Technical => Self::TECHNICAL,
            Self::Country => Self::COUNTRY,
            Self::Language => Self::LANGUAGE,
            Self::Variant => Self::VARIANT,
        })
    }
}

/// At most one canonical value per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IdentityTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical: Option<String>,
}

impl IdentityTags {
    fn slot(&mut self, category: TagCategory) -> &mut Option<String> {
        match category {
            TagCategory::Quality => &mut self.quality,
            TagCategory::Technical => &mut self.technical,
            TagCategory::Country => &mut self.country,
            TagCategory::Language => &mut self.language,
            TagCategory::Variant => &mut self.variant,
        }
    }

    pub fn get(&self, category: TagCategory) -> Option<&str> {
        match category {
            TagCategory::Quality => self.quality.as_deref(),
            TagCategory::Technical => self.technical.as_deref(),
            TagCategory::Country => self.country.as_deref(),
            TagCategory::Language => self.language.as_deref(),
            TagCategory::Variant => self.variant.as_deref(),
        }
    }

    /// Stores `value`, replacing an earlier value of the same category.
    pub fn set(&mut self, category: TagCategory, value: &str) {
        *self.slot(category) = Some(value.to_string());
    }

    pub fn contains(&self, category: TagCategory) -> bool {
        self.get(category).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TagCategory, &str)> {
        enum_iterator::all::<TagCategory>().filter_map(|category| self.get(category).map(|value| (category, value)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Structured identity derived from a raw channel name.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParsedIdentity {
    pub base_name: String,
    pub normalized_name: String,
    pub canonical_id: String,
    pub tags: IdentityTags,
    pub confidence: f64,
}

impl ParsedIdentity {
    pub fn tag(&self, category: TagCategory) -> Option<&str> {
        self.tags.get(category)
    }

    pub fn is_empty(&self) -> bool {
        self.base_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_set_and_iter_order() {
        let mut tags = IdentityTags::default();
        tags.set(TagCategory::Variant, "+1");
        tags.set(TagCategory::Country, "de");
        tags.set(TagCategory::Quality, "hd");
        tags.set(TagCategory::Country, "at");
        let collected: Vec<(TagCategory, &str)> = tags.iter().collect();
        assert_eq!(collected, vec![
            (TagCategory::Quality, "hd"),
            (TagCategory::Country, "at"),
            (TagCategory::Variant, "+1"),
        ]);
        assert_eq!(tags.len(), 3);
        assert!(!tags.contains(TagCategory::Language));
    }

    #[test]
    fn test_tags_serialize_skips_missing() {
        let mut tags = IdentityTags::default();
        tags.set(TagCategory::Quality, "hd");
        assert_eq!(serde_json::to_string(&tags).unwrap(), r#"{"quality":"hd"}"#);
        assert_eq!(TagCategory::Technical.to_string(), "technical");
    }
}
