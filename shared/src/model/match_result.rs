use std::fmt::Display;
use crate::model::ChannelId;

#[derive(Debug, Copy, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Fuzzy,
    None,
}

impl MatchType {
    const EXACT: &'static str = "exact";
    const FUZZY: &'static str = "fuzzy";
    const NONE: &'static str = "none";
}

impl Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", match *self {
            Self::Exact => Self::EXACT,
            Self::Fuzzy => Self::FUZZY,
            Self::None => Self::NONE,
        })
    }
}

/// Per factor contribution to a composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreBreakdown {
    pub name_score: f64,
    pub country_term: f64,
    pub quality_term: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchResult {
    pub source_id: ChannelId,
    pub candidate_id: Option<ChannelId>,
    pub composite_score: f64,
    pub match_type: MatchType,
    pub breakdown: ScoreBreakdown,
}

impl MatchResult {
    pub fn exact(source_id: ChannelId, candidate_id: ChannelId) -> Self {
        Self {
            source_id,
            candidate_id: Some(candidate_id),
            composite_score: 1.0,
            match_type: MatchType::Exact,
            breakdown: ScoreBreakdown { name_score: 1.0, country_term: 0.0, quality_term: 0.0 },
        }
    }

    pub fn unmatched(source_id: ChannelId, composite_score: f64, breakdown: ScoreBreakdown) -> Self {
        Self {
            source_id,
            candidate_id: None,
            composite_score,
            match_type: MatchType::None,
            breakdown,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.match_type != MatchType::None
    }
}
