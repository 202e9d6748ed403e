use shared::model::{MatchConfigDto, MissingCountryPolicy};
use crate::model::macros;

/// Scoring parameters of the fuzzy matcher, validated by `MatchConfigDto::prepare`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MatchConfig {
    pub name_weight: f64,
    pub country_bonus: f64,
    pub country_penalty: f64,
    pub quality_bonus: f64,
    pub missing_country: MissingCountryPolicy,
    pub accept_threshold: f64,
    pub report_threshold: f64,
    pub prefilter_cutoff: f64,
}

impl MatchConfig {
    pub fn missing_country_term(&self) -> f64 {
        match self.missing_country {
            MissingCountryPolicy::Zero => 0.0,
            MissingCountryPolicy::HalfCredit => self.country_bonus / 2.0,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig::from(&MatchConfigDto::default())
    }
}

macros::from_impl!(MatchConfig);
impl From<&MatchConfigDto> for MatchConfig {
    fn from(dto: &MatchConfigDto) -> Self {
        Self {
            name_weight: dto.name_weight,
            country_bonus: dto.country_bonus,
            country_penalty: dto.country_penalty,
            quality_bonus: dto.quality_bonus,
            missing_country: dto.missing_country,
            accept_threshold: dto.accept_threshold,
            report_threshold: dto.report_threshold,
            prefilter_cutoff: dto.prefilter_cutoff,
        }
    }
}
