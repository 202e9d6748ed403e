use std::fmt::Display;
use log::warn;
use crate::error::ResolverError;
use crate::input_err_res;
use crate::utils::{default_accept_threshold, default_country_bonus, default_country_penalty,
                   default_name_weight, default_prefilter_cutoff, default_quality_bonus,
                   default_report_threshold, is_default_accept_threshold, is_default_name_weight,
                   is_default_prefilter_cutoff, is_default_report_threshold};

pub const MIN_NAME_WEIGHT: f64 = 0.70;
pub const MAX_NAME_WEIGHT: f64 = 0.75;

/// Country term awarded when at least one side of a pair has no country tag.
#[derive(Debug, Copy, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingCountryPolicy {
    #[default]
    Zero,
    HalfCredit,
}

impl MissingCountryPolicy {
    const ZERO: &'static str = "zero";
    const HALF_CREDIT: &'static str = "half_credit";
}

impl Display for MissingCountryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", match *self {
            Self::Zero => Self::ZERO,
            Self::HalfCredit => Self::HALF_CREDIT,
        })
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MatchConfigDto {
    #[serde(default = "default_name_weight", skip_serializing_if = "is_default_name_weight")]
    pub name_weight: f64,
    #[serde(default = "default_country_bonus")]
    pub country_bonus: f64,
    #[serde(default = "default_country_penalty")]
    pub country_penalty: f64,
    #[serde(default = "default_quality_bonus")]
    pub quality_bonus: f64,
    #[serde(default)]
    pub missing_country: MissingCountryPolicy,
    #[serde(default = "default_accept_threshold", skip_serializing_if = "is_default_accept_threshold")]
    pub accept_threshold: f64,
    #[serde(default = "default_report_threshold", skip_serializing_if = "is_default_report_threshold")]
    pub report_threshold: f64,
    #[serde(default = "default_prefilter_cutoff", skip_serializing_if = "is_default_prefilter_cutoff")]
    pub prefilter_cutoff: f64,
}

impl Default for MatchConfigDto {
    fn default() -> Self {
        MatchConfigDto {
            name_weight: default_name_weight(),
            country_bonus: default_country_bonus(),
            country_penalty: default_country_penalty(),
            quality_bonus: default_quality_bonus(),
            missing_country: MissingCountryPolicy::default(),
            accept_threshold: default_accept_threshold(),
            report_threshold: default_report_threshold(),
            prefilter_cutoff: default_prefilter_cutoff(),
        }
    }
}

fn clamp_unit(name: &str, value: f64) -> f64 {
    if value < 0.0 {
        warn!("the {name} is less than 0, set to 0");
        0.0
    } else if value > 1.0 {
        warn!("the {name} is more than 1, set to 1");
        1.0
    } else {
        value
    }
}

impl MatchConfigDto {
    /// Validates the scoring parameters.
    ///
    /// Non-finite values and negative bonus or penalty values are rejected.
    /// `name_weight` is clamped into `[0.70, 0.75]`, thresholds into `[0, 1]`,
    /// and a `report_threshold` above `accept_threshold` is lowered to it.
    pub fn prepare(&mut self) -> Result<(), ResolverError> {
        let values = [
            ("name_weight", self.name_weight),
            ("country_bonus", self.country_bonus),
            ("country_penalty", self.country_penalty),
            ("quality_bonus", self.quality_bonus),
            ("accept_threshold", self.accept_threshold),
            ("report_threshold", self.report_threshold),
            ("prefilter_cutoff", self.prefilter_cutoff),
        ];
        if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return input_err_res!("matching.{name} is not a number: {value}");
        }
        for (name, value) in &values[1..4] {
            if *value < 0.0 {
                return input_err_res!("matching.{name} must not be negative: {value}");
            }
        }

        if self.name_weight < MIN_NAME_WEIGHT {
            warn!("the name_weight is less than {MIN_NAME_WEIGHT}, set to {MIN_NAME_WEIGHT}");
            self.name_weight = MIN_NAME_WEIGHT;
        } else if self.name_weight > MAX_NAME_WEIGHT {
            warn!("the name_weight is more than {MAX_NAME_WEIGHT}, set to {MAX_NAME_WEIGHT}");
            self.name_weight = MAX_NAME_WEIGHT;
        }

        self.accept_threshold = clamp_unit("accept_threshold", self.accept_threshold);
        self.report_threshold = clamp_unit("report_threshold", self.report_threshold);
        self.prefilter_cutoff = clamp_unit("prefilter_cutoff", self.prefilter_cutoff);

        if self.report_threshold > self.accept_threshold {
            warn!("the report_threshold is above the accept_threshold, set to {}", self.accept_threshold);
            self.report_threshold = self.accept_threshold;
        }

        Ok(())
    }
}
