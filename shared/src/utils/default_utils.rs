pub const fn default_name_weight() -> f64 { 0.75 }
pub const fn default_country_bonus() -> f64 { 0.15 }
pub const fn default_country_penalty() -> f64 { 0.10 }
pub const fn default_quality_bonus() -> f64 { 0.10 }

// Composite score a fuzzy link must reach to be accepted.
pub const fn default_accept_threshold() -> f64 { 0.6 }
// Rejected links at or above this score are listed as near misses.
pub const fn default_report_threshold() -> f64 { 0.5 }
// Best lexical score a source needs before the composite score is computed.
pub const fn default_prefilter_cutoff() -> f64 { 0.6 }

#[allow(clippy::float_cmp)]
pub fn is_default_name_weight(value: &f64) -> bool { *value == default_name_weight() }
#[allow(clippy::float_cmp)]
pub fn is_default_accept_threshold(value: &f64) -> bool { *value == default_accept_threshold() }
#[allow(clippy::float_cmp)]
pub fn is_default_report_threshold(value: &f64) -> bool { *value == default_report_threshold() }
#[allow(clippy::float_cmp)]
pub fn is_default_prefilter_cutoff(value: &f64) -> bool { *value == default_prefilter_cutoff() }
