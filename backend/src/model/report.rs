use crate::model::MatchConfig;
use shared::model::{EnrichedChannel, IdentityCluster, MatchResult, MatchType};

const HIGH_CONFIDENCE: f64 = 0.9;
const MEDIUM_CONFIDENCE: f64 = 0.7;

/// One enriched, hierarchy annotated catalog.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Catalog {
    pub label: String,
    pub channels: Vec<EnrichedChannel>,
    pub clusters: Vec<IdentityCluster>,
}

impl Catalog {
    pub fn summary(&self) -> CatalogSummary {
        let variants = self.clusters.iter().map(|cluster| cluster.variants().count()).sum();
        CatalogSummary {
            label: self.label.clone(),
            channels: self.channels.len(),
            clusters: self.clusters.len(),
            roots: self.clusters.len(),
            variants,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CatalogSummary {
    pub label: String,
    pub channels: usize,
    pub clusters: usize,
    pub roots: usize,
    pub variants: usize,
}

/// Accepted matches by composite score: high `>= 0.9`, medium `>= 0.7`, low below.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ScoreDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct MatchStats {
    pub total: usize,
    pub exact: usize,
    pub fuzzy: usize,
    pub none: usize,
    /// Percent of sources with an accepted match.
    pub match_rate: f64,
    /// Mean composite score of accepted matches.
    pub average_score: f64,
    pub distribution: ScoreDistribution,
}

impl MatchStats {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut stats = MatchStats { total: results.len(), ..MatchStats::default() };
        let mut score_sum = 0.0;
        for result in results {
            match result.match_type {
                MatchType::Exact => stats.exact += 1,
                MatchType::Fuzzy => stats.fuzzy += 1,
                MatchType::None => {
                    stats.none += 1;
                    continue;
                }
            }
            score_sum += result.composite_score;
            if result.composite_score >= HIGH_CONFIDENCE {
                stats.distribution.high += 1;
            } else if result.composite_score >= MEDIUM_CONFIDENCE {
                stats.distribution.medium += 1;
            } else {
                stats.distribution.low += 1;
            }
        }
        let matched = stats.exact + stats.fuzzy;
        if stats.total > 0 {
            stats.match_rate = matched as f64 * 100.0 / stats.total as f64;
        }
        if matched > 0 {
            stats.average_score = score_sum / matched as f64;
        }
        stats
    }
}

/// Everything a resolution run produced.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResolutionReport {
    pub config: MatchConfig,
    pub source_summary: CatalogSummary,
    pub target_summary: CatalogSummary,
    pub stats: MatchStats,
    pub results: Vec<MatchResult>,
    /// Rejected links whose score reached the report threshold.
    pub near_misses: Vec<MatchResult>,
    pub source: Catalog,
    pub target: Catalog,
}
