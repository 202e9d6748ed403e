use crate::utils::debug_if_enabled;
use crate::model::MatchConfig;
use crate::processing::processor::similarity::{token_set_ratio, TokenSet};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use shared::model::{ChannelId, EnrichedChannel, MatchResult, MatchType, ParsedIdentity, ScoreBreakdown, TagCategory};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Preference between two candidates carrying the same name: the hierarchy
/// root first, then the most live endpoints, then the lowest id.
fn exact_preference(a: &EnrichedChannel, b: &EnrichedChannel) -> Ordering {
    b.is_root().cmp(&a.is_root())
        .then_with(|| b.liveness_count().cmp(&a.liveness_count()))
        .then_with(|| a.id().cmp(b.id()))
}

struct PoolEntry<'a> {
    channel: &'a EnrichedChannel,
    tokens: TokenSet,
}

struct ScoredCandidate<'a> {
    channel: &'a EnrichedChannel,
    score: f64,
    breakdown: ScoreBreakdown,
}

impl ScoredCandidate<'_> {
    /// Higher composite score first, then more live endpoints, then lowest id.
    fn order(&self, other: &Self) -> Ordering {
        other.score.total_cmp(&self.score)
            .then_with(|| other.channel.liveness_count().cmp(&self.channel.liveness_count()))
            .then_with(|| self.channel.id().cmp(other.channel.id()))
    }
}

/// Links the channels of a source catalog to the channels of a candidate catalog.
pub struct ChannelMatcher<'a> {
    config: &'a MatchConfig,
}

impl<'a> ChannelMatcher<'a> {
    pub fn new(config: &'a MatchConfig) -> Self {
        Self { config }
    }

    fn country_term(&self, source: &ParsedIdentity, candidate: &ParsedIdentity) -> f64 {
        match (source.tag(TagCategory::Country), candidate.tag(TagCategory::Country)) {
            (Some(left), Some(right)) if left == right => self.config.country_bonus,
            (Some(_), Some(_)) => -self.config.country_penalty,
            _ => self.config.missing_country_term(),
        }
    }

    fn quality_term(&self, source: &ParsedIdentity, candidate: &ParsedIdentity) -> f64 {
        match (source.tag(TagCategory::Quality), candidate.tag(TagCategory::Quality)) {
            (Some(left), Some(right)) if left == right => self.config.quality_bonus,
            _ => 0.0,
        }
    }

    /// Weighted name similarity plus the country and quality terms, clamped to `[0, 1]`.
    pub fn composite_score(&self, name_score: f64, source: &ParsedIdentity, candidate: &ParsedIdentity) -> (f64, ScoreBreakdown) {
        let breakdown = ScoreBreakdown {
            name_score,
            country_term: self.country_term(source, candidate),
            quality_term: self.quality_term(source, candidate),
        };
        let score = name_score * self.config.name_weight + breakdown.country_term + breakdown.quality_term;
        (score.clamp(0.0, 1.0), breakdown)
    }

    fn exact_index<'c>(candidates: &'c [EnrichedChannel]) -> HashMap<&'c str, &'c EnrichedChannel> {
        let mut index: HashMap<&str, &EnrichedChannel> = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            let key = candidate.identity.normalized_name.as_str();
            if key.is_empty() {
                continue;
            }
            index.entry(key)
                .and_modify(|current| {
                    if exact_preference(candidate, current) == Ordering::Less {
                        *current = candidate;
                    }
                })
                .or_insert(candidate);
        }
        index
    }

    fn approximate_match(&self, source: &EnrichedChannel, pool: &[PoolEntry]) -> MatchResult {
        let source_id = source.id().clone();
        let tokens = TokenSet::new(&source.identity.normalized_name);
        if tokens.is_empty() || pool.is_empty() {
            return MatchResult::unmatched(source_id, 0.0, ScoreBreakdown::default());
        }

        let lexical: Vec<f64> = pool.iter().map(|entry| token_set_ratio(&tokens, &entry.tokens)).collect();
        let best_lexical = lexical.iter().copied().fold(0.0_f64, f64::max);
        if best_lexical < self.config.prefilter_cutoff {
            let breakdown = ScoreBreakdown { name_score: best_lexical, ..ScoreBreakdown::default() };
            return MatchResult::unmatched(source_id, 0.0, breakdown);
        }

        let best = pool.iter().zip(lexical.iter())
            .filter(|(_, score)| **score >= self.config.prefilter_cutoff)
            .map(|(entry, score)| {
                let (composite, breakdown) = self.composite_score(*score, &source.identity, &entry.channel.identity);
                ScoredCandidate { channel: entry.channel, score: composite, breakdown }
            })
            .min_by(ScoredCandidate::order);

        match best {
            Some(candidate) if candidate.score >= self.config.accept_threshold => MatchResult {
                source_id,
                candidate_id: Some(candidate.channel.id().clone()),
                composite_score: candidate.score,
                match_type: MatchType::Fuzzy,
                breakdown: candidate.breakdown,
            },
            Some(candidate) => MatchResult::unmatched(source_id, candidate.score, candidate.breakdown),
            None => MatchResult::unmatched(source_id, 0.0, ScoreBreakdown::default()),
        }
    }

    /// Produces one result per source channel, in source order.
    ///
    /// Sources whose normalized name equals a candidate's are linked exactly.
    /// The rest are compared against every candidate that was not linked
    /// exactly. When the closest name clears the prefilter cutoff, every
    /// candidate at or above the cutoff gets a composite score and the best
    /// one is accepted if it reaches the accept threshold.
    pub fn match_catalogs(&self, sources: &[EnrichedChannel], candidates: &[EnrichedChannel]) -> Vec<MatchResult> {
        let index = Self::exact_index(candidates);
        let exact: Vec<Option<&EnrichedChannel>> = sources.iter()
            .map(|source| index.get(source.identity.normalized_name.as_str()).copied())
            .collect();

        let consumed: HashSet<&ChannelId> = exact.iter().flatten().map(|candidate| candidate.id()).collect();
        let pool: Vec<PoolEntry> = candidates.iter()
            .filter(|candidate| !consumed.contains(candidate.id()))
            .map(|candidate| PoolEntry { channel: candidate, tokens: TokenSet::new(&candidate.identity.normalized_name) })
            .filter(|entry| !entry.tokens.is_empty())
            .collect();
        debug_if_enabled!("exact pass linked {} of {} sources, {} candidates left for fuzzy matching",
            exact.iter().flatten().count(), sources.len(), pool.len());

        sources.par_iter()
            .zip(exact.par_iter())
            .map(|(source, linked)| match linked {
                Some(candidate) => MatchResult::exact(source.id().clone(), candidate.id().clone()),
                None => self.approximate_match(source, &pool),
            })
            .collect()
    }
}
