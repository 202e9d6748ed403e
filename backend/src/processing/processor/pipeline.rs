use crate::model::{Catalog, MatchConfig, MatchStats, ResolutionReport};
use crate::processing::parser::channel_name::enrich_catalog;
use crate::processing::processor::hierarchy::{apply_hierarchy, ensure_unique_ids};
use crate::processing::processor::matcher::ChannelMatcher;
use crate::utils::StepMeasure;
use log::info;
use shared::error::ResolverError;
use shared::model::{ChannelRecord, MatchResult};

/// Validates, normalizes and groups the records of one catalog.
///
/// Records without a source tag get `label`. Duplicate ids fail before any
/// record is normalized.
pub fn prepare_catalog(label: &str, records: Vec<ChannelRecord>) -> Result<Catalog, ResolverError> {
    ensure_unique_ids(records.iter().map(|record| &record.id))?;
    let mut step = StepMeasure::new(label);
    let records = records.into_iter()
        .map(|record| if record.source.is_empty() { record.with_source(label) } else { record })
        .collect();
    let mut channels = enrich_catalog(records);
    step.tick("normalization");
    let clusters = apply_hierarchy(&mut channels)?;
    step.stop("hierarchy");

    let catalog = Catalog { label: label.to_string(), channels, clusters };
    let summary = catalog.summary();
    info!("Catalog {}: {} channels, {} clusters, {} variants", summary.label, summary.channels, summary.clusters, summary.variants);
    Ok(catalog)
}

fn near_misses(results: &[MatchResult], report_threshold: f64) -> Vec<MatchResult> {
    results.iter()
        .filter(|result| !result.is_matched() && result.composite_score >= report_threshold)
        .cloned()
        .collect()
}

/// Links the source catalog to the target catalog and assembles the report.
pub fn exec_resolution(config: &MatchConfig, source: Catalog, target: Catalog) -> ResolutionReport {
    let mut step = StepMeasure::new("matching");
    let results = ChannelMatcher::new(config).match_catalogs(&source.channels, &target.channels);
    step.stop(&format!("{} sources against {} candidates", source.channels.len(), target.channels.len()));

    let stats = MatchStats::from_results(&results);
    info!("Matched {} of {} channels ({:.1}%): {} exact, {} fuzzy, {} unmatched",
        stats.exact + stats.fuzzy, stats.total, stats.match_rate, stats.exact, stats.fuzzy, stats.none);
    let near_misses = near_misses(&results, config.report_threshold);
    if !near_misses.is_empty() {
        info!("{} near misses at or above {:.2}", near_misses.len(), config.report_threshold);
    }

    ResolutionReport {
        config: config.clone(),
        source_summary: source.summary(),
        target_summary: target.summary(),
        stats,
        results,
        near_misses,
        source,
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::model::{ChannelId, MatchConfigDto, MatchType};

    fn records(entries: &[(i64, &str, u32)]) -> Vec<ChannelRecord> {
        entries.iter().map(|(id, name, liveness)| ChannelRecord::new(*id, name, *liveness)).collect()
    }

    #[test]
    fn test_prepare_catalog() {
        let catalog = prepare_catalog("community", records(&[(1, "BBC One HD", 5), (2, "BBC One SD", 2), (3, "CNN", 0)])).unwrap();
        assert_eq!(catalog.channels.len(), 3);
        assert!(catalog.channels.iter().all(|c| c.record.source == "community" && c.position.is_some()));
        let summary = catalog.summary();
        assert_eq!((summary.clusters, summary.roots, summary.variants), (2, 2, 1));
    }

    #[test]
    fn test_prepare_catalog_keeps_record_source() {
        let catalog = prepare_catalog("provider", vec![ChannelRecord::new(1, "ZDF", 0).with_source("dvb")]).unwrap();
        assert_eq!(catalog.channels[0].record.source, "dvb");
    }

    #[test]
    fn test_prepare_catalog_rejects_duplicates() {
        let err = prepare_catalog("provider", records(&[(4, "ZDF", 0), (4, "ARD", 0)])).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_exec_resolution() {
        let config = MatchConfig::from(MatchConfigDto { accept_threshold: 0.7, report_threshold: 0.6, ..MatchConfigDto::default() });
        let source = prepare_catalog("community", records(&[(1, "BBC One HD", 5), (2, "CNN", 0), (3, "History UK", 0), (4, "Kika", 0)])).unwrap();
        let target = prepare_catalog("provider", records(&[(10, "BBC One", 1), (11, "CNN International", 1), (12, "History Extra DE", 0)])).unwrap();
        let report = exec_resolution(&config, source, target);

        assert_eq!(report.results.len(), 4);
        assert_eq!(report.results[0].match_type, MatchType::Exact);
        assert_eq!(report.results[1].candidate_id, Some(ChannelId::Num(11)));
        assert_eq!(report.results[2].match_type, MatchType::None);
        assert_eq!(report.near_misses.len(), 1);
        assert_eq!(report.near_misses[0].source_id, ChannelId::Num(3));
        assert_eq!((report.stats.exact, report.stats.fuzzy, report.stats.none), (1, 1, 2));
        assert_eq!(report.source_summary.channels, 4);
        assert_eq!(report.target_summary.label, "provider");
    }
}
