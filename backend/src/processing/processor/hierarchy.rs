use crate::utils::debug_if_enabled;
use indexmap::IndexMap;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use shared::error::ResolverError;
use shared::input_err_res;
use shared::model::{ChannelId, ClusterMember, EnrichedChannel, IdentityCluster, TagCategory};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, PartialEq, Eq, Hash)]
enum GroupKey<'a> {
    Name(&'a str),
    // Records without a usable name never share a cluster.
    Unnamed(&'a ChannelId),
}

impl GroupKey<'_> {
    fn of(channel: &EnrichedChannel) -> GroupKey<'_> {
        let key = channel.grouping_key();
        if key.is_empty() {
            GroupKey::Unnamed(channel.id())
        } else {
            GroupKey::Name(key)
        }
    }

    fn as_key(&self) -> String {
        match self {
            GroupKey::Name(name) => (*name).to_string(),
            GroupKey::Unnamed(_) => String::new(),
        }
    }
}

/// Rejects a catalog in which an id occurs more than once.
pub fn ensure_unique_ids<'a, I>(ids: I) -> Result<(), ResolverError>
where
    I: IntoIterator<Item = &'a ChannelId>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return input_err_res!("duplicate channel id {id} in catalog");
        }
    }
    Ok(())
}

/// Root order: most live endpoints first, then the lowest id.
fn root_order(a: &EnrichedChannel, b: &EnrichedChannel) -> Ordering {
    b.liveness_count().cmp(&a.liveness_count()).then_with(|| a.id().cmp(b.id()))
}

fn select_root<'a>(members: &[&'a EnrichedChannel]) -> Option<&'a EnrichedChannel> {
    members.iter()
        .filter(|channel| !channel.identity.tags.contains(TagCategory::Variant))
        .min_by(|a, b| root_order(a, b))
        .or_else(|| members.iter().min_by(|a, b| root_order(a, b)))
        .copied()
}

fn build_cluster(key: &GroupKey, members: &[&EnrichedChannel]) -> Option<IdentityCluster> {
    let root = select_root(members)?;
    let root_id = root.id().clone();
    let cluster_members = members.iter()
        .map(|channel| {
            if channel.id() == &root_id {
                ClusterMember::root(root_id.clone())
            } else {
                ClusterMember::variant(channel.id().clone(), &root_id)
            }
        })
        .collect();
    Some(IdentityCluster {
        key: key.as_key(),
        root_id,
        members: cluster_members,
    })
}

/// Groups the channels of one catalog into clusters of variants and picks
/// the root of every cluster.
///
/// Clusters are returned in order of their first member in the catalog, and
/// members keep catalog order. Duplicate ids are rejected before anything is
/// grouped.
pub fn build_hierarchy(channels: &[EnrichedChannel]) -> Result<Vec<IdentityCluster>, ResolverError> {
    ensure_unique_ids(channels.iter().map(EnrichedChannel::id))?;

    let mut groups: IndexMap<GroupKey, Vec<&EnrichedChannel>> = IndexMap::new();
    for channel in channels {
        groups.entry(GroupKey::of(channel)).or_default().push(channel);
    }
    debug_if_enabled!("grouped {} channels into {} clusters", channels.len(), groups.len());

    let clusters: Vec<IdentityCluster> = groups.into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .filter_map(|(key, members)| build_cluster(&key, &members))
        .collect();
    Ok(clusters)
}

/// Writes every channel's cluster position back onto the channel.
pub fn annotate_hierarchy(channels: &mut [EnrichedChannel], clusters: &[IdentityCluster]) {
    let positions: HashMap<&ChannelId, &ClusterMember> = clusters.iter()
        .flat_map(|cluster| cluster.members.iter())
        .map(|member| (&member.id, member))
        .collect();
    for channel in channels.iter_mut() {
        channel.position = positions.get(channel.id()).map(|member| (*member).clone());
    }
}

/// Builds the hierarchy of a catalog and annotates its channels.
pub fn apply_hierarchy(channels: &mut [EnrichedChannel]) -> Result<Vec<IdentityCluster>, ResolverError> {
    let clusters = build_hierarchy(channels)?;
    annotate_hierarchy(channels, &clusters);
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::parser::channel_name::enrich_catalog;
    use shared::model::ChannelRecord;

    fn catalog(entries: &[(i64, &str, u32)]) -> Vec<EnrichedChannel> {
        enrich_catalog(entries.iter().map(|(id, name, liveness)| ChannelRecord::new(*id, name, *liveness)).collect())
    }

    fn assert_invariants(channels: &[EnrichedChannel], clusters: &[IdentityCluster]) {
        let mut seen = HashSet::new();
        for cluster in clusters {
            assert!(!cluster.is_empty());
            let roots: Vec<&ClusterMember> = cluster.members.iter().filter(|m| m.is_root).collect();
            assert_eq!(roots.len(), 1);
            assert_eq!(roots[0].id, cluster.root_id);
            assert!(roots[0].parent_id.is_none());
            for member in cluster.variants() {
                assert!(!member.is_root);
                assert_eq!(member.parent_id.as_ref(), Some(&cluster.root_id));
            }
            for id in cluster.member_ids() {
                assert!(seen.insert(id.clone()), "{id} in more than one cluster");
            }
        }
        assert_eq!(seen.len(), channels.len());
    }

    #[test]
    fn test_quality_variants_share_root() {
        let mut channels = catalog(&[(1, "BBC One HD", 5), (2, "BBC One SD", 2)]);
        let clusters = apply_hierarchy(&mut channels).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].key, "bbc one");
        assert_eq!(clusters[0].root_id, ChannelId::Num(1));
        assert_eq!(clusters[0].members[0], ClusterMember::root(ChannelId::Num(1)));
        assert_eq!(clusters[0].members[1], ClusterMember::variant(ChannelId::Num(2), &ChannelId::Num(1)));
        assert!(channels[0].is_root());
        assert_eq!(channels[1].position.as_ref().and_then(|p| p.parent_id.clone()), Some(ChannelId::Num(1)));
    }

    #[test]
    fn test_root_tie_breaks_on_lowest_id() {
        let channels = catalog(&[(7, "Arte HD", 3), (4, "Arte", 3), (9, "Arte SD", 1)]);
        let clusters = build_hierarchy(&channels).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].root_id, ChannelId::Num(4));
        assert_invariants(&channels, &clusters);
    }

    #[test]
    fn test_variant_tag_never_root_unless_all_are() {
        let channels = catalog(&[(1, "CNN +1", 10), (2, "CNN", 1)]);
        let clusters = build_hierarchy(&channels).unwrap();
        assert_eq!(clusters[0].root_id, ChannelId::Num(2));

        let channels = catalog(&[(5, "Fox West", 3), (3, "Fox East", 3)]);
        let clusters = build_hierarchy(&channels).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].root_id, ChannelId::Num(3));
    }

    #[test]
    fn test_numbered_names_stay_apart() {
        let channels = catalog(&[(1, "Channel 4", 2), (2, "TV 4", 2), (3, "Channel 4 HD", 1)]);
        let clusters = build_hierarchy(&channels).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].key, "channel 4");
        assert_eq!(clusters[0].member_ids().cloned().collect::<Vec<_>>(), vec![ChannelId::Num(1), ChannelId::Num(3)]);
        assert_eq!(clusters[1].key, "tv 4");
        assert_eq!(clusters[1].root_id, ChannelId::Num(2));
        assert_invariants(&channels, &clusters);
    }

    #[test]
    fn test_empty_names_are_singletons() {
        let channels = catalog(&[(1, "", 0), (2, "  ", 0), (3, "ZDF", 0)]);
        let clusters = build_hierarchy(&channels).unwrap();
        assert_eq!(clusters.len(), 3);
        assert_invariants(&channels, &clusters);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let channels = catalog(&[(1, "ZDF", 0), (2, "ARD", 0), (1, "RTL", 0)]);
        let err = build_hierarchy(&channels).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("duplicate channel id 1"));
    }

    #[test]
    fn test_invariants_and_determinism() {
        let entries = [
            (10, "Sky News HD", 4), (11, "Sky News", 4), (12, "UK: Sky News", 9),
            (20, "Eurosport 1 FHD", 0), (21, "Eurosport 2", 2), (22, "Eurosport 1 +1", 7),
            (30, "Discovery", 0), (31, "", 0),
        ];
        let mut first = catalog(&entries);
        let clusters = apply_hierarchy(&mut first).unwrap();
        assert_invariants(&first, &clusters);
        assert_eq!(clusters.len(), 5);
        assert_eq!(clusters[0].root_id, ChannelId::Num(12));
        assert_eq!(clusters[1].root_id, ChannelId::Num(20));

        let mut second = catalog(&entries);
        let again = apply_hierarchy(&mut second).unwrap();
        assert_eq!(serde_json::to_string(&clusters).unwrap(), serde_json::to_string(&again).unwrap());
        assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
    }
}
