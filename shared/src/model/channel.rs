use std::cmp::Ordering;
use std::fmt::Display;
use crate::model::{ClusterMember, ParsedIdentity};

/// Source scoped identifier of a channel record.
///
/// Numeric ids order numerically and sort before textual ids; textual ids
/// order lexicographically. This is the "lower id" order of every tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ChannelId {
    Num(i64),
    Text(String),
}

impl Ord for ChannelId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Num(a), Self::Num(b)) => a.cmp(b),
            (Self::Num(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Num(_)) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ChannelId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Num(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for ChannelId {
    fn from(id: i64) -> Self {
        Self::Num(id)
    }
}

impl From<i32> for ChannelId {
    fn from(id: i32) -> Self {
        Self::Num(i64::from(id))
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ChannelId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// One entry of a catalog as delivered by the caller. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChannelRecord {
    pub id: ChannelId,
    #[serde(rename = "name", alias = "raw_name")]
    pub raw_name: String,
    #[serde(default, alias = "stream_count")]
    pub liveness_count: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

impl ChannelRecord {
    pub fn new<I: Into<ChannelId>>(id: I, raw_name: &str, liveness_count: u32) -> Self {
        Self {
            id: id.into(),
            raw_name: raw_name.to_string(),
            liveness_count,
            source: String::new(),
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }
}

/// A record together with its parsed identity and, once the hierarchy was
/// built for its catalog, its position in the cluster.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnrichedChannel {
    pub record: ChannelRecord,
    pub identity: ParsedIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ClusterMember>,
}

impl EnrichedChannel {
    pub fn new(record: ChannelRecord, identity: ParsedIdentity) -> Self {
        Self { record, identity, position: None }
    }

    #[inline]
    pub fn id(&self) -> &ChannelId {
        &self.record.id
    }

    #[inline]
    pub fn liveness_count(&self) -> u32 {
        self.record.liveness_count
    }

    pub fn is_root(&self) -> bool {
        self.position.as_ref().is_some_and(|p| p.is_root)
    }

    /// Key used to group variants of one catalog; empty when the name carried
    /// nothing usable.
    pub fn grouping_key(&self) -> &str {
        if self.identity.normalized_name.is_empty() {
            &self.identity.canonical_id
        } else {
            &self.identity.normalized_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_order() {
        let mut ids: Vec<ChannelId> = vec!["b".into(), 10i64.into(), "a".into(), 2i64.into()];
        ids.sort();
        assert_eq!(ids, vec![ChannelId::Num(2), ChannelId::Num(10), "a".into(), "b".into()]);
    }

    #[test]
    fn test_record_deserialize() {
        let records: Vec<ChannelRecord> = serde_json::from_str(
            r#"[{"id": 1, "name": "BBC One HD", "liveness_count": 5},
                {"id": "cnn.us", "raw_name": "CNN"},
                {"id": 3, "name": "RT", "stream_count": 2}]"#).unwrap();
        assert_eq!(records[0].id, ChannelId::Num(1));
        assert_eq!(records[0].liveness_count, 5);
        assert_eq!(records[1].id, ChannelId::Text("cnn.us".to_string()));
        assert_eq!(records[1].raw_name, "CNN");
        assert_eq!(records[1].liveness_count, 0);
        assert_eq!(records[2].liveness_count, 2);
    }
}
