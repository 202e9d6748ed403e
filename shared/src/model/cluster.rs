use crate::model::ChannelId;

/// Position of one record inside its cluster.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClusterMember {
    pub id: ChannelId,
    pub is_root: bool,
    pub is_variant: bool,
    pub parent_id: Option<ChannelId>,
}

impl ClusterMember {
    pub fn root(id: ChannelId) -> Self {
        Self { id, is_root: true, is_variant: false, parent_id: None }
    }

    pub fn variant(id: ChannelId, root_id: &ChannelId) -> Self {
        Self { id, is_root: false, is_variant: true, parent_id: Some(root_id.clone()) }
    }
}

/// Same-channel variants of one catalog sharing a grouping key.
/// Members keep catalog order; exactly one of them is the root.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IdentityCluster {
    pub key: String,
    pub root_id: ChannelId,
    pub members: Vec<ClusterMember>,
}

impl IdentityCluster {
    pub fn member_ids(&self) -> impl Iterator<Item = &ChannelId> {
        self.members.iter().map(|m| &m.id)
    }

    pub fn variants(&self) -> impl Iterator<Item = &ClusterMember> {
        self.members.iter().filter(|m| m.is_variant)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
