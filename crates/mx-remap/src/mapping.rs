//! Source → target node mapping.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use mx_core::{NodeId, TargetNode};
use mx_network::RoadNetwork;

use crate::{RemapError, RemapResult};

/// MITSIM node ids mapped onto Sim Mobility nodes.
///
/// Several sources may share one target.  A source mapped to two different
/// targets is rejected.  Targets are created by the first mapping that
/// names them and receive coordinates later.
#[derive(Debug, Default)]
pub struct NodeMapping {
    sources: FxHashMap<NodeId, u64>,
    targets: BTreeMap<u64, TargetNode>,
}

impl NodeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `source` to `target`.  Repeating an identical mapping is a no-op.
    pub fn map(&mut self, source: NodeId, target: u64) -> RemapResult<()> {
        if let Some(&existing) = self.sources.get(&source) {
            if existing != target {
                return Err(RemapError::Conflict { node: source, existing, requested: target });
            }
            return Ok(());
        }
        self.sources.insert(source, target);
        self.targets.entry(target).or_insert_with(|| TargetNode::new(target));
        Ok(())
    }

    /// Give `target` its coordinates.  The target must already be mapped to.
    pub fn set_coordinates(&mut self, target: u64, x: i64, y: i64) -> RemapResult<()> {
        let node = self.targets.get_mut(&target).ok_or(RemapError::UnknownTarget(target))?;
        node.x = x;
        node.y = y;
        Ok(())
    }

    pub fn target_id(&self, source: NodeId) -> Option<u64> {
        self.sources.get(&source).copied()
    }

    /// Target node (with whatever coordinates it has) for `source`.
    pub fn target(&self, source: NodeId) -> Option<TargetNode> {
        self.target_id(source).and_then(|id| self.targets.get(&id).copied())
    }

    #[inline]
    pub fn contains(&self, source: NodeId) -> bool {
        self.sources.contains_key(&source)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Target nodes in ascending id order.
    pub fn targets(&self) -> impl Iterator<Item = &TargetNode> {
        self.targets.values()
    }

    /// Ids of targets that never received coordinates.
    pub fn untranslated(&self) -> Vec<u64> {
        self.targets().filter(|t| t.is_unset()).map(|t| t.id).collect()
    }

    /// Number of links whose up and down nodes are both mapped.
    pub fn mapped_link_count(&self, network: &RoadNetwork) -> usize {
        network
            .links()
            .iter()
            .filter(|l| self.contains(l.up) && self.contains(l.down))
            .count()
    }
}
