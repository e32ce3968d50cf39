//! Road network arena and builder.
//!
//! # Data layout
//!
//! Nodes, segments and links each live in one `Vec`, in the order the
//! resolver produced them (document order of the network file).  Cross
//! references are ids, never pointers:
//!
//! ```text
//! Link.segments ──SegmentId──► Segment.link ──LinkId──► Link
//! Segment.up / .down ──NodeId──► Node
//! ```
//!
//! Id → index hash maps give O(1) lookup for the trajectory pass and the
//! reconciler, while the `Vec`s keep iteration order deterministic for
//! emission.

use rustc_hash::FxHashMap;

use mx_core::{LinkId, NodeId, Point, SegmentId};

use crate::{NetworkError, NetworkResult};

// ── Entities ──────────────────────────────────────────────────────────────────

/// A network node in MITSIM coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:  NodeId,
    pub pos: Point,
}

/// One geometric piece of a link.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub id:    SegmentId,
    pub start: Point,
    pub end:   Point,
    pub up:    NodeId,
    pub down:  NodeId,
    /// Owning link.
    pub link:  LinkId,
}

/// A directed chain of segments between two natural nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub id:       LinkId,
    pub up:       NodeId,
    pub down:     NodeId,
    /// Upstream to downstream.
    pub segments: Vec<SegmentId>,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Resolved MITSIM network.  Construct with [`RoadNetworkBuilder`] (normally
/// via [`NodeResolver`](crate::NodeResolver)).
#[derive(Debug, Default)]
pub struct RoadNetwork {
    nodes:         Vec<Node>,
    node_index:    FxHashMap<NodeId, usize>,
    segments:      Vec<Segment>,
    segment_index: FxHashMap<SegmentId, usize>,
    links:         Vec<Link>,
}

impl RoadNetwork {
    pub fn empty() -> Self {
        Self::default()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&i| &self.nodes[i])
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segment_index.get(&id).map(|&i| &self.segments[i])
    }

    /// Segments of `link`, upstream to downstream.
    pub fn link_segments<'a>(&'a self, link: &'a Link) -> impl Iterator<Item = &'a Segment> + 'a {
        link.segments.iter().filter_map(move |&id| self.segment(id))
    }

    /// Position of `node` as seen by the first segment (in table order) that
    /// starts or ends at it: the segment's start point if it is the up-node,
    /// its end point if it is the down-node.
    pub fn endpoint_position(&self, node: NodeId) -> Option<Point> {
        self.segments.iter().find_map(|s| {
            if s.up == node {
                Some(s.start)
            } else if s.down == node {
                Some(s.end)
            } else {
                None
            }
        })
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Incremental constructor that enforces id uniqueness.
#[derive(Debug, Default)]
pub struct RoadNetworkBuilder {
    net: RoadNetwork,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.net.node(id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.net.contains_node(id)
    }

    /// Add a node.  Fails with [`NetworkError::NodeCollision`] if the id is
    /// already present.
    pub fn add_node(&mut self, id: NodeId, pos: Point) -> NetworkResult<()> {
        if self.net.node_index.contains_key(&id) {
            return Err(NetworkError::NodeCollision(id));
        }
        self.net.node_index.insert(id, self.net.nodes.len());
        self.net.nodes.push(Node { id, pos });
        Ok(())
    }

    /// Add a segment.  Fails with [`NetworkError::DuplicateSegment`] if the id
    /// is already present.
    pub fn add_segment(&mut self, segment: Segment) -> NetworkResult<()> {
        if self.net.segment_index.contains_key(&segment.id) {
            return Err(NetworkError::DuplicateSegment(segment.id));
        }
        self.net.segment_index.insert(segment.id, self.net.segments.len());
        self.net.segments.push(segment);
        Ok(())
    }

    pub fn add_link(&mut self, link: Link) {
        self.net.links.push(link);
    }

    pub fn node_count(&self) -> usize { self.net.node_count() }
    pub fn segment_count(&self) -> usize { self.net.segment_count() }

    pub fn build(self) -> RoadNetwork {
        self.net
    }
}
