//! Node identity resolution.
//!
//! The network file only names the up- and down-node of each link.  For every
//! link the resolver:
//!
//! 1. forces the link's up-node onto its first segment's start and the
//!    down-node onto its last segment's end, creating the node or checking
//!    the stored position against the new one;
//! 2. walks the segments upstream to downstream and gives every endpoint that
//!    still has no id a synthetic `<link>:<seq>` id, `seq` counting from 1
//!    per link (up endpoint before down endpoint).
//!
//! Adjacent segments therefore do not share their interior endpoint: the
//! down end of segment *k* and the up end of segment *k+1* get distinct
//! synthetic ids.  That is how the Sim Mobility importer expects uni-nodes.

use log::{error, info, warn};

use mx_core::{LinkId, NodeId, Point, SegmentId, Tolerances};

use crate::network::{Link, RoadNetwork, RoadNetworkBuilder, Segment};
use crate::parser::ParsedLink;
use crate::{NetworkError, NetworkResult};

// ── Report ────────────────────────────────────────────────────────────────────

/// How far a redeclared node was from its first position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MismatchSeverity {
    /// At or above `Tolerances::node_warn`.
    Warning,
    /// At or above `Tolerances::node_loud`.
    Loud,
}

/// A natural node declared by two links at different positions.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMismatch {
    pub node:     NodeId,
    pub link:     LinkId,
    /// Position stored when the node was first seen (kept).
    pub previous: Point,
    /// Position declared by `link` (discarded).
    pub current:  Point,
    pub distance: f64,
    pub severity: MismatchSeverity,
}

/// Non-fatal findings of a resolver run.
#[derive(Clone, Debug, Default)]
pub struct ResolveReport {
    pub mismatches:  Vec<NodeMismatch>,
    pub synthesized: usize,
}

// ── NodeResolver ──────────────────────────────────────────────────────────────

/// Turns parsed links into a [`RoadNetwork`] with every segment endpoint
/// identified.
pub struct NodeResolver {
    tolerances: Tolerances,
    seq_cap:    u16,
    builder:    RoadNetworkBuilder,
    report:     ResolveReport,
}

impl NodeResolver {
    pub fn new(tolerances: Tolerances, seq_cap: u16) -> Self {
        Self {
            tolerances,
            seq_cap: seq_cap.min(NodeId::MAX_SEQUENCE),
            builder: RoadNetworkBuilder::new(),
            report:  ResolveReport::default(),
        }
    }

    /// Resolve all links in order and return the finished network.
    pub fn resolve(
        mut self,
        links: Vec<ParsedLink>,
    ) -> NetworkResult<(RoadNetwork, ResolveReport)> {
        for link in links {
            self.add_link(link)?;
        }

        info!(
            "resolved {} nodes ({} synthetic), {} segments",
            self.builder.node_count(),
            self.report.synthesized,
            self.builder.segment_count(),
        );
        Ok((self.builder.build(), self.report))
    }

    fn add_link(&mut self, link: ParsedLink) -> NetworkResult<()> {
        let (Some(first), Some(last)) = (link.segments.first(), link.segments.last()) else {
            // The grammar requires at least one segment per link.
            return Ok(());
        };
        let up = NodeId::Natural(link.up);
        let down = NodeId::Natural(link.down);

        self.force_node(up, first.start, link.id)?;
        self.force_node(down, last.end, link.id)?;

        let last_idx = link.segments.len() - 1;
        let mut next_seq: u32 = 1;
        let mut ids: Vec<SegmentId> = Vec::with_capacity(link.segments.len());

        for (i, seg) in link.segments.into_iter().enumerate() {
            let seg_up = if i == 0 {
                up
            } else {
                self.synthesize(link.id, &mut next_seq, seg.start)?
            };
            let seg_down = if i == last_idx {
                down
            } else {
                self.synthesize(link.id, &mut next_seq, seg.end)?
            };

            ids.push(seg.id);
            self.builder.add_segment(Segment {
                id:    seg.id,
                start: seg.start,
                end:   seg.end,
                up:    seg_up,
                down:  seg_down,
                link:  link.id,
            })?;
        }

        self.builder.add_link(Link { id: link.id, up, down, segments: ids });
        Ok(())
    }

    /// Create `id` at `pos`, or check an existing node's position against it.
    fn force_node(&mut self, id: NodeId, pos: Point, link: LinkId) -> NetworkResult<()> {
        let Some(prev) = self.builder.node(id).map(|n| n.pos) else {
            return self.builder.add_node(id, pos);
        };
        if prev == pos {
            return Ok(());
        }

        let distance = prev.distance(pos);
        let severity = if distance >= self.tolerances.node_loud {
            error!(
                "node id/position mismatch [{id}] on link {}: prev {prev}, curr {pos}, error {distance}",
                link.0
            );
            MismatchSeverity::Loud
        } else if distance >= self.tolerances.node_warn {
            warn!("node id/position mismatch [{id}], off by {distance}");
            MismatchSeverity::Warning
        } else {
            return Ok(());
        };

        self.report.mismatches.push(NodeMismatch {
            node: id,
            link,
            previous: prev,
            current: pos,
            distance,
            severity,
        });
        Ok(())
    }

    /// Allocate the next synthetic id of `link` and create its node.
    fn synthesize(&mut self, link: LinkId, next_seq: &mut u32, pos: Point) -> NetworkResult<NodeId> {
        if *next_seq > u32::from(self.seq_cap) {
            return Err(NetworkError::TooManySegments { link, cap: self.seq_cap });
        }
        let id = NodeId::synthetic(link, *next_seq)?;
        *next_seq += 1;

        // add_node rejects collisions in the global table.
        self.builder.add_node(id, pos)?;
        self.report.synthesized += 1;
        Ok(id)
    }
}
