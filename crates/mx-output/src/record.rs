//! Output record types.
//!
//! Each record renders as exactly one line of its output file through
//! `Display`.  The builders below decide which records exist and in what
//! order; the writers only serialize them.

use std::fmt;

use rustc_hash::FxHashSet;

use mx_core::{NodeId, SegmentId, TargetNode};
use mx_network::RoadNetwork;
use mx_remap::NodeMapping;
use mx_trips::{Driver, DriverTable};

// ── Graph file ────────────────────────────────────────────────────────────────

/// One line of `output_network.txt`.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphRecord {
    Node {
        id:     NodeId,
        /// Scaled, truncated coordinates.
        x:      i64,
        y:      i64,
        target: Option<u64>,
    },
    Link {
        id:       u32,
        start:    u64,
        end:      u64,
        segments: Vec<SegmentId>,
    },
    Segment {
        id:   u32,
        link: u32,
        from: u64,
        to:   u64,
    },
}

impl fmt::Display for GraphRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphRecord::Node { id, x, y, target } => {
                let kind = if id.is_synthetic() { "uni-node" } else { "multi-node" };
                write!(f, "(\"{kind}\", 0, {}, {{", id.flatten())?;
                write!(f, "\"xPos\":\"{x}\",\"yPos\":\"{y}\",\"mitsim-id\":\"{id}\",")?;
                if let Some(target) = target {
                    write!(f, "\"aimsun-id\":\"{target}\",")?;
                }
                write!(f, "}})")
            }
            GraphRecord::Link { id, start, end, segments } => {
                write!(f, "(\"link\", 0, {id}, {{")?;
                write!(f, "\"road-name\":\"\",\"start-node\":\"{start}\",\"end-node\":\"{end}\",")?;
                write!(f, "\"fwd-path\":\"[")?;
                for seg in segments {
                    write!(f, "{},", seg.0)?;
                }
                write!(f, "]\",\"rev-path\":\"[]\",}})")
            }
            GraphRecord::Segment { id, link, from, to } => {
                write!(f, "(\"road-segment\", 0, {id}, {{")?;
                write!(f, "\"parent-link\":\"{link}\",\"max-speed\":\"0\",\"lanes\":\"1\",")?;
                write!(f, "\"from-node\":\"{from}\",\"to-node\":\"{to}\",}})")
            }
        }
    }
}

/// Every record of the graph file, in output order: nodes, then links, then
/// segments.
///
/// Nodes are those referenced by a segment, in segment order by first
/// occurrence, minus nodes still at `(0, 0)`.  Coordinates are multiplied by
/// `scale` and truncated.
pub fn graph_records(network: &RoadNetwork, mapping: &NodeMapping, scale: f64) -> Vec<GraphRecord> {
    let mut records = Vec::with_capacity(
        network.node_count() + network.link_count() + network.segment_count(),
    );

    let mut seen = FxHashSet::default();
    for id in network.segments().iter().flat_map(|s| [s.up, s.down]) {
        if !seen.insert(id) {
            continue;
        }
        let Some(node) = network.node(id) else { continue };
        if node.pos.is_unset() {
            continue;
        }
        records.push(GraphRecord::Node {
            id,
            x: (node.pos.x * scale) as i64,
            y: (node.pos.y * scale) as i64,
            target: mapping.target_id(id),
        });
    }

    for link in network.links() {
        records.push(GraphRecord::Link {
            id:       link.id.0,
            start:    link.up.flatten(),
            end:      link.down.flatten(),
            segments: link.segments.clone(),
        });
    }

    for link in network.links() {
        for seg in network.link_segments(link) {
            records.push(GraphRecord::Segment {
                id:   seg.id.0,
                link: link.id.0,
                from: seg.up.flatten(),
                to:   seg.down.flatten(),
            });
        }
    }

    records
}

// ── Driver file ───────────────────────────────────────────────────────────────

/// One `<driver …/>` element of `agents.gen.xml`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DriverRecord {
    pub id:           u32,
    pub origin:       TargetNode,
    pub destination:  TargetNode,
    pub departure_ms: i64,
}

impl DriverRecord {
    /// A driver without a placement renders with unset endpoints.
    pub fn from_driver(dr: &Driver) -> Self {
        let p = dr.placement.unwrap_or_default();
        Self { id: dr.id.0, origin: p.origin, destination: p.destination, departure_ms: p.departure_ms }
    }

    /// Drivers with an endpoint at `(0, 0)` go to the skipped section.
    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.origin.is_unset() || self.destination.is_unset()
    }
}

impl fmt::Display for DriverRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<driver id='{}' originPos='{}' destPos='{}' time='{}'/>",
            self.id, self.origin, self.destination, self.departure_ms
        )
    }
}

/// Driver records split into the regular and skipped sections, each sorted
/// by id.
pub fn driver_records(table: &DriverTable) -> (Vec<DriverRecord>, Vec<DriverRecord>) {
    table.iter().map(DriverRecord::from_driver).partition(|r| !r.is_skipped())
}
