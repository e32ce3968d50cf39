//! Scale-and-offset diagnostics.
//!
//! Sim Mobility coordinates are roughly MITSIM coordinates times
//! `coordinate_scale`, shifted by a constant.  The shift is measured at one
//! reference node and then applied to every other mapped node to see how
//! well a single affine transform would fit:
//!
//! ```text
//! offset   = target(ref) − source(ref) × scale
//! expected = source(n) × scale + offset
//! error    = expected − target(n)
//! ```
//!
//! The fit is reported only.  Emitted coordinates always come from the remap
//! file.

use log::{info, warn};
use rustc_hash::FxHashSet;

use mx_core::{NodeId, Point, Summary};
use mx_network::RoadNetwork;

use crate::{NodeMapping, RemapError, RemapResult};

/// Fit of one mapped natural node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeError {
    pub node:     NodeId,
    pub target:   u64,
    pub expected: Point,
    pub actual:   Point,
    /// `expected − actual`.
    pub error:    Point,
}

impl NodeError {
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.error.distance(Point::ORIGIN)
    }
}

/// All per-node errors plus a summary of their magnitudes.
#[derive(Clone, Debug, Default)]
pub struct OffsetReport {
    pub offset:  Point,
    pub errors:  Vec<NodeError>,
    pub summary: Option<Summary>,
}

/// Offset from scaled MITSIM coordinates to Sim Mobility coordinates,
/// measured at `reference`.
pub fn derive_offset(
    network: &RoadNetwork,
    mapping: &NodeMapping,
    reference: NodeId,
    scale: f64,
) -> RemapResult<Point> {
    let target = mapping.target(reference).ok_or(RemapError::UnmappedReference(reference))?;
    let source = network
        .endpoint_position(reference)
        .ok_or(RemapError::ReferenceNotFound(reference))?;
    if target.is_unset() {
        warn!("reference node {reference} has no target coordinates; offset is meaningless");
    }
    Ok(target_point(target.x, target.y) - source.scaled(scale))
}

/// Apply `offset` to every natural segment endpoint that is in the node
/// table and mapped to a target with coordinates.  Each node is measured
/// once, at its first appearance in segment order.
pub fn node_errors(
    network: &RoadNetwork,
    mapping: &NodeMapping,
    offset: Point,
    scale: f64,
) -> OffsetReport {
    let mut seen = FxHashSet::default();
    let mut errors = Vec::new();

    let endpoints = network
        .segments()
        .iter()
        .flat_map(|s| [(s.up, s.start), (s.down, s.end)]);
    for (node, pos) in endpoints {
        if node.is_synthetic() || !network.contains_node(node) || !seen.insert(node) {
            continue;
        }
        let Some(target) = mapping.target(node) else { continue };
        if target.is_unset() {
            continue;
        }
        let expected = pos.scaled(scale) + offset;
        let actual = target_point(target.x, target.y);
        errors.push(NodeError { node, target: target.id, expected, actual, error: expected - actual });
    }

    let magnitudes: Vec<f64> = errors.iter().map(NodeError::magnitude).collect();
    let summary = Summary::of(&magnitudes);
    match &summary {
        Some(s) => info!("offset {offset}: error over {} nodes {s}", errors.len()),
        None => info!("offset {offset}: no mapped nodes with coordinates to compare"),
    }

    OffsetReport { offset, errors, summary }
}

fn target_point(x: i64, y: i64) -> Point {
    Point::new(x as f64, y as f64)
}
