//! Trajectory loader.
//!
//! # Format
//!
//! A trimmed `trajectory.out` with 8 columns per sample:
//!
//! ```text
//! <time> <agent> <segment> <lane> <pos_in_lane> <speed> <accel> <vehicle_type>
//! 25201 1 101 3 12.5 0.0 -1.2e-01 1
//! ```
//!
//! Sample times must never decrease across the file.  Only the first lane
//! position of each driver is kept.  Every referenced segment must exist in
//! the resolved network; natural up-nodes of those segments that are missing
//! from the node table are collected for a summary.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use mx_core::{AgentId, NodeId, SegmentId};
use mx_network::RoadNetwork;

use crate::rows::{SkippedLine, for_each_row, non_negative};
use crate::{DriverTable, TripError, TripResult};

#[derive(Deserialize)]
struct TrajectoryRow {
    time:          u64,
    agent_id:      u32,
    segment_id:    u32,
    _lane:         u32,
    #[serde(deserialize_with = "non_negative")]
    pos_in_lane:   f64,
    _speed:        f64,
    _acceleration: f64,
    _vehicle_type: u32,
}

/// Outcome of the trajectory pass.
#[derive(Clone, Debug, Default)]
pub struct TrajectoryReport {
    pub samples:          usize,
    pub skipped:          Vec<SkippedLine>,
    /// Natural up-nodes of sampled segments absent from the node table,
    /// first occurrence order.
    pub unknown_up_nodes: Vec<NodeId>,
}

/// Read the trajectory file at `path` and record first positions in `table`.
pub fn load_trajectory(
    path: &Path,
    table: &mut DriverTable,
    network: &RoadNetwork,
) -> TripResult<TrajectoryReport> {
    let file = File::open(path).map_err(|source| TripError::Open { path: path.to_owned(), source })?;
    load_trajectory_reader(file, table, network)
}

/// Like [`load_trajectory`] but accepts any `Read` source.
pub fn load_trajectory_reader<R: Read>(
    reader: R,
    table: &mut DriverTable,
    network: &RoadNetwork,
) -> TripResult<TrajectoryReport> {
    let mut samples = 0;
    let mut last_time = 0u64;
    let mut unknown_up_nodes = Vec::new();
    let mut seen_unknown = HashSet::new();

    let skipped = for_each_row(reader, 8, "trajectory", |line, row: TrajectoryRow| {
        let dr = table.get_mut(AgentId(row.agent_id))?;
        if dr.first_position.is_none() {
            dr.first_position = Some(row.pos_in_lane);
        }

        if row.time < last_time {
            return Err(TripError::TimeWentBackwards { line, previous: last_time, time: row.time });
        }

        let segment_id = SegmentId(row.segment_id);
        let segment = network.segment(segment_id).ok_or(TripError::UnknownSegment(segment_id))?;
        // Uni-nodes are generated by the resolver and always present.
        if !segment.up.is_synthetic()
            && !network.contains_node(segment.up)
            && seen_unknown.insert(segment.up)
        {
            unknown_up_nodes.push(segment.up);
        }

        last_time = row.time;
        samples += 1;
        Ok(())
    })?;

    if !unknown_up_nodes.is_empty() {
        let list: Vec<String> = unknown_up_nodes.iter().map(NodeId::to_string).collect();
        warn!("unknown node ids: [{}]", list.join(", "));
    }
    info!("trajectory: {samples} samples, {} drivers never started", table.never_started());

    Ok(TrajectoryReport { samples, skipped, unknown_up_nodes })
}
