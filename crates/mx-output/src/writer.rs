//! The `OutputWriter` trait implemented by all backend writers.

use mx_network::RoadNetwork;
use mx_remap::{NodeError, NodeMapping};
use mx_trips::DriverTable;

use crate::OutputResult;

/// Sink for the three converter outputs.
///
/// The pipeline calls each `write_*` method once, then [`finish`](Self::finish).
pub trait OutputWriter {
    /// Write the road graph in Sim Mobility's visualizer format.
    fn write_graph(&mut self, network: &RoadNetwork, mapping: &NodeMapping) -> OutputResult<()>;

    /// Write every driver, placed ones first, skipped ones in their own section.
    fn write_drivers(&mut self, drivers: &DriverTable) -> OutputResult<()>;

    /// Write the per-node offset diagnostics.
    fn write_node_errors(&mut self, errors: &[NodeError]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Calling it again after success is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
