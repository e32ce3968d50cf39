//! File output backend.
//!
//! Creates three files in the working directory (names from
//! [`OutputFiles`]):
//! - the graph file, one [`GraphRecord`](crate::GraphRecord) per line
//! - the driver XML with `<drivers>` and `<drivers_SKIPPED>` sections
//! - the node-error CSV

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::Writer;
use log::info;

use mx_core::OutputFiles;
use mx_network::RoadNetwork;
use mx_remap::{NodeError, NodeMapping};
use mx_trips::DriverTable;

use crate::writer::OutputWriter;
use crate::{OutputResult, driver_records, graph_records};

/// Writes converter output to plain files.
pub struct FileOutput {
    graph:       BufWriter<File>,
    drivers:     BufWriter<File>,
    node_errors: Writer<File>,
    scale:       f64,
    finished:    bool,
}

impl FileOutput {
    /// Create the three output files in `dir` and write the CSV header.
    ///
    /// `scale` converts network coordinates to graph-file coordinates.
    pub fn new(dir: &Path, files: &OutputFiles, scale: f64) -> OutputResult<Self> {
        let graph = BufWriter::new(File::create(dir.join(&files.graph))?);
        let drivers = BufWriter::new(File::create(dir.join(&files.drivers))?);

        let mut node_errors = Writer::from_path(dir.join(&files.node_errors))?;
        node_errors.write_record([
            "node_id", "target_id", "expected_x", "expected_y", "actual_x", "actual_y", "error",
        ])?;

        Ok(Self { graph, drivers, node_errors, scale, finished: false })
    }
}

impl OutputWriter for FileOutput {
    fn write_graph(&mut self, network: &RoadNetwork, mapping: &NodeMapping) -> OutputResult<()> {
        let records = graph_records(network, mapping, self.scale);
        for record in &records {
            writeln!(self.graph, "{record}")?;
        }
        info!("graph: wrote {} records", records.len());
        Ok(())
    }

    fn write_drivers(&mut self, drivers: &DriverTable) -> OutputResult<()> {
        let (placed, skipped) = driver_records(drivers);

        writeln!(self.drivers, "<drivers>")?;
        for record in &placed {
            writeln!(self.drivers, "  {record}")?;
        }
        writeln!(self.drivers, "</drivers>")?;

        writeln!(self.drivers, "<drivers_SKIPPED>")?;
        for record in &skipped {
            writeln!(self.drivers, "  {record}")?;
        }
        write!(self.drivers, "</drivers_SKIPPED>")?;

        info!("drivers: wrote {} placed, {} skipped", placed.len(), skipped.len());
        Ok(())
    }

    fn write_node_errors(&mut self, errors: &[NodeError]) -> OutputResult<()> {
        for e in errors {
            self.node_errors.write_record(&[
                e.node.to_string(),
                e.target.to_string(),
                e.expected.x.to_string(),
                e.expected.y.to_string(),
                e.actual.x.to_string(),
                e.actual.y.to_string(),
                e.magnitude().to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.graph.flush()?;
        self.drivers.flush()?;
        self.node_errors.flush()?;
        Ok(())
    }
}
