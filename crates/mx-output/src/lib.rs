//! `mx-output` — writers for the converter's result files.
//!
//! | File                  | Contents                                              |
//! |-----------------------|-------------------------------------------------------|
//! | `output_network.txt`  | nodes, links and segments in visualizer tuple syntax  |
//! | `agents.gen.xml`      | `<drivers>` and `<drivers_SKIPPED>` sections          |
//! | `node_errors.csv`     | per-node fit of the scale-and-offset diagnostic       |
//!
//! [`FileOutput`] implements [`OutputWriter`].  The record builders in
//! [`record`] are public so other sinks can reuse the same ordering rules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mx_output::{FileOutput, OutputWriter};
//!
//! let mut out = FileOutput::new(&cfg.work_dir, &cfg.outputs, cfg.coordinate_scale)?;
//! out.write_graph(&network, &mapping)?;
//! out.write_drivers(&drivers)?;
//! out.write_node_errors(&offset.errors)?;
//! out.finish()?;
//! ```

pub mod error;
pub mod file;
pub mod record;
pub mod writer;


pub use error::{OutputError, OutputResult};
pub use file::FileOutput;
pub use record::{DriverRecord, GraphRecord, driver_records, graph_records};
pub use writer::OutputWriter;
