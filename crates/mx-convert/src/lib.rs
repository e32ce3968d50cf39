//! `mx-convert` — MITSIM trace to Sim Mobility input converter.
//!
//! Ties the `mx-*` crates into one run:
//!
//! | Stage       | Crate        | Input / output                       |
//! |-------------|--------------|--------------------------------------|
//! | network     | `mx-network` | `network-BUGIS.dat`                  |
//! | departures  | `mx-trips`   | `dep.out`                            |
//! | completions | `mx-trips`   | `vehicle.out`                        |
//! | remap       | `mx-remap`   | `ms_sm_node_convert.txt`             |
//! | trajectory  | `mx-trips`   | `traj_compact.txt`                   |
//! | reconcile   | `mx-remap`   | offset diagnostics, driver placement |
//! | emit        | `mx-output`  | graph, driver XML, node-error CSV    |
//!
//! # Usage
//!
//! ```rust,ignore
//! use mx_convert::Pipeline;
//! use mx_core::ConvertConfig;
//!
//! let summary = Pipeline::new(ConvertConfig::in_dir("./bugis")).run()?;
//! println!("{summary}");
//! ```

pub mod error;
pub mod logger;
pub mod pipeline;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ConvertError, ConvertResult};
pub use logger::init_logger;
pub use pipeline::{Conversion, Pipeline, RunSummary, emit};
