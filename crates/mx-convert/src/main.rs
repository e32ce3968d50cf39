//! mx-convert — convert MITSIM output into Sim Mobility input files.
//!
//! ```text
//! mx-convert [WORK_DIR]
//! ```
//!
//! Reads the five MITSIM exports from `WORK_DIR` (default: the current
//! directory) and writes `output_network.txt`, `agents.gen.xml` and
//! `node_errors.csv` next to them.  Diagnostics go to stderr.

use anyhow::{Context, Result};

use mx_convert::{Pipeline, init_logger};
use mx_core::ConvertConfig;

fn main() -> Result<()> {
    let mut config = ConvertConfig::default();
    if let Some(dir) = std::env::args_os().nth(1) {
        config.work_dir = dir.into();
    }
    init_logger(config.log_level)?;

    let pipeline = Pipeline::new(config);
    let config = pipeline.config();
    let summary = pipeline
        .run()
        .with_context(|| format!("converting {}", config.work_dir.display()))?;

    println!("{summary}");
    println!("Agents saved to {}", config.resolve(&config.outputs.drivers).display());
    Ok(())
}
