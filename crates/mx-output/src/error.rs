//! Failures while writing the graph file, the driver XML or the node-error
//! CSV.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Creating or writing `output_network.txt` or `agents.gen.xml`.
    #[error("output file error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing `node_errors.csv`.
    #[error("node error table: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
