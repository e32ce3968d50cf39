use thiserror::Error;

use mx_network::NetworkError;
use mx_output::OutputError;
use mx_remap::RemapError;
use mx_trips::TripError;

/// Any fatal error of a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("network: {0}")]
    Network(#[from] NetworkError),

    #[error("drivers: {0}")]
    Trips(#[from] TripError),

    #[error("remap: {0}")]
    Remap(#[from] RemapError),

    #[error("output: {0}")]
    Output(#[from] OutputError),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
