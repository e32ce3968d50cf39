use std::path::PathBuf;

use thiserror::Error;

use mx_core::{AgentId, SegmentId};

#[derive(Debug, Error)]
pub enum TripError {
    #[error("cannot open {path:?}: {source}")]
    Open {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("agent id already exists: {0}")]
    DuplicateAgent(AgentId),

    #[error("agent id expected but doesn't exist: {0}")]
    UnknownAgent(AgentId),

    #[error("agent completed twice: {0}")]
    CompletedTwice(AgentId),

    #[error("origin mismatch for {agent}: departed from {expected}, completed from {found}")]
    OriginMismatch { agent: AgentId, expected: u64, found: u64 },

    #[error("destination mismatch for {agent}: departed to {expected}, completed at {found}")]
    DestinationMismatch { agent: AgentId, expected: u64, found: u64 },

    #[error("departure time mismatch for {agent}: {expected} vs {found}")]
    DepartureMismatch { agent: AgentId, expected: f64, found: i64 },

    #[error("{agent} arrived at {arrival} before departing at {departure}")]
    ArrivedBeforeDeparture { agent: AgentId, departure: f64, arrival: f64 },

    #[error("{agent}: field {field} must be 0 or 1, not {value}")]
    NotBoolean { agent: AgentId, field: &'static str, value: u32 },

    #[error("trajectory time went backwards on line {line}: {time} after {previous}")]
    TimeWentBackwards { line: u64, previous: u64, time: u64 },

    #[error("segment id not known: {0}")]
    UnknownSegment(SegmentId),

    #[error("agent ids must run 1..={count}, found {min}..={max}")]
    IdRange { min: AgentId, max: AgentId, count: usize },
}

pub type TripResult<T> = Result<T, TripError>;
