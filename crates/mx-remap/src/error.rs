use std::path::PathBuf;

use thiserror::Error;

use mx_core::{AgentId, NodeId};

#[derive(Debug, Error)]
pub enum RemapError {
    #[error("cannot read {path:?}: {source}")]
    Read {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("node {node} already maps to {existing}, cannot remap to {requested}")]
    Conflict { node: NodeId, existing: u64, requested: u64 },

    #[error("coordinates given for unknown target node {0}")]
    UnknownTarget(u64),

    #[error("reference node {0} has no target mapping")]
    UnmappedReference(NodeId),

    #[error("reference node {0} is not an endpoint of any segment")]
    ReferenceNotFound(NodeId),

    #[error("no target node id for {node} ({role} of {agent})")]
    UnmappedEndpoint { agent: AgentId, node: u64, role: &'static str },
}

pub type RemapResult<T> = Result<T, RemapError>;
