//! Network-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

use mx_core::{CoreError, LinkId, NodeId, SegmentId};

/// Fatal errors produced while reading and resolving the network file.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("cannot read {path:?}: {source}")]
    Read {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("section [{0}] not found in network file")]
    MissingSection(&'static str),

    #[error("expected {expected} at offset {offset}, found {found:?}")]
    UnexpectedToken {
        offset:   usize,
        expected: &'static str,
        found:    String,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: &'static str },

    #[error("malformed {kind} {token:?} at offset {offset}")]
    MalformedNumber {
        offset: usize,
        token:  String,
        kind:   &'static str,
    },

    #[error("segment consistency error on segment {segment}: distance {distance}")]
    SegmentGap { segment: SegmentId, distance: f64 },

    #[error("segment {0} declared twice")]
    DuplicateSegment(SegmentId),

    #[error("too many segments in link {link}: synthetic sequence exceeds {cap}")]
    TooManySegments { link: LinkId, cap: u16 },

    #[error("node id collision: {0}")]
    NodeCollision(NodeId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
