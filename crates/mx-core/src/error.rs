//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced by `mx-core` parsing helpers.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid node id {0:?}: expected \"<n>\" or \"<link>:<seq>\"")]
    InvalidNodeId(String),

    #[error("synthetic sequence {seq} for link {link} is outside 1..=999")]
    SequenceOutOfRange { link: u32, seq: u32 },
}

/// Shorthand result type for `mx-core`.
pub type CoreResult<T> = Result<T, CoreError>;
