//! `mx-core` — foundational types for the `mx` trace converter.
//!
//! This crate is a dependency of every other `mx-*` crate.  It has no `mx-*`
//! dependencies and only `thiserror` and `log` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `LinkId`, `SegmentId`, `AgentId`, tagged `NodeId`          |
//! | [`geo`]      | `Point`, planar distance                                   |
//! | [`config`]   | `ConvertConfig`, `InputFiles`, `OutputFiles`, `Tolerances` |
//! | [`stats`]    | `Summary` (count / mean / std-dev / min / max)             |
//! | [`target`]   | `TargetNode` (Sim Mobility id + integer coordinates)       |
//! | [`error`]    | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, points and config.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod stats;
pub mod target;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ConvertConfig, InputFiles, OutputFiles, Tolerances};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{AgentId, LinkId, NodeId, SegmentId};
pub use stats::Summary;
pub use target::TargetNode;
