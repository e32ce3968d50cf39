//! `mx-remap` — joins the MITSIM network and drivers to Sim Mobility nodes.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`line`]      | `RemapLine`, `parse_line` (the three line shapes)      |
//! | [`mapping`]   | `NodeMapping`: source → target id, target coordinates  |
//! | [`loader`]    | `load_remap`, `load_remap_str`, `RemapReport`          |
//! | [`offset`]    | `derive_offset`, `node_errors`, `NodeError`            |
//! | [`placement`] | `place_drivers`, `departure_ms`                        |
//! | [`error`]     | `RemapError`, `RemapResult<T>`                         |

pub mod error;
pub mod line;
pub mod loader;
pub mod mapping;
pub mod offset;
pub mod placement;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RemapError, RemapResult};
pub use line::{RemapLine, parse_line};
pub use loader::{RemapReport, load_remap, load_remap_str};
pub use mapping::NodeMapping;
pub use offset::{NodeError, OffsetReport, derive_offset, node_errors};
pub use placement::{departure_ms, place_drivers};
