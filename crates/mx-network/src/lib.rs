//! `mx-network` — MITSIM network file parsing and node resolution.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`comments`] | `CommentStripper`, `strip_comments`                          |
//! | [`section`]  | `extract_links_section`                                      |
//! | [`lexer`]    | `Token`, `tokenize`                                          |
//! | [`parser`]   | `ParsedLink`, `ParsedSegment`, `parse_links`, `parse_scientific` |
//! | [`resolver`] | `NodeResolver`, `ResolveReport`, `NodeMismatch`              |
//! | [`network`]  | `RoadNetwork` arena (nodes, segments, links), builder        |
//! | [`loader`]   | `load_network_file`, `load_network_str`                      |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                           |
//!
//! # Pipeline
//!
//! ```text
//! raw lines ─► strip_comments ─► extract_links_section ─► tokenize
//!           ─► parse_links (+ segment chain check) ─► NodeResolver ─► RoadNetwork
//! ```

pub mod comments;
pub mod error;
pub mod lexer;
pub mod loader;
pub mod network;
pub mod parser;
pub mod resolver;
pub mod section;


pub use comments::{CommentStripper, strip_comments};
pub use error::{NetworkError, NetworkResult};
pub use loader::{load_network_file, load_network_str};
pub use network::{Link, Node, RoadNetwork, RoadNetworkBuilder, Segment};
pub use parser::{ParsedLink, ParsedSegment, parse_links, parse_scientific};
pub use resolver::{MismatchSeverity, NodeMismatch, NodeResolver, ResolveReport};
pub use section::extract_links_section;
