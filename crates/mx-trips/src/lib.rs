//! `mx-trips` — per-driver trip records stitched from three MITSIM outputs.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`driver`]      | `Driver`, `CompletionFields`, `Placement`               |
//! | [`table`]       | `DriverTable` (`BTreeMap<AgentId, Driver>` + id range)  |
//! | [`rows`]        | whitespace-separated row reader, `SkippedLine`          |
//! | [`departure`]   | `load_departures`, `load_departures_reader`             |
//! | [`completion`]  | `load_completions`, `load_completions_reader`           |
//! | [`trajectory`]  | `load_trajectory`, `load_trajectory_reader`             |
//! | [`stats`]       | `first_position_summary`                                |
//! | [`error`]       | `TripError`, `TripResult<T>`                            |
//!
//! # Pass order
//!
//! ```text
//! dep.out ──► DriverTable ──► vehicle.out (cross-check, arrival)
//!                        └──► traj_compact.txt (first lane position)
//! ```
//!
//! Each pass only accepts agent ids the departure pass created, so the three
//! loaders must run in this order.

pub mod completion;
pub mod departure;
pub mod driver;
pub mod error;
pub mod rows;
pub mod stats;
pub mod table;
pub mod trajectory;

#[cfg(test)]
mod tests;

pub use completion::{CompletionReport, load_completions, load_completions_reader};
pub use departure::{DepartureReport, load_departures, load_departures_reader};
pub use driver::{CompletionFields, Driver, Placement};
pub use error::{TripError, TripResult};
pub use rows::SkippedLine;
pub use stats::first_position_summary;
pub use table::DriverTable;
pub use trajectory::{TrajectoryReport, load_trajectory, load_trajectory_reader};
