//! `vehicle.out` loader.
//!
//! # Format
//!
//! One line per vehicle that reached its destination, 11 columns:
//!
//! ```text
//! <agent> <flag_a> <distance_a> <origin> <dest> <last_node> <departure> <arrival> <distance_b> <speed> <flag_b>
//! 1 0 1520 122 200 200 25201 25390 1520 8.04 0
//! ```
//!
//! Every line is cross-checked against the departure record: origin,
//! destination and rounded departure must agree, the vehicle must not arrive
//! before it left, and both flags must be 0 or 1.  Any violation is fatal.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use mx_core::AgentId;

use crate::rows::{SkippedLine, for_each_row, non_negative};
use crate::{CompletionFields, DriverTable, TripError, TripResult};

#[derive(Deserialize)]
struct CompletionRow {
    agent_id:    u32,
    flag_a:      u32,
    distance_a:  u64,
    origin:      u64,
    destination: u64,
    last_node:   u64,
    departure:   i64,
    arrival:     u64,
    distance_b:  u64,
    #[serde(deserialize_with = "non_negative")]
    speed:       f64,
    flag_b:      u32,
}

/// Outcome of the completion pass.
#[derive(Clone, Debug, Default)]
pub struct CompletionReport {
    pub completed:     usize,
    pub skipped:       Vec<SkippedLine>,
    /// Earliest departure among completed drivers.
    pub min_departure: Option<f64>,
}

/// Read `vehicle.out` at `path` and complete the matching drivers in `table`.
pub fn load_completions(path: &Path, table: &mut DriverTable) -> TripResult<CompletionReport> {
    let file = File::open(path).map_err(|source| TripError::Open { path: path.to_owned(), source })?;
    load_completions_reader(file, table)
}

/// Like [`load_completions`] but accepts any `Read` source.
pub fn load_completions_reader<R: Read>(
    reader: R,
    table: &mut DriverTable,
) -> TripResult<CompletionReport> {
    let mut completed = 0;
    let mut min_departure: Option<f64> = None;

    let skipped = for_each_row(reader, 11, "vehicle.out", |_, row: CompletionRow| {
        let agent = AgentId(row.agent_id);
        let dr = table.get_mut(agent)?;
        if dr.completed {
            return Err(TripError::CompletedTwice(agent));
        }

        if dr.origin != row.origin {
            return Err(TripError::OriginMismatch { agent, expected: dr.origin, found: row.origin });
        }
        if dr.destination != row.destination {
            return Err(TripError::DestinationMismatch {
                agent,
                expected: dr.destination,
                found:    row.destination,
            });
        }
        if dr.departure.round() != row.departure as f64 {
            return Err(TripError::DepartureMismatch {
                agent,
                expected: dr.departure.round(),
                found:    row.departure,
            });
        }
        let arrival = row.arrival as f64;
        if arrival < dr.departure {
            return Err(TripError::ArrivedBeforeDeparture { agent, departure: dr.departure, arrival });
        }
        let flag_a = boolean(agent, "flag_a", row.flag_a)?;
        let flag_b = boolean(agent, "flag_b", row.flag_b)?;

        dr.arrival = arrival;
        dr.completed = true;
        dr.completion = Some(CompletionFields {
            flag_a,
            distance_a: row.distance_a,
            last_node:  row.last_node,
            distance_b: row.distance_b,
            speed:      row.speed,
            flag_b,
        });

        min_departure = Some(min_departure.map_or(dr.departure, |m| m.min(dr.departure)));
        completed += 1;
        Ok(())
    })?;

    info!("completions: {completed} of {} drivers reached their destination", table.len());
    Ok(CompletionReport { completed, skipped, min_departure })
}

fn boolean(agent: AgentId, field: &'static str, value: u32) -> TripResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(TripError::NotBoolean { agent, field, value }),
    }
}
