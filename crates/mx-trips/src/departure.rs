//! `dep.out` loader.
//!
//! # Format
//!
//! ```text
//! <time> <agent_id> <origin_node> <dest_node> <vehicle_type> [path ...]
//! 25200.5 1 122 200 1
//! 25201.0 2 200 122 3 {10 11}
//! ```
//!
//! Creates one [`Driver`] per line.  A repeated agent id is fatal.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use mx_core::AgentId;

use crate::rows::{SkippedLine, for_each_row, non_negative};
use crate::{Driver, DriverTable, TripError, TripResult};

#[derive(Deserialize)]
struct DepartureRow {
    #[serde(deserialize_with = "non_negative")]
    time:         f64,
    agent_id:     u32,
    origin:       u64,
    destination:  u64,
    vehicle_type: u32,
}

/// Outcome of the departure pass.
#[derive(Clone, Debug, Default)]
pub struct DepartureReport {
    pub loaded:  usize,
    pub skipped: Vec<SkippedLine>,
}

/// Read `dep.out` at `path` into `table`.
pub fn load_departures(path: &Path, table: &mut DriverTable) -> TripResult<DepartureReport> {
    let file = File::open(path).map_err(|source| TripError::Open { path: path.to_owned(), source })?;
    load_departures_reader(file, table)
}

/// Like [`load_departures`] but accepts any `Read` source.
pub fn load_departures_reader<R: Read>(
    reader: R,
    table: &mut DriverTable,
) -> TripResult<DepartureReport> {
    let mut loaded = 0;
    let skipped = for_each_row(reader, 5, "dep.out", |_, row: DepartureRow| {
        table.insert(Driver::new(
            AgentId(row.agent_id),
            row.time,
            row.origin,
            row.destination,
            row.vehicle_type,
        ))?;
        loaded += 1;
        Ok(())
    })?;

    if let Some((min, max)) = table.id_range() {
        info!("departures: {loaded} drivers, ids {}..={}", min.0, max.0);
    }
    Ok(DepartureReport { loaded, skipped })
}
