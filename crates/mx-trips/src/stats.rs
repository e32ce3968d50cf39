//! First-position statistics.

use std::collections::BTreeMap;

use log::debug;

use mx_core::Summary;

use crate::DriverTable;

/// Summarise the first lane position of every started driver, grouped by
/// origin node.  Drivers the trajectory never mentioned are left out.
pub fn first_position_summary(table: &DriverTable) -> BTreeMap<u64, Summary> {
    let mut by_origin: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
    for dr in table.iter() {
        if let Some(pos) = dr.first_position {
            by_origin.entry(dr.origin).or_default().push(pos);
        }
    }

    let summaries: BTreeMap<u64, Summary> = by_origin
        .into_iter()
        .filter_map(|(origin, positions)| Summary::of(&positions).map(|s| (origin, s)))
        .collect();

    for (origin, s) in &summaries {
        debug!("first position from node {origin}: {s}");
    }
    summaries
}
