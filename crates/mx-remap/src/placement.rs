//! Final per-driver resolution into target ids and relative start times.

use log::info;

use mx_core::NodeId;
use mx_trips::{DriverTable, Placement};

use crate::{NodeMapping, RemapError, RemapResult};

/// Fill in every driver's [`Placement`].
///
/// `min_departure` becomes time zero; departures are converted to
/// milliseconds and truncated.  Both endpoints of every driver must be
/// mapped.  Returns the number of placements that still lack coordinates at
/// one end.
pub fn place_drivers(
    table: &mut DriverTable,
    mapping: &NodeMapping,
    min_departure: f64,
) -> RemapResult<usize> {
    let mut unresolved = 0;
    for dr in table.iter_mut() {
        let agent = dr.id;
        let lookup = |node: u64, role: &'static str| {
            mapping
                .target(NodeId::Natural(node))
                .ok_or(RemapError::UnmappedEndpoint { agent, node, role })
        };
        let placement = Placement {
            origin:       lookup(dr.origin, "origin")?,
            destination:  lookup(dr.destination, "destination")?,
            departure_ms: departure_ms(dr.departure, min_departure),
        };
        if placement.is_unresolved() {
            unresolved += 1;
        }
        dr.placement = Some(placement);
    }

    info!("placed {} drivers ({unresolved} with an untranslated endpoint)", table.len());
    Ok(unresolved)
}

/// `(departure − min) × 1000`, truncated toward zero.
#[inline]
pub fn departure_ms(departure: f64, min_departure: f64) -> i64 {
    ((departure - min_departure) * 1000.0) as i64
}
