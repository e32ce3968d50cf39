//! The per-agent trip record.

use mx_core::{AgentId, TargetNode};

/// Fields of `vehicle.out` that are validated and carried through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionFields {
    /// Column 2, boolean coded.
    pub flag_a:     bool,
    /// Column 3; looks like a distance in metres.
    pub distance_a: u64,
    /// Column 6; equals the destination node for all but a few dozen trips.
    pub last_node:  u64,
    /// Column 9; same unit as `distance_a`.
    pub distance_b: u64,
    /// Column 10, in m/s.
    pub speed:      f64,
    /// Column 11, boolean coded (always 0 in the Bugis export).
    pub flag_b:     bool,
}

/// Where and when a driver starts in Sim Mobility terms.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Placement {
    pub origin:       TargetNode,
    pub destination:  TargetNode,
    /// Departure relative to the earliest completed departure, in ms.
    pub departure_ms: i64,
}

impl Placement {
    /// `true` if either endpoint has no translated coordinates.
    pub fn is_unresolved(&self) -> bool {
        self.origin.is_unset() || self.destination.is_unset()
    }
}

/// One simulated trip.
///
/// Created by the departure pass; the completion pass, the trajectory pass
/// and reconciliation each fill in their own fields at most once.
#[derive(Clone, Debug, PartialEq)]
pub struct Driver {
    pub id:             AgentId,
    /// Seconds, as written in `dep.out`.
    pub departure:      f64,
    /// Seconds; `0` until completed.
    pub arrival:        f64,
    pub completed:      bool,
    /// MITSIM node ids.
    pub origin:         u64,
    pub destination:    u64,
    pub vehicle_type:   u32,
    /// Position in lane of the first trajectory sample.
    pub first_position: Option<f64>,
    pub completion:     Option<CompletionFields>,
    pub placement:      Option<Placement>,
}

impl Driver {
    pub fn new(id: AgentId, departure: f64, origin: u64, destination: u64, vehicle_type: u32) -> Self {
        Self {
            id,
            departure,
            arrival: 0.0,
            completed: false,
            origin,
            destination,
            vehicle_type,
            first_position: None,
            completion: None,
            placement: None,
        }
    }

    /// `true` once the trajectory pass has seen at least one sample.
    #[inline]
    pub fn started(&self) -> bool {
        self.first_position.is_some()
    }
}
