//! Driver storage keyed by agent id.

use std::collections::BTreeMap;

use mx_core::AgentId;

use crate::{Driver, TripError, TripResult};

/// All drivers of a run, ordered by id.
///
/// Also remembers the smallest and largest id inserted, compared by value,
/// so the final `1..=N` contiguity check does not depend on file order.
#[derive(Debug, Default)]
pub struct DriverTable {
    drivers: BTreeMap<AgentId, Driver>,
    min_id:  Option<AgentId>,
    max_id:  Option<AgentId>,
}

impl DriverTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new driver.  A second driver with the same id is fatal.
    pub fn insert(&mut self, driver: Driver) -> TripResult<()> {
        let id = driver.id;
        if self.drivers.contains_key(&id) {
            return Err(TripError::DuplicateAgent(id));
        }
        self.drivers.insert(id, driver);
        self.min_id = Some(self.min_id.map_or(id, |m| m.min(id)));
        self.max_id = Some(self.max_id.map_or(id, |m| m.max(id)));
        Ok(())
    }

    pub fn get(&self, id: AgentId) -> Option<&Driver> {
        self.drivers.get(&id)
    }

    /// Mutable access; an id the departure pass never created is fatal.
    pub fn get_mut(&mut self, id: AgentId) -> TripResult<&mut Driver> {
        self.drivers.get_mut(&id).ok_or(TripError::UnknownAgent(id))
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Drivers in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Driver> {
        self.drivers.values_mut()
    }

    /// Smallest and largest id seen, or `None` for an empty table.
    pub fn id_range(&self) -> Option<(AgentId, AgentId)> {
        self.min_id.zip(self.max_id)
    }

    /// Check that ids are exactly `1..=len()`.
    ///
    /// Ids are unique, so `min == 1 && max == len` implies no gaps.
    pub fn check_contiguous(&self) -> TripResult<()> {
        let Some((min, max)) = self.id_range() else {
            return Ok(());
        };
        let count = self.len();
        if min != AgentId(1) || max.0 as usize != count {
            return Err(TripError::IdRange { min, max, count });
        }
        Ok(())
    }

    /// Number of drivers the trajectory stream never mentioned.
    pub fn never_started(&self) -> usize {
        self.iter().filter(|d| !d.started()).count()
    }

    /// Earliest departure over all drivers.
    pub fn min_departure(&self) -> Option<f64> {
        self.iter().map(|d| d.departure).reduce(f64::min)
    }
}
