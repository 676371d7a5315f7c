// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::common::{DriverId, ShiftId};
use crate::problem::regime::Cycle;
use crate::problem::shift::Shift;
use crate::solution::driver::Driver;
use crate::solution::err::{
    AssignError, ShiftAlreadyAssignedError, ShiftNotAssignedError, UnknownDriverError,
};
use chrono::NaiveDate;
use roster_core::prelude::Minutes;
use std::collections::{BTreeMap, HashMap};

/// Lexicographic roster cost: driver count first, assigned minutes second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RosterCost {
    drivers: usize,
    total_minutes: Minutes,
}

impl RosterCost {
    #[inline]
    pub fn new(drivers: usize, total_minutes: Minutes) -> Self {
        Self {
            drivers,
            total_minutes,
        }
    }

    #[inline]
    pub fn drivers(&self) -> usize {
        self.drivers
    }

    #[inline]
    pub fn total_minutes(&self) -> Minutes {
        self.total_minutes
    }
}

impl std::fmt::Display for RosterCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} drivers / {}", self.drivers, self.total_minutes)
    }
}

/// The mutable roster: drivers plus the shift-to-driver assignment map.
///
/// The assignment map is the source of truth; each driver's id set and
/// aggregates are caches updated on every mutation. Cloning is a plain deep
/// copy in O(assignments), which is what the search uses to speculate and
/// roll back by discarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    drivers: BTreeMap<DriverId, Driver>,
    assignment: HashMap<ShiftId, DriverId>,
    next_driver: u32,
}

impl Roster {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh driver whose cycle starts on `work_start_date`.
    pub fn spawn_driver(&mut self, cycle: Cycle, work_start_date: NaiveDate) -> DriverId {
        let id = DriverId::new(self.next_driver);
        self.next_driver += 1;
        self.drivers.insert(id, Driver::new(id, cycle, work_start_date));
        id
    }

    #[inline]
    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.get(&id)
    }

    /// Drivers in ascending id order, which is creation order.
    #[inline]
    pub fn drivers(&self) -> impl Iterator<Item = &Driver> + '_ {
        self.drivers.values()
    }

    #[inline]
    pub fn driver_ids(&self) -> impl Iterator<Item = DriverId> + '_ {
        self.drivers.keys().copied()
    }

    #[inline]
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    #[inline]
    pub fn assigned_count(&self) -> usize {
        self.assignment.len()
    }

    #[inline]
    pub fn assignment_of(&self, shift: ShiftId) -> Option<DriverId> {
        self.assignment.get(&shift).copied()
    }

    #[inline]
    pub fn assignments(&self) -> impl Iterator<Item = (ShiftId, DriverId)> + '_ {
        self.assignment.iter().map(|(s, d)| (*s, *d))
    }

    pub fn assign(&mut self, shift: &Shift, driver: DriverId) -> Result<(), AssignError> {
        if let Some(owner) = self.assignment.get(&shift.id()) {
            return Err(ShiftAlreadyAssignedError::new(shift.id(), *owner).into());
        }
        let entry = self
            .drivers
            .get_mut(&driver)
            .ok_or_else(|| UnknownDriverError::new(driver))?;
        entry.record(shift);
        self.assignment.insert(shift.id(), driver);
        Ok(())
    }

    pub fn unassign(&mut self, shift: &Shift) -> Result<DriverId, AssignError> {
        let driver = self
            .assignment
            .remove(&shift.id())
            .ok_or_else(|| ShiftNotAssignedError::new(shift.id()))?;
        if let Some(entry) = self.drivers.get_mut(&driver) {
            entry.forget(shift);
        }
        Ok(driver)
    }

    /// Removes a driver together with its assignments, returning the freed
    /// shift ids in ascending order.
    pub fn remove_driver(&mut self, id: DriverId) -> Result<Vec<ShiftId>, UnknownDriverError> {
        let driver = self
            .drivers
            .remove(&id)
            .ok_or_else(|| UnknownDriverError::new(id))?;
        let freed: Vec<ShiftId> = driver.shift_ids().collect();
        for shift in &freed {
            self.assignment.remove(shift);
        }
        Ok(freed)
    }

    /// Drops every driver that carries no shift.
    pub fn remove_idle_drivers(&mut self) {
        self.drivers.retain(|_, d| !d.is_idle());
    }

    /// A copy with the same drivers (ids, cycles, anchors) and no
    /// assignments. Used to carry a fleet into another month.
    pub fn cleared_copy(&self) -> Roster {
        let drivers = self
            .drivers
            .values()
            .map(|d| (d.id(), Driver::new(d.id(), d.cycle(), d.work_start_date())))
            .collect();
        Roster {
            drivers,
            assignment: HashMap::new(),
            next_driver: self.next_driver,
        }
    }

    /// The driver with the fewest assigned minutes; lowest id wins ties.
    pub fn least_loaded_driver(&self) -> Option<DriverId> {
        self.drivers
            .values()
            .min_by_key(|d| (d.total_minutes(), d.id()))
            .map(Driver::id)
    }

    #[inline]
    pub fn total_minutes(&self) -> Minutes {
        self.drivers.values().map(Driver::total_minutes).sum()
    }

    #[inline]
    pub fn cost(&self) -> RosterCost {
        RosterCost::new(self.driver_count(), self.total_minutes())
    }

    /// Fraction of `total_shifts` covered by an assignment.
    #[inline]
    pub fn coverage(&self, total_shifts: usize) -> f64 {
        if total_shifts == 0 {
            return 1.0;
        }
        self.assignment.len() as f64 / total_shifts as f64
    }
}
