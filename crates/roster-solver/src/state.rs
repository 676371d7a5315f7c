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

use crate::conflict::ConflictSets;
use crate::err::{NotFreeError, UnreachableShiftError};
use crate::occupancy::{DriverOccupancy, OccupancyRead, OccupancyWrite};
use chrono::NaiveDate;
use roster_model::common::{DriverId, ShiftId};
use roster_model::problem::prob::Problem;
use roster_model::solution::err::AssignError;
use roster_model::solution::roster::{Roster, RosterCost};
use std::collections::HashMap;

/// Where a repaired shift ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairResult {
    pub driver: DriverId,
    pub spawned: bool,
}

/// The working state of one search run: the mutable roster plus the
/// occupancy caches, over a shared read-only problem and conflict sets.
///
/// Cloning deep-copies the roster and the caches, so operators speculate on
/// a clone and roll back by discarding it.
#[derive(Debug, Clone)]
pub struct SolverState<'p> {
    problem: &'p Problem,
    conflicts: &'p ConflictSets,
    roster: Roster,
    occupancy: HashMap<DriverId, DriverOccupancy>,
}

impl<'p> SolverState<'p> {
    pub fn new(problem: &'p Problem, conflicts: &'p ConflictSets) -> Self {
        Self {
            problem,
            conflicts,
            roster: Roster::new(),
            occupancy: HashMap::new(),
        }
    }

    /// Rebuilds the caches from an existing roster's assignments.
    pub fn from_roster(
        problem: &'p Problem,
        conflicts: &'p ConflictSets,
        roster: Roster,
    ) -> Result<Self, NotFreeError> {
        let mut occupancy: HashMap<DriverId, DriverOccupancy> = HashMap::new();
        for driver in roster.drivers() {
            let entry = occupancy.entry(driver.id()).or_default();
            for id in driver.shift_ids() {
                entry.occupy(driver.id(), problem.shift(id))?;
            }
        }
        Ok(Self {
            problem,
            conflicts,
            roster,
            occupancy,
        })
    }

    #[inline]
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    #[inline]
    pub fn conflicts(&self) -> &'p ConflictSets {
        self.conflicts
    }

    #[inline]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[inline]
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    #[inline]
    pub fn cost(&self) -> RosterCost {
        self.roster.cost()
    }

    #[inline]
    pub fn driver_count(&self) -> usize {
        self.roster.driver_count()
    }

    pub fn spawn_driver(&mut self, work_start_date: NaiveDate) -> DriverId {
        let id = self
            .roster
            .spawn_driver(self.problem.rules().cycle(), work_start_date);
        self.occupancy.insert(id, DriverOccupancy::new());
        id
    }

    pub fn assign(&mut self, shift: ShiftId, driver: DriverId) -> Result<(), AssignError> {
        let shift = self.problem.shift(shift);
        self.roster.assign(shift, driver)?;
        let entry = self.occupancy.entry(driver).or_default();
        if let Err(err) = entry.occupy(driver, shift) {
            // Keep roster and caches in step even on the defensive path.
            let _ = self.roster.unassign(shift);
            tracing::error!(%err, "occupancy rejected an assignment the roster took");
            return Err(AssignError::AlreadyAssigned(
                roster_model::solution::err::ShiftAlreadyAssignedError::new(shift.id(), driver),
            ));
        }
        Ok(())
    }

    pub fn unassign(&mut self, shift: ShiftId) -> Result<DriverId, AssignError> {
        let shift = self.problem.shift(shift);
        let driver = self.roster.unassign(shift)?;
        if let Some(entry) = self.occupancy.get_mut(&driver) {
            entry.release(shift);
        }
        Ok(driver)
    }

    pub fn remove_driver(
        &mut self,
        driver: DriverId,
    ) -> Result<Vec<ShiftId>, roster_model::solution::err::UnknownDriverError> {
        let freed = self.roster.remove_driver(driver)?;
        self.occupancy.remove(&driver);
        Ok(freed)
    }

    pub fn remove_idle_drivers(&mut self) {
        let idle: Vec<DriverId> = self
            .roster
            .drivers()
            .filter(|d| d.is_idle())
            .map(|d| d.id())
            .collect();
        for id in idle {
            let _ = self.roster.remove_driver(id);
            self.occupancy.remove(&id);
        }
    }

    /// The full feasibility gate: cycle work-day, conflict-set intersection,
    /// overlap, daily cap, same-day rest, inter-day rest, and the same-day
    /// service-group lock.
    pub fn can_take(&self, driver_id: DriverId, shift_id: ShiftId) -> bool {
        let Some(driver) = self.roster.driver(driver_id) else {
            return false;
        };
        let shift = self.problem.shift(shift_id);
        let rules = self.problem.rules();

        if !driver.is_work_day(shift.date()) {
            return false;
        }

        // Intersect over the smaller side of conflict-set vs. assigned set.
        let conflicts = self.conflicts.of(shift_id);
        let clash = if conflicts.len() <= driver.shift_count() {
            conflicts.iter().any(|c| driver.contains(*c))
        } else {
            driver.shift_ids().any(|a| conflicts.contains(&a))
        };
        if clash {
            return false;
        }

        let Some(occ) = self.occupancy.get(&driver_id) else {
            return false;
        };
        if occ.overlaps(shift.date(), shift.span()) {
            return false;
        }
        if !occ.fits_daily(shift.date(), shift.duration(), rules.max_daily()) {
            return false;
        }
        if !occ.same_day_rest_ok(shift.date(), shift.span(), rules.min_same_day_rest()) {
            return false;
        }
        if !occ.adjacent_rest_ok(shift.date(), shift.span(), rules.min_inter_day_rest()) {
            return false;
        }

        if let Some(group) = shift.group()
            && let Some(day) = occ.day(shift.date())
            && day.shifts().iter().any(|(id, _)| {
                self.problem
                    .shift(*id)
                    .group()
                    .is_some_and(|g| g != group)
            })
        {
            return false;
        }

        true
    }

    /// Reinserts one unassigned shift: the first existing driver that can
    /// take it wins, scanning in id order; otherwise a fresh driver is
    /// spawned with its cycle anchored on the shift's date.
    pub fn repair(&mut self, shift_id: ShiftId) -> Result<RepairResult, UnreachableShiftError> {
        let candidates: Vec<DriverId> = self.roster.driver_ids().collect();
        for driver in candidates {
            if self.can_take(driver, shift_id) {
                return match self.assign(shift_id, driver) {
                    Ok(()) => Ok(RepairResult {
                        driver,
                        spawned: false,
                    }),
                    Err(_) => Err(UnreachableShiftError::new(shift_id)),
                };
            }
        }

        let date = self.problem.shift(shift_id).date();
        let fresh = self.spawn_driver(date);
        if !self.can_take(fresh, shift_id) || self.assign(shift_id, fresh).is_err() {
            return Err(UnreachableShiftError::new(shift_id));
        }
        Ok(RepairResult {
            driver: fresh,
            spawned: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_core::prelude::{MinuteOfDay, Minutes};
    use roster_model::problem::regime::RegimeRules;
    use roster_model::problem::shift::{ServiceType, Shift};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    fn shift_in_group(id: u32, d: u32, start: i32, duration: i32, group: Option<&str>) -> Shift {
        Shift::new(
            ShiftId::new(id),
            "S1",
            group.map(str::to_owned),
            ServiceType::Industrial,
            1,
            0,
            day(d),
            MinuteOfDay::new(start),
            Minutes::new(duration),
            &RegimeRules::mining_faena(),
        )
        .unwrap()
    }

    fn shift(id: u32, d: u32, start: i32, duration: i32) -> Shift {
        shift_in_group(id, d, start, duration, None)
    }

    fn problem(shifts: Vec<Shift>) -> Problem {
        Problem::new(shifts, RegimeRules::mining_faena()).unwrap()
    }

    #[test]
    fn test_repair_prefers_existing_driver() {
        let p = problem(vec![shift(0, 1, 240, 270), shift(1, 1, 810, 240)]);
        let c = ConflictSets::build(&p);
        let mut state = SolverState::new(&p, &c);

        let r0 = state.repair(ShiftId::new(0)).unwrap();
        assert!(r0.spawned);
        let r1 = state.repair(ShiftId::new(1)).unwrap();
        assert!(!r1.spawned);
        assert_eq!(r0.driver, r1.driver);
        assert_eq!(state.driver_count(), 1);
    }

    #[test]
    fn test_repair_spawns_on_conflict() {
        // 4 h gap: the pair conflicts, so the second shift needs a new driver.
        let p = problem(vec![shift(0, 1, 240, 270), shift(1, 1, 750, 240)]);
        let c = ConflictSets::build(&p);
        let mut state = SolverState::new(&p, &c);

        state.repair(ShiftId::new(0)).unwrap();
        let r1 = state.repair(ShiftId::new(1)).unwrap();
        assert!(r1.spawned);
        assert_eq!(state.driver_count(), 2);
    }

    #[test]
    fn test_can_take_respects_rest_days() {
        let p = problem(vec![shift(0, 1, 360, 480), shift(1, 10, 360, 480)]);
        let c = ConflictSets::build(&p);
        let mut state = SolverState::new(&p, &c);

        let r0 = state.repair(ShiftId::new(0)).unwrap();
        // Day 10 is day 9 of the cycle anchored on the 1st: a rest day.
        assert!(!state.can_take(r0.driver, ShiftId::new(1)));
    }

    #[test]
    fn test_group_lock_blocks_same_day_mix() {
        let p = problem(vec![
            shift_in_group(0, 1, 240, 270, Some("north")),
            shift_in_group(1, 1, 810, 240, Some("south")),
            shift_in_group(2, 1, 810, 240, Some("north")),
        ]);
        let c = ConflictSets::build(&p);
        let mut state = SolverState::new(&p, &c);

        let r0 = state.repair(ShiftId::new(0)).unwrap();
        assert!(!state.can_take(r0.driver, ShiftId::new(1)));
        assert!(state.can_take(r0.driver, ShiftId::new(2)));
    }

    #[test]
    fn test_unassign_restores_feasibility() {
        let p = problem(vec![shift(0, 1, 240, 270), shift(1, 1, 750, 240)]);
        let c = ConflictSets::build(&p);
        let mut state = SolverState::new(&p, &c);

        let r0 = state.repair(ShiftId::new(0)).unwrap();
        assert!(!state.can_take(r0.driver, ShiftId::new(1)));
        state.unassign(ShiftId::new(0)).unwrap();
        assert!(state.can_take(r0.driver, ShiftId::new(1)));
    }

    #[test]
    fn test_from_roster_rebuilds_caches() {
        let p = problem(vec![shift(0, 1, 240, 270), shift(1, 1, 810, 240)]);
        let c = ConflictSets::build(&p);
        let mut state = SolverState::new(&p, &c);
        state.repair(ShiftId::new(0)).unwrap();
        state.repair(ShiftId::new(1)).unwrap();

        let roster = state.roster().clone();
        let rebuilt = SolverState::from_roster(&p, &c, roster).unwrap();
        assert_eq!(rebuilt.cost(), state.cost());
        assert!(!rebuilt.can_take(DriverId::new(0), ShiftId::new(0)));
    }

    #[test]
    fn test_clone_rollback_is_bit_for_bit() {
        let p = problem(vec![shift(0, 1, 240, 270), shift(1, 2, 810, 240)]);
        let c = ConflictSets::build(&p);
        let mut state = SolverState::new(&p, &c);
        state.repair(ShiftId::new(0)).unwrap();

        let snapshot = state.clone();
        let mut speculative = state.clone();
        speculative.unassign(ShiftId::new(0)).unwrap();
        speculative.repair(ShiftId::new(1)).unwrap();
        drop(speculative);

        assert_eq!(state.roster(), snapshot.roster());
    }
}
