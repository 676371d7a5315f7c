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

use chrono::{Datelike, NaiveDate};
use roster_model::common::{DriverId, ShiftId};
use roster_model::problem::prob::Problem;
use roster_model::solution::roster::Roster;
use std::collections::HashMap;

/// The result of replicating a solved month onto a target month: the target
/// roster (same fleet as the source) plus the target shifts that had no
/// matching source slot. Gaps are soft; the caller decides whether to
/// re-optimize the affected month.
#[derive(Debug, Clone)]
pub struct ReplicationOutcome {
    pub roster: Roster,
    pub gaps: Vec<ShiftId>,
}

/// Maps every target-month shift to the source-month assignment occupying
/// the same (day-in-cycle, service, shift-number, vehicle) slot and copies
/// its driver. Lookup degrades through progressively looser keys: the exact
/// slot first, then ignoring the vehicle, then by service alone; only a
/// shift matching none of the three is a gap. Day-in-cycle is taken modulo
/// the full on/off period, anchored on the first day of the source month,
/// so a month whose length is a multiple of the period replays exactly.
pub fn replicate_month(
    source_problem: &Problem,
    source_roster: &Roster,
    target_problem: &Problem,
) -> ReplicationOutcome {
    let period = i64::from(source_problem.rules().cycle().full_period());
    let Some(anchor) = source_anchor(source_problem) else {
        return ReplicationOutcome {
            roster: source_roster.cleared_copy(),
            gaps: target_problem.shifts().iter().map(|s| s.id()).collect(),
        };
    };

    // Index the source solution in driver order so duplicate fallback slots
    // resolve deterministically.
    let mut exact: HashMap<(i64, &str, u16, u16), DriverId> = HashMap::new();
    let mut by_slot: HashMap<(i64, &str, u16), DriverId> = HashMap::new();
    let mut by_service: HashMap<(i64, &str), DriverId> = HashMap::new();
    for driver in source_roster.drivers() {
        for id in driver.shift_ids() {
            let shift = source_problem.shift(id);
            let day = day_in_cycle(anchor, shift.date(), period);
            exact
                .entry((day, shift.service(), shift.number(), shift.vehicle()))
                .or_insert(driver.id());
            by_slot
                .entry((day, shift.service(), shift.number()))
                .or_insert(driver.id());
            by_service
                .entry((day, shift.service()))
                .or_insert(driver.id());
        }
    }

    let mut roster = source_roster.cleared_copy();
    let mut gaps = Vec::new();

    for shift in target_problem.shifts() {
        let day = day_in_cycle(anchor, shift.date(), period);
        let driver = exact
            .get(&(day, shift.service(), shift.number(), shift.vehicle()))
            .or_else(|| by_slot.get(&(day, shift.service(), shift.number())))
            .or_else(|| by_service.get(&(day, shift.service())))
            .copied();

        let placed = match driver {
            Some(driver) => roster.assign(shift, driver).is_ok(),
            None => false,
        };
        if !placed {
            gaps.push(shift.id());
        }
    }

    if !gaps.is_empty() {
        tracing::warn!(
            gaps = gaps.len(),
            total = target_problem.len(),
            "replication left unmatched target shifts"
        );
    }

    ReplicationOutcome { roster, gaps }
}

/// The first day of the source month, regardless of which dates carry shifts.
fn source_anchor(problem: &Problem) -> Option<NaiveDate> {
    let first = problem.dates().next()?;
    first.with_day(1)
}

#[inline]
fn day_in_cycle(anchor: NaiveDate, date: NaiveDate, period: i64) -> i64 {
    (date - anchor).num_days().rem_euclid(period)
}
