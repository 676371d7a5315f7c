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
use chrono::NaiveDate;
use roster_core::prelude::Minutes;
use std::collections::{BTreeMap, BTreeSet};

/// One synthetic driver: an N-on/N-off pattern anchored at a work-start
/// date, plus the ids of the shifts it carries.
///
/// Assignments are the source of truth; the id set and the aggregates here
/// are caches the [`crate::solution::roster::Roster`] keeps in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    id: DriverId,
    cycle: Cycle,
    work_start_date: NaiveDate,
    shifts: BTreeSet<ShiftId>,
    total: Minutes,
    day_counts: BTreeMap<NaiveDate, u16>,
}

impl Driver {
    pub(crate) fn new(id: DriverId, cycle: Cycle, work_start_date: NaiveDate) -> Self {
        Self {
            id,
            cycle,
            work_start_date,
            shifts: BTreeSet::new(),
            total: Minutes::zero(),
            day_counts: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> DriverId {
        self.id
    }

    #[inline]
    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    #[inline]
    pub fn work_start_date(&self) -> NaiveDate {
        self.work_start_date
    }

    #[inline]
    pub fn is_work_day(&self, date: NaiveDate) -> bool {
        self.cycle.is_work_day(self.work_start_date, date)
    }

    #[inline]
    pub fn shift_ids(&self) -> impl Iterator<Item = ShiftId> + '_ {
        self.shifts.iter().copied()
    }

    #[inline]
    pub fn contains(&self, id: ShiftId) -> bool {
        self.shifts.contains(&id)
    }

    #[inline]
    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.shifts.is_empty()
    }

    #[inline]
    pub fn total_minutes(&self) -> Minutes {
        self.total
    }

    #[inline]
    pub fn days_worked(&self) -> usize {
        self.day_counts.len()
    }

    #[inline]
    pub fn dates_worked(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.day_counts.keys().copied()
    }

    pub(crate) fn record(&mut self, shift: &Shift) {
        if self.shifts.insert(shift.id()) {
            self.total += shift.duration();
            *self.day_counts.entry(shift.date()).or_insert(0) += 1;
        }
    }

    pub(crate) fn forget(&mut self, shift: &Shift) {
        if self.shifts.remove(&shift.id()) {
            self.total -= shift.duration();
            if let Some(count) = self.day_counts.get_mut(&shift.date()) {
                *count -= 1;
                if *count == 0 {
                    self.day_counts.remove(&shift.date());
                }
            }
        }
    }
}
