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

use crate::err::NotFreeError;
use chrono::{Days, NaiveDate};
use fixedbitset::FixedBitSet;
use roster_core::prelude::{MINUTES_PER_DAY, MinuteOfDay, MinuteSpan, Minutes};
use roster_model::common::{DriverId, ShiftId};
use roster_model::problem::shift::Shift;
use std::collections::BTreeMap;

/// Minute occupancy of one driver on one calendar date.
///
/// `bits` is the 1440-bit clock grid of the date, including the spilled
/// tail of a cross-midnight shift from the previous date, so the overlap
/// test is exact across midnight. `attributed` and `shifts` cover only the
/// shifts dated this day; the daily-cap test charges a cross-midnight shift
/// entirely to its start date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOccupancy {
    bits: FixedBitSet,
    popcount: u32,
    attributed: Minutes,
    shifts: Vec<(ShiftId, MinuteSpan)>,
}

impl DayOccupancy {
    fn new() -> Self {
        Self {
            bits: FixedBitSet::with_capacity(MINUTES_PER_DAY as usize),
            popcount: 0,
            attributed: Minutes::zero(),
            shifts: Vec::new(),
        }
    }

    #[inline]
    pub fn popcount(&self) -> u32 {
        self.popcount
    }

    #[inline]
    pub fn attributed_minutes(&self) -> Minutes {
        self.attributed
    }

    #[inline]
    pub fn shifts(&self) -> &[(ShiftId, MinuteSpan)] {
        &self.shifts
    }

    #[inline]
    fn is_clear(&self) -> bool {
        self.popcount == 0 && self.shifts.is_empty()
    }

    fn any_set(&self, from: i32, to: i32) -> bool {
        debug_assert!(0 <= from && from <= to && to <= MINUTES_PER_DAY);
        self.bits.count_ones(from as usize..to as usize) > 0
    }

    fn set(&mut self, from: i32, to: i32) {
        self.bits.insert_range(from as usize..to as usize);
        self.popcount += (to - from) as u32;
    }

    fn clear(&mut self, from: i32, to: i32) {
        self.bits.set_range(from as usize..to as usize, false);
        self.popcount -= (to - from) as u32;
    }

    fn first_start(&self) -> Option<Minutes> {
        self.shifts
            .first()
            .map(|(_, span)| span.start() - MinuteOfDay::midnight())
    }

    fn last_end(&self) -> Option<Minutes> {
        self.shifts
            .iter()
            .map(|(_, span)| span.end() - MinuteOfDay::midnight())
            .max()
    }
}

/// Read-only queries over one driver's minute occupancy.
pub trait OccupancyRead {
    fn day(&self, date: NaiveDate) -> Option<&DayOccupancy>;
    fn is_empty(&self) -> bool;

    /// Any bit of `[start, end)` on `date` (tail bits on the next date
    /// included) already taken?
    fn overlaps(&self, date: NaiveDate, span: MinuteSpan) -> bool;

    /// Would `duration` more minutes on `date` stay under the daily cap?
    fn fits_daily(&self, date: NaiveDate, duration: Minutes, cap: Minutes) -> bool;

    /// Is `span` at least `floor` away from every shift already on `date`?
    fn same_day_rest_ok(&self, date: NaiveDate, span: MinuteSpan, floor: Minutes) -> bool;

    /// Is `span` at least `floor` away from the closest work on the previous
    /// and the following date?
    fn adjacent_rest_ok(&self, date: NaiveDate, span: MinuteSpan, floor: Minutes) -> bool;
}

/// Mutation of one driver's minute occupancy.
pub trait OccupancyWrite: OccupancyRead {
    fn occupy(&mut self, driver: DriverId, shift: &Shift) -> Result<(), NotFreeError>;
    fn release(&mut self, shift: &Shift);
}

/// All per-day occupancy of one driver. A cache over the assignments,
/// rebuilt or mutated in lock-step with them, never the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverOccupancy {
    days: BTreeMap<NaiveDate, DayOccupancy>,
}

impl DriverOccupancy {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl OccupancyRead for DriverOccupancy {
    #[inline]
    fn day(&self, date: NaiveDate) -> Option<&DayOccupancy> {
        self.days.get(&date)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn overlaps(&self, date: NaiveDate, span: MinuteSpan) -> bool {
        let (head_from, head_to, tail) = split_span(span);
        if let Some(entry) = self.days.get(&date)
            && entry.any_set(head_from, head_to)
        {
            return true;
        }
        if tail > 0
            && let Some(entry) = self.days.get(&next_date(date))
            && entry.any_set(0, tail)
        {
            return true;
        }
        false
    }

    fn fits_daily(&self, date: NaiveDate, duration: Minutes, cap: Minutes) -> bool {
        let taken = self
            .days
            .get(&date)
            .map_or(Minutes::zero(), |e| e.attributed);
        taken + duration <= cap
    }

    fn same_day_rest_ok(&self, date: NaiveDate, span: MinuteSpan, floor: Minutes) -> bool {
        let Some(entry) = self.days.get(&date) else {
            return true;
        };
        entry.shifts.iter().all(|(_, q)| {
            !q.overlaps(&span) && q.gap_to(&span) >= floor
        })
    }

    fn adjacent_rest_ok(&self, date: NaiveDate, span: MinuteSpan, floor: Minutes) -> bool {
        let day = Minutes::new(MINUTES_PER_DAY);

        if let Some(prev) = prev_date(date)
            && let Some(entry) = self.days.get(&prev)
            && let Some(last_end) = entry.last_end()
        {
            let start = span.start() - MinuteOfDay::midnight();
            if start + day - last_end < floor {
                return false;
            }
        }

        if let Some(entry) = self.days.get(&next_date(date))
            && let Some(first_start) = entry.first_start()
        {
            let end = span.end() - MinuteOfDay::midnight();
            if first_start + day - end < floor {
                return false;
            }
        }

        true
    }
}

impl OccupancyWrite for DriverOccupancy {
    /// Marks the shift's minutes as taken; the cross-midnight tail lands in
    /// the following date's grid.
    fn occupy(&mut self, driver: DriverId, shift: &Shift) -> Result<(), NotFreeError> {
        let span = shift.span();
        if self.overlaps(shift.date(), span) {
            return Err(NotFreeError::new(driver, shift.date(), span));
        }

        let (head_from, head_to, tail) = split_span(span);
        let entry = self.days.entry(shift.date()).or_insert_with(DayOccupancy::new);
        entry.set(head_from, head_to);
        entry.attributed += shift.duration();
        let at = entry
            .shifts
            .partition_point(|(id, q)| (q.start(), *id) < (span.start(), shift.id()));
        entry.shifts.insert(at, (shift.id(), span));

        if tail > 0 {
            let next = next_date(shift.date());
            self.days
                .entry(next)
                .or_insert_with(DayOccupancy::new)
                .set(0, tail);
        }
        Ok(())
    }

    /// Clears the shift's minutes. The shift must be currently occupied.
    fn release(&mut self, shift: &Shift) {
        let span = shift.span();
        let (head_from, head_to, tail) = split_span(span);

        if let Some(entry) = self.days.get_mut(&shift.date()) {
            entry.clear(head_from, head_to);
            entry.attributed -= shift.duration();
            entry.shifts.retain(|(id, _)| *id != shift.id());
            if entry.is_clear() {
                self.days.remove(&shift.date());
            }
        }

        if tail > 0 {
            let next = next_date(shift.date());
            if let Some(entry) = self.days.get_mut(&next) {
                entry.clear(0, tail);
                if entry.is_clear() {
                    self.days.remove(&next);
                }
            }
        }
    }
}

/// Splits a span into its on-date clock range and the length of the tail
/// spilling past midnight.
fn split_span(span: MinuteSpan) -> (i32, i32, i32) {
    let start = span.start().value();
    let end = span.end().value();
    debug_assert!((0..MINUTES_PER_DAY).contains(&start));
    debug_assert!(end >= start);
    (
        start,
        end.min(MINUTES_PER_DAY),
        (end - MINUTES_PER_DAY).clamp(0, MINUTES_PER_DAY),
    )
}

#[inline]
fn next_date(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).expect("date overflow")
}

#[inline]
fn prev_date(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(1))
}
