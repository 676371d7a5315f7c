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

use crate::common::ShiftId;
use crate::problem::err::NonDenseShiftIdsError;
use crate::problem::regime::RegimeRules;
use crate::problem::shift::Shift;
use chrono::NaiveDate;
use roster_core::prelude::Minutes;
use std::collections::BTreeMap;

/// The read-only problem instance: the dated shift arena, bucketed by date,
/// plus the regime rules in force.
///
/// Shift ids are dense indices into the arena, so lookups are plain slice
/// indexing and per-shift side tables can be flat vectors.
#[derive(Debug, Clone)]
pub struct Problem {
    shifts: Vec<Shift>,
    by_date: BTreeMap<NaiveDate, Vec<ShiftId>>,
    rules: RegimeRules,
}

impl Problem {
    pub fn new(shifts: Vec<Shift>, rules: RegimeRules) -> Result<Self, NonDenseShiftIdsError> {
        for (i, shift) in shifts.iter().enumerate() {
            if shift.id().index() != i {
                return Err(NonDenseShiftIdsError::new(i));
            }
        }

        let mut by_date: BTreeMap<NaiveDate, Vec<ShiftId>> = BTreeMap::new();
        for shift in &shifts {
            by_date.entry(shift.date()).or_default().push(shift.id());
        }
        // Within a day, keep shifts in ascending start order; id breaks ties
        // so the ordering is total and replay-stable.
        for ids in by_date.values_mut() {
            ids.sort_by_key(|id| (shifts[id.index()].start(), *id));
        }

        Ok(Self {
            shifts,
            by_date,
            rules,
        })
    }

    #[inline]
    pub fn shift(&self, id: ShiftId) -> &Shift {
        &self.shifts[id.index()]
    }

    #[inline]
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    #[inline]
    pub fn rules(&self) -> &RegimeRules {
        &self.rules
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Calendar dates carrying at least one shift, ascending.
    #[inline]
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    /// Shift ids on `date` in ascending start order.
    #[inline]
    pub fn shifts_on(&self, date: NaiveDate) -> &[ShiftId] {
        self.by_date.get(&date).map_or(&[], Vec::as_slice)
    }

    #[inline]
    pub fn total_minutes(&self) -> Minutes {
        self.shifts.iter().map(Shift::duration).sum()
    }

    /// Unique service identities, ascending.
    pub fn services(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.shifts.iter().map(Shift::service).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Workload lower bound on the driver count: total shift minutes divided
    /// by what one driver can serve over `effective_work_days` capped days.
    /// Diagnostic only; not an enforced constraint.
    pub fn lower_bound_drivers(&self, effective_work_days: u32) -> u32 {
        let capacity = i64::from(self.rules.max_daily().value()) * i64::from(effective_work_days);
        if capacity <= 0 {
            return 0;
        }
        let total = i64::from(self.total_minutes().value());
        let quotient = total / capacity;
        let remainder = total % capacity;
        let ceil_div = if remainder > 0 { quotient + 1 } else { quotient };
        ceil_div as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::shift::ServiceType;
    use roster_core::prelude::MinuteOfDay;

    fn rules() -> RegimeRules {
        RegimeRules::mining_faena()
    }

    fn shift(id: u32, day: u32, start: i32, duration: i32, service: &str) -> Shift {
        Shift::new(
            ShiftId::new(id),
            service,
            None,
            ServiceType::Industrial,
            1,
            0,
            NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            MinuteOfDay::new(start),
            Minutes::new(duration),
            &rules(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_dense_ids() {
        let shifts = vec![shift(1, 1, 360, 480, "S1")];
        assert!(Problem::new(shifts, rules()).is_err());
    }

    #[test]
    fn test_date_buckets_sorted_by_start() {
        let shifts = vec![
            shift(0, 1, 900, 240, "S1"),
            shift(1, 1, 360, 480, "S2"),
            shift(2, 2, 100, 240, "S1"),
        ];
        let prob = Problem::new(shifts, rules()).unwrap();
        let day1 = prob.shifts_on(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(day1, &[ShiftId::new(1), ShiftId::new(0)]);
        assert_eq!(prob.dates().count(), 2);
        assert_eq!(prob.shifts_on(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()), &[]);
    }

    #[test]
    fn test_total_minutes_and_services() {
        let shifts = vec![
            shift(0, 1, 360, 480, "S2"),
            shift(1, 1, 900, 240, "S1"),
            shift(2, 2, 360, 480, "S1"),
        ];
        let prob = Problem::new(shifts, rules()).unwrap();
        assert_eq!(prob.total_minutes().value(), 1200);
        assert_eq!(prob.services(), vec!["S1", "S2"]);
    }

    #[test]
    fn test_lower_bound_drivers() {
        // 3865 hours over 12 effective 14-hour days per driver.
        let mut shifts = Vec::new();
        // 483 shifts of 8 h = 3864 h, plus one 1 h shift.
        for i in 0..483u32 {
            shifts.push(shift(i, 1 + (i % 28), 360, 480, "S1"));
        }
        shifts.push(shift(483, 1, 0, 60, "S1"));
        let prob = Problem::new(shifts, rules()).unwrap();
        assert_eq!(prob.total_minutes().value(), 3865 * 60);
        assert_eq!(prob.lower_bound_drivers(12), 24);
    }
}
