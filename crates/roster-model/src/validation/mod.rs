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

pub mod err;

use crate::problem::prob::Problem;
use crate::problem::shift::Shift;
use crate::solution::driver::Driver;
use crate::solution::roster::Roster;
use crate::validation::err::{
    CycleViolationError, DailyCapExceededError, OverlapViolationError, RestViolationError,
    UncoveredShiftError, ValidationError,
};
use chrono::NaiveDate;
use roster_core::prelude::{MINUTES_PER_DAY, Minutes};
use std::collections::BTreeMap;

/// Re-validates a roster against the raw shift list, independently of
/// whatever caches the search maintained.
#[derive(Debug, Clone)]
pub struct RosterValidator;

impl RosterValidator {
    /// Every shift of the problem is covered by exactly one assignment.
    pub fn validate_coverage(
        problem: &Problem,
        roster: &Roster,
    ) -> Result<(), UncoveredShiftError> {
        for shift in problem.shifts() {
            if roster.assignment_of(shift.id()).is_none() {
                return Err(UncoveredShiftError::new(shift.id()));
            }
        }
        Ok(())
    }

    /// Every assignment date lies in the work half of its driver's cycle.
    pub fn validate_cycle_legality(
        problem: &Problem,
        roster: &Roster,
    ) -> Result<(), CycleViolationError> {
        for driver in roster.drivers() {
            for id in driver.shift_ids() {
                let date = problem.shift(id).date();
                let day = driver.cycle().day_in_cycle(driver.work_start_date(), date);
                if day >= i64::from(driver.cycle().length()) {
                    return Err(CycleViolationError::new(driver.id(), id, date, day));
                }
            }
        }
        Ok(())
    }

    /// Per driver and date, assigned durations sum to at most the daily cap.
    pub fn validate_daily_cap(
        problem: &Problem,
        roster: &Roster,
    ) -> Result<(), DailyCapExceededError> {
        let cap = problem.rules().max_daily();
        for driver in roster.drivers() {
            for (date, shifts) in day_buckets(problem, driver) {
                let total: Minutes = shifts.iter().map(|s| s.duration()).sum();
                if total > cap {
                    return Err(DailyCapExceededError::new(driver.id(), date, total, cap));
                }
            }
        }
        Ok(())
    }

    /// No two same-date shifts of one driver overlap.
    pub fn validate_no_overlap(
        problem: &Problem,
        roster: &Roster,
    ) -> Result<(), OverlapViolationError> {
        for driver in roster.drivers() {
            for (_, shifts) in day_buckets(problem, driver) {
                for (i, a) in shifts.iter().enumerate() {
                    for b in &shifts[i + 1..] {
                        if a.span().overlaps(&b.span()) {
                            return Err(OverlapViolationError::new(driver.id(), a.id(), b.id()));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Any two same-date shifts of one driver are separated by the same-day
    /// rest floor.
    pub fn validate_same_day_rest(
        problem: &Problem,
        roster: &Roster,
    ) -> Result<(), RestViolationError> {
        let floor = problem.rules().min_same_day_rest();
        for driver in roster.drivers() {
            for (_, shifts) in day_buckets(problem, driver) {
                for (i, a) in shifts.iter().enumerate() {
                    for b in &shifts[i + 1..] {
                        let gap = a.span().gap_to(&b.span());
                        if gap < floor {
                            return Err(RestViolationError::new(
                                driver.id(),
                                a.id(),
                                b.id(),
                                gap,
                                floor,
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Any two shifts of one driver on consecutive dates are separated by the
    /// inter-day rest floor, cross-midnight ends included.
    pub fn validate_inter_day_rest(
        problem: &Problem,
        roster: &Roster,
    ) -> Result<(), RestViolationError> {
        let floor = problem.rules().min_inter_day_rest();
        for driver in roster.drivers() {
            let buckets = day_buckets(problem, driver);
            let days: Vec<&NaiveDate> = buckets.keys().collect();
            for pair in days.windows(2) {
                if (*pair[1] - *pair[0]).num_days() != 1 {
                    continue;
                }
                for a in &buckets[pair[0]] {
                    for b in &buckets[pair[1]] {
                        let gap = (b.start() - a.end()) + Minutes::new(MINUTES_PER_DAY);
                        if gap < floor {
                            return Err(RestViolationError::new(
                                driver.id(),
                                a.id(),
                                b.id(),
                                gap,
                                floor,
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Runs every check; the first violation wins.
    pub fn validate_all(problem: &Problem, roster: &Roster) -> Result<(), ValidationError> {
        Self::validate_coverage(problem, roster)?;
        Self::validate_cycle_legality(problem, roster)?;
        Self::validate_no_overlap(problem, roster)?;
        Self::validate_daily_cap(problem, roster)?;
        Self::validate_same_day_rest(problem, roster).map_err(ValidationError::SameDayRest)?;
        Self::validate_inter_day_rest(problem, roster).map_err(ValidationError::InterDayRest)?;
        Ok(())
    }
}

fn day_buckets<'p>(problem: &'p Problem, driver: &Driver) -> BTreeMap<NaiveDate, Vec<&'p Shift>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&Shift>> = BTreeMap::new();
    for id in driver.shift_ids() {
        let shift = problem.shift(id);
        buckets.entry(shift.date()).or_default().push(shift);
    }
    for shifts in buckets.values_mut() {
        shifts.sort_by_key(|s| (s.start(), s.id()));
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ShiftId;
    use crate::problem::regime::{Cycle, RegimeRules};
    use crate::problem::shift::ServiceType;
    use roster_core::prelude::MinuteOfDay;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    fn shift(id: u32, d: u32, start: i32, duration: i32) -> Shift {
        Shift::new(
            ShiftId::new(id),
            "S1",
            None,
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

    fn problem(shifts: Vec<Shift>) -> Problem {
        Problem::new(shifts, RegimeRules::mining_faena()).unwrap()
    }

    fn roster_with_all(problem: &Problem, anchor: NaiveDate) -> Roster {
        let mut roster = Roster::new();
        let d = roster.spawn_driver(Cycle::SEVEN, anchor);
        for s in problem.shifts() {
            roster.assign(s, d).unwrap();
        }
        roster
    }

    #[test]
    fn test_valid_roster_passes_all() {
        let p = problem(vec![shift(0, 1, 360, 480), shift(1, 2, 360, 480)]);
        let r = roster_with_all(&p, day(1));
        assert!(RosterValidator::validate_all(&p, &r).is_ok());
    }

    #[test]
    fn test_uncovered_shift_detected() {
        let p = problem(vec![shift(0, 1, 360, 480)]);
        let r = Roster::new();
        assert!(RosterValidator::validate_coverage(&p, &r).is_err());
    }

    #[test]
    fn test_rest_day_assignment_detected() {
        let p = problem(vec![shift(0, 10, 360, 480)]);
        // Anchor on the 1st: the 10th is day 9 of the period, a rest day.
        let r = roster_with_all(&p, day(1));
        let err = RosterValidator::validate_cycle_legality(&p, &r).unwrap_err();
        assert_eq!(err.day_in_cycle(), 9);
        assert!(matches!(
            RosterValidator::validate_all(&p, &r),
            Err(ValidationError::CycleViolation(_))
        ));
    }

    #[test]
    fn test_daily_cap_violation_detected() {
        // Two 8 h shifts with a legal 5 h gap would still sum to 16 h.
        let p = problem(vec![shift(0, 1, 0, 480), shift(1, 1, 800, 480)]);
        let r = roster_with_all(&p, day(1));
        assert!(RosterValidator::validate_daily_cap(&p, &r).is_err());
    }

    #[test]
    fn test_overlap_detected() {
        let p = problem(vec![shift(0, 1, 360, 480), shift(1, 1, 600, 240)]);
        let r = roster_with_all(&p, day(1));
        assert!(RosterValidator::validate_no_overlap(&p, &r).is_err());
    }

    #[test]
    fn test_same_day_rest_violation_detected() {
        // 04:00-08:30 and 12:30-16:30: a 4 h gap under the 5 h floor.
        let p = problem(vec![shift(0, 1, 240, 270), shift(1, 1, 750, 240)]);
        let r = roster_with_all(&p, day(1));
        let err = RosterValidator::validate_same_day_rest(&p, &r).unwrap_err();
        assert_eq!(err.gap().value(), 240);
    }

    #[test]
    fn test_same_day_rest_allows_five_hours() {
        let p = problem(vec![shift(0, 1, 240, 270), shift(1, 1, 810, 240)]);
        let r = roster_with_all(&p, day(1));
        assert!(RosterValidator::validate_same_day_rest(&p, &r).is_ok());
    }

    #[test]
    fn test_inter_day_rest_violation_detected() {
        // Ends 22:00, next day starts 06:00: 8 h rest, under the 10 h floor.
        let p = problem(vec![shift(0, 1, 840, 480), shift(1, 2, 360, 480)]);
        let r = roster_with_all(&p, day(1));
        let err = RosterValidator::validate_inter_day_rest(&p, &r).unwrap_err();
        assert_eq!(err.gap().value(), 480);
    }

    #[test]
    fn test_inter_day_rest_counts_cross_midnight_end() {
        // 19:30-00:45 then next day 08:00: gap is 7 h 15 min, a violation.
        let p = problem(vec![shift(0, 1, 1170, 315), shift(1, 2, 480, 240)]);
        let r = roster_with_all(&p, day(1));
        let err = RosterValidator::validate_inter_day_rest(&p, &r).unwrap_err();
        assert_eq!(err.gap().value(), 435);
    }

    #[test]
    fn test_inter_day_rest_allows_ten_hours() {
        // Ends 20:00, next day starts 06:00: exactly 10 h.
        let p = problem(vec![shift(0, 1, 720, 480), shift(1, 2, 360, 480)]);
        let r = roster_with_all(&p, day(1));
        assert!(RosterValidator::validate_inter_day_rest(&p, &r).is_ok());
    }

    #[test]
    fn test_non_adjacent_days_not_constrained() {
        let p = problem(vec![shift(0, 1, 840, 480), shift(1, 3, 0, 480)]);
        let r = roster_with_all(&p, day(1));
        assert!(RosterValidator::validate_inter_day_rest(&p, &r).is_ok());
    }
}
