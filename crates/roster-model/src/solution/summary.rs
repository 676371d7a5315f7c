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

use crate::problem::prob::Problem;
use crate::solution::roster::Roster;
use chrono::{Datelike, Weekday};
use serde::Serialize;

/// Monthly hours ceiling used for the utilization figure.
const UTILIZATION_CEILING_MINUTES: f64 = 180.0 * 60.0;

/// One assignment in the caller-facing output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRow {
    pub driver_id: u32,
    pub shift_id: u32,
    pub service: String,
    pub shift_number: u16,
    pub vehicle: u16,
    pub date: String,
    pub start: String,
    pub end: String,
    pub duration_minutes: i32,
    pub cycle: u8,
}

/// Per-driver aggregates in the caller-facing output contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSummary {
    pub driver_id: u32,
    pub cycle: u8,
    pub work_start_date: String,
    pub total_minutes: i32,
    pub total_shifts: usize,
    pub days_worked: usize,
    pub sundays_worked: usize,
    pub utilization_pct: f64,
}

/// Flattens a roster into assignment rows, ordered by (date, start, shift id).
pub fn assignment_rows(problem: &Problem, roster: &Roster) -> Vec<AssignmentRow> {
    let mut rows: Vec<AssignmentRow> = roster
        .assignments()
        .map(|(shift_id, driver_id)| {
            let shift = problem.shift(shift_id);
            let cycle = roster
                .driver(driver_id)
                .map(|d| d.cycle().length())
                .unwrap_or_default();
            AssignmentRow {
                driver_id: *driver_id.value(),
                shift_id: *shift_id.value(),
                service: shift.service().to_owned(),
                shift_number: shift.number(),
                vehicle: shift.vehicle(),
                date: shift.date().to_string(),
                start: shift.start().to_string(),
                end: shift.end().to_string(),
                duration_minutes: shift.duration().value(),
                cycle,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        (&a.date, &a.start, a.shift_id).cmp(&(&b.date, &b.start, b.shift_id))
    });
    rows
}

/// Per-driver summaries in ascending driver-id order.
pub fn driver_summaries(problem: &Problem, roster: &Roster) -> Vec<DriverSummary> {
    roster
        .drivers()
        .map(|driver| {
            let sundays = driver
                .shift_ids()
                .map(|id| problem.shift(id).date())
                .filter(|d| d.weekday() == Weekday::Sun)
                .collect::<std::collections::BTreeSet<_>>()
                .len();
            let total = driver.total_minutes().value();
            DriverSummary {
                driver_id: *driver.id().value(),
                cycle: driver.cycle().length(),
                work_start_date: driver.work_start_date().to_string(),
                total_minutes: total,
                total_shifts: driver.shift_count(),
                days_worked: driver.days_worked(),
                sundays_worked: sundays,
                utilization_pct: (f64::from(total) / UTILIZATION_CEILING_MINUTES * 100.0 * 10.0)
                    .round()
                    / 10.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ShiftId;
    use crate::problem::regime::{Cycle, RegimeRules};
    use crate::problem::shift::{ServiceType, Shift};
    use chrono::NaiveDate;
    use roster_core::prelude::{MinuteOfDay, Minutes};

    fn problem() -> Problem {
        let rules = RegimeRules::mining_faena();
        let shifts = vec![
            // 2025-02-02 is a Sunday.
            Shift::new(
                ShiftId::new(0),
                "S1",
                None,
                ServiceType::Industrial,
                1,
                0,
                NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
                MinuteOfDay::new(360),
                Minutes::new(480),
                &rules,
            )
            .unwrap(),
            Shift::new(
                ShiftId::new(1),
                "S1",
                None,
                ServiceType::Industrial,
                2,
                0,
                NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
                MinuteOfDay::new(360),
                Minutes::new(480),
                &rules,
            )
            .unwrap(),
        ];
        Problem::new(shifts, rules).unwrap()
    }

    #[test]
    fn test_rows_ordered_and_complete() {
        let problem = problem();
        let mut roster = Roster::new();
        let d = roster.spawn_driver(Cycle::SEVEN, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        roster.assign(&problem.shifts()[1], d).unwrap();
        roster.assign(&problem.shifts()[0], d).unwrap();

        let rows = assignment_rows(&problem, &roster);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].shift_id, 0);
        assert_eq!(rows[0].date, "2025-02-02");
        assert_eq!(rows[0].start, "06:00");
        assert_eq!(rows[0].end, "14:00");
        assert_eq!(rows[1].shift_id, 1);
    }

    #[test]
    fn test_driver_summary_counts_sundays() {
        let problem = problem();
        let mut roster = Roster::new();
        let d = roster.spawn_driver(Cycle::SEVEN, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        for s in problem.shifts() {
            roster.assign(s, d).unwrap();
        }

        let summaries = driver_summaries(&problem, &roster);
        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.total_shifts, 2);
        assert_eq!(s.days_worked, 2);
        assert_eq!(s.sundays_worked, 1);
        assert_eq!(s.total_minutes, 960);
        assert!((s.utilization_pct - 8.9).abs() < 1e-9);
    }
}
