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

use roster_core::prelude::{MINUTES_PER_DAY, Minutes};
use roster_model::common::ShiftId;
use roster_model::problem::prob::Problem;
use roster_model::problem::shift::Shift;
use std::collections::HashSet;

/// Precomputed pairwise incompatibility: for every shift, the set of shifts
/// that can never share a driver with it.
///
/// Symmetric, irreflexive, immutable once built. Membership is decided by
/// temporal rules alone: same-day overlap, a same-day gap under the rest
/// floor, a same-day pair busting the daily cap, or a consecutive-day gap
/// under the inter-day rest floor. Dates two or more days apart never
/// conflict.
#[derive(Debug, Clone)]
pub struct ConflictSets {
    sets: Vec<HashSet<ShiftId>>,
}

impl ConflictSets {
    /// Builds the sets by date bucketing: only same-day and adjacent-day
    /// pairs are ever examined, so the cost is O(K·S) for adjacency degree K.
    pub fn build(problem: &Problem) -> Self {
        let mut sets = vec![HashSet::new(); problem.len()];
        let rules = problem.rules();
        let dates: Vec<_> = problem.dates().collect();

        for (i, &date) in dates.iter().enumerate() {
            let today = problem.shifts_on(date);

            for (k, &a) in today.iter().enumerate() {
                for &b in &today[k + 1..] {
                    if same_day_conflict(
                        problem.shift(a),
                        problem.shift(b),
                        rules.min_same_day_rest(),
                        rules.max_daily(),
                    ) {
                        sets[a.index()].insert(b);
                        sets[b.index()].insert(a);
                    }
                }
            }

            if let Some(&next) = dates.get(i + 1)
                && (next - date).num_days() == 1
            {
                for &a in today {
                    for &b in problem.shifts_on(next) {
                        if adjacent_day_conflict(
                            problem.shift(a),
                            problem.shift(b),
                            rules.min_inter_day_rest(),
                        ) {
                            sets[a.index()].insert(b);
                            sets[b.index()].insert(a);
                        }
                    }
                }
            }
        }

        let built = Self { sets };
        tracing::debug!(
            shifts = built.sets.len(),
            average_degree = built.average_degree(),
            "conflict sets built"
        );
        built
    }

    #[inline]
    pub fn of(&self, id: ShiftId) -> &HashSet<ShiftId> {
        &self.sets[id.index()]
    }

    #[inline]
    pub fn are_conflicting(&self, a: ShiftId, b: ShiftId) -> bool {
        self.sets[a.index()].contains(&b)
    }

    /// Mean conflict-set size, reported as a build diagnostic.
    pub fn average_degree(&self) -> f64 {
        if self.sets.is_empty() {
            return 0.0;
        }
        let total: usize = self.sets.iter().map(HashSet::len).sum();
        total as f64 / self.sets.len() as f64
    }
}

fn same_day_conflict(a: &Shift, b: &Shift, rest_floor: Minutes, cap: Minutes) -> bool {
    if a.span().overlaps(&b.span()) {
        return true;
    }
    if a.duration() + b.duration() > cap {
        return true;
    }
    a.span().gap_to(&b.span()) < rest_floor
}

fn adjacent_day_conflict(earlier: &Shift, later: &Shift, rest_floor: Minutes) -> bool {
    debug_assert_eq!((later.date() - earlier.date()).num_days(), 1);
    let gap = (later.start() - earlier.end()) + Minutes::new(MINUTES_PER_DAY);
    gap < rest_floor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_core::prelude::MinuteOfDay;
    use roster_model::problem::regime::RegimeRules;
    use roster_model::problem::shift::ServiceType;

    fn shift(id: u32, day: u32, start: i32, duration: i32) -> Shift {
        Shift::new(
            ShiftId::new(id),
            "S1",
            None,
            ServiceType::Industrial,
            1,
            0,
            NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            MinuteOfDay::new(start),
            Minutes::new(duration),
            &RegimeRules::mining_faena(),
        )
        .unwrap()
    }

    fn build(shifts: Vec<Shift>) -> ConflictSets {
        ConflictSets::build(&Problem::new(shifts, RegimeRules::mining_faena()).unwrap())
    }

    #[test]
    fn test_overlapping_same_day_conflict() {
        let sets = build(vec![shift(0, 1, 360, 480), shift(1, 1, 600, 240)]);
        assert!(sets.are_conflicting(ShiftId::new(0), ShiftId::new(1)));
        assert!(sets.are_conflicting(ShiftId::new(1), ShiftId::new(0)));
    }

    #[test]
    fn test_short_same_day_gap_conflict() {
        // 04:00-08:30 then 12:30-16:30: 4 h gap under the 5 h floor.
        let sets = build(vec![shift(0, 1, 240, 270), shift(1, 1, 750, 240)]);
        assert!(sets.are_conflicting(ShiftId::new(0), ShiftId::new(1)));
    }

    #[test]
    fn test_legal_same_day_gap_no_conflict() {
        // 04:00-08:30 then 13:30-16:30: exactly 5 h apart.
        let sets = build(vec![shift(0, 1, 240, 270), shift(1, 1, 810, 180)]);
        assert!(!sets.are_conflicting(ShiftId::new(0), ShiftId::new(1)));
    }

    #[test]
    fn test_same_day_cap_busting_pair_conflicts() {
        // 8 h and 7 h with a legal gap still cannot share a driver's day.
        let sets = build(vec![shift(0, 1, 0, 480), shift(1, 1, 800, 420)]);
        assert!(sets.are_conflicting(ShiftId::new(0), ShiftId::new(1)));
    }

    #[test]
    fn test_adjacent_day_short_rest_conflict() {
        // Ends 22:00, next day starts 06:00: 8 h rest.
        let sets = build(vec![shift(0, 1, 840, 480), shift(1, 2, 360, 480)]);
        assert!(sets.are_conflicting(ShiftId::new(0), ShiftId::new(1)));
    }

    #[test]
    fn test_adjacent_day_ten_hours_no_conflict() {
        // Ends 20:00, next day starts 06:00: exactly 10 h.
        let sets = build(vec![shift(0, 1, 720, 480), shift(1, 2, 360, 480)]);
        assert!(!sets.are_conflicting(ShiftId::new(0), ShiftId::new(1)));
    }

    #[test]
    fn test_cross_midnight_end_tightens_adjacent_rest() {
        // 19:30-00:45 then next day 08:00: only 7 h 15 min of rest.
        let sets = build(vec![shift(0, 1, 1170, 315), shift(1, 2, 480, 240)]);
        assert!(sets.are_conflicting(ShiftId::new(0), ShiftId::new(1)));
    }

    #[test]
    fn test_two_days_apart_never_conflict() {
        let sets = build(vec![shift(0, 1, 840, 480), shift(1, 3, 0, 480)]);
        assert!(!sets.are_conflicting(ShiftId::new(0), ShiftId::new(1)));
        assert_eq!(sets.average_degree(), 0.0);
    }

    #[test]
    fn test_never_self_conflicting() {
        let sets = build(vec![shift(0, 1, 360, 480)]);
        assert!(sets.of(ShiftId::new(0)).is_empty());
    }
}
