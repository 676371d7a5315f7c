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

use crate::problem::err::InvalidCycleError;
use chrono::NaiveDate;
use roster_core::prelude::Minutes;

/// Length `N` of an N-on/N-off work pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cycle(u8);

impl Cycle {
    pub const SEVEN: Cycle = Cycle(7);
    pub const TEN: Cycle = Cycle(10);
    pub const FOURTEEN: Cycle = Cycle(14);

    #[inline]
    pub fn try_new(n: u8) -> Result<Self, InvalidCycleError> {
        match n {
            7 | 10 | 14 => Ok(Cycle(n)),
            _ => Err(InvalidCycleError::new(n)),
        }
    }

    #[inline]
    pub const fn length(self) -> u8 {
        self.0
    }

    /// Length of the full on/off period, `2N`.
    #[inline]
    pub const fn full_period(self) -> u8 {
        self.0 * 2
    }

    /// Day index of `date` within the period anchored at `work_start`, in `[0, 2N)`.
    #[inline]
    pub fn day_in_cycle(self, work_start: NaiveDate, date: NaiveDate) -> i64 {
        let days = (date - work_start).num_days();
        days.rem_euclid(i64::from(self.full_period()))
    }

    /// Whether `date` falls in the work half of the period anchored at `work_start`.
    #[inline]
    pub fn is_work_day(self, work_start: NaiveDate, date: NaiveDate) -> bool {
        self.day_in_cycle(work_start, date) < i64::from(self.0)
    }
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// The immutable rule set of one labor regime, threaded through the call
/// graph instead of living as scattered constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegimeRules {
    cycle: Cycle,
    max_daily: Minutes,
    min_same_day_rest: Minutes,
    min_inter_day_rest: Minutes,
}

impl RegimeRules {
    /// The mining-site regime: 7x7 cycles, 14 h daily cap, 5 h rest between
    /// same-day shifts, 10 h rest across consecutive days.
    #[inline]
    pub fn mining_faena() -> Self {
        Self {
            cycle: Cycle::SEVEN,
            max_daily: Minutes::from_hours(14),
            min_same_day_rest: Minutes::from_hours(5),
            min_inter_day_rest: Minutes::from_hours(10),
        }
    }

    #[inline]
    pub fn with_cycle(mut self, cycle: Cycle) -> Self {
        self.cycle = cycle;
        self
    }

    #[inline]
    pub fn with_max_daily(mut self, max_daily: Minutes) -> Self {
        self.max_daily = max_daily;
        self
    }

    #[inline]
    pub fn with_same_day_rest(mut self, floor: Minutes) -> Self {
        self.min_same_day_rest = floor;
        self
    }

    #[inline]
    pub fn with_inter_day_rest(mut self, floor: Minutes) -> Self {
        self.min_inter_day_rest = floor;
        self
    }

    #[inline]
    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    #[inline]
    pub fn max_daily(&self) -> Minutes {
        self.max_daily
    }

    #[inline]
    pub fn min_same_day_rest(&self) -> Minutes {
        self.min_same_day_rest
    }

    #[inline]
    pub fn min_inter_day_rest(&self) -> Minutes {
        self.min_inter_day_rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    #[test]
    fn test_cycle_rejects_unknown_lengths() {
        assert!(Cycle::try_new(7).is_ok());
        assert!(Cycle::try_new(10).is_ok());
        assert!(Cycle::try_new(14).is_ok());
        assert!(Cycle::try_new(5).is_err());
        assert!(Cycle::try_new(0).is_err());
    }

    #[test]
    fn test_day_in_cycle_wraps() {
        let c = Cycle::SEVEN;
        let anchor = day(1);
        assert_eq!(c.day_in_cycle(anchor, day(1)), 0);
        assert_eq!(c.day_in_cycle(anchor, day(7)), 6);
        assert_eq!(c.day_in_cycle(anchor, day(8)), 7);
        assert_eq!(c.day_in_cycle(anchor, day(15)), 0);
    }

    #[test]
    fn test_work_half_of_period() {
        let c = Cycle::SEVEN;
        let anchor = day(1);
        for d in 1..=7 {
            assert!(c.is_work_day(anchor, day(d)));
        }
        for d in 8..=14 {
            assert!(!c.is_work_day(anchor, day(d)));
        }
        assert!(c.is_work_day(anchor, day(15)));
    }

    #[test]
    fn test_dates_before_anchor() {
        // A date before the anchor still lands in a well-defined period.
        let c = Cycle::SEVEN;
        let anchor = day(15);
        assert_eq!(c.day_in_cycle(anchor, day(14)), 13);
        assert!(!c.is_work_day(anchor, day(14)));
        assert!(c.is_work_day(anchor, day(1)));
    }

    #[test]
    fn test_mining_faena_preset() {
        let rules = RegimeRules::mining_faena();
        assert_eq!(rules.cycle(), Cycle::SEVEN);
        assert_eq!(rules.max_daily().value(), 840);
        assert_eq!(rules.min_same_day_rest().value(), 300);
        assert_eq!(rules.min_inter_day_rest().value(), 600);
    }

    #[test]
    fn test_builder_overrides() {
        let rules = RegimeRules::mining_faena()
            .with_cycle(Cycle::TEN)
            .with_max_daily(Minutes::from_hours(12))
            .with_same_day_rest(Minutes::from_hours(4))
            .with_inter_day_rest(Minutes::from_hours(11));
        assert_eq!(rules.cycle(), Cycle::TEN);
        assert_eq!(rules.max_daily().value(), 720);
        assert_eq!(rules.min_same_day_rest().value(), 240);
        assert_eq!(rules.min_inter_day_rest().value(), 660);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cycle::TEN.to_string(), "10x10");
    }
}
