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

use num_traits::Zero;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

pub const MINUTES_PER_DAY: i32 = 1440;

/// A signed duration in minutes.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Minutes(i32);

impl Minutes {
    #[inline]
    pub const fn new(value: i32) -> Self {
        Minutes(value)
    }

    #[inline]
    pub const fn from_hours(hours: i32) -> Self {
        Minutes(hours * 60)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn zero() -> Self {
        Minutes(0)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Minutes) -> Option<Minutes> {
        self.0.checked_add(rhs.0).map(Minutes)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Minutes) -> Option<Minutes> {
        self.0.checked_sub(rhs.0).map(Minutes)
    }

    #[inline]
    pub fn abs(self) -> Minutes {
        Minutes(self.0.abs())
    }

    #[inline]
    pub fn as_hours_f64(self) -> f64 {
        f64::from(self.0) / 60.0
    }
}

impl Add for Minutes {
    type Output = Minutes;

    #[inline]
    fn add(self, rhs: Minutes) -> Minutes {
        Minutes(self.0.checked_add(rhs.0).expect("error in Minutes + Minutes"))
    }
}

impl AddAssign for Minutes {
    #[inline]
    fn add_assign(&mut self, rhs: Minutes) {
        *self = *self + rhs;
    }
}

impl Sub for Minutes {
    type Output = Minutes;

    #[inline]
    fn sub(self, rhs: Minutes) -> Minutes {
        Minutes(self.0.checked_sub(rhs.0).expect("error in Minutes - Minutes"))
    }
}

impl SubAssign for Minutes {
    #[inline]
    fn sub_assign(&mut self, rhs: Minutes) {
        *self = *self - rhs;
    }
}

impl Neg for Minutes {
    type Output = Minutes;

    #[inline]
    fn neg(self) -> Minutes {
        Minutes(-self.0)
    }
}

impl Sum for Minutes {
    fn sum<I: Iterator<Item = Minutes>>(iter: I) -> Minutes {
        iter.fold(Minutes::zero(), Add::add)
    }
}

impl Zero for Minutes {
    #[inline]
    fn zero() -> Self {
        Minutes(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Minutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}min", self.0)
    }
}

/// A point on the minute axis of one calendar day.
///
/// Values in `[0, 1440)` are clock times; a point may exceed 1440 when a
/// span that started before midnight runs into the next day. The owning
/// calendar date stays implicit; cross-day arithmetic shifts points by
/// whole multiples of [`MINUTES_PER_DAY`].
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinuteOfDay(i32);

impl MinuteOfDay {
    #[inline]
    pub const fn new(value: i32) -> Self {
        MinuteOfDay(value)
    }

    #[inline]
    pub const fn midnight() -> Self {
        MinuteOfDay(0)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether the point is a plain clock time on its own day.
    #[inline]
    pub fn is_on_clock(self) -> bool {
        (0..MINUTES_PER_DAY).contains(&self.0)
    }

    #[inline]
    pub fn checked_add(self, d: Minutes) -> Option<MinuteOfDay> {
        self.0.checked_add(d.value()).map(MinuteOfDay)
    }

    #[inline]
    pub fn checked_sub(self, d: Minutes) -> Option<MinuteOfDay> {
        self.0.checked_sub(d.value()).map(MinuteOfDay)
    }

    /// The same instant expressed on the axis of a day `days` later.
    #[inline]
    pub fn on_day_axis(self, days: i32) -> MinuteOfDay {
        MinuteOfDay(self.0 - days * MINUTES_PER_DAY)
    }
}

impl Add<Minutes> for MinuteOfDay {
    type Output = MinuteOfDay;

    #[inline]
    fn add(self, rhs: Minutes) -> MinuteOfDay {
        self.checked_add(rhs).expect("error in MinuteOfDay + Minutes")
    }
}

impl Sub<Minutes> for MinuteOfDay {
    type Output = MinuteOfDay;

    #[inline]
    fn sub(self, rhs: Minutes) -> MinuteOfDay {
        self.checked_sub(rhs).expect("error in MinuteOfDay - Minutes")
    }
}

impl Sub for MinuteOfDay {
    type Output = Minutes;

    #[inline]
    fn sub(self, rhs: MinuteOfDay) -> Minutes {
        Minutes::new(
            self.0
                .checked_sub(rhs.0)
                .expect("error in MinuteOfDay - MinuteOfDay"),
        )
    }
}

impl std::fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 < 0 {
            return write!(f, "MinuteOfDay({})", self.0);
        }
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_arithmetic() {
        let a = Minutes::new(90);
        let b = Minutes::from_hours(2);
        assert_eq!((a + b).value(), 210);
        assert_eq!((b - a).value(), 30);
        assert_eq!((-a).value(), -90);
        assert_eq!(a.abs(), a);
        assert_eq!((-a).abs(), a);
    }

    #[test]
    fn test_minutes_sum() {
        let total: Minutes = [Minutes::new(10), Minutes::new(20), Minutes::new(30)]
            .into_iter()
            .sum();
        assert_eq!(total.value(), 60);
    }

    #[test]
    fn test_minutes_as_hours() {
        assert_eq!(Minutes::new(90).as_hours_f64(), 1.5);
    }

    #[test]
    fn test_minute_of_day_clock_range() {
        assert!(MinuteOfDay::new(0).is_on_clock());
        assert!(MinuteOfDay::new(1439).is_on_clock());
        assert!(!MinuteOfDay::new(1440).is_on_clock());
        assert!(!MinuteOfDay::new(-1).is_on_clock());
    }

    #[test]
    fn test_minute_of_day_difference() {
        let start = MinuteOfDay::new(360);
        let end = MinuteOfDay::new(845);
        assert_eq!((end - start).value(), 485);
        assert_eq!(start + Minutes::new(485), end);
    }

    #[test]
    fn test_day_axis_shift() {
        // 00:45 on day D+1 is minute 1485 on day D's axis.
        let spill = MinuteOfDay::new(1485);
        assert_eq!(spill.on_day_axis(1), MinuteOfDay::new(45));
        assert_eq!(MinuteOfDay::new(45).on_day_axis(-1), spill);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(MinuteOfDay::new(390).to_string(), "06:30");
        assert_eq!(MinuteOfDay::new(1485).to_string(), "24:45");
        assert_eq!(Minutes::new(75).to_string(), "75min");
    }
}
