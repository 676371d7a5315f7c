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
use chrono::NaiveDate;
use roster_core::prelude::Minutes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UncoveredShiftError {
    shift: ShiftId,
}

impl UncoveredShiftError {
    pub fn new(shift: ShiftId) -> Self {
        Self { shift }
    }

    pub fn shift(&self) -> ShiftId {
        self.shift
    }
}

impl std::fmt::Display for UncoveredShiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shift {} is not covered by any assignment", self.shift)
    }
}

impl std::error::Error for UncoveredShiftError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleViolationError {
    driver: DriverId,
    shift: ShiftId,
    date: NaiveDate,
    day_in_cycle: i64,
}

impl CycleViolationError {
    pub fn new(driver: DriverId, shift: ShiftId, date: NaiveDate, day_in_cycle: i64) -> Self {
        Self {
            driver,
            shift,
            date,
            day_in_cycle,
        }
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }

    pub fn shift(&self) -> ShiftId {
        self.shift
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day_in_cycle(&self) -> i64 {
        self.day_in_cycle
    }
}

impl std::fmt::Display for CycleViolationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Driver {} works shift {} on {} which is rest day {} of its cycle",
            self.driver, self.shift, self.date, self.day_in_cycle
        )
    }
}

impl std::error::Error for CycleViolationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DailyCapExceededError {
    driver: DriverId,
    date: NaiveDate,
    total: Minutes,
    cap: Minutes,
}

impl DailyCapExceededError {
    pub fn new(driver: DriverId, date: NaiveDate, total: Minutes, cap: Minutes) -> Self {
        Self {
            driver,
            date,
            total,
            cap,
        }
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn total(&self) -> Minutes {
        self.total
    }

    pub fn cap(&self) -> Minutes {
        self.cap
    }
}

impl std::fmt::Display for DailyCapExceededError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Driver {} works {} on {} exceeding the daily cap of {}",
            self.driver, self.total, self.date, self.cap
        )
    }
}

impl std::error::Error for DailyCapExceededError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestViolationError {
    driver: DriverId,
    first: ShiftId,
    second: ShiftId,
    gap: Minutes,
    floor: Minutes,
}

impl RestViolationError {
    pub fn new(
        driver: DriverId,
        first: ShiftId,
        second: ShiftId,
        gap: Minutes,
        floor: Minutes,
    ) -> Self {
        Self {
            driver,
            first,
            second,
            gap,
            floor,
        }
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }

    pub fn first(&self) -> ShiftId {
        self.first
    }

    pub fn second(&self) -> ShiftId {
        self.second
    }

    pub fn gap(&self) -> Minutes {
        self.gap
    }

    pub fn floor(&self) -> Minutes {
        self.floor
    }
}

impl std::fmt::Display for RestViolationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Driver {} rests only {} between shifts {} and {} (floor {})",
            self.driver, self.gap, self.first, self.second, self.floor
        )
    }
}

impl std::error::Error for RestViolationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlapViolationError {
    driver: DriverId,
    first: ShiftId,
    second: ShiftId,
}

impl OverlapViolationError {
    pub fn new(driver: DriverId, first: ShiftId, second: ShiftId) -> Self {
        Self {
            driver,
            first,
            second,
        }
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }

    pub fn first(&self) -> ShiftId {
        self.first
    }

    pub fn second(&self) -> ShiftId {
        self.second
    }
}

impl std::fmt::Display for OverlapViolationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Driver {} carries overlapping shifts {} and {}",
            self.driver, self.first, self.second
        )
    }
}

impl std::error::Error for OverlapViolationError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationError {
    Uncovered(UncoveredShiftError),
    CycleViolation(CycleViolationError),
    DailyCapExceeded(DailyCapExceededError),
    SameDayRest(RestViolationError),
    InterDayRest(RestViolationError),
    Overlap(OverlapViolationError),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Uncovered(e) => write!(f, "{}", e),
            ValidationError::CycleViolation(e) => write!(f, "{}", e),
            ValidationError::DailyCapExceeded(e) => write!(f, "{}", e),
            ValidationError::SameDayRest(e) => write!(f, "{}", e),
            ValidationError::InterDayRest(e) => write!(f, "{}", e),
            ValidationError::Overlap(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<UncoveredShiftError> for ValidationError {
    fn from(err: UncoveredShiftError) -> Self {
        ValidationError::Uncovered(err)
    }
}

impl From<CycleViolationError> for ValidationError {
    fn from(err: CycleViolationError) -> Self {
        ValidationError::CycleViolation(err)
    }
}

impl From<DailyCapExceededError> for ValidationError {
    fn from(err: DailyCapExceededError) -> Self {
        ValidationError::DailyCapExceeded(err)
    }
}

impl From<OverlapViolationError> for ValidationError {
    fn from(err: OverlapViolationError) -> Self {
        ValidationError::Overlap(err)
    }
}
