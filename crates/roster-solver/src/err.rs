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

use chrono::NaiveDate;
use roster_core::prelude::MinuteSpan;
use roster_model::common::{DriverId, ShiftId};

/// A shift could not be placed even on a fresh driver. Indicates broken
/// input data; fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnreachableShiftError {
    shift: ShiftId,
}

impl UnreachableShiftError {
    pub fn new(shift: ShiftId) -> Self {
        Self { shift }
    }

    pub fn shift(&self) -> ShiftId {
        self.shift
    }
}

impl std::fmt::Display for UnreachableShiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shift {} cannot be hosted even by a fresh driver",
            self.shift
        )
    }
}

impl std::error::Error for UnreachableShiftError {}

/// An occupy call hit minutes that are already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotFreeError {
    driver: DriverId,
    date: NaiveDate,
    span: MinuteSpan,
}

impl NotFreeError {
    pub fn new(driver: DriverId, date: NaiveDate, span: MinuteSpan) -> Self {
        Self { driver, date, span }
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn span(&self) -> MinuteSpan {
        self.span
    }
}

impl std::fmt::Display for NotFreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Driver {} already occupies part of {} on {}",
            self.driver, self.span, self.date
        )
    }
}

impl std::error::Error for NotFreeError {}
