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

use roster_core::prelude::{MinuteOfDay, Minutes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidCycleError {
    value: u8,
}

impl InvalidCycleError {
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

impl std::fmt::Display for InvalidCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cycle length {} is not supported (expected 7, 10 or 14)",
            self.value
        )
    }
}

impl std::error::Error for InvalidCycleError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseTimeError {
    input: String,
}

impl ParseTimeError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl std::fmt::Display for ParseTimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot parse '{}' as an HH:MM clock time", self.input)
    }
}

impl std::error::Error for ParseTimeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonPositiveDurationError {
    duration: Minutes,
}

impl NonPositiveDurationError {
    pub fn new(duration: Minutes) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Minutes {
        self.duration
    }
}

impl std::fmt::Display for NonPositiveDurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shift duration {} is not positive", self.duration)
    }
}

impl std::error::Error for NonPositiveDurationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartOutOfRangeError {
    start: MinuteOfDay,
}

impl StartOutOfRangeError {
    pub fn new(start: MinuteOfDay) -> Self {
        Self { start }
    }

    pub fn start(&self) -> MinuteOfDay {
        self.start
    }
}

impl std::fmt::Display for StartOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shift start {} lies outside the clock range [00:00, 24:00)",
            self.start
        )
    }
}

impl std::error::Error for StartOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DurationExceedsDailyCapError {
    duration: Minutes,
    max_daily: Minutes,
}

impl DurationExceedsDailyCapError {
    pub fn new(duration: Minutes, max_daily: Minutes) -> Self {
        Self { duration, max_daily }
    }

    pub fn duration(&self) -> Minutes {
        self.duration
    }

    pub fn max_daily(&self) -> Minutes {
        self.max_daily
    }
}

impl std::fmt::Display for DurationExceedsDailyCapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shift duration {} exceeds the daily cap of {}",
            self.duration, self.max_daily
        )
    }
}

impl std::error::Error for DurationExceedsDailyCapError {}

/// A single shift that violates a hard limit on its own. Fatal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvalidShiftError {
    NonPositiveDuration(NonPositiveDurationError),
    StartOutOfRange(StartOutOfRangeError),
    ExceedsDailyCap(DurationExceedsDailyCapError),
}

impl std::fmt::Display for InvalidShiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidShiftError::NonPositiveDuration(e) => write!(f, "{}", e),
            InvalidShiftError::StartOutOfRange(e) => write!(f, "{}", e),
            InvalidShiftError::ExceedsDailyCap(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InvalidShiftError {}

impl From<NonPositiveDurationError> for InvalidShiftError {
    fn from(err: NonPositiveDurationError) -> Self {
        InvalidShiftError::NonPositiveDuration(err)
    }
}

impl From<StartOutOfRangeError> for InvalidShiftError {
    fn from(err: StartOutOfRangeError) -> Self {
        InvalidShiftError::StartOutOfRange(err)
    }
}

impl From<DurationExceedsDailyCapError> for InvalidShiftError {
    fn from(err: DurationExceedsDailyCapError) -> Self {
        InvalidShiftError::ExceedsDailyCap(err)
    }
}

/// The template/dated mode detector found a mix of both kinds. Fatal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpansionAmbiguityError {
    service: String,
    spec_index: usize,
}

impl ExpansionAmbiguityError {
    pub fn new(service: impl Into<String>, spec_index: usize) -> Self {
        Self {
            service: service.into(),
            spec_index,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn spec_index(&self) -> usize {
        self.spec_index
    }
}

impl std::fmt::Display for ExpansionAmbiguityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shift specification {} of service '{}' mixes dated and template kinds",
            self.spec_index, self.service
        )
    }
}

impl std::error::Error for ExpansionAmbiguityError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidMonthError {
    year: i32,
    month: u32,
}

impl InvalidMonthError {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl std::fmt::Display for InvalidMonthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02} is not a valid calendar month", self.year, self.month)
    }
}

impl std::error::Error for InvalidMonthError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpandError {
    InvalidShift(InvalidShiftError),
    Ambiguous(ExpansionAmbiguityError),
    InvalidMonth(InvalidMonthError),
}

impl std::fmt::Display for ExpandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpandError::InvalidShift(e) => write!(f, "{}", e),
            ExpandError::Ambiguous(e) => write!(f, "{}", e),
            ExpandError::InvalidMonth(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExpandError {}

impl From<InvalidShiftError> for ExpandError {
    fn from(err: InvalidShiftError) -> Self {
        ExpandError::InvalidShift(err)
    }
}

impl From<ExpansionAmbiguityError> for ExpandError {
    fn from(err: ExpansionAmbiguityError) -> Self {
        ExpandError::Ambiguous(err)
    }
}

impl From<InvalidMonthError> for ExpandError {
    fn from(err: InvalidMonthError) -> Self {
        ExpandError::InvalidMonth(err)
    }
}

/// The shift arena handed to [`crate::problem::prob::Problem::new`] must be
/// densely indexed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonDenseShiftIdsError {
    position: usize,
}

impl NonDenseShiftIdsError {
    pub fn new(position: usize) -> Self {
        Self { position }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl std::fmt::Display for NonDenseShiftIdsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shift at position {} does not carry id {}; ids must be dense and in order",
            self.position, self.position
        )
    }
}

impl std::error::Error for NonDenseShiftIdsError {}
