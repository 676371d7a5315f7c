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
use crate::problem::err::{
    DurationExceedsDailyCapError, InvalidShiftError, NonPositiveDurationError,
    StartOutOfRangeError,
};
use crate::problem::regime::RegimeRules;
use chrono::NaiveDate;
use roster_core::prelude::{MinuteOfDay, MinuteSpan, Minutes};

/// Kind tag of the service a shift originates from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ServiceType {
    #[default]
    Industrial,
    Interurban,
    Urban,
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceType::Industrial => write!(f, "Industrial"),
            ServiceType::Interurban => write!(f, "Interurban"),
            ServiceType::Urban => write!(f, "Urban"),
        }
    }
}

/// One dated, concrete shift instance. Created once by the expander and
/// read-only afterwards; carries no reference back to any driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    id: ShiftId,
    service: String,
    group: Option<String>,
    service_type: ServiceType,
    number: u16,
    vehicle: u16,
    date: NaiveDate,
    span: MinuteSpan,
}

impl Shift {
    /// Builds a validated shift. The start must be a clock time of its date;
    /// the end is `start + duration` and may run past midnight.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ShiftId,
        service: impl Into<String>,
        group: Option<String>,
        service_type: ServiceType,
        number: u16,
        vehicle: u16,
        date: NaiveDate,
        start: MinuteOfDay,
        duration: Minutes,
        rules: &RegimeRules,
    ) -> Result<Self, InvalidShiftError> {
        if duration.value() <= 0 {
            return Err(NonPositiveDurationError::new(duration).into());
        }
        if !start.is_on_clock() {
            return Err(StartOutOfRangeError::new(start).into());
        }
        if duration > rules.max_daily() {
            return Err(DurationExceedsDailyCapError::new(duration, rules.max_daily()).into());
        }

        Ok(Self {
            id,
            service: service.into(),
            group,
            service_type,
            number,
            vehicle,
            date,
            span: MinuteSpan::new(start, start + duration),
        })
    }

    #[inline]
    pub fn id(&self) -> ShiftId {
        self.id
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[inline]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    #[inline]
    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    #[inline]
    pub fn number(&self) -> u16 {
        self.number
    }

    #[inline]
    pub fn vehicle(&self) -> u16 {
        self.vehicle
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The occupied `[start, end)` span on the axis of `date`.
    #[inline]
    pub fn span(&self) -> MinuteSpan {
        self.span
    }

    #[inline]
    pub fn start(&self) -> MinuteOfDay {
        self.span.start()
    }

    #[inline]
    pub fn end(&self) -> MinuteOfDay {
        self.span.end()
    }

    #[inline]
    pub fn duration(&self) -> Minutes {
        self.span.duration()
    }

    /// Whether the shift runs past midnight into the following date.
    #[inline]
    pub fn crosses_midnight(&self) -> bool {
        !self.span.end().is_on_clock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RegimeRules {
        RegimeRules::mining_faena()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
    }

    fn make(start: i32, duration: i32) -> Result<Shift, InvalidShiftError> {
        Shift::new(
            ShiftId::new(0),
            "S1",
            None,
            ServiceType::Industrial,
            1,
            0,
            date(),
            MinuteOfDay::new(start),
            Minutes::new(duration),
            &rules(),
        )
    }

    #[test]
    fn test_valid_shift() {
        let s = make(360, 480).unwrap();
        assert_eq!(s.start().value(), 360);
        assert_eq!(s.end().value(), 840);
        assert_eq!(s.duration().value(), 480);
        assert!(!s.crosses_midnight());
    }

    #[test]
    fn test_cross_midnight_end_exceeds_1440() {
        let s = make(1170, 315).unwrap();
        assert_eq!(s.end().value(), 1485);
        assert!(s.crosses_midnight());
        assert_eq!(s.date(), date());
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        assert!(matches!(
            make(360, 0),
            Err(InvalidShiftError::NonPositiveDuration(_))
        ));
        assert!(matches!(
            make(360, -30),
            Err(InvalidShiftError::NonPositiveDuration(_))
        ));
    }

    #[test]
    fn test_rejects_start_off_clock() {
        assert!(matches!(
            make(1440, 60),
            Err(InvalidShiftError::StartOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_duration_over_daily_cap() {
        assert!(matches!(
            make(0, 841),
            Err(InvalidShiftError::ExceedsDailyCap(_))
        ));
        assert!(make(0, 840).is_ok());
    }
}
