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

use crate::problem::err::ParseTimeError;
use crate::problem::shift::ServiceType;
use chrono::{NaiveDate, Weekday};
use roster_core::prelude::{MinuteOfDay, Minutes};

/// Parses an `HH:MM` 24-hour clock string into a minute of day.
pub fn parse_hhmm(input: &str) -> Result<MinuteOfDay, ParseTimeError> {
    let (h, m) = input
        .split_once(':')
        .ok_or_else(|| ParseTimeError::new(input))?;
    let hours: i32 = h.parse().map_err(|_| ParseTimeError::new(input))?;
    let minutes: i32 = m.parse().map_err(|_| ParseTimeError::new(input))?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(ParseTimeError::new(input));
    }
    Ok(MinuteOfDay::new(hours * 60 + minutes))
}

/// Converts a positive duration in fractional hours to whole minutes.
#[inline]
pub fn minutes_from_hours(hours: f64) -> Minutes {
    Minutes::new((hours * 60.0).round() as i32)
}

/// The set of weekdays a templated service operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frequency(u8);

impl Frequency {
    #[inline]
    pub fn daily() -> Self {
        Frequency(0b0111_1111)
    }

    /// Monday through Friday.
    #[inline]
    pub fn weekdays() -> Self {
        Frequency(0b0001_1111)
    }

    /// Monday through Saturday.
    #[inline]
    pub fn weekdays_and_saturday() -> Self {
        Frequency(0b0011_1111)
    }

    /// Saturday and Sunday.
    #[inline]
    pub fn weekend() -> Self {
        Frequency(0b0110_0000)
    }

    #[inline]
    pub fn from_days(days: &[Weekday]) -> Self {
        let mut mask = 0u8;
        for d in days {
            mask |= 1 << d.num_days_from_monday();
        }
        Frequency(mask)
    }

    #[inline]
    pub fn matches(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    #[inline]
    pub fn day_count(&self) -> u32 {
        self.0.count_ones()
    }
}

/// One shift specification of a service record: either a template (no date,
/// repeated per matching weekday) or a concrete dated instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSpec {
    date: Option<NaiveDate>,
    number: u16,
    start: MinuteOfDay,
    duration: Minutes,
}

impl ShiftSpec {
    #[inline]
    pub fn template(number: u16, start: MinuteOfDay, duration: Minutes) -> Self {
        Self {
            date: None,
            number,
            start,
            duration,
        }
    }

    #[inline]
    pub fn dated(date: NaiveDate, number: u16, start: MinuteOfDay, duration: Minutes) -> Self {
        Self {
            date: Some(date),
            number,
            start,
            duration,
        }
    }

    #[inline]
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    #[inline]
    pub fn is_dated(&self) -> bool {
        self.date.is_some()
    }

    #[inline]
    pub fn number(&self) -> u16 {
        self.number
    }

    #[inline]
    pub fn start(&self) -> MinuteOfDay {
        self.start
    }

    #[inline]
    pub fn duration(&self) -> Minutes {
        self.duration
    }
}

/// A service as handed over by the upstream reader: identity, optional
/// site group, vehicle count and its shift specifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    id: String,
    group: Option<String>,
    service_type: ServiceType,
    vehicles: u16,
    frequency: Frequency,
    shifts: Vec<ShiftSpec>,
}

impl ServiceRecord {
    pub fn new(
        id: impl Into<String>,
        group: Option<String>,
        service_type: ServiceType,
        vehicles: u16,
        frequency: Frequency,
        shifts: Vec<ShiftSpec>,
    ) -> Self {
        Self {
            id: id.into(),
            group,
            service_type,
            vehicles: vehicles.max(1),
            frequency,
            shifts,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
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
    pub fn vehicles(&self) -> u16 {
        self.vehicles
    }

    #[inline]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    #[inline]
    pub fn shifts(&self) -> &[ShiftSpec] {
        &self.shifts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("06:30").unwrap().value(), 390);
        assert_eq!(parse_hhmm("00:00").unwrap().value(), 0);
        assert_eq!(parse_hhmm("23:59").unwrap().value(), 1439);
    }

    #[test]
    fn test_parse_hhmm_rejects_garbage() {
        assert!(parse_hhmm("24:00").is_err());
        assert!(parse_hhmm("12:60").is_err());
        assert!(parse_hhmm("noon").is_err());
        assert!(parse_hhmm("7h30").is_err());
        assert!(parse_hhmm("-1:30").is_err());
    }

    #[test]
    fn test_minutes_from_hours_rounds() {
        assert_eq!(minutes_from_hours(8.0).value(), 480);
        assert_eq!(minutes_from_hours(9.75).value(), 585);
        assert_eq!(minutes_from_hours(8.505).value(), 510);
    }

    #[test]
    fn test_frequency_weekdays() {
        let f = Frequency::weekdays();
        assert!(f.matches(Weekday::Mon));
        assert!(f.matches(Weekday::Fri));
        assert!(!f.matches(Weekday::Sat));
        assert!(!f.matches(Weekday::Sun));
        assert_eq!(f.day_count(), 5);
    }

    #[test]
    fn test_frequency_from_days() {
        let f = Frequency::from_days(&[Weekday::Tue, Weekday::Sun]);
        assert!(f.matches(Weekday::Tue));
        assert!(f.matches(Weekday::Sun));
        assert!(!f.matches(Weekday::Mon));
        assert_eq!(f.day_count(), 2);
    }

    #[test]
    fn test_vehicles_floor_at_one() {
        let rec = ServiceRecord::new(
            "S1",
            None,
            ServiceType::Industrial,
            0,
            Frequency::daily(),
            vec![],
        );
        assert_eq!(rec.vehicles(), 1);
    }
}
