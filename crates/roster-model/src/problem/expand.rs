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
use crate::problem::err::{ExpandError, ExpansionAmbiguityError, InvalidMonthError};
use crate::problem::regime::RegimeRules;
use crate::problem::shift::Shift;
use crate::problem::spec::{ServiceRecord, ShiftSpec};
use chrono::{Datelike, NaiveDate};

/// How the incoming shift specifications are to be interpreted.
///
/// The decision is made exactly once, here. Downstream components receive
/// date-bound shifts and must never expand again; re-expanding already dated
/// shifts over the days of the month multiplies the instance by the number
/// of days and is the classic failure mode this boundary exists to prevent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    /// Specifications carry no dates; enumerate the month's calendar.
    Template,
    /// Specifications are already dated; pass through with a month filter.
    Dated,
}

/// Classifies the input by its first specification, then insists every other
/// specification is of the same kind.
pub fn detect_mode(services: &[ServiceRecord]) -> Result<ExpandMode, ExpansionAmbiguityError> {
    let first = services
        .iter()
        .flat_map(|s| s.shifts().iter())
        .next()
        .map(ShiftSpec::is_dated);

    let Some(expect_dated) = first else {
        return Ok(ExpandMode::Template);
    };

    for service in services {
        for (i, spec) in service.shifts().iter().enumerate() {
            if spec.is_dated() != expect_dated {
                return Err(ExpansionAmbiguityError::new(service.id(), i));
            }
        }
    }

    Ok(if expect_dated {
        ExpandMode::Dated
    } else {
        ExpandMode::Template
    })
}

/// Expands the service records of one target month into a flat, dated,
/// densely id-numbered shift list.
pub fn expand_month(
    year: i32,
    month: u32,
    services: &[ServiceRecord],
    rules: &RegimeRules,
) -> Result<Vec<Shift>, ExpandError> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| InvalidMonthError::new(year, month))?;

    let mode = detect_mode(services)?;
    let mut shifts = Vec::new();

    match mode {
        ExpandMode::Dated => {
            for service in services {
                for spec in service.shifts() {
                    let date = spec.date().expect("dated mode implies a date");
                    // Defensive filter against upstream leakage from other months.
                    if date.year() != year || date.month() != month {
                        continue;
                    }
                    push_instances(&mut shifts, service, spec, date, rules)?;
                }
            }
        }
        ExpandMode::Template => {
            let mut date = first_day;
            while date.month() == month {
                for service in services {
                    if !service.frequency().matches(date.weekday()) {
                        continue;
                    }
                    for spec in service.shifts() {
                        push_instances(&mut shifts, service, spec, date, rules)?;
                    }
                }
                date = date.succ_opt().ok_or_else(|| InvalidMonthError::new(year, month))?;
            }
        }
    }

    Ok(shifts)
}

fn push_instances(
    shifts: &mut Vec<Shift>,
    service: &ServiceRecord,
    spec: &ShiftSpec,
    date: NaiveDate,
    rules: &RegimeRules,
) -> Result<(), ExpandError> {
    for vehicle in 0..service.vehicles() {
        let id = ShiftId::new(shifts.len() as u32);
        shifts.push(Shift::new(
            id,
            service.id(),
            service.group().map(str::to_owned),
            service.service_type(),
            spec.number(),
            vehicle,
            date,
            spec.start(),
            spec.duration(),
            rules,
        )?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::shift::ServiceType;
    use crate::problem::spec::Frequency;
    use roster_core::prelude::{MinuteOfDay, Minutes};

    fn rules() -> RegimeRules {
        RegimeRules::mining_faena()
    }

    fn template_service(id: &str, specs: Vec<ShiftSpec>) -> ServiceRecord {
        ServiceRecord::new(id, None, ServiceType::Industrial, 1, Frequency::daily(), specs)
    }

    fn t(number: u16, start: i32, duration: i32) -> ShiftSpec {
        ShiftSpec::template(number, MinuteOfDay::new(start), Minutes::new(duration))
    }

    fn d(date: NaiveDate, number: u16, start: i32, duration: i32) -> ShiftSpec {
        ShiftSpec::dated(date, number, MinuteOfDay::new(start), Minutes::new(duration))
    }

    #[test]
    fn test_template_expansion_covers_whole_month() {
        let services = vec![template_service("S1", vec![t(1, 360, 480)])];
        let shifts = expand_month(2025, 2, &services, &rules()).unwrap();
        assert_eq!(shifts.len(), 28);
        assert_eq!(shifts[0].date(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(shifts[27].date(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_template_respects_frequency() {
        let services = vec![ServiceRecord::new(
            "S1",
            None,
            ServiceType::Industrial,
            1,
            Frequency::weekdays(),
            vec![t(1, 360, 480)],
        )];
        let shifts = expand_month(2025, 2, &services, &rules()).unwrap();
        // February 2025 has 20 weekdays.
        assert_eq!(shifts.len(), 20);
        assert!(shifts.iter().all(|s| {
            s.date().weekday().num_days_from_monday() < 5
        }));
    }

    #[test]
    fn test_vehicle_multiplicity() {
        let services = vec![ServiceRecord::new(
            "S1",
            None,
            ServiceType::Industrial,
            3,
            Frequency::daily(),
            vec![t(1, 360, 480)],
        )];
        let shifts = expand_month(2025, 2, &services, &rules()).unwrap();
        assert_eq!(shifts.len(), 28 * 3);
        assert_eq!(shifts[0].vehicle(), 0);
        assert_eq!(shifts[2].vehicle(), 2);
    }

    #[test]
    fn test_dated_mode_is_pass_through() {
        let feb10 = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let feb11 = NaiveDate::from_ymd_opt(2025, 2, 11).unwrap();
        let services = vec![template_service(
            "S1",
            vec![d(feb10, 1, 360, 480), d(feb11, 1, 360, 480)],
        )];
        let shifts = expand_month(2025, 2, &services, &rules()).unwrap();
        // Exactly the input instances; no multiplication by days of month.
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].date(), feb10);
        assert_eq!(shifts[1].date(), feb11);
    }

    #[test]
    fn test_dated_mode_filters_other_months() {
        let feb10 = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let mar01 = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let services = vec![template_service(
            "S1",
            vec![d(feb10, 1, 360, 480), d(mar01, 1, 360, 480)],
        )];
        let shifts = expand_month(2025, 2, &services, &rules()).unwrap();
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].date(), feb10);
    }

    #[test]
    fn test_mixed_kinds_are_ambiguous() {
        let feb10 = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let services = vec![template_service(
            "S1",
            vec![d(feb10, 1, 360, 480), t(2, 900, 480)],
        )];
        assert!(matches!(
            expand_month(2025, 2, &services, &rules()),
            Err(ExpandError::Ambiguous(_))
        ));
    }

    #[test]
    fn test_empty_input_expands_to_nothing() {
        let shifts = expand_month(2025, 2, &[], &rules()).unwrap();
        assert!(shifts.is_empty());
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(matches!(
            expand_month(2025, 13, &[], &rules()),
            Err(ExpandError::InvalidMonth(_))
        ));
    }

    #[test]
    fn test_ids_are_dense_and_in_order() {
        let services = vec![
            template_service("S1", vec![t(1, 360, 480)]),
            template_service("S2", vec![t(1, 900, 480)]),
        ];
        let shifts = expand_month(2025, 2, &services, &rules()).unwrap();
        for (i, s) in shifts.iter().enumerate() {
            assert_eq!(s.id().index(), i);
        }
    }

    #[test]
    fn test_invalid_spec_surfaces_invalid_shift() {
        let services = vec![template_service("S1", vec![t(1, 360, 0)])];
        assert!(matches!(
            expand_month(2025, 2, &services, &rules()),
            Err(ExpandError::InvalidShift(_))
        ));
    }
}
