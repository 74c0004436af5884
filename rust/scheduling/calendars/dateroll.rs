// SPDX-License-Identifier: LicenseRef-Rateslib-Dual
//
// Copyright (c) 2026 Siffrorna Technology Limited
// This code cannot be used or copied externally
//
// Dual-licensed: Free Educational Licence or Paid Commercial Licence (commercial/professional use)
// Source-available, not open source.
//
// See LICENSE and https://rateslib.com/py/en/latest/i_licence.html for details,
// and/or contact info (at) rateslib (dot) com
////////////////////////////////////////////////////////////////////////////////////////////////////

use chrono::prelude::*;
use chrono::Month;
use tracing::{trace, warn};

use crate::error::{CalendarError, Result};
use crate::scheduling::calendars::calendar::{next_day, prev_day, try_ndt};

/// Upper bound on the number of calendar days the business day stepper will examine.
pub const DEFAULT_MAX_ITERATIONS: u32 = 366_000;

/// Return the number of calendar days the stepper may examine to collect `count` business
/// days: twice `count` plus a year, but never more than `max_iterations`.
pub fn iteration_cap(count: i32, max_iterations: u32) -> u32 {
    let scaled = 2 * u64::from(count.max(0).unsigned_abs()) + 366;
    scaled.min(u64::from(max_iterations)) as u32
}

/// Business day classification and stepping over a holiday calendar.
pub trait DateRoll {
    /// Returns whether the date is a specific holiday excluded from the regular working week.
    fn is_holiday(&self, date: &NaiveDate) -> bool;

    /// Returns whether the date is a Saturday or Sunday.
    fn is_weekend(&self, date: &NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns whether the date is a business day, i.e. not a weekend and not a holiday.
    fn is_bus_day(&self, date: &NaiveDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Returns whether the date is not a business day.
    fn is_non_bus_day(&self, date: &NaiveDate) -> bool {
        !self.is_bus_day(date)
    }

    /// Return the `date`, if a business day, or get the next business date after `date`.
    fn roll_forward_bus_day(&self, date: &NaiveDate) -> Result<NaiveDate> {
        let mut new_date = *date;
        while !self.is_bus_day(&new_date) {
            new_date = next_day(&new_date)?;
        }
        Ok(new_date)
    }

    /// Return the `date`, if a business day, or get the business day preceding `date`.
    fn roll_backward_bus_day(&self, date: &NaiveDate) -> Result<NaiveDate> {
        let mut new_date = *date;
        while !self.is_bus_day(&new_date) {
            new_date = prev_day(&new_date)?;
        }
        Ok(new_date)
    }

    /// Return the first `count` business days on or after `start`, in order.
    ///
    /// `start` counts as the first business day if it is one. A `count` of zero returns an
    /// empty vector and a negative `count` is an error. The number of calendar days examined
    /// is limited by [`iteration_cap`].
    fn business_days(&self, start: &NaiveDate, count: i32) -> Result<Vec<NaiveDate>> {
        self.business_days_capped(start, count, iteration_cap(count, DEFAULT_MAX_ITERATIONS))
    }

    /// Return the first `count` business days on or after `start`, examining at most
    /// `max_iterations` calendar days.
    fn business_days_capped(
        &self,
        start: &NaiveDate,
        count: i32,
        max_iterations: u32,
    ) -> Result<Vec<NaiveDate>> {
        let target = usize::try_from(count).map_err(|_| {
            CalendarError::InvalidArgument(format!(
                "business day `count` cannot be negative, got {}.",
                count
            ))
        })?;

        let mut dates: Vec<NaiveDate> = Vec::new();
        let mut current = *start;
        let mut iterations: u32 = 0;
        while dates.len() < target {
            if iterations >= max_iterations {
                warn!(%start, count, max_iterations, "business day stepper exceeded its cap");
                return Err(CalendarError::DidNotConverge {
                    start: *start,
                    count,
                    iterations,
                });
            }
            iterations += 1;
            if self.is_bus_day(&current) {
                dates.push(current);
                if dates.len() == target {
                    break;
                }
            }
            current = next_day(&current)?;
        }

        if dates.len() < target {
            return Err(CalendarError::InsufficientBusinessDays {
                requested: target,
                computed: dates.len(),
            });
        }
        trace!(%start, count, iterations, "collected business days");
        Ok(dates)
    }

    /// Return the `count`-th business day on or after `start`, counting `start` as the first
    /// if it is a business day. Returns `None` when `count` is zero.
    fn nth_business_day(&self, start: &NaiveDate, count: i32) -> Result<Option<NaiveDate>> {
        Ok(self.business_days(start, count)?.last().copied())
    }

    /// Return all business dates between `start` and `end`, inclusive.
    fn bus_date_range(&self, start: &NaiveDate, end: &NaiveDate) -> Vec<NaiveDate> {
        start
            .iter_days()
            .take_while(|d| d <= end)
            .filter(|d| self.is_bus_day(d))
            .collect()
    }

    /// Print a representation of the month.
    ///
    /// Business days show their day number, weekends are `.` and holidays are `*`.
    fn print_month(&self, year: i32, month: u32) -> Result<String> {
        let first = try_ndt(year, month, 1)?;
        let name = Month::try_from(month as u8)
            .map_err(|_| CalendarError::InvalidArgument(format!("{} is not a month", month)))?
            .name();
        let mut output = format!("{:^20}\n", format!("{} {}", name, year));
        output += "Su Mo Tu We Th Fr Sa\n";

        let offset = first.weekday().num_days_from_sunday() as usize;
        let mut cells: Vec<String> = vec!["  ".to_string(); offset];
        for date in first.iter_days().take_while(|d| d.month() == month) {
            let cell = if self.is_bus_day(&date) {
                format!("{:>2}", date.day())
            } else if self.is_weekend(&date) {
                " .".to_string()
            } else {
                " *".to_string()
            };
            cells.push(cell);
        }
        for week in cells.chunks(7) {
            output += &week.join(" ");
            output += "\n";
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::{ndt, FedCal};
    use indexmap::set::IndexSet;

    // A calendar with explicit holidays, independent of the federal rules.
    struct HolCal {
        holidays: IndexSet<NaiveDate>,
    }

    impl DateRoll for HolCal {
        fn is_holiday(&self, date: &NaiveDate) -> bool {
            self.holidays.contains(date)
        }
    }

    fn fixture_hol_cal() -> HolCal {
        // Saturday and Monday
        HolCal {
            holidays: IndexSet::from_iter([ndt(2015, 9, 5), ndt(2015, 9, 7)]),
        }
    }

    // Every weekday is a holiday, so no business day can ever be found.
    struct NeverOpen;

    impl DateRoll for NeverOpen {
        fn is_holiday(&self, _date: &NaiveDate) -> bool {
            true
        }
    }

    #[test]
    fn test_is_weekend() {
        let cal = fixture_hol_cal();
        assert!(cal.is_weekend(&ndt(2024, 1, 6))); // Saturday
        assert!(cal.is_weekend(&ndt(2024, 1, 7))); // Sunday
        assert!(!cal.is_weekend(&ndt(2015, 9, 7))); // Monday holiday
    }

    #[test]
    fn test_is_business_day() {
        let cal = fixture_hol_cal();
        assert!(!cal.is_bus_day(&ndt(2015, 9, 7))); // Monday in Hol list
        assert!(cal.is_bus_day(&ndt(2015, 9, 10))); // Thursday
        assert!(!cal.is_bus_day(&ndt(2024, 1, 6))); // Saturday
        assert!(cal.is_non_bus_day(&ndt(2015, 9, 5)));
    }

    #[test]
    fn test_roll_forward_bus_day() {
        let cal = fixture_hol_cal();
        assert_eq!(cal.roll_forward_bus_day(&ndt(2015, 9, 5)).unwrap(), ndt(2015, 9, 8));
        assert_eq!(cal.roll_forward_bus_day(&ndt(2015, 9, 7)).unwrap(), ndt(2015, 9, 8));
        assert_eq!(cal.roll_forward_bus_day(&ndt(2015, 9, 4)).unwrap(), ndt(2015, 9, 4));
    }

    #[test]
    fn test_roll_backward_bus_day() {
        let cal = fixture_hol_cal();
        assert_eq!(cal.roll_backward_bus_day(&ndt(2015, 9, 7)).unwrap(), ndt(2015, 9, 4));
        assert_eq!(cal.roll_backward_bus_day(&ndt(2015, 9, 4)).unwrap(), ndt(2015, 9, 4));
    }

    #[test]
    fn test_business_days_skips_holidays() {
        let cal = fixture_hol_cal();
        let result = cal.business_days(&ndt(2015, 9, 4), 3).unwrap();
        assert_eq!(result, vec![ndt(2015, 9, 4), ndt(2015, 9, 8), ndt(2015, 9, 9)]);
    }

    #[test]
    fn test_business_days_zero_is_empty() {
        let cal = fixture_hol_cal();
        assert!(cal.business_days(&ndt(2015, 9, 4), 0).unwrap().is_empty());
        assert_eq!(cal.nth_business_day(&ndt(2015, 9, 4), 0).unwrap(), None);
    }

    #[test]
    fn test_business_days_negative_is_error() {
        let cal = fixture_hol_cal();
        assert!(matches!(
            cal.business_days(&ndt(2015, 9, 4), -1),
            Err(CalendarError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_business_days_did_not_converge() {
        match NeverOpen.business_days_capped(&ndt(2025, 1, 1), 1, 50) {
            Err(CalendarError::DidNotConverge { iterations, count, .. }) => {
                assert_eq!(iterations, 50);
                assert_eq!(count, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_business_days_cap_is_exact() {
        // Monday to Friday needs exactly five iterations
        let cal = fixture_hol_cal();
        let result = cal.business_days_capped(&ndt(2015, 9, 14), 5, 5).unwrap();
        assert_eq!(result.last(), Some(&ndt(2015, 9, 18)));
        assert!(cal.business_days_capped(&ndt(2015, 9, 14), 6, 5).is_err());
    }

    #[test]
    fn test_iteration_cap() {
        assert_eq!(iteration_cap(0, DEFAULT_MAX_ITERATIONS), 366);
        assert_eq!(iteration_cap(-5, DEFAULT_MAX_ITERATIONS), 366);
        assert_eq!(iteration_cap(30, DEFAULT_MAX_ITERATIONS), 426);
        assert_eq!(iteration_cap(30, 10), 10);
        assert_eq!(iteration_cap(i32::MAX, DEFAULT_MAX_ITERATIONS), DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_business_days_large_count() {
        let cal = FedCal::new();
        let result = cal.business_days(&ndt(2025, 1, 1), 3000).unwrap();
        assert_eq!(result.len(), 3000);
        assert!(result.iter().all(|d| cal.is_bus_day(d)));
    }

    #[test]
    fn test_business_days_max_count_is_error() {
        let cal = FedCal::new();
        match cal.business_days(&ndt(2025, 1, 1), i32::MAX) {
            Err(CalendarError::DidNotConverge { iterations, count, .. }) => {
                assert_eq!(iterations, DEFAULT_MAX_ITERATIONS);
                assert_eq!(count, i32::MAX);
            }
            other => panic!("unexpected result: {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_business_days_at_max_date() {
        let cal = fixture_hol_cal();
        let last = NaiveDate::MAX;
        let start = cal.roll_backward_bus_day(&last).unwrap();
        assert_eq!(cal.business_days(&start, 1).unwrap(), vec![start]);
        assert!(matches!(
            cal.business_days(&start, 10),
            Err(CalendarError::DateOutOfRange(_))
        ));
    }

    #[test]
    fn test_bus_date_range() {
        let cal = fixture_hol_cal();
        let result = cal.bus_date_range(&ndt(2015, 9, 3), &ndt(2015, 9, 9));
        assert_eq!(
            result,
            vec![ndt(2015, 9, 3), ndt(2015, 9, 4), ndt(2015, 9, 8), ndt(2015, 9, 9)]
        );
        assert!(cal.bus_date_range(&ndt(2015, 9, 9), &ndt(2015, 9, 3)).is_empty());
    }

    #[test]
    fn test_print_month() {
        let cal = FedCal::new();
        let result = cal.print_month(2026, 1).unwrap();
        let expected = [
            "    January 2026    ".to_string(),
            "Su Mo Tu We Th Fr Sa".to_string(),
            format!("{}*  2  .", " ".repeat(13)),
            " .  5  6  7  8  9  .".to_string(),
            " . 12 13 14 15 16  .".to_string(),
            " .  * 20 21 22 23  .".to_string(),
            " . 26 27 28 29 30  .".to_string(),
            " .".to_string(),
        ];
        let result_lines: Vec<&str> = result.lines().collect();
        assert_eq!(result_lines, expected);
    }

    #[test]
    fn test_print_month_invalid() {
        let cal = FedCal::new();
        assert!(cal.print_month(2026, 13).is_err());
    }
}
