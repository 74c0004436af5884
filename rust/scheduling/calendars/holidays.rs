//! Rules for the eleven United States federal holidays.
//!
//! Fixed-date holidays (New Year's Day, Juneteenth, Independence Day, Veterans Day and
//! Christmas Day) are moved to the nearest weekday when they fall on a weekend: Saturday
//! holidays are observed on the preceding Friday and Sunday holidays on the following Monday.
//! The remaining holidays are defined as a specific weekday of a month and are never shifted.

use chrono::prelude::*;
use chrono::Days;
use indexmap::set::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};
use crate::scheduling::calendars::calendar::{next_day, prev_day, try_ndt};

/// A United States federal holiday.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FederalHoliday {
    NewYearsDay,
    MartinLutherKingJrDay,
    PresidentsDay,
    MemorialDay,
    Juneteenth,
    IndependenceDay,
    LaborDay,
    ColumbusDay,
    VeteransDay,
    Thanksgiving,
    ChristmasDay,
}

/// The rule locating the nominal date of a holiday within a year.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HolidayRule {
    /// A fixed month and day, subject to the weekend observance shift.
    Fixed { month: u32, day: u32 },
    /// The `n`-th occurrence of `weekday` in `month`.
    NthWeekday { month: u32, weekday: Weekday, n: u32 },
    /// The last occurrence of `weekday` in `month`.
    LastWeekday { month: u32, weekday: Weekday },
}

impl FederalHoliday {
    /// All federal holidays in calendar order.
    pub const ALL: [FederalHoliday; 11] = [
        FederalHoliday::NewYearsDay,
        FederalHoliday::MartinLutherKingJrDay,
        FederalHoliday::PresidentsDay,
        FederalHoliday::MemorialDay,
        FederalHoliday::Juneteenth,
        FederalHoliday::IndependenceDay,
        FederalHoliday::LaborDay,
        FederalHoliday::ColumbusDay,
        FederalHoliday::VeteransDay,
        FederalHoliday::Thanksgiving,
        FederalHoliday::ChristmasDay,
    ];

    /// Return the display name of the holiday.
    pub fn name(&self) -> &'static str {
        match self {
            FederalHoliday::NewYearsDay => "New Year's Day",
            FederalHoliday::MartinLutherKingJrDay => "Martin Luther King Jr. Day",
            FederalHoliday::PresidentsDay => "Presidents Day",
            FederalHoliday::MemorialDay => "Memorial Day",
            FederalHoliday::Juneteenth => "Juneteenth",
            FederalHoliday::IndependenceDay => "Independence Day",
            FederalHoliday::LaborDay => "Labor Day",
            FederalHoliday::ColumbusDay => "Columbus Day / Indigenous Peoples' Day",
            FederalHoliday::VeteransDay => "Veterans Day",
            FederalHoliday::Thanksgiving => "Thanksgiving",
            FederalHoliday::ChristmasDay => "Christmas Day",
        }
    }

    /// Return the rule defining the nominal date of the holiday.
    pub fn rule(&self) -> HolidayRule {
        use HolidayRule::*;
        match self {
            FederalHoliday::NewYearsDay => Fixed { month: 1, day: 1 },
            FederalHoliday::MartinLutherKingJrDay => NthWeekday { month: 1, weekday: Weekday::Mon, n: 3 },
            FederalHoliday::PresidentsDay => NthWeekday { month: 2, weekday: Weekday::Mon, n: 3 },
            FederalHoliday::MemorialDay => LastWeekday { month: 5, weekday: Weekday::Mon },
            FederalHoliday::Juneteenth => Fixed { month: 6, day: 19 },
            FederalHoliday::IndependenceDay => Fixed { month: 7, day: 4 },
            FederalHoliday::LaborDay => NthWeekday { month: 9, weekday: Weekday::Mon, n: 1 },
            FederalHoliday::ColumbusDay => NthWeekday { month: 10, weekday: Weekday::Mon, n: 2 },
            FederalHoliday::VeteransDay => Fixed { month: 11, day: 11 },
            FederalHoliday::Thanksgiving => NthWeekday { month: 11, weekday: Weekday::Thu, n: 4 },
            FederalHoliday::ChristmasDay => Fixed { month: 12, day: 25 },
        }
    }

    /// Returns whether the holiday falls on a fixed month and day.
    pub fn is_fixed_date(&self) -> bool {
        matches!(self.rule(), HolidayRule::Fixed { .. })
    }

    /// Return the date of the holiday in `year` before any observance shift.
    ///
    /// Every rule names a valid month and day, so a date which cannot be constructed means
    /// `year` is outside the representable range.
    pub fn nominal(&self, year: i32) -> Result<NaiveDate> {
        let date = match self.rule() {
            HolidayRule::Fixed { month, day } => try_ndt(year, month, day),
            HolidayRule::NthWeekday { month, weekday, n } => {
                nth_weekday_of_month(year, month, weekday, n)
            }
            HolidayRule::LastWeekday { month, weekday } => {
                last_weekday_of_month(year, month, weekday)
            }
        };
        date.map_err(|err| match err {
            CalendarError::InvalidDate(_) => {
                CalendarError::DateOutOfRange(format!("{} in year {}", self.name(), year))
            }
            other => other,
        })
    }

    /// Return the date on which the holiday is observed in `year`.
    pub fn observed(&self, year: i32) -> Result<NaiveDate> {
        let nominal = self.nominal(year)?;
        if self.is_fixed_date() {
            observed_date(&nominal)
        } else {
            Ok(nominal)
        }
    }
}

/// Return the date of the `n`-th `weekday` in a month.
///
/// `n` must be at least 1 and the resulting date must lie within the month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Result<NaiveDate> {
    if n == 0 {
        return Err(CalendarError::InvalidArgument(
            "`n` for `nth_weekday_of_month` must be at least 1.".to_string(),
        ));
    }
    let mut date = try_ndt(year, month, 1)?;
    while date.weekday() != weekday {
        date = next_day(&date)?;
    }
    let date = date
        .checked_add_days(Days::new(7 * u64::from(n - 1)))
        .ok_or_else(|| CalendarError::DateOutOfRange(format!("{}-{:02} + {} weeks", year, month, n - 1)))?;
    if date.month() != month {
        return Err(CalendarError::InvalidArgument(format!(
            "there is no occurrence {} of {} in {}-{:02}",
            n, weekday, year, month
        )));
    }
    Ok(date)
}

/// Return the date of the last `weekday` in a month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Result<NaiveDate> {
    let next_month = if month == 12 {
        let next_year = year
            .checked_add(1)
            .ok_or_else(|| CalendarError::DateOutOfRange(format!("no year follows {}", year)))?;
        try_ndt(next_year, 1, 1)?
    } else {
        try_ndt(year, month + 1, 1)?
    };
    let mut date = prev_day(&next_month)?;
    while date.weekday() != weekday {
        date = prev_day(&date)?;
    }
    Ok(date)
}

/// Shift a weekend date to its observed weekday.
///
/// Saturday is observed on the preceding Friday, Sunday on the following Monday. Any other
/// date is returned unchanged.
pub fn observed_date(date: &NaiveDate) -> Result<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => prev_day(date),
        Weekday::Sun => next_day(date),
        _ => Ok(*date),
    }
}

/// Compute the set of observed federal holidays for `year`, in calendar order.
///
/// This performs no caching. See [`FedCal`](crate::scheduling::FedCal) for a memoized calendar.
pub fn federal_holidays(year: i32) -> Result<IndexSet<NaiveDate>> {
    FederalHoliday::ALL.iter().map(|h| h.observed(year)).collect()
}

/// Return each federal holiday paired with its observed date in `year`.
pub fn holiday_schedule(year: i32) -> Result<Vec<(FederalHoliday, NaiveDate)>> {
    FederalHoliday::ALL
        .iter()
        .map(|h| Ok((*h, h.observed(year)?)))
        .collect()
}
