use chrono::prelude::*;

use crate::error::{CalendarError, Result};

/// Create a `NaiveDate` from its components.
///
/// Panics if date values are invalid. Use [`try_ndt`] for values derived from input.
pub fn ndt(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("`year`, `month` `day` are invalid.")
}

/// Create a `NaiveDate` from its components, returning an error if they do not form a
/// valid calendar date.
pub fn try_ndt(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        CalendarError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day))
    })
}

/// Return the calendar day after `date`.
pub(crate) fn next_day(date: &NaiveDate) -> Result<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| CalendarError::DateOutOfRange(format!("no date follows {}", date)))
}

/// Return the calendar day before `date`.
pub(crate) fn prev_day(date: &NaiveDate) -> Result<NaiveDate> {
    date.pred_opt()
        .ok_or_else(|| CalendarError::DateOutOfRange(format!("no date precedes {}", date)))
}
