use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::{CalendarError, Result};
use crate::scheduling::{iteration_cap, try_ndt, DateRoll, FedCal};
use crate::settings::Settings;

/// The accepted format of user supplied dates.
pub const INPUT_FORMAT: &str = "MM/DD/YYYY";

/// Parse a `MM/DD/YYYY` string into a date.
///
/// Surrounding whitespace is ignored, as is whitespace around each component. Single digit
/// months and days are accepted. The year must lie in `1..=9999`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = || {
        CalendarError::InvalidDate(format!(
            "'{}' is not a valid date in {} format",
            input.trim(),
            INPUT_FORMAT
        ))
    };
    let parts: Vec<&str> = input.trim().split('/').map(str::trim).collect();
    let [month, day, year] = parts.as_slice() else {
        return Err(invalid());
    };
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    if !(1..=9999).contains(&year) {
        return Err(invalid());
    }
    try_ndt(year, month, day).map_err(|_| invalid())
}

/// Format a date with a `chrono` strftime format string.
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}

/// The outcome of counting business days from a start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// The date counting began from.
    pub start: NaiveDate,
    /// The number of business days counted.
    pub business_days: i32,
    /// Whether `start` was itself counted as the first business day.
    pub start_is_business_day: bool,
    /// The final business day.
    pub result: NaiveDate,
    /// Every business day counted, in order, ending with `result`.
    pub dates: Vec<NaiveDate>,
}

/// Counts a configured number of federal business days from a user supplied date.
#[derive(Debug, Clone)]
pub struct BusinessDayCalculator {
    calendar: Arc<FedCal>,
    settings: Settings,
}

impl BusinessDayCalculator {
    /// Create a calculator with its own holiday calendar.
    pub fn new(settings: Settings) -> Self {
        Self::with_calendar(Arc::new(FedCal::new()), settings)
    }

    /// Create a calculator sharing an existing holiday calendar and its cache.
    pub fn with_calendar(calendar: Arc<FedCal>, settings: Settings) -> Self {
        Self { calendar, settings }
    }

    pub fn calendar(&self) -> &FedCal {
        &self.calendar
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Count the configured number of business days from `start`.
    pub fn calculate_from(&self, start: &NaiveDate) -> Result<Calculation> {
        self.settings.validate()?;
        let count = self.settings.business_days;
        let dates = self.calendar.business_days_capped(
            start,
            count,
            iteration_cap(count, self.settings.max_iterations),
        )?;
        let result = match dates.last() {
            Some(date) if dates.len() == count as usize => *date,
            _ => {
                return Err(CalendarError::InsufficientBusinessDays {
                    requested: count as usize,
                    computed: dates.len(),
                })
            }
        };
        debug!(%start, count, %result, "calculated business day");
        Ok(Calculation {
            start: *start,
            business_days: count,
            start_is_business_day: self.calendar.is_bus_day(start),
            result,
            dates,
        })
    }

    /// Parse `input` as a `MM/DD/YYYY` date and count business days from it.
    pub fn calculate(&self, input: &str) -> Result<Calculation> {
        let start = parse_date(input)?;
        self.calculate_from(&start)
    }

    /// Format a date with the configured output format.
    pub fn format(&self, date: &NaiveDate) -> String {
        format_date(date, &self.settings.date_format)
    }

    /// Parse `input` and return the final business day as a formatted string.
    pub fn answer(&self, input: &str) -> Result<String> {
        let calculation = self.calculate(input)?;
        Ok(self.format(&calculation.result))
    }
}

impl Default for BusinessDayCalculator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
