//! Wrapper module to export to Python using pyo3 bindings.

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::sync::{Arc, LazyLock};

use crate::error::CalendarError;
use crate::scheduling::{BusinessDayCalculator, DateRoll, FedCal};
use crate::settings::Settings;

// A single calendar shared by every Python caller so the holiday cache is process wide.
static FED_CAL: LazyLock<Arc<FedCal>> = LazyLock::new(|| Arc::new(FedCal::new()));

impl From<CalendarError> for PyErr {
    fn from(err: CalendarError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Return the observed federal holidays of a year.
///
/// Parameters
/// ----------
/// year: int
///     The calendar year.
///
/// Returns
/// -------
/// list[date]
#[pyfunction]
#[pyo3(name = "holidays_for_year")]
pub(crate) fn holidays_for_year_py(year: i32) -> PyResult<Vec<NaiveDate>> {
    Ok(FED_CAL.holidays_for_year(year)?.iter().copied().collect())
}

/// Return whether the `date` is a business day.
///
/// Parameters
/// ----------
/// date: date
///     Date to test
///
/// Returns
/// -------
/// bool
#[pyfunction]
#[pyo3(name = "is_business_day")]
pub(crate) fn is_business_day_py(date: NaiveDate) -> bool {
    FED_CAL.is_bus_day(&date)
}

/// Return the first `count` business days on or after `start`.
///
/// Parameters
/// ----------
/// start: date
///     The first date examined, counted as day 1 if it is a business day.
/// count: int
///     The number of business days to collect.
///
/// Returns
/// -------
/// list[date]
#[pyfunction]
#[pyo3(name = "business_days")]
pub(crate) fn business_days_py(start: NaiveDate, count: i32) -> PyResult<Vec<NaiveDate>> {
    Ok(FED_CAL.business_days(&start, count)?)
}

/// Parse a *MM/DD/YYYY* string and return the formatted final business day.
///
/// Parameters
/// ----------
/// input: str
///     The start date.
/// business_days: int, optional
///     The number of business days to count, 30 by default.
///
/// Returns
/// -------
/// str
#[pyfunction]
#[pyo3(name = "calculate", signature = (input, business_days = None))]
pub(crate) fn calculate_py(input: &str, business_days: Option<i32>) -> PyResult<String> {
    let defaults = Settings::default();
    let settings = Settings {
        business_days: business_days.unwrap_or(defaults.business_days),
        ..defaults
    };
    let calc = BusinessDayCalculator::with_calendar(Arc::clone(&FED_CAL), settings);
    Ok(calc.answer(input)?)
}
