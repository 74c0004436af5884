//! This is the documentation for fedcal
//!
//! *fedcal* counts United States federal business days. Given a start date it finds the date
//! falling a fixed number of business days later, skipping Saturdays, Sundays and the observed
//! dates of the federal holidays. See the [`scheduling`] module for the calendar and the
//! calculator.


pub mod error;
pub mod json;
pub mod scheduling;
pub mod settings;

pub use error::{CalendarError, Result};

#[cfg(feature = "python")]
mod py;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn fedcal(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py::holidays_for_year_py, m)?)?;
    m.add_function(wrap_pyfunction!(py::is_business_day_py, m)?)?;
    m.add_function(wrap_pyfunction!(py::business_days_py, m)?)?;
    m.add_function(wrap_pyfunction!(py::calculate_py, m)?)?;
    Ok(())
}
