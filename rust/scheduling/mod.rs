//! Determine United States federal business days and count them forward from a start date.
//!
//! # Calendars
//!
//! The [`FedCal`] calendar treats Saturdays, Sundays and the observed dates of the eleven
//! [`FederalHoliday`] variants as non-business days. Holidays for a year are computed on first
//! use and memoized inside the calendar instance.
//!
//! All calendars implement the [`DateRoll`] trait which classifies dates and steps through
//! them. The central operation is [`DateRoll::business_days`], which walks forward one
//! calendar day at a time from a start date and collects business days, counting the start
//! date itself as the first if it qualifies.
//!
//! ### Example
//! This example starts on Saturday 15th March 2025 and finds the 30th business day.
//! ```rust
//! # use fedcal::scheduling::{ndt, DateRoll, FedCal};
//! let cal = FedCal::new();
//! let dates = cal.business_days(&ndt(2025, 3, 15), 30).unwrap();
//! assert_eq!(dates.first(), Some(&ndt(2025, 3, 17)));
//! assert_eq!(dates.last(), Some(&ndt(2025, 4, 25)));
//! ```
//!
//! # Calculator
//!
//! The [`BusinessDayCalculator`] is the boundary used by the command line and Python
//! interfaces. It parses a `MM/DD/YYYY` date string, performs the count configured in
//! [`Settings`](crate::settings::Settings) and returns a [`Calculation`].
//! ```rust
//! # use fedcal::scheduling::BusinessDayCalculator;
//! # use fedcal::settings::Settings;
//! let calc = BusinessDayCalculator::new(Settings::default());
//! assert_eq!(calc.answer("03/15/2025").unwrap(), "04/25/2025");
//! ```

mod calculator;
mod calendars;

mod serde;

pub use crate::scheduling::{
    calculator::{format_date, parse_date, BusinessDayCalculator, Calculation, INPUT_FORMAT},
    calendars::{
        federal_holidays, holiday_schedule, last_weekday_of_month, ndt, nth_weekday_of_month,
        iteration_cap, observed_date, try_ndt, DateRoll, FedCal, FederalHoliday, HolidayRule,
        HolidaySet, DEFAULT_MAX_ITERATIONS,
    },
};
