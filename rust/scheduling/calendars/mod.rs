mod calendar;
mod dateroll;
mod fed_cal;
mod holidays;

pub use crate::scheduling::calendars::{
    calendar::{ndt, try_ndt},
    dateroll::{iteration_cap, DateRoll, DEFAULT_MAX_ITERATIONS},
    fed_cal::{FedCal, HolidaySet},
    holidays::{
        federal_holidays, holiday_schedule, last_weekday_of_month, nth_weekday_of_month,
        observed_date, FederalHoliday, HolidayRule,
    },
};
