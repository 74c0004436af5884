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
use indexmap::set::IndexSet;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::error::Result;
use crate::scheduling::calendars::holidays::federal_holidays;
use crate::scheduling::DateRoll;

/// The set of observed federal holidays of one year.
pub type HolidaySet = IndexSet<NaiveDate>;

/// A business day calendar of Saturday and Sunday weekends and observed United States
/// federal holidays.
///
/// Holiday sets are computed lazily on first request for a year and retained for the
/// lifetime of the calendar. Each entry is written once and never mutated, so the calendar
/// may be shared between threads and concurrent first requests for the same year are safe.
#[derive(Debug, Default)]
pub struct FedCal {
    cache: RwLock<HashMap<i32, Arc<HolidaySet>>>,
}

impl FedCal {
    /// Create a calendar with an empty holiday cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the observed federal holidays for `year`.
    pub fn holidays_for_year(&self, year: i32) -> Result<Arc<HolidaySet>> {
        if let Some(holidays) = self.read().get(&year) {
            return Ok(Arc::clone(holidays));
        }
        let holidays = Arc::new(federal_holidays(year)?);
        debug!(year, count = holidays.len(), "computed federal holidays");
        let mut w = self.write();
        Ok(Arc::clone(w.entry(year).or_insert(holidays)))
    }

    /// Returns whether `date` is an observed federal holiday of its own year.
    pub fn is_federal_holiday(&self, date: &NaiveDate) -> bool {
        self.holidays_for_year(date.year())
            .is_ok_and(|holidays| holidays.contains(date))
    }

    /// Return the years currently held in the cache, in ascending order.
    pub fn cached_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.read().keys().copied().collect();
        years.sort();
        years
    }

    // Entries are immutable once inserted so a poisoned lock still holds valid data.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<i32, Arc<HolidaySet>>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<i32, Arc<HolidaySet>>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DateRoll for FedCal {
    fn is_holiday(&self, date: &NaiveDate) -> bool {
        self.is_federal_holiday(date)
    }
}
