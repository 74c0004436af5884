use crate::json::JSON;
use crate::scheduling::{Calculation, FederalHoliday};

impl JSON for FederalHoliday {}
impl JSON for Calculation {}
