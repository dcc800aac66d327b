//! Hebrew calendar.
//!
//! Months are counted from Nisan: index 0 is Nisan, 6 is Tishri (where the
//! year number changes), 11 is Adar and 12 is Adar II, which only exists in
//! leap years.

use chrono::NaiveDateTime;

use crate::calendar::{
    CalendarContext, CalendarDate, CalendarSystem, check_month, gregorian_of, jdn_of,
};
use crate::error::Result;
use crate::jdn;

#[derive(Debug, Clone, Default)]
pub struct HebrewCalendar {
    context: CalendarContext,
}

impl HebrewCalendar {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_context(context: CalendarContext) -> Self {
        Self { context }
    }
}

impl CalendarSystem for HebrewCalendar {
    fn id(&self) -> &str {
        "hebrew"
    }

    fn context(&self) -> Option<&CalendarContext> {
        Some(&self.context)
    }

    fn first_month_name(&self) -> Option<&str> {
        Some("Nisan")
    }

    fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
        let (year, month, day) = jdn::jdn_to_hebrew(jdn_of(instant));
        Ok(CalendarDate::new(year, month - 1, day))
    }

    fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
        check_month(self.id(), date.month, jdn::hebrew_months_in_year(date.year))?;
        Ok(gregorian_of(jdn::hebrew_to_jdn(
            date.year,
            date.month + 1,
            date.day,
        )))
    }

    fn months_in_year(&self, year: i32) -> Result<u32> {
        Ok(jdn::hebrew_months_in_year(year))
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        check_month(self.id(), month, jdn::hebrew_months_in_year(year))?;
        Ok(jdn::hebrew_month_length(year, month + 1))
    }

    fn is_leap_year(&self, year: i32) -> Result<bool> {
        Ok(jdn::hebrew_leap_year(year))
    }
}
