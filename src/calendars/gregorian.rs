//! Proleptic Gregorian calendar.

use chrono::{Datelike, NaiveDateTime};

use crate::calendar::{
    CalendarContext, CalendarDate, CalendarSystem, check_month, gregorian_of,
};
use crate::date::{Date, YearType, western_month_length};
use crate::error::Result;

/// The proleptic Gregorian calendar, with astronomical year numbering.
///
/// Conversion is the identity, except that days past the end of a month
/// roll over into the next one.
#[derive(Debug, Clone, Default)]
pub struct GregorianCalendar {
    context: CalendarContext,
}

impl GregorianCalendar {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_context(context: CalendarContext) -> Self {
        Self { context }
    }
}

impl CalendarSystem for GregorianCalendar {
    fn id(&self) -> &str {
        "gregory"
    }

    fn context(&self) -> Option<&CalendarContext> {
        Some(&self.context)
    }

    fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
        Ok(CalendarDate::new(instant.year(), instant.month0(), instant.day()))
    }

    fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
        check_month(self.id(), date.month, 12)?;
        Ok(gregorian_of(
            Date::from_gregorian(date.year, date.month + 1, date.day).jdn(),
        ))
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        check_month(self.id(), month, 12)?;
        Ok(western_month_length(month + 1, YearType::from_gregorian(year)))
    }

    fn is_leap_year(&self, year: i32) -> Result<bool> {
        Ok(YearType::from_gregorian(year).is_leap())
    }
}
