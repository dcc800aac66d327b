//! Amazigh (Berber agrarian) calendar.
//!
//! The months and leap years are those of the Julian calendar and the year
//! is the Julian year plus 950, so Yennayer 1 falls on Gregorian 14 January
//! from 1900 to 2099.

use chrono::NaiveDateTime;

use crate::calendar::{CalendarContext, CalendarDate, CalendarSystem, check_month, gregorian_of};
use crate::date::{Date, YearType, western_month_length};
use crate::error::Result;

/// Amazigh year minus Julian year.
pub const YEAR_OFFSET: i32 = 950;

#[derive(Debug, Clone, Default)]
pub struct AmazighCalendar {
    context: CalendarContext,
}

impl AmazighCalendar {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_context(context: CalendarContext) -> Self {
        Self { context }
    }
}

impl CalendarSystem for AmazighCalendar {
    fn id(&self) -> &str {
        "amazigh"
    }

    fn context(&self) -> Option<&CalendarContext> {
        Some(&self.context)
    }

    fn first_month_name(&self) -> Option<&str> {
        Some("Yennayer")
    }

    fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
        let (year, month, day) = Date::from_naive(instant.date()).julian();
        Ok(CalendarDate::new(year + YEAR_OFFSET, month - 1, day))
    }

    fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
        check_month(self.id(), date.month, 12)?;
        let julian = Date::from_julian(date.year - YEAR_OFFSET, date.month + 1, date.day);
        Ok(gregorian_of(julian.jdn()))
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        check_month(self.id(), month, 12)?;
        Ok(western_month_length(
            month + 1,
            YearType::from_julian(year - YEAR_OFFSET),
        ))
    }

    fn is_leap_year(&self, year: i32) -> Result<bool> {
        Ok(YearType::from_julian(year - YEAR_OFFSET).is_leap())
    }
}
