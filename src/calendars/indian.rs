//! Indian national (Saka era) calendar.

use chrono::NaiveDateTime;

use crate::calendar::{
    CalendarContext, CalendarDate, CalendarSystem, check_month, gregorian_of, jdn_of,
};
use crate::date::{Date, YearType};
use crate::error::Result;

/// Gregorian year minus Saka year, for the part of the year after Chaitra 1.
pub const YEAR_OFFSET: i32 = 78;

/// The Saka calendar as used by the Indian national calendar.
///
/// Chaitra 1 is 22 March, or 21 March when the Gregorian year is leap; in
/// that case Chaitra also gains a 31st day. Vaishakha to Bhadrapada have 31
/// days and the remaining months 30.
#[derive(Debug, Clone, Default)]
pub struct IndianCalendar {
    context: CalendarContext,
}

impl IndianCalendar {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_context(context: CalendarContext) -> Self {
        Self { context }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    YearType::from_gregorian(year + YEAR_OFFSET).is_leap()
}

/// `month` is 0-based.
pub fn month_length(year: i32, month: u32) -> u32 {
    match month {
        0 if is_leap_year(year) => 31,
        0 => 30,
        1..=5 => 31,
        _ => 30,
    }
}

/// JDN of Chaitra 1 of `year`.
fn new_year(year: i32) -> i64 {
    let gregorian_year = year + YEAR_OFFSET;
    let day = if is_leap_year(year) { 21 } else { 22 };
    Date::from_gregorian(gregorian_year, 3, day).jdn()
}

pub fn to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let months: i64 = (0..month).map(|m| month_length(year, m) as i64).sum();
    new_year(year) + months + day as i64 - 1
}

pub fn from_jdn(jdn: i64) -> CalendarDate {
    let mut year = Date::from_jdn(jdn).gregorian().0 - YEAR_OFFSET;
    if jdn < new_year(year) {
        year -= 1;
    }
    let mut day = (jdn - new_year(year)) as u32;
    let mut month = 0;
    while month < 11 && day >= month_length(year, month) {
        day -= month_length(year, month);
        month += 1;
    }
    CalendarDate::new(year, month, day + 1)
}

impl CalendarSystem for IndianCalendar {
    fn id(&self) -> &str {
        "indian"
    }

    fn context(&self) -> Option<&CalendarContext> {
        Some(&self.context)
    }

    fn first_month_name(&self) -> Option<&str> {
        Some("Chaitra")
    }

    fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
        Ok(from_jdn(jdn_of(instant)))
    }

    fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
        check_month(self.id(), date.month, 12)?;
        Ok(gregorian_of(to_jdn(date.year, date.month, date.day)))
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        check_month(self.id(), month, 12)?;
        Ok(month_length(year, month))
    }

    fn is_leap_year(&self, year: i32) -> Result<bool> {
        Ok(is_leap_year(year))
    }
}
