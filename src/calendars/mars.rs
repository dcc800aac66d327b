//! Darian calendar for Mars.
//!
//! Days are sols, counted by the Mars Sol Date (MSD), a continuous sol count
//! linearly related to the Julian Date. A Darian year has 24 months of 28
//! sols, except that every sixth month has 27; the last month gains its 28th
//! sol in leap years, giving 668 or 669 sols.
//!
//! Year 0 begins at MSD −94129, in the evening of 1609-03-11 UTC.

use chrono::NaiveDateTime;

use crate::calendar::{
    CalendarContext, CalendarDate, CalendarSystem, check_month, gregorian_of, to_year,
};
use crate::date::{Date, julian_date};
use crate::error::{CalendarError, Result};

/// Earth days in one sol.
pub const EARTH_DAYS_PER_SOL: f64 = 1.027_491_251_7;
/// Julian Date of MSD [`MSD_AT_J2000`] (2000-01-06 00:00 UTC).
pub const JD_REFERENCE: f64 = 2_451_549.5;
pub const MSD_AT_J2000: f64 = 44_796.0;
pub const MSD_CORRECTION: f64 = 0.000_962_6;
/// MSD of sol 1 of year 0.
pub const EPOCH_MSD: i64 = -94_129;

pub const MONTHS: u32 = 24;

pub fn mars_sol_date(jd: f64) -> f64 {
    (jd - JD_REFERENCE) / EARTH_DAYS_PER_SOL + MSD_AT_J2000 - MSD_CORRECTION
}

pub fn julian_date_of_msd(msd: f64) -> f64 {
    (msd - MSD_AT_J2000 + MSD_CORRECTION) * EARTH_DAYS_PER_SOL + JD_REFERENCE
}

/// Odd years are leap, and so are years divisible by ten, except centuries
/// that are not divisible by 500.
///
/// ```
/// use kalendarilo_convert::calendars::mars::is_darian_leap_year;
///
/// assert!(is_darian_leap_year(11));
/// assert!(is_darian_leap_year(10));
/// assert!(!is_darian_leap_year(100));
/// assert!(is_darian_leap_year(500));
/// assert!(!is_darian_leap_year(12));
/// ```
pub fn is_darian_leap_year(year: i32) -> bool {
    year.rem_euclid(2) == 1
        || (year.rem_euclid(10) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(500) == 0))
}

pub fn sols_in_year(year: i32) -> u32 {
    if is_darian_leap_year(year) { 669 } else { 668 }
}

/// `month` is 0-based and must be below [`MONTHS`].
pub fn sols_in_month(year: i32, month: u32) -> u32 {
    match month {
        23 if is_darian_leap_year(year) => 28,
        m if m % 6 == 5 => 27,
        _ => 28,
    }
}

/// Mean sols per Darian year, 668 plus 592 leap sols per millennium.
const MEAN_SOLS_PER_YEAR: f64 = 668.592;

/// Sols from the start of year 0 to the start of `year`, negative before it.
fn sols_before_year(year: i64) -> i64 {
    // Multiples of `k` in `0..year`, counted negatively below zero.
    let multiples = |k: i64| (year + k - 1).div_euclid(k);
    668 * year + year.div_euclid(2) + multiples(10) - multiples(100) + multiples(500)
}

/// Splits a sol count from the start of year 0 into a Darian date.
fn date_of_sol(sol: i64) -> Result<CalendarDate> {
    let mut year = (sol as f64 / MEAN_SOLS_PER_YEAR).floor() as i64;
    while sols_before_year(year) > sol {
        year -= 1;
    }
    while sols_before_year(year + 1) <= sol {
        year += 1;
    }
    let mut sol = (sol - sols_before_year(year)) as u32;
    let year = to_year(year)?;
    let mut month = 0;
    while sol >= sols_in_month(year, month) {
        sol -= sols_in_month(year, month);
        month += 1;
    }
    Ok(CalendarDate::new(year, month, sol + 1))
}

/// Sols from the start of year 0 to a Darian date.
fn sol_of_date(date: CalendarDate) -> i64 {
    let months: i64 = (0..date.month)
        .map(|m| sols_in_month(date.year, m) as i64)
        .sum();
    sols_before_year(date.year as i64) + months + date.day as i64 - 1
}

#[derive(Debug, Clone, Default)]
pub struct MarsCalendar {
    context: CalendarContext,
}

impl MarsCalendar {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_context(context: CalendarContext) -> Self {
        Self { context }
    }
}

impl CalendarSystem for MarsCalendar {
    fn id(&self) -> &str {
        "mars"
    }

    fn context(&self) -> Option<&CalendarContext> {
        Some(&self.context)
    }

    fn first_month_name(&self) -> Option<&str> {
        Some("Sagittarius")
    }

    /// Uses the exact instant, so the sol may change during an Earth day.
    fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
        let msd = mars_sol_date(julian_date(instant));
        date_of_sol(msd.floor() as i64 - EPOCH_MSD)
    }

    /// Returns the first Earth day whose midnight falls within the sol.
    fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
        check_month(self.id(), date.month, MONTHS)?;
        let msd = (EPOCH_MSD + sol_of_date(date)) as f64;
        let jdn = (julian_date_of_msd(msd) + 0.5).ceil() as i64;
        // Gregorian years beyond chrono's range do not fit a `CalendarDate`.
        Date::from_jdn(jdn)
            .to_naive()
            .ok_or(CalendarError::OutOfRange)?;
        Ok(gregorian_of(jdn))
    }

    fn months_in_year(&self, _year: i32) -> Result<u32> {
        Ok(MONTHS)
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        check_month(self.id(), month, MONTHS)?;
        Ok(sols_in_month(year, month))
    }

    fn is_leap_year(&self, year: i32) -> Result<bool> {
        Ok(is_darian_leap_year(year))
    }
}
