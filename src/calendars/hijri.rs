//! Hijri calendar, Umm al-Qura variant.
//!
//! Gregorian to Hijri conversion uses the Umm al-Qura tables shipped with
//! `icu_calendar`. The tables have no closed-form inverse, so Hijri to
//! Gregorian conversion starts at the tabular (arithmetic) estimate and
//! binary-searches the days around it until the forward conversion matches.

use chrono::NaiveDateTime;
use icu_calendar::cal::HijriUmmAlQura;
use tracing::trace;

use crate::calendar::{
    CalendarContext, CalendarDate, CalendarSystem, check_month, gregorian_of, jdn_of,
};
use crate::date::Date;
use crate::error::{CalendarError, Result};
use crate::jdn;

/// Days searched on either side of the tabular estimate. Umm al-Qura months
/// never drift more than a couple of days from it.
const SEARCH_RADIUS: i64 = 30;

#[derive(Debug, Clone, Default)]
pub struct HijriCalendar {
    context: CalendarContext,
}

impl HijriCalendar {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_context(context: CalendarContext) -> Self {
        Self { context }
    }

    fn umm_al_qura(jdn: i64) -> Result<icu_calendar::Date<HijriUmmAlQura>> {
        let (year, month, day) = Date::from_jdn(jdn).gregorian();
        let iso = icu_calendar::Date::try_new_iso(year, month as u8, day as u8)
            .map_err(|_| CalendarError::OutOfRange)?;
        Ok(iso.to_calendar(HijriUmmAlQura::new()))
    }

    fn hijri_of(jdn: i64) -> Result<CalendarDate> {
        let date = Self::umm_al_qura(jdn)?;
        Ok(CalendarDate::new(
            date.extended_year(),
            u32::from(date.month().ordinal) - 1,
            u32::from(date.day_of_month().0),
        ))
    }

    /// JDN of a Hijri date, found by bisection around the tabular estimate.
    fn search(&self, target: CalendarDate) -> Result<i64> {
        let invalid = || CalendarError::InvalidDateValue {
            calendar: self.id().to_owned(),
            year: target.year,
            month: target.month,
            day: target.day,
        };
        check_month(self.id(), target.month, 12)?;
        if !(1..=30).contains(&target.day) {
            return Err(invalid());
        }

        let estimate = jdn::islamic_to_jdn(target.year, target.month + 1, target.day);
        let (mut low, mut high) = (estimate - SEARCH_RADIUS, estimate + SEARCH_RADIUS);
        while low <= high {
            let mid = low + (high - low) / 2;
            let probe = Self::hijri_of(mid)?;
            trace!(jdn = mid, %probe, %target, "hijri search probe");
            match probe.cmp(&target) {
                std::cmp::Ordering::Equal => return Ok(mid),
                std::cmp::Ordering::Less => low = mid + 1,
                std::cmp::Ordering::Greater => high = mid - 1,
            }
        }
        Err(invalid())
    }
}

impl CalendarSystem for HijriCalendar {
    fn id(&self) -> &str {
        "islamic"
    }

    fn context(&self) -> Option<&CalendarContext> {
        Some(&self.context)
    }

    fn first_month_name(&self) -> Option<&str> {
        Some("Muharram")
    }

    fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
        Self::hijri_of(jdn_of(instant))
    }

    /// # Errors
    ///
    /// [`CalendarError::InvalidDateValue`] if the month has no such day.
    fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
        Ok(gregorian_of(self.search(date)?))
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        let first = self.search(CalendarDate::new(year, month, 1))?;
        Ok(u32::from(Self::umm_al_qura(first)?.days_in_month()))
    }

    fn is_leap_year(&self, year: i32) -> Result<bool> {
        let first = self.search(CalendarDate::new(year, 0, 1))?;
        Ok(Self::umm_al_qura(first)?.days_in_year() > 354)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DateInput;

    #[test]
    fn known_dates() {
        let cal = HijriCalendar::new();
        let data = [
            ("2023-05-24", (1444, 10, 4)),
            ("2025-07-06T12:00:00Z", (1447, 0, 11)),
        ];
        for (iso, (y, m, d)) in data {
            let date = cal.convert_from_gregorian(&DateInput::from(iso)).unwrap();
            assert_eq!(CalendarDate::new(y, m, d), date, "{iso}");
        }
    }

    #[test]
    fn differs_from_arithmetic() {
        let instant = DateInput::from("2025-07-06").resolve().unwrap();
        assert_eq!((1447, 1, 10), jdn::jdn_to_islamic(jdn_of(&instant)));
    }

    #[test]
    fn round_trip() {
        let cal = HijriCalendar::new();
        for jdn in (2_450_000..2_470_000).step_by(23) {
            let greg = gregorian_of(jdn);
            let date = cal
                .convert_from_gregorian(&DateInput::from(greg))
                .unwrap();
            assert_eq!(Ok(greg), cal.convert_to_gregorian(date), "{date}");
        }
    }

    #[test]
    fn missing_day() {
        let cal = HijriCalendar::new();
        for day in [0, 31] {
            assert!(matches!(
                cal.convert_to_gregorian(CalendarDate::new(1444, 10, day)),
                Err(CalendarError::InvalidDateValue { .. })
            ));
        }
        let short = (0..12)
            .find(|&m| cal.days_in_month(1444, m).unwrap() == 29)
            .unwrap();
        assert!(matches!(
            cal.convert_to_gregorian(CalendarDate::new(1444, short, 30)),
            Err(CalendarError::InvalidDateValue { .. })
        ));
    }

    #[test]
    fn year_lengths() {
        let cal = HijriCalendar::new();
        for year in 1440..1450 {
            let total: u32 = (0..12).map(|m| cal.days_in_month(year, m).unwrap()).sum();
            let start = cal.search(CalendarDate::new(year, 0, 1)).unwrap();
            let next = cal.search(CalendarDate::new(year + 1, 0, 1)).unwrap();
            assert_eq!(next - start, total as i64, "{year}");
            assert!((353..=356).contains(&total), "{year}: {total}");
            assert_eq!(cal.is_leap_year(year).unwrap(), total > 354);
        }
    }
}
