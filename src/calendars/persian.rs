//! Persian (Solar Hijri, Jalali) calendar.

use chrono::NaiveDateTime;

use crate::calendar::{
    CalendarContext, CalendarDate, CalendarSystem, check_month, gregorian_of, jdn_of,
};
use crate::error::Result;
use crate::jdn;

/// The Persian calendar: six months of 31 days, five of 30 and Esfand with
/// 29 or 30, with leap years placed by the 33-year arithmetic cycle.
#[derive(Debug, Clone, Default)]
pub struct PersianCalendar {
    context: CalendarContext,
}

impl PersianCalendar {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_context(context: CalendarContext) -> Self {
        Self { context }
    }
}

impl CalendarSystem for PersianCalendar {
    fn id(&self) -> &str {
        "persian"
    }

    fn context(&self) -> Option<&CalendarContext> {
        Some(&self.context)
    }

    fn first_month_name(&self) -> Option<&str> {
        Some("Farvardin")
    }

    fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
        let (year, month, day) = jdn::jdn_to_persian(jdn_of(instant));
        Ok(CalendarDate::new(year, month - 1, day))
    }

    fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
        check_month(self.id(), date.month, 12)?;
        Ok(gregorian_of(jdn::persian_to_jdn(
            date.year,
            date.month + 1,
            date.day,
        )))
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        check_month(self.id(), month, 12)?;
        Ok(jdn::persian_month_length(year, month + 1))
    }

    fn is_leap_year(&self, year: i32) -> Result<bool> {
        Ok(jdn::persian_leap_year(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DateInput;

    #[test]
    fn known_dates() {
        let cal = PersianCalendar::new();
        let data = [
            ("2023-05-24", (1402, 2, 3)),
            ("2023-03-21", (1402, 0, 1)),
            ("2023-03-20", (1401, 11, 29)),
            ("2025-03-20", (1403, 11, 30)),
        ];
        for (iso, (y, m, d)) in data {
            let date = cal.convert_from_gregorian(&DateInput::from(iso)).unwrap();
            assert_eq!(CalendarDate::new(y, m, d), date, "{iso}");
        }
    }

    #[test]
    fn round_trip() {
        let cal = PersianCalendar::new();
        for jdn in (2_440_000..2_470_000).step_by(11) {
            let greg = gregorian_of(jdn);
            let date = cal
                .convert_from_gregorian(&DateInput::from(greg))
                .unwrap();
            assert_eq!(Ok(greg), cal.convert_to_gregorian(date), "{date}");
        }
    }

    #[test]
    fn year_lengths() {
        let cal = PersianCalendar::new();
        for year in 1395..1410 {
            let total: u32 = (0..12).map(|m| cal.days_in_month(year, m).unwrap()).sum();
            let leap = cal.is_leap_year(year).unwrap();
            assert_eq!(if leap { 366 } else { 365 }, total, "{year}");
        }
    }

    #[test]
    fn month_names() {
        let cal = PersianCalendar::new();
        assert_eq!("Khordad", cal.localized_month_name(2).unwrap());
        assert_eq!("خرداد", cal.month_names("fa-IR").unwrap()[2]);
        assert!(cal.localized_month_name(12).is_err());
    }
}
