//! Ethiopian calendar.

use chrono::NaiveDateTime;

use crate::calendar::{
    CalendarContext, CalendarDate, CalendarSystem, check_month, gregorian_of, jdn_of, to_year,
};
use crate::error::Result;

/// JDN of 1 Meskerem 1 (Julian 29 August 8 CE), the noon after JD 1724220.5.
pub const EPOCH: i64 = 1_724_221;

/// Index of Pagumen, the short thirteenth month.
pub const PAGUMEN: u32 = 12;

/// The Ethiopian calendar: twelve months of 30 days and Pagumen with 5 or 6.
///
/// Every fourth year is leap, the one before a year divisible by four.
#[derive(Debug, Clone, Default)]
pub struct EthiopianCalendar {
    context: CalendarContext,
}

impl EthiopianCalendar {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_context(context: CalendarContext) -> Self {
        Self { context }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year as i64 + 1).rem_euclid(4) == 0
}

/// JDN of a date, `month` 0-based. Days past the end of a month roll over.
pub fn to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let year = year as i64;
    EPOCH + 365 * (year - 1) + year.div_euclid(4) + 30 * month as i64 + day as i64 - 1
}

/// Inverse of [`to_jdn`].
pub fn from_jdn(jdn: i64) -> Result<CalendarDate> {
    let year = to_year((4 * (jdn - EPOCH) + 1463).div_euclid(1461))?;
    let day_of_year = (jdn - to_jdn(year, 0, 1)) as u32;
    Ok(CalendarDate::new(
        year,
        day_of_year / 30,
        day_of_year % 30 + 1,
    ))
}

impl CalendarSystem for EthiopianCalendar {
    fn id(&self) -> &str {
        "ethiopic"
    }

    fn context(&self) -> Option<&CalendarContext> {
        Some(&self.context)
    }

    fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
        from_jdn(jdn_of(instant))
    }

    fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
        check_month(self.id(), date.month, 13)?;
        Ok(gregorian_of(to_jdn(date.year, date.month, date.day)))
    }

    fn months_in_year(&self, _year: i32) -> Result<u32> {
        Ok(13)
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        check_month(self.id(), month, 13)?;
        Ok(match month {
            PAGUMEN if is_leap_year(year) => 6,
            PAGUMEN => 5,
            _ => 30,
        })
    }

    fn is_leap_year(&self, year: i32) -> Result<bool> {
        Ok(is_leap_year(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;
    use crate::input::DateInput;

    #[test]
    fn epoch() {
        assert_eq!(EPOCH, to_jdn(1, 0, 1));
        assert_eq!(Ok(CalendarDate::new(1, 0, 1)), from_jdn(EPOCH));
        assert_eq!((8, 8, 29), Date::from_jdn(EPOCH).julian());
    }

    #[test]
    fn known_dates() {
        let cal = EthiopianCalendar::new();
        let data = [
            ("2023-05-24", (2015, 8, 16)),
            ("2023-09-11", (2015, 12, 6)),
            ("2023-09-12", (2016, 0, 1)),
            ("2024-09-11", (2017, 0, 1)),
        ];
        for (iso, (y, m, d)) in data {
            let date = cal.convert_from_gregorian(&DateInput::from(iso)).unwrap();
            assert_eq!(CalendarDate::new(y, m, d), date, "{iso}");
        }
    }

    #[test]
    fn round_trip() {
        let cal = EthiopianCalendar::new();
        for jdn in (1_700_000..2_470_000).step_by(97) {
            let greg = gregorian_of(jdn);
            let date = cal
                .convert_from_gregorian(&DateInput::from(greg))
                .unwrap();
            assert_eq!(Ok(greg), cal.convert_to_gregorian(date), "{date}");
        }
    }

    #[test]
    fn year_lengths() {
        let cal = EthiopianCalendar::new();
        for year in 2010..2020 {
            let total: u32 = (0..13).map(|m| cal.days_in_month(year, m).unwrap()).sum();
            let leap = cal.is_leap_year(year).unwrap();
            assert_eq!(if leap { 366 } else { 365 }, total, "{year}");
            assert_eq!(to_jdn(year + 1, 0, 1) - to_jdn(year, 0, 1), total as i64);
        }
        assert!(is_leap_year(2015));
        assert!(!is_leap_year(2016));
    }

    #[test]
    fn month_names() {
        let cal = EthiopianCalendar::new();
        assert_eq!("Pagumen", cal.localized_month_name(12).unwrap());
        assert!(cal.localized_month_name(13).is_err());
    }
}
