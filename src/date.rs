//! Calendar-independant date.

use std::ops::{Add, Sub};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// JDN of 0001-01-01 (proleptic Gregorian) minus one, i.e. the offset
/// between chrono's "days from CE" count and the Julian day number.
const CE_JDN_OFFSET: i64 = 1_721_425;

/// A calendar-independant date, counted in Julian day numbers.
///
/// Every calendar in this crate converts to and from this type. Day 0 is
/// January 1, 4713 BC in the proleptic Julian calendar; earlier days are
/// negative.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: i64,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub const fn from_jdn(jdn: i64) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> i64 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc. `month` is 1-based. Days past the end of the month
    /// and months past December roll over into the following month or year.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_convert::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1);
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(Date::from_gregorian(2000, 3, 1), Date::from_gregorian(2000, 2, 30));
    /// ```
    pub fn from_gregorian(year: i32, month: u32, day: u32) -> Self {
        let (y, m) = normalize_month(year, month);
        let a = (14 - m).div_euclid(12);
        let y = y + 4800 - a;
        let m = m + 12 * a - 3;
        Self::from_jdn(
            day as i64 + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
                + y.div_euclid(400)
                - 32045,
        )
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format, with a 1-based month.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_convert::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, u32, u32) {
        let a = self.jdn + 32044;
        let b = (4 * a + 3).div_euclid(146097);
        let c = a - (146097 * b).div_euclid(4);
        let d = (4 * c + 3).div_euclid(1461);
        let e = c - (1461 * d).div_euclid(4);
        let m = (5 * e + 2).div_euclid(153);
        let day = e - (153 * m + 2).div_euclid(5) + 1;
        let month = m + 3 - 12 * m.div_euclid(10);
        let year = 100 * b + d - 4800 + m.div_euclid(10);
        (year as i32, month as u32, day as u32)
    }

    /// Creates a `Date` with a proleptic Julian calendar date.
    ///
    /// Year numbering and rollover behave as in [`Date::from_gregorian`].
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_convert::Date;
    ///
    /// assert_eq!(Date::from_gregorian(2023, 1, 14), Date::from_julian(2023, 1, 1));
    /// ```
    pub fn from_julian(year: i32, month: u32, day: u32) -> Self {
        let (y, m) = normalize_month(year, month);
        let a = (14 - m).div_euclid(12);
        let y = y + 4800 - a;
        let m = m + 12 * a - 3;
        Self::from_jdn(day as i64 + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - 32083)
    }
    /// Represents the date in proleptic Julian calendar, as `(year, month,
    /// day)` with a 1-based month.
    pub fn julian(&self) -> (i32, u32, u32) {
        let c = self.jdn + 32082;
        let d = (4 * c + 3).div_euclid(1461);
        let e = c - (1461 * d).div_euclid(4);
        let m = (5 * e + 2).div_euclid(153);
        let day = e - (153 * m + 2).div_euclid(5) + 1;
        let month = m + 3 - 12 * m.div_euclid(10);
        let year = d - 4800 + m.div_euclid(10);
        (year as i32, month as u32, day as u32)
    }

    /// Creates a `Date` from a chrono date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self::from_jdn(date.num_days_from_ce() as i64 + CE_JDN_OFFSET)
    }
    /// Converts the date into a chrono date.
    ///
    /// Returns `None` outside the range chrono supports.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        let days = i32::try_from(self.jdn - CE_JDN_OFFSET).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days)
    }

    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_convert::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1);
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_convert::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1);
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> u32 {
        (self.jdn.rem_euclid(7) + 1) as u32
    }
}

impl Add<i64> for Date {
    type Output = Date;
    fn add(self, rhs: i64) -> Self::Output {
        Date::from_jdn(self.jdn + rhs)
    }
}
impl Sub<Date> for Date {
    type Output = i64;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn - rhs.jdn
    }
}

/// Julian date (fractional days since noon of JDN 0) of a UTC instant.
///
/// Midnight falls on `.5`, so the JD of midnight is the JDN of that day
/// minus one half.
pub fn julian_date(instant: &NaiveDateTime) -> f64 {
    let day = Date::from_naive(instant.date()).jdn() as f64 - 0.5;
    let secs = instant.num_seconds_from_midnight() as f64 + instant.nanosecond() as f64 * 1e-9;
    day + secs / 86400.0
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Determines if `year` is a leap year in Julian calendar.
    pub fn from_julian(year: i32) -> Self {
        if year.rem_euclid(4) == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Length of a 1-based month shared by the Gregorian and Julian calendars.
pub(crate) fn western_month_length(month: u32, year_type: YearType) -> u32 {
    match month {
        2 if year_type.is_leap() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn normalize_month(year: i32, month: u32) -> (i64, i64) {
    let m0 = month as i64 - 1;
    (year as i64 + m0.div_euclid(12), m0.rem_euclid(12) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1);
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8);
        assert_eq!(2459466, date.jdn());
        let date = Date::from_gregorian(2023, 5, 24);
        assert_eq!(2460089, date.jdn());
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn astronomical_year_zero() {
        // JDN 0 is 4713 BC, i.e. astronomical year -4713 in the Julian
        // calendar and November 24 of -4713 in the proleptic Gregorian.
        assert_eq!((-4713, 11, 24), Date::from_jdn(0).gregorian());
        assert_eq!((-4712, 1, 1), Date::from_jdn(0).julian());
        // 1 BC is year 0, which is a Gregorian leap year.
        assert_eq!(1721060, Date::from_gregorian(0, 1, 1).jdn());
        assert_eq!(1721059, Date::from_gregorian(-1, 12, 31).jdn());
        assert!(YearType::from_gregorian(0).is_leap());
        assert_eq!((0, 2, 29), Date::from_jdn(1721060 + 59).gregorian());
    }

    #[test]
    fn negative_jdn_round_trip() {
        for jdn in [-1_000_000, -32045, -1, 0, 1, 2_460_089, 5_000_000] {
            let (y, m, d) = Date::from_jdn(jdn).gregorian();
            assert_eq!(jdn, Date::from_gregorian(y, m, d).jdn(), "gregorian {jdn}");
            let (y, m, d) = Date::from_jdn(jdn).julian();
            assert_eq!(jdn, Date::from_julian(y, m, d).jdn(), "julian {jdn}");
        }
    }

    #[test]
    fn rollover() {
        assert_eq!(
            Date::from_gregorian(2024, 1, 1),
            Date::from_gregorian(2023, 13, 1)
        );
        assert_eq!(
            Date::from_gregorian(2023, 3, 1),
            Date::from_gregorian(2023, 2, 29)
        );
    }

    #[test]
    fn naive_conversion() {
        let naive = NaiveDate::from_ymd_opt(2023, 5, 24).unwrap();
        let date = Date::from_naive(naive);
        assert_eq!(2460089, date.jdn());
        assert_eq!(Some(naive), date.to_naive());
    }

    #[test]
    fn to_day_of_week() {
        let date = Date::from_gregorian(1970, 1, 1);
        assert_eq!(4, date.day_of_week());
        let date = Date::from_gregorian(2021, 9, 8);
        assert_eq!(3, date.day_of_week());
    }

    #[test]
    fn fractional_julian_date() {
        let noon = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(2451545.0, julian_date(&noon));
        let midnight = noon.date().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(2451544.5, julian_date(&midnight));
    }

    #[test]
    fn arithmetic() {
        let date = Date::from_gregorian(2000, 2, 28);
        assert_eq!("2000-03-01", (date + 2).iso_gregorian());
        assert_eq!(366, Date::from_gregorian(2001, 1, 1) - Date::from_gregorian(2000, 1, 1));
    }

    #[test]
    fn iso_format() {
        assert_eq!("2021-09-08", Date::from_gregorian(2021, 9, 8).iso_gregorian());
    }
}

#[cfg(test)]
mod tests_priv {
    use super::*;

    #[test]
    fn priv_month_length() {
        use YearType::*;
        assert_eq!(28, western_month_length(2, Common));
        assert_eq!(29, western_month_length(2, Leap));
        assert_eq!(30, western_month_length(11, Common));
        assert_eq!(31, western_month_length(12, Leap));
    }
}
