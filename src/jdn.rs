//! Arithmetic calendars expressed directly in Julian day numbers.
//!
//! Months in this module are 1-based, following the customary numbering of
//! each calendar. Calendar types in [`crate::calendars`] shift them to the
//! 0-based months used by [`crate::CalendarDate`].
//!
//! Gregorian conversion lives on [`Date`]; [`gregorian_to_jdn`] and
//! [`jdn_to_gregorian`] are thin wrappers kept here so that every arithmetic
//! calendar can be reached from one place.

use crate::date::Date;

/// JDN of a Gregorian date (astronomical year numbering, 1-based month).
pub fn gregorian_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    Date::from_gregorian(year, month, day).jdn()
}

/// Gregorian `(year, month, day)` of a JDN, with a 1-based month.
pub fn jdn_to_gregorian(jdn: i64) -> (i32, u32, u32) {
    Date::from_jdn(jdn).gregorian()
}

// --- Hebrew ---------------------------------------------------------------

/// JDN of 1 Tishri AM 1 before postponements.
const HEBREW_EPOCH: i64 = 347_998;

/// Hebrew month numbers, counted from Nisan. The year number changes at
/// [`TISHRI`].
pub const NISAN: u32 = 1;
pub const TISHRI: u32 = 7;
pub const ADAR: u32 = 12;
pub const ADAR_II: u32 = 13;

/// Leap years are years 3, 6, 8, 11, 14, 17 and 19 of the Metonic cycle.
pub fn hebrew_leap_year(year: i32) -> bool {
    (7 * year as i64 + 1).rem_euclid(19) < 7
}

/// 13 in leap years, 12 otherwise.
pub fn hebrew_months_in_year(year: i32) -> u32 {
    if hebrew_leap_year(year) { 13 } else { 12 }
}

/// Days from the epoch to the molad of Tishri, with the first postponement
/// (molad zaken and lo ADU rosh) applied.
fn hebrew_elapsed_days(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12084 + 13753 * months;
    let mut day = months * 29 + parts.div_euclid(25920);
    if (3 * (day + 1)).rem_euclid(7) < 3 {
        day += 1;
    }
    day
}

/// Second postponement, keeping year lengths within 353..=355 and 383..=385.
fn hebrew_year_delay(year: i64) -> i64 {
    let last = hebrew_elapsed_days(year - 1);
    let present = hebrew_elapsed_days(year);
    let next = hebrew_elapsed_days(year + 1);
    if next - present == 356 {
        2
    } else if present - last == 382 {
        1
    } else {
        0
    }
}

/// JDN of 1 Tishri of `year`.
fn hebrew_new_year(year: i64) -> i64 {
    HEBREW_EPOCH + hebrew_elapsed_days(year) + hebrew_year_delay(year)
}

/// Number of days in a Hebrew year: 353, 354 or 355, plus 30 in leap years.
pub fn hebrew_year_length(year: i32) -> u32 {
    let year = year as i64;
    (hebrew_new_year(year + 1) - hebrew_new_year(year)) as u32
}

/// Number of days in a Hebrew month.
///
/// Cheshvan has 30 days only in complete years (length ending in 5) and
/// Kislev has 29 only in deficient years (length ending in 3).
pub fn hebrew_month_length(year: i32, month: u32) -> u32 {
    match month {
        2 | 4 | 6 | 10 | ADAR_II => 29,
        ADAR if !hebrew_leap_year(year) => 29,
        8 if hebrew_year_length(year) % 10 != 5 => 29,
        9 if hebrew_year_length(year) % 10 == 3 => 29,
        _ => 30,
    }
}

/// Months of `year` in chronological order, starting at Tishri.
fn hebrew_months_from_tishri(year: i32) -> impl Iterator<Item = u32> {
    (TISHRI..=hebrew_months_in_year(year)).chain(NISAN..TISHRI)
}

/// JDN of a Hebrew date.
///
/// # Example
///
/// ```
/// use kalendarilo_convert::jdn::{gregorian_to_jdn, hebrew_to_jdn};
///
/// // 4 Sivan 5783
/// assert_eq!(gregorian_to_jdn(2023, 5, 24), hebrew_to_jdn(5783, 3, 4));
/// ```
pub fn hebrew_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let mut jdn = hebrew_new_year(year as i64) + day as i64 - 1;
    for m in hebrew_months_from_tishri(year).take_while(|&m| m != month) {
        jdn += hebrew_month_length(year, m) as i64;
    }
    jdn
}

/// Hebrew `(year, month, day)` of a JDN.
pub fn jdn_to_hebrew(jdn: i64) -> (i32, u32, u32) {
    let mut year = ((jdn - HEBREW_EPOCH) * 98496).div_euclid(35975351) - 1;
    while jdn < hebrew_new_year(year) {
        year -= 1;
    }
    while jdn >= hebrew_new_year(year + 1) {
        year += 1;
    }
    let year = year as i32;
    let mut start = hebrew_new_year(year as i64);
    for month in hebrew_months_from_tishri(year) {
        let end = start + hebrew_month_length(year, month) as i64;
        if jdn < end {
            return (year, month, (jdn - start + 1) as u32);
        }
        start = end;
    }
    unreachable!("JDN {jdn} not inside Hebrew year {year}")
}

// --- Islamic (tabular) ----------------------------------------------------

/// JDN of 1 Muharram AH 1 (civil, Friday epoch).
const ISLAMIC_EPOCH: i64 = 1_948_440;

/// Leap years are years 2, 5, 7, 10, 13, 16, 18, 21, 24, 26 and 29 of each
/// 30-year cycle.
pub fn islamic_leap_year(year: i32) -> bool {
    (14 + 11 * year as i64).rem_euclid(30) < 11
}

/// JDN of a date in the tabular Islamic calendar.
///
/// Months alternate between 30 and 29 days; Dhu al-Hijjah has 30 days in
/// leap years.
pub fn islamic_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let (y, m) = (year as i64, month as i64);
    day as i64 + (59 * (m - 1) + 1).div_euclid(2) + (y - 1) * 354 + (3 + 11 * y).div_euclid(30)
        + ISLAMIC_EPOCH
        - 1
}

/// Tabular Islamic `(year, month, day)` of a JDN.
pub fn jdn_to_islamic(jdn: i64) -> (i32, u32, u32) {
    let year = (30 * (jdn - ISLAMIC_EPOCH) + 10646).div_euclid(10631) as i32;
    let since = jdn - (29 + islamic_to_jdn(year, 1, 1));
    let month = ((2 * since + 58).div_euclid(59) + 1).clamp(1, 12) as u32;
    let day = jdn - islamic_to_jdn(year, month, 1) + 1;
    (year, month, day as u32)
}

// --- Persian (33-year rule) -----------------------------------------------

/// JDN of 1 Farvardin AP 1.
const PERSIAN_EPOCH: i64 = 1_948_320;

/// Leap years follow the 33-year cycle: years whose `(25y + 11) mod 33` is
/// below 8.
pub fn persian_leap_year(year: i32) -> bool {
    (25 * year as i64 + 11).rem_euclid(33) < 8
}

fn persian_new_year(year: i64) -> i64 {
    PERSIAN_EPOCH + 365 * (year - 1) + (8 * year + 21).div_euclid(33)
}

/// Days before the first of a 1-based Persian month.
fn persian_month_offset(month: u32) -> i64 {
    let m = month as i64 - 1;
    if m < 7 { 31 * m } else { 30 * m + 6 }
}

/// Number of days in a Persian month: six months of 31, five of 30, and
/// Esfand with 29 or 30.
pub fn persian_month_length(year: i32, month: u32) -> u32 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        _ if persian_leap_year(year) => 30,
        _ => 29,
    }
}

/// JDN of a Persian (Jalali) date.
pub fn persian_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    persian_new_year(year as i64) + persian_month_offset(month) + day as i64 - 1
}

/// Persian `(year, month, day)` of a JDN.
pub fn jdn_to_persian(jdn: i64) -> (i32, u32, u32) {
    let mut year = 1 + (33 * (jdn - PERSIAN_EPOCH) + 3).div_euclid(12053);
    while jdn < persian_new_year(year) {
        year -= 1;
    }
    while jdn >= persian_new_year(year + 1) {
        year += 1;
    }
    let day_of_year = jdn - persian_new_year(year);
    let month = if day_of_year < 186 {
        day_of_year / 31 + 1
    } else {
        (day_of_year - 6) / 30 + 1
    };
    let day = day_of_year - persian_month_offset(month as u32) + 1;
    (year as i32, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAY_24_2023: i64 = 2460089;

    #[test]
    fn gregorian_wrappers() {
        assert_eq!(MAY_24_2023, gregorian_to_jdn(2023, 5, 24));
        assert_eq!((2023, 5, 24), jdn_to_gregorian(MAY_24_2023));
    }

    #[test]
    fn hebrew_known_dates() {
        assert_eq!((5783, 3, 4), jdn_to_hebrew(MAY_24_2023));
        // Rosh Hashanah 5784 and 5785
        assert_eq!(gregorian_to_jdn(2023, 9, 16), hebrew_to_jdn(5784, TISHRI, 1));
        assert_eq!(gregorian_to_jdn(2024, 10, 3), hebrew_to_jdn(5785, TISHRI, 1));
        // 1 Nisan 5784 (a leap year, so after Adar II)
        assert_eq!(gregorian_to_jdn(2024, 4, 9), hebrew_to_jdn(5784, NISAN, 1));
    }

    #[test]
    fn hebrew_year_shape() {
        assert!(hebrew_leap_year(5784));
        assert!(!hebrew_leap_year(5783));
        assert_eq!(383, hebrew_year_length(5784));
        assert_eq!(355, hebrew_year_length(5783));
        for year in [5783, 5784, 5785, 5786] {
            let total: u32 = (1..=hebrew_months_in_year(year))
                .map(|m| hebrew_month_length(year, m))
                .sum();
            assert_eq!(hebrew_year_length(year), total, "year {year}");
        }
        let leap_years: Vec<_> = (1..=19).filter(|&y| hebrew_leap_year(y)).collect();
        assert_eq!(vec![3, 6, 8, 11, 14, 17, 19], leap_years);
    }

    #[test]
    fn hebrew_round_trip() {
        for jdn in (2_400_000..2_470_000).step_by(7) {
            let (y, m, d) = jdn_to_hebrew(jdn);
            assert_eq!(jdn, hebrew_to_jdn(y, m, d), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn islamic_known_dates() {
        assert_eq!((1444, 11, 4), jdn_to_islamic(MAY_24_2023));
        // Tabular arithmetic lands one day behind Umm al-Qura here.
        assert_eq!((1447, 1, 10), jdn_to_islamic(gregorian_to_jdn(2025, 7, 6)));
        let leap_years: Vec<_> = (1..=30).filter(|&y| islamic_leap_year(y)).collect();
        assert_eq!(vec![2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29], leap_years);
    }

    #[test]
    fn islamic_round_trip() {
        for jdn in (2_400_000..2_470_000).step_by(3) {
            let (y, m, d) = jdn_to_islamic(jdn);
            assert_eq!(jdn, islamic_to_jdn(y, m, d), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn islamic_year_lengths() {
        for year in 1440..1460 {
            let length = islamic_to_jdn(year + 1, 1, 1) - islamic_to_jdn(year, 1, 1);
            assert_eq!(if islamic_leap_year(year) { 355 } else { 354 }, length);
        }
    }

    #[test]
    fn persian_known_dates() {
        assert_eq!((1402, 3, 3), jdn_to_persian(MAY_24_2023));
        assert_eq!(gregorian_to_jdn(2023, 3, 21), persian_to_jdn(1402, 1, 1));
        assert_eq!(gregorian_to_jdn(2025, 3, 21), persian_to_jdn(1404, 1, 1));
        assert!(persian_leap_year(1403));
        assert!(!persian_leap_year(1402));
    }

    #[test]
    fn persian_year_lengths() {
        for year in 1380..1420 {
            let length = persian_to_jdn(year + 1, 1, 1) - persian_to_jdn(year, 1, 1);
            let total: u32 = (1..=12).map(|m| persian_month_length(year, m)).sum();
            assert_eq!(length, total as i64, "year {year}");
            assert_eq!(persian_leap_year(year), length == 366);
        }
    }

    #[test]
    fn persian_round_trip() {
        for jdn in (2_400_000..2_470_000).step_by(5) {
            let (y, m, d) = jdn_to_persian(jdn);
            assert_eq!(jdn, persian_to_jdn(y, m, d), "{y}-{m}-{d}");
        }
    }
}
