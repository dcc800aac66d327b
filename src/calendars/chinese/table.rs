//! 近似夏曆表
//!
//! 收錄 2020 至 2050 年春節的公曆日期及閏年。月首一律按平均朔望月 29.5 日推算，
//! 歲末一月吸收餘下日數。表外年份按十九年一章（235 個朔望月）平移推算。

use crate::calendar::CalendarDate;
use crate::date::Date;

/// 表中首年
pub const FIRST_YEAR: i32 = 2020;
/// 表中末年
pub const LAST_YEAR: i32 = 2050;

/// 十九年一章的日數，即 235 個朔望月。
pub const METONIC_CYCLE_DAYS: f64 = 6939.688;

/// 各年春節的公曆 `(月, 日)`，自 [`FIRST_YEAR`] 起。
const NEW_YEARS: [(u32, u32); 31] = [
    (1, 25), (2, 12), (2, 1), (1, 22), (2, 10), (1, 29), (2, 17), (2, 6),
    (1, 26), (2, 13), (2, 3), (1, 23), (2, 11), (1, 31), (2, 19), (2, 8),
    (1, 28), (2, 15), (2, 4), (1, 24), (2, 12), (2, 1), (1, 22), (2, 10),
    (1, 30), (2, 17), (2, 6), (1, 26), (2, 14), (2, 2), (1, 23),
];

/// 有閏月的年份
const LEAP_YEARS: [i32; 12] = [
    2020, 2023, 2025, 2028, 2031, 2033, 2036, 2039, 2042, 2044, 2047, 2050,
];

/// 將表外年份映射到表內，返回 `(表內年份, 相差章數)`。
fn fold(year: i32) -> (i32, i64) {
    if (FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return (year, 0);
    }
    let offset = year as i64 - FIRST_YEAR as i64;
    let base = FIRST_YEAR + offset.rem_euclid(19) as i32;
    (base, offset.div_euclid(19))
}

/// 該年春節的 JDN。
///
/// ```
/// use kalendarilo_convert::Date;
/// use kalendarilo_convert::calendars::chinese::table;
///
/// assert_eq!(Date::from_gregorian(2024, 2, 10).jdn(), table::new_year(2024));
/// ```
pub fn new_year(year: i32) -> i64 {
    let (base, cycles) = fold(year);
    let (month, day) = NEW_YEARS[(base - FIRST_YEAR) as usize];
    let jdn = Date::from_gregorian(base, month, day).jdn();
    jdn + (cycles as f64 * METONIC_CYCLE_DAYS).round() as i64
}

pub fn is_leap_year(year: i32) -> bool {
    LEAP_YEARS.contains(&fold(year).0)
}

pub fn months_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 13 } else { 12 }
}

pub fn year_length(year: i32) -> u32 {
    (new_year(year + 1) - new_year(year)) as u32
}

/// 第 `month` 月（0 起算）首日距歲首的日數
pub fn month_start(month: u32) -> u32 {
    month * 59 / 2
}

/// 末月長度為全年餘下日數。
pub fn month_length(year: i32, month: u32) -> u32 {
    if month + 1 >= months_in_year(year) {
        year_length(year).saturating_sub(month_start(month))
    } else {
        month_start(month + 1) - month_start(month)
    }
}

/// 月份 0 起算；日數超出該月則順延。
pub fn to_jdn(year: i32, month: u32, day: u32) -> i64 {
    new_year(year) + month_start(month) as i64 + day as i64 - 1
}

pub fn from_jdn(jdn: i64) -> CalendarDate {
    let mut year = Date::from_jdn(jdn).gregorian().0;
    while jdn < new_year(year) {
        year -= 1;
    }
    while jdn >= new_year(year + 1) {
        year += 1;
    }
    let day = (jdn - new_year(year)) as u32;
    let month = (0..months_in_year(year))
        .rev()
        .find(|&m| month_start(m) <= day)
        .unwrap_or(0);
    CalendarDate::new(year, month, day - month_start(month) + 1)
}
