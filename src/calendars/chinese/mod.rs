//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 默認採用 `icu_calendar` 的天文推算（[`LunisolarSource::Host`]），失敗時退回
//! 近似表 [`table`]。夏曆轉公曆時以近似表估算，再於其前後二分查找天文推算
//! 結果相符之日，故往返轉換精確。只用近似表（[`LunisolarSource::Table`]）時
//! 往返轉換並不精確，可能相差數日。
//!
//! [`CalendarDate`] 中的月份為該年第幾個月（0 起算，閏月亦計），年份為歲首
//! 所在的公元年。若須區分平閏月，可用 [`ChineseCalendar::lunar_date`]。

use chrono::NaiveDateTime;
use icu_calendar::cal::Chinese;
use tracing::{trace, warn};

use crate::calendar::{
    CalendarContext, CalendarDate, CalendarSystem, check_month, gregorian_of, jdn_of,
};
use crate::date::Date;
use crate::error::{CalendarError, Result};

pub mod fmt;
pub mod table;

/// 近似表估算與實際日期相差的上限（日）。表外年份按章平移，閏月位置可能與
/// 實際不同，故取三個月。
const SEARCH_RADIUS: i64 = 90;

/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月稱「冬月」「臘月」。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// 公曆轉夏曆所用的資料來源
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LunisolarSource {
    /// `icu_calendar` 的天文推算，失敗時退回近似表
    #[default]
    Host,
    /// 只用近似表
    Table,
}

/// 夏曆（農曆）
///
/// # 用例
///
/// ```
/// use kalendarilo_convert::{CalendarDate, CalendarSystem, DateInput};
/// use kalendarilo_convert::calendars::ChineseCalendar;
///
/// let cal = ChineseCalendar::new();
/// let date = cal.convert_from_gregorian(&DateInput::from("2024-02-10")).unwrap();
///
/// assert_eq!(CalendarDate::new(2024, 0, 1), date); // 甲辰年正月初一
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChineseCalendar {
    context: CalendarContext,
    source: LunisolarSource,
}

impl ChineseCalendar {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_context(context: CalendarContext) -> Self {
        Self {
            context,
            source: LunisolarSource::default(),
        }
    }
    pub fn with_source(mut self, source: LunisolarSource) -> Self {
        self.source = source;
        self
    }
    pub fn source(&self) -> LunisolarSource {
        self.source
    }

    /// 取得給定日期的夏曆年月日，返回格式為 `(年, 月, 日)`，年為歲首所在公元年。
    ///
    /// 只用天文推算，不退回近似表。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_convert::Date;
    /// use kalendarilo_convert::calendars::ChineseCalendar;
    /// use kalendarilo_convert::calendars::chinese::Month::*;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1);
    ///
    /// assert_eq!(Ok((1999, Common(11), 25)), ChineseCalendar::lunar_date(date));
    /// ```
    pub fn lunar_date(date: Date) -> Result<(i32, Month, u32)> {
        let lunar = host_date(date.jdn())?;
        let month_info = lunar.month();
        let num = u32::from(month_info.month_number());
        let month = if month_info.is_leap() {
            Month::Leap(num)
        } else {
            Month::Common(num)
        };
        Ok((
            lunar.cyclic_year().related_iso,
            month,
            u32::from(lunar.day_of_month().0),
        ))
    }

    fn from_host(jdn: i64) -> Result<CalendarDate> {
        let lunar = host_date(jdn)?;
        Ok(CalendarDate::new(
            lunar.cyclic_year().related_iso,
            u32::from(lunar.month().ordinal) - 1,
            u32::from(lunar.day_of_month().0),
        ))
    }

    /// 以近似表估算，再二分查找天文推算結果為 `target` 之日的 JDN。
    fn search(&self, target: CalendarDate) -> Result<i64> {
        let invalid = || CalendarError::InvalidDateValue {
            calendar: self.id().to_owned(),
            year: target.year,
            month: target.month,
            day: target.day,
        };
        if target.month > 12 || !(1..=30).contains(&target.day) {
            return Err(invalid());
        }

        let estimate = table::to_jdn(target.year, target.month, target.day);
        let (mut low, mut high) = (estimate - SEARCH_RADIUS, estimate + SEARCH_RADIUS);
        while low <= high {
            let mid = low + (high - low) / 2;
            let probe = Self::from_host(mid)?;
            trace!(jdn = mid, %probe, %target, "chinese search probe");
            match probe.cmp(&target) {
                std::cmp::Ordering::Equal => return Ok(mid),
                std::cmp::Ordering::Less => low = mid + 1,
                std::cmp::Ordering::Greater => high = mid - 1,
            }
        }
        Err(invalid())
    }

    /// 天文推算所得的該月首日，失敗時返回 `None` 以便退回近似表。
    fn host_month(&self, year: i32, month: u32) -> Option<icu_calendar::Date<Chinese>> {
        if self.source == LunisolarSource::Table {
            return None;
        }
        let first = self.search(CalendarDate::new(year, month, 1)).ok()?;
        host_date(first).ok()
    }
}

fn host_date(jdn: i64) -> Result<icu_calendar::Date<Chinese>> {
    let (year, month, day) = Date::from_jdn(jdn).gregorian();
    let iso = icu_calendar::Date::try_new_iso(year, month as u8, day as u8)
        .map_err(|_| CalendarError::OutOfRange)?;
    Ok(iso.to_calendar(Chinese::new()))
}

impl CalendarSystem for ChineseCalendar {
    fn id(&self) -> &str {
        "chinese"
    }

    fn context(&self) -> Option<&CalendarContext> {
        Some(&self.context)
    }

    fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
        let jdn = jdn_of(instant);
        match self.source {
            LunisolarSource::Host => Self::from_host(jdn).or_else(|err| {
                warn!(jdn, %err, "lunisolar calculation failed, using the new-year table");
                Ok(table::from_jdn(jdn))
            }),
            LunisolarSource::Table => Ok(table::from_jdn(jdn)),
        }
    }

    /// 只用近似表時，結果可能與
    /// [`convert_from_gregorian`](Self::convert_from_gregorian) 相差數日。
    ///
    /// # Errors
    ///
    /// 天文推算中無此日時返回 [`CalendarError::InvalidDateValue`]。
    fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
        if self.source == LunisolarSource::Host {
            match self.search(date) {
                Ok(jdn) => return Ok(gregorian_of(jdn)),
                Err(err @ CalendarError::InvalidDateValue { .. }) => return Err(err),
                Err(err) => {
                    warn!(%date, %err, "lunisolar calculation failed, using the new-year table");
                }
            }
        }
        check_month(self.id(), date.month, table::months_in_year(date.year))?;
        Ok(gregorian_of(table::to_jdn(date.year, date.month, date.day)))
    }

    fn months_in_year(&self, year: i32) -> Result<u32> {
        Ok(match self.host_month(year, 0) {
            Some(first) => u32::from(first.months_in_year()),
            None => table::months_in_year(year),
        })
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        check_month(self.id(), month, self.months_in_year(year)?)?;
        Ok(match self.host_month(year, month) {
            Some(first) => u32::from(first.days_in_month()),
            None => table::month_length(year, month),
        })
    }

    fn is_leap_year(&self, year: i32) -> Result<bool> {
        Ok(self.months_in_year(year)? == 13)
    }

    /// 閏月冠以「閏」（其他語言冠以 `Leap`），其後各月按月序號取名。
    fn month_name_in_year(&self, year: i32, month: u32) -> Result<String> {
        check_month(self.id(), month, self.months_in_year(year)?)?;
        let Some(first) = self.host_month(year, month) else {
            return self.localized_month_name(i64::from(month));
        };
        let info = first.month();
        let num = u32::from(info.month_number());
        let lunar = if info.is_leap() {
            Month::Leap(num)
        } else {
            Month::Common(num)
        };
        if self.locale().to_ascii_lowercase().starts_with("zh") {
            return Ok(lunar.name());
        }
        let name = self.localized_month_name(i64::from(num) - 1)?;
        Ok(if lunar.is_leap() {
            format!("Leap {name}")
        } else {
            name
        })
    }
}

/// 取得所給公元年的干支。
///
/// # 用例
///
/// ```
/// use kalendarilo_convert::calendars::chinese::sexagenary_for_year;
///
/// assert_eq!(1, sexagenary_for_year(-2696));
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DateInput;

    fn lunar(y: i32, m: u32, d: u32) -> (i32, Month, u32) {
        ChineseCalendar::lunar_date(Date::from_gregorian(y, m, d)).unwrap()
    }

    #[test]
    fn lunar_dates() {
        use Month::*;
        let data = [
            ((2017, 1, 27), (2016, Common(12), 30)),
            ((2017, 1, 28), (2017, Common(1), 1)),
            ((2017, 7, 22), (2017, Common(6), 29)),
            ((2017, 7, 23), (2017, Leap(6), 1)),
            ((2023, 4, 10), (2023, Leap(2), 20)),
            ((2023, 5, 24), (2023, Common(4), 6)),
        ];
        for ((y, m, d), std) in data {
            assert_eq!(std, lunar(y, m, d), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn ordinal_months_count_leap_months() {
        let cal = ChineseCalendar::new();
        let date = cal
            .convert_from_gregorian(&DateInput::from("2023-05-24"))
            .unwrap();
        assert_eq!(CalendarDate::new(2023, 4, 6), date);
        let date = cal
            .convert_from_gregorian(&DateInput::from("2017-08-22"))
            .unwrap();
        assert_eq!(CalendarDate::new(2017, 7, 1), date);
    }

    #[test]
    fn table_source() {
        let cal = ChineseCalendar::new().with_source(LunisolarSource::Table);
        let date = cal
            .convert_from_gregorian(&DateInput::from("2023-05-24"))
            .unwrap();
        assert_eq!(CalendarDate::new(2023, 4, 5), date);
    }

    #[test]
    fn inverse() {
        let cal = ChineseCalendar::new();
        assert_eq!(
            Ok(CalendarDate::new(2023, 4, 24)),
            cal.convert_to_gregorian(CalendarDate::new(2023, 4, 6))
        );
        let table = ChineseCalendar::new().with_source(LunisolarSource::Table);
        assert_eq!(
            Ok(CalendarDate::new(2023, 4, 25)),
            table.convert_to_gregorian(CalendarDate::new(2023, 4, 6))
        );
        assert!(matches!(
            cal.convert_to_gregorian(CalendarDate::new(2023, 4, 31)),
            Err(CalendarError::InvalidDateValue { .. })
        ));
    }

    #[test]
    fn table_stays_near_host() {
        let cal = ChineseCalendar::new();
        for jdn in (Date::from_gregorian(2020, 2, 1).jdn()..Date::from_gregorian(2050, 1, 1).jdn())
            .step_by(29)
        {
            let greg = gregorian_of(jdn);
            let date = cal
                .convert_from_gregorian(&DateInput::from(greg))
                .unwrap();
            let back = table::to_jdn(date.year, date.month, date.day);
            assert!((back - jdn).abs() <= 60, "{greg} -> {date}");
            assert_eq!(Ok(greg), cal.convert_to_gregorian(date));
        }
    }

    #[test]
    fn months_in_year() {
        let cal = ChineseCalendar::new();
        assert_eq!(Ok(13), cal.months_in_year(2023));
        assert_eq!(Ok(12), cal.months_in_year(2024));
        assert!(cal.convert_to_gregorian(CalendarDate::new(2023, 12, 1)).is_ok());
        assert!(cal.convert_to_gregorian(CalendarDate::new(2024, 12, 1)).is_err());
    }

    #[test]
    fn years_outside_the_table() {
        // 1984 年閏十月
        let cal = ChineseCalendar::new();
        let date = cal
            .convert_from_gregorian(&DateInput::from("1985-02-10"))
            .unwrap();
        assert_eq!(CalendarDate::new(1984, 12, 21), date);
        assert_eq!(Ok(CalendarDate::new(1985, 1, 10)), cal.convert_to_gregorian(date));
        assert_eq!(Ok(13), cal.months_in_year(1984));
        assert_eq!(Ok(true), cal.is_leap_year(1984));
        assert_eq!(Ok(30), cal.days_in_month(1984, 12));
        assert_eq!(Ok(12), cal.months_in_year(1985));
    }

    #[test]
    fn month_names() {
        let cal = ChineseCalendar::new();
        assert_eq!("Fifth Month", cal.localized_month_name(4).unwrap());
        assert_eq!("五月", cal.month_names("zh").unwrap()[4]);
        // 2023 年閏二月，第 5 個月為四月
        for (month, name) in [
            (1, "Second Month"),
            (2, "Leap Second Month"),
            (4, "Fourth Month"),
            (12, "Twelfth Month"),
        ] {
            assert_eq!(Ok(name.to_owned()), cal.month_name_in_year(2023, month));
        }
        assert!(cal.month_name_in_year(2024, 12).is_err());
    }

    #[test]
    fn chinese_month_names() {
        let context = CalendarContext::new(
            "zh-TW",
            chrono::Weekday::Sun,
            std::sync::Arc::new(crate::locale::MonthNameCache::default()),
        );
        let cal = ChineseCalendar::with_context(context);
        assert_eq!(Ok("閏二月".to_owned()), cal.month_name_in_year(2023, 2));
        assert_eq!(Ok("臘月".to_owned()), cal.month_name_in_year(2023, 12));
        assert_eq!("閏六月", Month::Leap(6).name());
    }

    #[test]
    fn year_sexagenary() {
        for (std, year) in [(60, -2697), (1, -2696), (17, 2000), (40, 2023)] {
            assert_eq!(std, sexagenary_for_year(year));
        }
    }
}
