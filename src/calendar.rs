//! The contract every calendar implements.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::{CalendarError, Result};
use crate::input::DateInput;
use crate::locale::MonthNameCache;

/// Locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// A date in some calendar.
///
/// `month` is 0-based and `day` is 1-based, whatever the calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

/// Formats as `YYYY-MM-DD` with a 1-based month.
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

/// Month names a date library merges into its own locale data so that
/// dates of a calendar are formatted with that calendar's month names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleOverride {
    pub months: Vec<String>,
    pub months_short: Vec<String>,
}

impl LocaleOverride {
    /// Builds the override from full month names, abbreviating each to its
    /// first three characters.
    pub fn from_months(months: Vec<String>) -> Self {
        let months_short = months.iter().map(|m| m.chars().take(3).collect()).collect();
        Self {
            months,
            months_short,
        }
    }
}

/// Locale configuration and month-name cache shared by calendar instances.
#[derive(Debug, Clone)]
pub struct CalendarContext {
    locale: String,
    first_day_of_week: Weekday,
    names: Arc<MonthNameCache>,
}

impl CalendarContext {
    pub fn new(
        locale: impl Into<String>,
        first_day_of_week: Weekday,
        names: Arc<MonthNameCache>,
    ) -> Self {
        Self {
            locale: locale.into(),
            first_day_of_week,
            names,
        }
    }
    pub fn locale(&self) -> &str {
        &self.locale
    }
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }
    pub fn names(&self) -> &MonthNameCache {
        &self.names
    }
}

impl Default for CalendarContext {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, Weekday::Sun, Arc::default())
    }
}

/// Conversion contract between one calendar and the Gregorian calendar.
///
/// A calendar has to provide [`id`](Self::id),
/// [`from_gregorian_instant`](Self::from_gregorian_instant) and
/// [`convert_to_gregorian`](Self::convert_to_gregorian); the registry
/// refuses calendars whose conversions still report
/// [`CalendarError::Unimplemented`]. Month names come from
/// [`context`](Self::context) when one is given. The remaining operations
/// are optional capabilities; callers fall back to generic behavior when
/// they report `Unimplemented`.
pub trait CalendarSystem: fmt::Debug + Send + Sync {
    /// Identifier used for month-name lookup, e.g. `"persian"`.
    fn id(&self) -> &str;

    fn context(&self) -> Option<&CalendarContext> {
        None
    }

    fn locale(&self) -> &str {
        self.context().map_or(DEFAULT_LOCALE, |c| c.locale())
    }

    fn first_day_of_week(&self) -> Weekday {
        self.context()
            .map_or(Weekday::Sun, |c| c.first_day_of_week())
    }

    /// Converts any accepted Gregorian input into a date of this calendar.
    fn convert_from_gregorian(&self, input: &DateInput) -> Result<CalendarDate> {
        let instant = input.resolve()?;
        self.from_gregorian_instant(&instant)
    }

    /// Converts a UTC instant into a date of this calendar.
    fn from_gregorian_instant(&self, _instant: &NaiveDateTime) -> Result<CalendarDate> {
        Err(CalendarError::unimplemented(self.id(), "from_gregorian_instant"))
    }

    /// Converts a date of this calendar into a Gregorian date (0-based month).
    fn convert_to_gregorian(&self, _date: CalendarDate) -> Result<CalendarDate> {
        Err(CalendarError::unimplemented(self.id(), "convert_to_gregorian"))
    }

    /// English name of the month this calendar starts its year with, when
    /// the name source may list months in another order.
    fn first_month_name(&self) -> Option<&str> {
        None
    }

    /// Month names in calendar order.
    fn month_names(&self, locale: &str) -> Result<Vec<String>> {
        let context = self
            .context()
            .ok_or_else(|| CalendarError::unimplemented(self.id(), "month_names"))?;
        let names = context
            .names()
            .month_names(locale, self.id(), self.first_month_name())?;
        Ok(names.to_vec())
    }

    /// Name of month `index` in the calendar's own locale.
    fn localized_month_name(&self, index: i64) -> Result<String> {
        let names = self.month_names(self.locale())?;
        usize::try_from(index)
            .ok()
            .and_then(|i| names.get(i))
            .cloned()
            .ok_or_else(|| CalendarError::InvalidMonthIndex {
                calendar: self.id().to_owned(),
                index,
                count: names.len() as u32,
            })
    }

    /// Name of month `month` of `year` in the calendar's own locale.
    ///
    /// Lunisolar calendars override this where a month index does not name
    /// the same month every year.
    fn month_name_in_year(&self, _year: i32, month: u32) -> Result<String> {
        self.localized_month_name(i64::from(month))
    }

    fn locale_override(&self, locale: &str) -> Result<LocaleOverride> {
        Ok(LocaleOverride::from_months(self.month_names(locale)?))
    }

    fn months_in_year(&self, _year: i32) -> Result<u32> {
        Ok(12)
    }

    fn days_in_month(&self, _year: i32, _month: u32) -> Result<u32> {
        Err(CalendarError::unimplemented(self.id(), "days_in_month"))
    }

    fn is_leap_year(&self, _year: i32) -> Result<bool> {
        Err(CalendarError::unimplemented(self.id(), "is_leap_year"))
    }
}

/// Fails unless `month < count`.
pub(crate) fn check_month(calendar: &str, month: u32, count: u32) -> Result<()> {
    if month < count {
        Ok(())
    } else {
        Err(CalendarError::InvalidMonthIndex {
            calendar: calendar.to_owned(),
            index: month as i64,
            count,
        })
    }
}

/// JDN of the Gregorian day an instant falls on.
pub(crate) fn jdn_of(instant: &NaiveDateTime) -> i64 {
    Date::from_naive(instant.date()).jdn()
}

/// Gregorian fields (0-based month) of a JDN.
pub(crate) fn gregorian_of(jdn: i64) -> CalendarDate {
    let (year, month, day) = Date::from_jdn(jdn).gregorian();
    CalendarDate::new(year, month - 1, day)
}

pub(crate) fn to_year(year: i64) -> Result<i32> {
    i32::try_from(year).map_err(|_| CalendarError::OutOfRange)
}
