//! Date arithmetic in any registered calendar.
//!
//! [`CalendarDateTime`] pairs a UTC instant (the Gregorian shadow) with the
//! fields of that instant in the active calendar. The shadow is
//! authoritative: every operation computes a new instant and derives the
//! calendar fields from it again.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use tracing::debug;

use crate::calendar::{CalendarDate, CalendarSystem, LocaleOverride};
use crate::date::{Date, YearType};
use crate::error::{CalendarError, Result};
use crate::input::DateInput;
use crate::registry::{CalendarRegistry, GREGORIAN};

/// Earth days walked past a month boundary before giving up on finding the
/// neighboring month.
const MONTH_SEARCH_DAYS: u32 = 62;

/// Units of date arithmetic.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Unit {
    Year,
    Month,
    Week,
    /// Day of the month for [`CalendarDateTime::set`].
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl Unit {
    fn name(self) -> &'static str {
        match self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Week => "week",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
            Unit::Millisecond => "millisecond",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses unit names the way date libraries spell them: `"M"` is a month and
/// `"m"` a minute; long names are case-insensitive and may be plural.
impl FromStr for Unit {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        let unit = match s {
            "y" => Unit::Year,
            "M" => Unit::Month,
            "w" => Unit::Week,
            "d" | "D" => Unit::Day,
            "h" => Unit::Hour,
            "m" => Unit::Minute,
            "s" => Unit::Second,
            "ms" => Unit::Millisecond,
            _ => match s.to_ascii_lowercase().trim_end_matches('s') {
                "year" => Unit::Year,
                "month" => Unit::Month,
                "week" => Unit::Week,
                "day" | "date" => Unit::Day,
                "hour" => Unit::Hour,
                "minute" => Unit::Minute,
                "second" => Unit::Second,
                "millisecond" => Unit::Millisecond,
                _ => return Err(CalendarError::UnknownUnit(s.to_owned())),
            },
        };
        Ok(unit)
    }
}

/// An instant viewed through one registered calendar.
///
/// Values are immutable: arithmetic returns a new value, and clones are
/// independent of each other.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use kalendarilo_convert::{CalendarDate, CalendarDateTime, CalendarRegistry, Unit};
///
/// let registry = Arc::new(CalendarRegistry::with_defaults());
/// let date = CalendarDateTime::parse(registry, "2023-05-24")
///     .unwrap()
///     .to_calendar_system("persian")
///     .unwrap();
/// assert_eq!(CalendarDate::new(1402, 2, 3), date.date());
///
/// let next = date.add(1, Unit::Month).unwrap();
/// assert_eq!("1402-04-03", next.format_ymd());
/// assert_eq!("2023-06-24", next.gregorian().date().to_string());
/// ```
#[derive(Debug, Clone)]
pub struct CalendarDateTime {
    registry: Arc<CalendarRegistry>,
    name: String,
    calendar: Arc<dyn CalendarSystem>,
    native: CalendarDate,
    gregorian: NaiveDateTime,
}

impl CalendarDateTime {
    /// Wraps a UTC instant in the Gregorian calendar.
    pub fn new(registry: Arc<CalendarRegistry>, instant: NaiveDateTime) -> Result<Self> {
        let calendar = registry.get(GREGORIAN)?;
        Self::resolve(registry, GREGORIAN.to_owned(), calendar, instant)
    }

    /// Wraps any accepted Gregorian input in the Gregorian calendar.
    pub fn parse(registry: Arc<CalendarRegistry>, input: impl Into<DateInput>) -> Result<Self> {
        let instant = input.into().resolve()?;
        Self::new(registry, instant)
    }

    /// Midnight UTC of a date given in calendar `name`.
    pub fn from_calendar_system(
        registry: Arc<CalendarRegistry>,
        name: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Self> {
        let calendar = registry.get(name)?;
        let gregorian = calendar.convert_to_gregorian(CalendarDate::new(year, month, day))?;
        let instant = midnight(gregorian)?;
        Self::resolve(registry, name.to_owned(), calendar, instant)
    }

    fn resolve(
        registry: Arc<CalendarRegistry>,
        name: String,
        calendar: Arc<dyn CalendarSystem>,
        gregorian: NaiveDateTime,
    ) -> Result<Self> {
        let native = calendar.convert_from_gregorian(&DateInput::Instant(gregorian))?;
        Ok(Self {
            registry,
            name,
            calendar,
            native,
            gregorian,
        })
    }

    /// The same instant in calendar `name`.
    ///
    /// # Errors
    ///
    /// [`CalendarError::UnregisteredCalendar`] if `name` is not registered.
    pub fn to_calendar_system(&self, name: &str) -> Result<Self> {
        let calendar = self.registry.get(name)?;
        debug!(from = %self.name, to = name, "switching calendar");
        Self::resolve(
            self.registry.clone(),
            name.to_owned(),
            calendar,
            self.gregorian,
        )
    }

    /// Another instant in the same calendar.
    fn at(&self, gregorian: NaiveDateTime) -> Result<Self> {
        Self::resolve(
            self.registry.clone(),
            self.name.clone(),
            self.calendar.clone(),
            gregorian,
        )
    }

    /// The instant of a calendar date, keeping the time of day when that
    /// instant still falls on `date`.
    ///
    /// Calendar days need not line up with Gregorian days (a Mars sol is
    /// longer than an Earth day), so the midnight the calendar converts to is
    /// used otherwise.
    fn at_native(&self, date: CalendarDate) -> Result<Self> {
        let day = midnight(self.calendar.convert_to_gregorian(date)?)?;
        let kept = self.at(day.date().and_time(self.gregorian.time()))?;
        if kept.native == date || day == kept.gregorian {
            return Ok(kept);
        }
        let start = self.at(day)?;
        if start.native == date {
            debug!(calendar = %self.name, %date, "time of day falls outside the day");
            return Ok(start);
        }
        Ok(kept)
    }

    /// Registered name of the active calendar.
    pub fn calendar_name(&self) -> &str {
        &self.name
    }
    pub fn calendar(&self) -> &Arc<dyn CalendarSystem> {
        &self.calendar
    }
    /// Fields in the active calendar.
    pub fn date(&self) -> CalendarDate {
        self.native
    }
    pub fn year(&self) -> i32 {
        self.native.year
    }
    /// 0-based.
    pub fn month(&self) -> u32 {
        self.native.month
    }
    pub fn day(&self) -> u32 {
        self.native.day
    }
    /// The Gregorian shadow, in UTC.
    pub fn gregorian(&self) -> NaiveDateTime {
        self.gregorian
    }
    pub fn hour(&self) -> u32 {
        self.gregorian.hour()
    }
    pub fn minute(&self) -> u32 {
        self.gregorian.minute()
    }
    pub fn second(&self) -> u32 {
        self.gregorian.second()
    }
    pub fn millisecond(&self) -> u32 {
        self.gregorian.nanosecond() / 1_000_000
    }

    /// Name of the current month in the calendar's locale.
    pub fn month_name(&self) -> Result<String> {
        self.calendar
            .month_name_in_year(self.native.year, self.native.month)
    }

    /// Month names for the calendar's locale, for host formatters.
    pub fn locale_override(&self) -> Result<LocaleOverride> {
        self.calendar.locale_override(self.calendar.locale())
    }

    /// `YYYY-MM-DD` in the active calendar, with a 1-based month.
    pub fn format_ymd(&self) -> String {
        self.native.to_string()
    }

    /// Whole days from `other` to `self`.
    pub fn diff_days(&self, other: &Self) -> i64 {
        Date::from_naive(self.gregorian.date()) - Date::from_naive(other.gregorian.date())
    }

    /// Length of the current month.
    ///
    /// Calendars without a month-length rule are measured by converting the
    /// first days of this month and the next.
    pub fn days_in_month(&self) -> Result<u32> {
        self.month_length(self.native.year, self.native.month)
    }

    /// Whether the current year is leap in the active calendar, or in the
    /// Gregorian calendar if the active one cannot tell.
    pub fn is_leap_year(&self) -> Result<bool> {
        match self.calendar.is_leap_year(self.native.year) {
            Err(err) if err.is_unimplemented() => {
                debug!(calendar = %self.name, "no leap-year rule, using Gregorian");
                Ok(YearType::from_gregorian(self.gregorian.year()).is_leap())
            }
            other => other,
        }
    }

    fn month_length(&self, year: i32, month: u32) -> Result<u32> {
        match self.calendar.days_in_month(year, month) {
            Err(err) if err.is_unimplemented() => {
                debug!(calendar = %self.name, year, month, "measuring month length");
                let first = CalendarDate::new(year, month, 1);
                let next = self.neighbor_month(first, true)?;
                let start = self.jdn_of(first)?;
                let end = self.jdn_of(CalendarDate::new(next.year, next.month, 1))?;
                u32::try_from(end - start).map_err(|_| CalendarError::OutOfRange)
            }
            other => other,
        }
    }

    fn jdn_of(&self, date: CalendarDate) -> Result<i64> {
        let greg = self.calendar.convert_to_gregorian(date)?;
        Ok(Date::from_gregorian(greg.year, greg.month + 1, greg.day).jdn())
    }

    /// Year and month of the month after (or before) the one `date` is in.
    /// The returned day is meaningless.
    ///
    /// Month indices need not be chronological (the Hebrew year number
    /// changes in its seventh month), so this walks Gregorian days out of the
    /// month from its last (or first) day.
    fn neighbor_month(&self, date: CalendarDate, forward: bool) -> Result<CalendarDate> {
        let (edge, step) = if forward {
            // Calendars without a length rule are walked from the first day.
            let last = self.calendar.days_in_month(date.year, date.month).unwrap_or(1);
            (last, 1)
        } else {
            (1, -1)
        };
        let mut jdn = self.jdn_of(CalendarDate::new(date.year, date.month, edge))?;
        for _ in 0..MONTH_SEARCH_DAYS {
            jdn += step;
            let day = Date::from_jdn(jdn)
                .to_naive()
                .ok_or(CalendarError::OutOfRange)?;
            let found = self
                .calendar
                .convert_from_gregorian(&DateInput::Instant(day.and_time(NaiveTime::MIN)))?;
            if (found.year, found.month) != (date.year, date.month) {
                return Ok(found);
            }
        }
        Err(CalendarError::InvalidDateValue {
            calendar: self.name.clone(),
            year: date.year,
            month: date.month,
            day: date.day,
        })
    }

    /// `(year, month)` clamped into the calendar, with `day` clamped into the month.
    fn clamped(&self, year: i32, month: u32, day: u32) -> Result<CalendarDate> {
        let months = self.calendar.months_in_year(year)?;
        let month = month.min(months.saturating_sub(1));
        let day = day.clamp(1, self.month_length(year, month)?);
        Ok(CalendarDate::new(year, month, day))
    }

    fn shift(&self, delta: Option<TimeDelta>) -> Result<Self> {
        let instant = delta
            .and_then(|delta| self.gregorian.checked_add_signed(delta))
            .ok_or(CalendarError::OutOfRange)?;
        self.at(instant)
    }

    /// Adds `amount` units, negative amounts going back.
    ///
    /// Years and months follow the active calendar, keeping the day of the
    /// month where it exists and clamping it to the last day otherwise.
    /// Weeks, days and smaller units are plain durations.
    pub fn add(&self, amount: i64, unit: Unit) -> Result<Self> {
        match unit {
            Unit::Year => {
                let year = i32::try_from(self.native.year as i64 + amount)
                    .map_err(|_| CalendarError::OutOfRange)?;
                let date = self.clamped(year, self.native.month, self.native.day)?;
                self.at_native(date)
            }
            Unit::Month => {
                let mut date = self.native;
                for _ in 0..amount.unsigned_abs() {
                    date = self.neighbor_month(date, amount > 0)?;
                }
                let date = self.clamped(date.year, date.month, self.native.day)?;
                self.at_native(date)
            }
            Unit::Week => self.shift(amount.checked_mul(7).and_then(TimeDelta::try_days)),
            Unit::Day => self.shift(TimeDelta::try_days(amount)),
            Unit::Hour => self.shift(TimeDelta::try_hours(amount)),
            Unit::Minute => self.shift(TimeDelta::try_minutes(amount)),
            Unit::Second => self.shift(TimeDelta::try_seconds(amount)),
            Unit::Millisecond => self.shift(TimeDelta::try_milliseconds(amount)),
        }
    }

    pub fn subtract(&self, amount: i64, unit: Unit) -> Result<Self> {
        let amount = amount.checked_neg().ok_or(CalendarError::OutOfRange)?;
        self.add(amount, unit)
    }

    /// Sets one field in the active calendar.
    ///
    /// Days and time fields past their range roll over into the next month
    /// or day. Months past the end of the year move into later years.
    ///
    /// # Errors
    ///
    /// [`CalendarError::UnknownUnit`] for [`Unit::Week`], which is not a field.
    pub fn set(&self, unit: Unit, value: i64) -> Result<Self> {
        let current = match unit {
            Unit::Year => self.native.year as i64,
            Unit::Month => self.native.month as i64,
            Unit::Week => return Err(CalendarError::UnknownUnit(unit.to_string())),
            Unit::Day => {
                let (year, month) = (self.native.year, self.native.month);
                if let Ok(day) = u32::try_from(value)
                    && day >= 1
                    && day <= self.month_length(year, month)?
                {
                    return self.at_native(CalendarDate::new(year, month, day));
                }
                let first = CalendarDate::new(year, month, 1);
                let offset = value.checked_sub(1).ok_or(CalendarError::OutOfRange)?;
                return self.at_native(first)?.add(offset, Unit::Day);
            }
            Unit::Hour => self.gregorian.hour() as i64,
            Unit::Minute => self.gregorian.minute() as i64,
            Unit::Second => self.gregorian.second() as i64,
            Unit::Millisecond => self.millisecond() as i64,
        };
        if unit == Unit::Month {
            let months = self.calendar.months_in_year(self.native.year)?;
            if let Ok(month) = u32::try_from(value)
                && month < months
            {
                let date = self.clamped(self.native.year, month, self.native.day)?;
                return self.at_native(date);
            }
        }
        let delta = value.checked_sub(current).ok_or(CalendarError::OutOfRange)?;
        self.add(delta, unit)
    }

    /// First month of the current year.
    ///
    /// This is month 0 unless the year number changes in a later month, as
    /// in the Hebrew calendar.
    fn first_month(&self) -> Result<CalendarDate> {
        let year = self.native.year;
        let mut first = CalendarDate::new(year, 0, 1);
        for _ in 0..self.calendar.months_in_year(year)? {
            let previous = self.neighbor_month(first, false)?;
            if previous.year != year {
                break;
            }
            first = CalendarDate::new(year, previous.month, 1);
        }
        Ok(first)
    }

    /// Start of the current unit. Weeks start on the calendar's first day of
    /// the week.
    pub fn start_of(&self, unit: Unit) -> Result<Self> {
        let date = self.gregorian.date();
        let time = self.gregorian.time();
        let start = match unit {
            Unit::Year => midnight(self.calendar.convert_to_gregorian(self.first_month()?)?)?,
            Unit::Month => midnight(self.calendar.convert_to_gregorian(CalendarDate::new(
                self.native.year,
                self.native.month,
                1,
            ))?)?,
            Unit::Week => {
                let first = self.calendar.first_day_of_week().num_days_from_monday();
                let today = date.weekday().num_days_from_monday();
                let back = (today + 7 - first) % 7;
                date.and_time(NaiveTime::MIN)
                    .checked_sub_signed(TimeDelta::days(back as i64))
                    .ok_or(CalendarError::OutOfRange)?
            }
            Unit::Day => date.and_time(NaiveTime::MIN),
            Unit::Hour => date.and_time(truncated(time.hour(), 0, 0, 0)?),
            Unit::Minute => date.and_time(truncated(time.hour(), time.minute(), 0, 0)?),
            Unit::Second => {
                date.and_time(truncated(time.hour(), time.minute(), time.second(), 0)?)
            }
            Unit::Millisecond => date.and_time(truncated(
                time.hour(),
                time.minute(),
                time.second(),
                self.millisecond(),
            )?),
        };
        self.at(start)
    }

    /// Last millisecond of the current unit.
    pub fn end_of(&self, unit: Unit) -> Result<Self> {
        let next = self.start_of(unit)?.add(1, unit)?;
        next.shift(Some(TimeDelta::milliseconds(-1)))
    }
}

impl PartialEq for CalendarDateTime {
    /// Same instant in the same calendar.
    fn eq(&self, other: &Self) -> bool {
        self.gregorian == other.gregorian && self.name == other.name
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}]",
            self.native,
            self.gregorian.time().format("%H:%M:%S%.3f"),
            self.name
        )
    }
}

fn midnight(date: CalendarDate) -> Result<NaiveDateTime> {
    date.month
        .checked_add(1)
        .and_then(|month| NaiveDate::from_ymd_opt(date.year, month, date.day))
        .map(|day| day.and_time(NaiveTime::MIN))
        .ok_or(CalendarError::OutOfRange)
}

fn truncated(hour: u32, minute: u32, second: u32, milli: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_milli_opt(hour, minute, second, milli).ok_or(CalendarError::OutOfRange)
}
