//! Accepted shapes of Gregorian date input.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::calendar::CalendarDate;
use crate::error::{CalendarError, Result};

/// A Gregorian date as handed to [`CalendarSystem::convert_from_gregorian`].
///
/// Each variant is one accepted input shape; [`DateInput::resolve`] turns any
/// of them into a UTC instant.
///
/// [`CalendarSystem::convert_from_gregorian`]: crate::CalendarSystem::convert_from_gregorian
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateInput {
    /// The current instant.
    #[default]
    Now,
    /// A UTC instant.
    Instant(NaiveDateTime),
    /// Gregorian fields with a 0-based month, taken as midnight UTC.
    Fields(CalendarDate),
    /// An ISO 8601 / RFC 3339 string.
    Iso(String),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
}

impl DateInput {
    /// Resolves the input into a UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDateInput`] for strings that are not
    /// dates, fields that name no real Gregorian day, or timestamps out of
    /// range.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_convert::DateInput;
    ///
    /// let instant = DateInput::from("2023-05-24T10:30:00Z").resolve().unwrap();
    /// assert_eq!("2023-05-24 10:30:00", instant.to_string());
    /// assert!(DateInput::from("not a date").resolve().is_err());
    /// ```
    pub fn resolve(&self) -> Result<NaiveDateTime> {
        match self {
            Self::Now => Ok(Utc::now().naive_utc()),
            Self::Instant(instant) => Ok(*instant),
            Self::Fields(fields) => fields
                .month
                .checked_add(1)
                .and_then(|month| NaiveDate::from_ymd_opt(fields.year, month, fields.day))
                .map(|date| date.and_time(NaiveTime::MIN))
                .ok_or_else(|| {
                    CalendarError::InvalidDateInput(format!("no such Gregorian date: {fields}"))
                }),
            Self::Iso(text) => parse_iso(text),
            Self::EpochMillis(millis) => DateTime::from_timestamp_millis(*millis)
                .map(|instant| instant.naive_utc())
                .ok_or_else(|| {
                    CalendarError::InvalidDateInput(format!("timestamp {millis} out of range"))
                }),
        }
    }
}

fn parse_iso(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.naive_utc());
    }
    if let Ok(instant) = text.parse::<NaiveDateTime>() {
        return Ok(instant);
    }
    if let Ok(instant) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(instant);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(CalendarError::InvalidDateInput(format!(
        "unrecognized date string `{text}`"
    )))
}

impl From<NaiveDateTime> for DateInput {
    fn from(instant: NaiveDateTime) -> Self {
        Self::Instant(instant)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Instant(date.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(instant: DateTime<Tz>) -> Self {
        Self::Instant(instant.naive_utc())
    }
}

impl From<CalendarDate> for DateInput {
    fn from(fields: CalendarDate) -> Self {
        Self::Fields(fields)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Iso(text.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Iso(text)
    }
}

impl From<i64> for DateInput {
    fn from(millis: i64) -> Self {
        Self::EpochMillis(millis)
    }
}

impl<T: Into<DateInput>> From<Option<T>> for DateInput {
    fn from(input: Option<T>) -> Self {
        input.map_or(Self::Now, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn fields_are_zero_based() {
        let input = DateInput::from(CalendarDate::new(2023, 4, 24));
        assert_eq!(ymd_hms(2023, 5, 24, 0, 0, 0), input.resolve().unwrap());
    }

    #[test]
    fn invalid_fields() {
        for fields in [
            CalendarDate::new(2023, 1, 29),
            CalendarDate::new(2023, 12, 1),
            CalendarDate::new(2023, 0, 0),
        ] {
            let err = DateInput::from(fields).resolve().unwrap_err();
            assert!(matches!(err, CalendarError::InvalidDateInput(_)), "{fields}");
        }
    }

    #[test]
    fn strings() {
        let data = [
            ("2023-05-24", ymd_hms(2023, 5, 24, 0, 0, 0)),
            ("2023-05-24T08:15:00", ymd_hms(2023, 5, 24, 8, 15, 0)),
            ("2023-05-24 08:15:00", ymd_hms(2023, 5, 24, 8, 15, 0)),
            ("2023-05-24T08:15:00+02:00", ymd_hms(2023, 5, 24, 6, 15, 0)),
            (" 2023-05-24T23:30:00Z ", ymd_hms(2023, 5, 24, 23, 30, 0)),
        ];
        for (text, std) in data {
            assert_eq!(std, DateInput::from(text).resolve().unwrap(), "{text}");
        }
        for text in ["", "yesterday", "2023-13-01", "24/05/2023"] {
            assert!(DateInput::from(text).resolve().is_err(), "{text}");
        }
    }

    #[test]
    fn epoch_millis() {
        assert_eq!(
            ymd_hms(1970, 1, 1, 0, 0, 1),
            DateInput::from(1000_i64).resolve().unwrap()
        );
        assert_eq!(
            ymd_hms(2023, 5, 24, 0, 0, 0),
            DateInput::from(1_684_886_400_000_i64).resolve().unwrap()
        );
        assert!(DateInput::from(i64::MAX).resolve().is_err());
    }

    #[test]
    fn absent_means_now() {
        let before = Utc::now().naive_utc();
        let now = DateInput::from(None::<&str>).resolve().unwrap();
        let after = Utc::now().naive_utc();
        assert!(before <= now && now <= after);
        assert_eq!(DateInput::Now, DateInput::default());
    }

    #[test]
    fn zoned_instants_become_utc() {
        let zoned = DateTime::parse_from_rfc3339("2023-05-24T01:00:00+03:00").unwrap();
        assert_eq!(
            ymd_hms(2023, 5, 23, 22, 0, 0),
            DateInput::from(zoned).resolve().unwrap()
        );
    }
}
