//! Error types shared by every calendar.

/// Error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A date input could not be understood as a Gregorian date.
    #[error("invalid date input: {0}")]
    InvalidDateInput(String),

    /// No Gregorian date corresponds to the given calendar date.
    ///
    /// `month` is 0-based, as everywhere else in this crate.
    #[error("invalid {calendar} date: year {year}, month {month}, day {day}")]
    InvalidDateValue {
        calendar: String,
        year: i32,
        month: u32,
        day: u32,
    },

    /// A calendar name was looked up but never registered.
    #[error("calendar `{name}` is not registered")]
    UnregisteredCalendar { name: String },

    /// A month index outside `0..count`.
    #[error("invalid month index {index} for {calendar} calendar (must be 0..{count})")]
    InvalidMonthIndex {
        calendar: String,
        index: i64,
        count: u32,
    },

    /// A calendar was asked for an operation it does not provide.
    #[error("{capability} must be implemented by the {calendar} calendar")]
    Unimplemented {
        calendar: String,
        capability: &'static str,
    },

    /// A calendar was rejected by the registry.
    #[error("cannot register calendar `{name}`: {reason}")]
    InvalidCalendar { name: String, reason: String },

    /// A unit name was not recognized.
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    /// Arithmetic left the range of representable dates.
    #[error("date out of supported range")]
    OutOfRange,
}

impl CalendarError {
    pub(crate) fn unimplemented(calendar: &str, capability: &'static str) -> Self {
        Self::Unimplemented {
            calendar: calendar.to_owned(),
            capability,
        }
    }

    /// Returns `true` for [`CalendarError::Unimplemented`].
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Unimplemented { .. })
    }
}

/// Shorthand for results carrying a [`CalendarError`].
pub type Result<T, E = CalendarError> = std::result::Result<T, E>;
