//! Utilities for converting between dates in different calendars.
//!
//! Every calendar converts to and from the proleptic Gregorian calendar,
//! with the Julian Day Number as the common ground. Supported calendars are
//! listed in [`calendars`]; more can be added through [`CalendarRegistry`].
//!
//! Months are 0-based and days 1-based in [`CalendarDate`]. Gregorian and
//! Julian years are astronomical, year 0 being 1 BCE.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use kalendarilo_convert::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1);
//!
//! assert_eq!(6, date.day_of_week()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Converting with a calendar directly:
//!
//! ```
//! use kalendarilo_convert::{CalendarDate, CalendarSystem, DateInput};
//! use kalendarilo_convert::calendars::HebrewCalendar;
//!
//! let hebrew = HebrewCalendar::new();
//! let date = hebrew.convert_from_gregorian(&DateInput::from("2023-05-24")).unwrap();
//!
//! assert_eq!(CalendarDate::new(5783, 2, 4), date); // 4 Sivan 5783
//! assert_eq!("Sivan", hebrew.localized_month_name(2).unwrap());
//! ```
//!
//! Date arithmetic in another calendar:
//!
//! ```
//! use std::sync::Arc;
//! use kalendarilo_convert::{CalendarDateTime, CalendarRegistry, Unit};
//!
//! let registry = Arc::new(CalendarRegistry::with_defaults());
//! let date = CalendarDateTime::from_calendar_system(registry, "ethiopic", 2015, 11, 30).unwrap();
//!
//! let pagumen = date.add(1, Unit::Day).unwrap();
//! assert_eq!("2015-13-01", pagumen.format_ymd());
//! assert_eq!(Ok(6), pagumen.days_in_month());
//! ```
//!
//! The library logs through [`tracing`] and never installs a subscriber.

pub mod adapter;
pub mod calendar;
pub mod calendars;
pub mod date;
pub mod error;
pub mod input;
pub mod jdn;
pub mod locale;
pub mod registry;
pub mod settings;

pub use adapter::{CalendarDateTime, Unit};
pub use calendar::{CalendarContext, CalendarDate, CalendarSystem, LocaleOverride};
pub use date::{Date, YearType};
pub use error::{CalendarError, Result};
pub use input::DateInput;
pub use locale::{BuiltinMonthNames, MonthNameCache, MonthNameProvider};
pub use registry::CalendarRegistry;
pub use settings::Settings;
