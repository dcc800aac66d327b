//! Configuration for a [`CalendarRegistry`](crate::CalendarRegistry).

use std::sync::Arc;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarContext, DEFAULT_LOCALE};
use crate::locale::MonthNameCache;

/// Locale settings shared by every calendar of a registry.
///
/// Missing fields take their default, so `{}` is a valid configuration.
///
/// ```
/// use chrono::Weekday;
/// use kalendarilo_convert::Settings;
///
/// let settings: Settings = serde_json::from_str(r#"{"locale": "fa-IR"}"#).unwrap();
/// assert_eq!("fa-IR", settings.locale);
/// assert_eq!(Weekday::Sun, settings.first_day_of_week);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// BCP 47 tag used for month names.
    pub locale: String,
    /// Day [`start_of`](crate::CalendarDateTime::start_of) goes back to for weeks.
    pub first_day_of_week: Weekday,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_owned(),
            first_day_of_week: Weekday::Sun,
        }
    }
}

impl Settings {
    /// Builds a calendar context sharing the given month-name cache.
    pub fn context(&self, names: Arc<MonthNameCache>) -> CalendarContext {
        CalendarContext::new(self.locale.clone(), self.first_day_of_week, names)
    }
}
