//! Name to calendar mapping.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::calendar::{CalendarContext, CalendarDate, CalendarSystem};
use crate::calendars::{
    AmazighCalendar, ChineseCalendar, EthiopianCalendar, GregorianCalendar, HebrewCalendar,
    HijriCalendar, IndianCalendar, MarsCalendar, PersianCalendar,
};
use crate::error::{CalendarError, Result};
use crate::input::DateInput;
use crate::locale::MonthNameCache;
use crate::settings::Settings;

/// Name the Gregorian calendar is always registered under.
pub const GREGORIAN: &str = "gregory";

/// Calendars by name.
///
/// Entries are only ever added. Lookups hand out the registered
/// [`Arc`] itself, so the same instance comes back every time.
///
/// # Example
///
/// ```
/// use kalendarilo_convert::{CalendarDate, CalendarRegistry};
///
/// let registry = CalendarRegistry::with_defaults();
/// let persian = registry
///     .convert("gregory", "persian", CalendarDate::new(2023, 4, 24))
///     .unwrap();
///
/// assert_eq!(CalendarDate::new(1402, 2, 3), persian);
/// ```
#[derive(Debug)]
pub struct CalendarRegistry {
    calendars: RwLock<HashMap<String, Arc<dyn CalendarSystem>>>,
}

impl CalendarRegistry {
    /// Creates a registry holding only the Gregorian calendar.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.insert(GREGORIAN, Arc::new(GregorianCalendar::new()));
        registry
    }

    /// Creates a registry holding every built-in calendar.
    pub fn with_defaults() -> Self {
        Self::with_settings(&Settings::default())
    }

    /// Creates a registry holding every built-in calendar, all sharing one
    /// month-name cache and the locale of `settings`.
    pub fn with_settings(settings: &Settings) -> Self {
        let context = settings.context(Arc::new(MonthNameCache::default()));
        let registry = Self::empty();
        for (name, calendar) in builtin(context) {
            registry.insert(name, calendar);
        }
        registry
    }

    fn empty() -> Self {
        Self {
            calendars: RwLock::new(HashMap::new()),
        }
    }

    fn insert(&self, name: &str, calendar: Arc<dyn CalendarSystem>) {
        debug!(name, "registering calendar");
        self.calendars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), calendar);
    }

    /// Registers `calendar` under `name`.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidCalendar`] if `name` is empty or taken, if
    /// converting a reference date either way reports
    /// [`CalendarError::Unimplemented`], or if the calendar has no month
    /// names.
    pub fn register(&self, name: &str, calendar: Arc<dyn CalendarSystem>) -> Result<()> {
        let invalid = |reason: String| CalendarError::InvalidCalendar {
            name: name.to_owned(),
            reason,
        };
        if name.is_empty() {
            return Err(invalid("empty name".to_owned()));
        }
        if self.contains(name) {
            return Err(invalid("name already registered".to_owned()));
        }

        let probe = reference_instant();
        let converted = calendar
            .convert_from_gregorian(&DateInput::Instant(probe))
            .and_then(|date| calendar.convert_to_gregorian(date));
        if let Err(err) = converted {
            if err.is_unimplemented() {
                return Err(invalid(err.to_string()));
            }
            debug!(name, %err, "reference conversion failed");
        }
        match calendar.month_names(calendar.locale()) {
            Ok(names) if names.is_empty() => return Err(invalid("no month names".to_owned())),
            Err(err) if err.is_unimplemented() => return Err(invalid(err.to_string())),
            _ => {}
        }

        let mut calendars = self
            .calendars
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if calendars.contains_key(name) {
            return Err(invalid("name already registered".to_owned()));
        }
        debug!(name, id = calendar.id(), "registering calendar");
        calendars.insert(name.to_owned(), calendar);
        Ok(())
    }

    /// Looks up a calendar by name.
    ///
    /// # Errors
    ///
    /// [`CalendarError::UnregisteredCalendar`] if nothing is registered
    /// under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn CalendarSystem>> {
        self.calendars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| CalendarError::UnregisteredCalendar {
                name: name.to_owned(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.calendars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .calendars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Converts `date` from calendar `from` to calendar `to` through the
    /// Gregorian calendar.
    pub fn convert(&self, from: &str, to: &str, date: CalendarDate) -> Result<CalendarDate> {
        let from = self.get(from)?;
        let to = self.get(to)?;
        let gregorian = from.convert_to_gregorian(date)?;
        to.convert_from_gregorian(&DateInput::Fields(gregorian))
    }
}

impl Default for CalendarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin(context: CalendarContext) -> [(&'static str, Arc<dyn CalendarSystem>); 9] {
    [
        (GREGORIAN, Arc::new(GregorianCalendar::with_context(context.clone()))),
        ("persian", Arc::new(PersianCalendar::with_context(context.clone()))),
        ("islamic", Arc::new(HijriCalendar::with_context(context.clone()))),
        ("hebrew", Arc::new(HebrewCalendar::with_context(context.clone()))),
        ("ethiopic", Arc::new(EthiopianCalendar::with_context(context.clone()))),
        ("amazigh", Arc::new(AmazighCalendar::with_context(context.clone()))),
        ("chinese", Arc::new(ChineseCalendar::with_context(context.clone()))),
        ("indian", Arc::new(IndianCalendar::with_context(context.clone()))),
        ("mars", Arc::new(MarsCalendar::with_context(context))),
    ]
}

/// 2000-01-01 12:00, the J2000 epoch.
fn reference_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Stub;

    impl CalendarSystem for Stub {
        fn id(&self) -> &str {
            "stub"
        }
    }

    /// Gregorian calendar with years shifted by ten.
    #[derive(Debug, Default)]
    struct Shifted {
        context: CalendarContext,
    }

    impl CalendarSystem for Shifted {
        fn id(&self) -> &str {
            "gregory"
        }
        fn context(&self) -> Option<&CalendarContext> {
            Some(&self.context)
        }
        fn from_gregorian_instant(&self, instant: &NaiveDateTime) -> Result<CalendarDate> {
            let date = GregorianCalendar::new().from_gregorian_instant(instant)?;
            Ok(CalendarDate::new(date.year + 10, date.month, date.day))
        }
        fn convert_to_gregorian(&self, date: CalendarDate) -> Result<CalendarDate> {
            GregorianCalendar::new()
                .convert_to_gregorian(CalendarDate::new(date.year - 10, date.month, date.day))
        }
    }

    #[test]
    fn new_has_only_gregorian() {
        let registry = CalendarRegistry::new();
        assert_eq!(vec!["gregory".to_owned()], registry.names());
    }

    #[test]
    fn defaults() {
        let registry = CalendarRegistry::with_defaults();
        assert_eq!(
            vec![
                "amazigh", "chinese", "ethiopic", "gregory", "hebrew", "indian", "islamic",
                "mars", "persian"
            ],
            registry.names()
        );
        for name in registry.names() {
            assert_eq!(name, registry.get(&name).unwrap().id());
        }
    }

    #[test]
    fn identity_preserving() {
        let registry = CalendarRegistry::new();
        let calendar: Arc<dyn CalendarSystem> = Arc::new(Shifted::default());
        registry.register("shifted", calendar.clone()).unwrap();
        assert!(Arc::ptr_eq(&calendar, &registry.get("shifted").unwrap()));
        assert!(Arc::ptr_eq(
            &registry.get("shifted").unwrap(),
            &registry.get("shifted").unwrap()
        ));
    }

    #[test]
    fn unregistered() {
        let registry = CalendarRegistry::new();
        let err = registry.get("persian").unwrap_err();
        assert_eq!(
            CalendarError::UnregisteredCalendar {
                name: "persian".to_owned()
            },
            err
        );
        assert!(err.to_string().contains("persian"));
    }

    #[test]
    fn rejects_incomplete_calendars() {
        let registry = CalendarRegistry::new();
        let candidates: [(&str, Arc<dyn CalendarSystem>); 3] = [
            ("stub", Arc::new(Stub)),
            ("", Arc::new(Shifted::default())),
            ("gregory", Arc::new(Shifted::default())),
        ];
        for (name, calendar) in candidates {
            assert!(matches!(
                registry.register(name, calendar),
                Err(CalendarError::InvalidCalendar { .. })
            ));
        }
        assert_eq!(1, registry.names().len());
    }

    #[test]
    fn convert() {
        let registry = CalendarRegistry::with_defaults();
        let date = CalendarDate::new(1402, 2, 3);
        assert_eq!(
            Ok(CalendarDate::new(1444, 10, 4)),
            registry.convert("persian", "islamic", date)
        );
        assert!(registry.convert("persian", "klingon", date).is_err());
    }

    #[test]
    fn settings_reach_calendars() {
        let settings = Settings {
            locale: "fa".to_owned(),
            ..Settings::default()
        };
        let registry = CalendarRegistry::with_settings(&settings);
        let persian = registry.get("persian").unwrap();
        assert_eq!("fa", persian.locale());
        assert_eq!("فروردین", persian.localized_month_name(0).unwrap());
    }
}
