//! Month names per locale and calendar.
//!
//! Names come from a [`MonthNameProvider`], which may list them in any
//! order (a Hebrew source typically starts at Tishri). [`MonthNameCache`]
//! rotates each list so that it starts at the calendar's own first month,
//! located by its English name, and memoizes the result per locale and
//! calendar.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::calendars::chinese::fmt as chinese_fmt;
use crate::error::{CalendarError, Result};

/// A source of month names, typically backed by platform locale data.
pub trait MonthNameProvider: fmt::Debug + Send + Sync {
    /// Month names of `calendar` in `locale`, or `None` if unknown.
    fn month_names(&self, locale: &str, calendar: &str) -> Option<Vec<String>>;
}

/// Month names compiled into the crate.
///
/// English is available for every built-in calendar; a few calendars also
/// carry names in the language they are chiefly used with.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinMonthNames;

impl MonthNameProvider for BuiltinMonthNames {
    fn month_names(&self, locale: &str, calendar: &str) -> Option<Vec<String>> {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or(locale)
            .to_ascii_lowercase();
        if language == "zh" && calendar == "chinese" {
            return Some(
                (1..=12)
                    .map(|m| chinese_fmt::month(crate::calendars::chinese::Month::Common(m)))
                    .collect(),
            );
        }
        let names = builtin_table(&language, calendar)?;
        Some(names.iter().map(|&n| n.to_owned()).collect())
    }
}

fn builtin_table(language: &str, calendar: &str) -> Option<&'static [&'static str]> {
    Some(match (calendar, language) {
        ("gregory", "en") => &[
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ],
        ("gregory", "fr") => &[
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
            "octobre", "novembre", "décembre",
        ],
        ("persian", "en") => &[
            "Farvardin", "Ordibehesht", "Khordad", "Tir", "Mordad", "Shahrivar", "Mehr", "Aban",
            "Azar", "Dey", "Bahman", "Esfand",
        ],
        ("persian", "fa") => &[
            "فروردین", "اردیبهشت", "خرداد", "تیر", "مرداد", "شهریور", "مهر", "آبان", "آذر", "دی",
            "بهمن", "اسفند",
        ],
        ("islamic", "en") => &[
            "Muharram", "Safar", "Rabiʻ I", "Rabiʻ II", "Jumada I", "Jumada II", "Rajab",
            "Shaʻban", "Ramadan", "Shawwal", "Dhuʻl-Qiʻdah", "Dhuʻl-Hijjah",
        ],
        ("islamic", "ar") => &[
            "محرم", "صفر", "ربيع الأول", "ربيع الآخر", "جمادى الأولى", "جمادى الآخرة", "رجب",
            "شعبان", "رمضان", "شوال", "ذو القعدة", "ذو الحجة",
        ],
        // Listed from Tishri, the way locale data orders them.
        ("hebrew", "en") => &[
            "Tishri", "Heshvan", "Kislev", "Tevet", "Shevat", "Adar", "Adar II", "Nisan", "Iyar",
            "Sivan", "Tamuz", "Av", "Elul",
        ],
        ("hebrew", "he") => &[
            "תשרי", "חשוון", "כסלו", "טבת", "שבט", "אדר", "אדר ב׳", "ניסן", "אייר", "סיוון",
            "תמוז", "אב", "אלול",
        ],
        ("ethiopic", "en") => &[
            "Meskerem", "Tekemt", "Hedar", "Tahsas", "Ter", "Yekatit", "Megabit", "Miazia",
            "Genbot", "Sene", "Hamle", "Nehasse", "Pagumen",
        ],
        ("ethiopic", "am") => &[
            "መስከረም", "ጥቅምት", "ኅዳር", "ታኅሣሥ", "ጥር", "የካቲት", "መጋቢት", "ሚያዝያ", "ግንቦት", "ሰኔ",
            "ሐምሌ", "ነሐሴ", "ጳጉሜን",
        ],
        ("amazigh", "en") => &[
            "Yennayer", "Furar", "Meghres", "Yebrir", "Mayyu", "Yunyu", "Yulyuz", "Ghuct",
            "Shutanbir", "Ktuber", "Nwanbir", "Dujanbir",
        ],
        ("chinese", "en") => &[
            "First Month", "Second Month", "Third Month", "Fourth Month", "Fifth Month",
            "Sixth Month", "Seventh Month", "Eighth Month", "Ninth Month", "Tenth Month",
            "Eleventh Month", "Twelfth Month",
        ],
        ("indian", "en") => &[
            "Chaitra", "Vaishakha", "Jyeshtha", "Ashadha", "Shravana", "Bhadrapada", "Ashvin",
            "Kartika", "Agrahayana", "Pausha", "Magha", "Phalguna",
        ],
        ("mars", "en") => &[
            "Sagittarius", "Dhanus", "Capricornus", "Makara", "Aquarius", "Kumbha", "Pisces",
            "Mina", "Aries", "Mesha", "Taurus", "Rishabha", "Gemini", "Mithuna", "Cancer", "Karka",
            "Leo", "Simha", "Virgo", "Kanya", "Libra", "Tula", "Scorpius", "Vrishika",
        ],
        _ => return None,
    })
}

type CacheKey = (String, String);

/// Memoized month names per `(locale, calendar)`.
///
/// Entries are never invalidated: both key spaces are small and the names
/// do not change while the process runs.
#[derive(Debug)]
pub struct MonthNameCache {
    provider: Box<dyn MonthNameProvider>,
    entries: RwLock<HashMap<CacheKey, Arc<[String]>>>,
}

impl MonthNameCache {
    pub fn new(provider: impl MonthNameProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Month names of `calendar` in `locale`, starting at the month whose
    /// English name is `first_month`.
    ///
    /// Unknown locales fall back to English.
    ///
    /// # Errors
    ///
    /// [`CalendarError::Unimplemented`] if the provider has no English names
    /// for `calendar`.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_convert::MonthNameCache;
    ///
    /// let cache = MonthNameCache::default();
    /// let names = cache.month_names("en", "hebrew", Some("Nisan")).unwrap();
    /// assert_eq!("Nisan", names[0]);
    /// assert_eq!("Tishri", names[6]);
    /// ```
    pub fn month_names(
        &self,
        locale: &str,
        calendar: &str,
        first_month: Option<&str>,
    ) -> Result<Arc<[String]>> {
        let key = (locale.replace('_', "-").to_ascii_lowercase(), calendar.to_owned());
        if let Some(names) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(names.clone());
        }

        let english = self
            .provider
            .month_names("en", calendar)
            .ok_or_else(|| CalendarError::unimplemented(calendar, "month_names"))?;
        let offset = first_month
            .and_then(|first| english.iter().position(|name| name == first))
            .unwrap_or(0);
        let mut names = self.provider.month_names(&key.0, calendar).unwrap_or_else(|| {
            debug!(locale, calendar, "no month names for locale, using English");
            english
        });
        if offset < names.len() {
            names.rotate_left(offset);
        }

        let names: Arc<[String]> = names.into();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, names.clone());
        Ok(names)
    }

    /// Number of `(locale, calendar)` pairs resolved so far.
    pub fn cached_entries(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for MonthNameCache {
    fn default() -> Self {
        Self::new(BuiltinMonthNames)
    }
}
