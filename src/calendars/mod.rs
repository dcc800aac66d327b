//! Built-in calendars.
//!
//! | Type | Id | Months | Method |
//! |------|----|--------|--------|
//! | [`GregorianCalendar`] | `gregory` | 12 | proleptic Gregorian |
//! | [`PersianCalendar`] | `persian` | 12 | 33-year arithmetic cycle |
//! | [`HijriCalendar`] | `islamic` | 12 | Umm al-Qura tables, searched inverse |
//! | [`HebrewCalendar`] | `hebrew` | 12 or 13 | Metonic arithmetic |
//! | [`EthiopianCalendar`] | `ethiopic` | 13 | epoch arithmetic |
//! | [`AmazighCalendar`] | `amazigh` | 12 | Julian calendar, year + 950 |
//! | [`ChineseCalendar`] | `chinese` | 12 or 13 | approximate lunisolar |
//! | [`IndianCalendar`] | `indian` | 12 | Saka era, Gregorian leap years |
//! | [`MarsCalendar`] | `mars` | 24 | Darian calendar over Mars Sol Date |

pub mod amazigh;
pub mod chinese;
pub mod ethiopian;
pub mod gregorian;
pub mod hebrew;
pub mod hijri;
pub mod indian;
pub mod mars;
pub mod persian;

pub use amazigh::AmazighCalendar;
pub use chinese::{ChineseCalendar, LunisolarSource};
pub use ethiopian::EthiopianCalendar;
pub use gregorian::GregorianCalendar;
pub use hebrew::HebrewCalendar;
pub use hijri::HijriCalendar;
pub use indian::IndianCalendar;
pub use mars::MarsCalendar;
pub use persian::PersianCalendar;
