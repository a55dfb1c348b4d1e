//! Calendar values and spreadsheet date serials.
//!
//! Spreadsheets store dates as serial numbers: whole days since an epoch plus
//! a fraction of a day for the time.
//!
//! - In the 1900 date system serial 1 is 1900-01-01 and serial 60 is the
//!   non-existent 1900-02-29 that Lotus 1-2-3 introduced and Excel kept. From
//!   1900-03-01 onward the serial is the day count since 1899-12-30.
//! - In the 1904 date system serial 0 is 1904-01-01 and there is no quirk.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{Error, Result};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Date system used when converting calendar values to serials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSystem {
    /// 1900 system (Windows default), with the 1900 leap-year quirk
    #[default]
    Excel1900,
    /// 1904 system (legacy Mac)
    Excel1904,
}

impl DateSystem {
    /// First calendar year representable in this system
    pub fn min_year(self) -> i32 {
        match self {
            DateSystem::Excel1900 => 1900,
            DateSystem::Excel1904 => 1904,
        }
    }

    /// Last calendar year representable in either system
    pub const MAX_YEAR: i32 = 9999;

    /// Whole-day serial for a date
    pub fn date_serial(self, date: NaiveDate) -> Result<i64> {
        self.check_year(date.year())?;
        let serial = match self {
            DateSystem::Excel1900 => {
                // Dates up to 1900-02-28 sit before the phantom leap day.
                if date < quirk_boundary() {
                    days_between(ymd(1899, 12, 31), date)
                } else {
                    days_between(ymd(1899, 12, 30), date)
                }
            }
            DateSystem::Excel1904 => days_between(ymd(1904, 1, 1), date),
        };
        Ok(serial)
    }

    /// Serial with the time of day as a fraction
    pub fn datetime_serial(self, datetime: NaiveDateTime) -> Result<f64> {
        let days = self.date_serial(datetime.date())?;
        let seconds = datetime.time().num_seconds_from_midnight() as f64;
        Ok(days as f64 + seconds / SECONDS_PER_DAY)
    }

    /// Calendar date for a whole-day serial, if it maps to a real date
    ///
    /// Serial 60 in the 1900 system has no real date and yields `None`.
    pub fn date_from_serial(self, serial: i64) -> Option<NaiveDate> {
        let date = match self {
            DateSystem::Excel1900 => match serial {
                i64::MIN..=0 | 60 => return None,
                1..=59 => ymd(1899, 12, 31).checked_add_signed(chrono::Duration::days(serial))?,
                _ => ymd(1899, 12, 30).checked_add_signed(chrono::Duration::days(serial))?,
            },
            DateSystem::Excel1904 => {
                if serial < 0 {
                    return None;
                }
                ymd(1904, 1, 1).checked_add_signed(chrono::Duration::days(serial))?
            }
        };
        (date.year() <= Self::MAX_YEAR).then_some(date)
    }

    fn check_year(self, year: i32) -> Result<()> {
        if year < self.min_year() || year > Self::MAX_YEAR {
            return Err(Error::InvalidDate(format!(
                "year {} outside {}..={}",
                year,
                self.min_year(),
                Self::MAX_YEAR
            )));
        }
        Ok(())
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn quirk_boundary() -> NaiveDate {
    ymd(1900, 3, 1)
}

fn days_between(epoch: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(epoch).num_days()
}

/// A calendar date as supplied by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Resolve to a proleptic Gregorian date
    pub fn to_naive(self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)
            .ok_or_else(|| Error::InvalidDate(format!("{} is not a calendar date", self)))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl TryFrom<CalendarDate> for NaiveDate {
    type Error = Error;

    fn try_from(value: CalendarDate) -> Result<Self> {
        value.to_naive()
    }
}

impl From<NaiveDate> for CalendarDate {
    /// Years outside `0..=65535` saturate; they are rejected later anyway.
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(0, u16::MAX as i32) as u16,
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

/// A calendar date and wall-clock time as supplied by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CalendarDateTime {
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// The date part
    pub fn date(&self) -> CalendarDate {
        CalendarDate::new(self.year, self.month, self.day)
    }

    /// Resolve to a proleptic Gregorian date and time
    pub fn to_naive(self) -> Result<NaiveDateTime> {
        let date = self.date().to_naive()?;
        let time =
            NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)
                .ok_or_else(|| {
                    Error::InvalidDate(format!(
                        "{:02}:{:02}:{:02} is not a time of day",
                        self.hour, self.minute, self.second
                    ))
                })?;
        Ok(NaiveDateTime::new(date, time))
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}:{:02}",
            self.date(),
            self.hour,
            self.minute,
            self.second
        )
    }
}

impl TryFrom<CalendarDateTime> for NaiveDateTime {
    type Error = Error;

    fn try_from(value: CalendarDateTime) -> Result<Self> {
        value.to_naive()
    }
}

impl From<NaiveDateTime> for CalendarDateTime {
    fn from(datetime: NaiveDateTime) -> Self {
        let date = CalendarDate::from(datetime.date());
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
            hour: datetime.hour() as u8,
            minute: datetime.minute() as u8,
            second: datetime.second() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn serial(y: i32, m: u32, d: u32) -> i64 {
        DateSystem::Excel1900.date_serial(ymd(y, m, d)).unwrap()
    }

    #[test]
    fn test_1900_serials() {
        assert_eq!(serial(1900, 1, 1), 1);
        assert_eq!(serial(1900, 2, 28), 59);
        // 60 is the phantom 1900-02-29
        assert_eq!(serial(1900, 3, 1), 61);
        assert_eq!(serial(2000, 1, 1), 36526);
        assert_eq!(serial(2024, 1, 1), 45292);
        assert_eq!(serial(2024, 12, 25), 45651);
        assert_eq!(serial(9999, 12, 31), 2958465);
    }

    #[test]
    fn test_1904_serials() {
        let sys = DateSystem::Excel1904;
        assert_eq!(sys.date_serial(ymd(1904, 1, 1)).unwrap(), 0);
        assert_eq!(sys.date_serial(ymd(2024, 12, 25)).unwrap(), 45651 - 1462);
        assert!(sys.date_serial(ymd(1903, 12, 31)).is_err());
    }

    #[test]
    fn test_datetime_fraction() {
        let dt = CalendarDateTime::new(2024, 12, 25, 14, 30, 0).to_naive().unwrap();
        let value = DateSystem::Excel1900.datetime_serial(dt).unwrap();
        assert!((value - 45651.604166666664).abs() < 1e-9);

        let noon = CalendarDateTime::new(1900, 1, 1, 12, 0, 0).to_naive().unwrap();
        assert_eq!(DateSystem::Excel1900.datetime_serial(noon).unwrap(), 1.5);
    }

    #[test]
    fn test_serial_back_to_date() {
        let sys = DateSystem::Excel1900;
        assert_eq!(sys.date_from_serial(59), Some(ymd(1900, 2, 28)));
        assert_eq!(sys.date_from_serial(60), None);
        assert_eq!(sys.date_from_serial(61), Some(ymd(1900, 3, 1)));
        assert_eq!(sys.date_from_serial(45651), Some(ymd(2024, 12, 25)));
        assert_eq!(DateSystem::Excel1904.date_from_serial(0), Some(ymd(1904, 1, 1)));
    }

    #[test]
    fn test_years_outside_range() {
        assert!(matches!(
            DateSystem::Excel1900.date_serial(ymd(1899, 12, 31)),
            Err(Error::InvalidDate(_))
        ));
        assert!(DateSystem::Excel1900.date_serial(ymd(10000, 1, 1)).is_err());
    }

    #[test]
    fn test_invalid_calendar_fields() {
        assert!(CalendarDate::new(2024, 13, 1).to_naive().is_err());
        assert!(CalendarDate::new(2024, 0, 1).to_naive().is_err());
        assert!(CalendarDate::new(2023, 2, 29).to_naive().is_err());
        assert!(CalendarDate::new(2024, 2, 29).to_naive().is_ok());
        assert!(CalendarDateTime::new(2024, 1, 1, 24, 0, 0).to_naive().is_err());
        assert!(CalendarDateTime::new(2024, 1, 1, 0, 60, 0).to_naive().is_err());
        assert!(CalendarDateTime::new(2024, 1, 1, 0, 0, 60).to_naive().is_err());
    }

    #[test]
    fn test_chrono_conversions() {
        let date = ymd(2024, 12, 25);
        assert_eq!(CalendarDate::from(date), CalendarDate::new(2024, 12, 25));
        assert_eq!(NaiveDate::try_from(CalendarDate::new(2024, 12, 25)).unwrap(), date);
        assert_eq!(CalendarDate::new(2024, 1, 5).to_string(), "2024-01-05");
    }
}
