//! Date and time values for availability windows.
//!
//! # Parsing
//! Parsing follows [**ISO 8601-1**](https://www.iso.org/iso-8601-date-and-time-format.html)
//! (`YYYY-MM-DD T hh:mm:ss [Z|±hh:mm]`), in both the extended and basic forms.
//! Unlike lenient metadata parsing, anything that is not a complete
//! calendar date yields [`None`]:
//! - `2024-03-01` → `2024-03-01 00:00:00`
//! - `2023-01-25T10:11:35Z`
//! - `2020-10-12T09:05:01.250+08:21` (fractional seconds are dropped)
//! - `20250525T121521Z`
//! - `2025-02-30` → [`None`]
//! - `tomorrow` → [`None`]

use std::fmt::Display;
use std::iter::Peekable;

/// The [date](Date) and [time](Time) components.
///
/// The [`Display`] form is always `YYYY-MM-DDThh:mm:ss` followed by the
/// UTC offset when one is known, and [`DateTime::parse`] reads it back
/// into an equal value.
///
/// # Examples
/// - Parsing an OPDS `until` attribute:
/// ```
/// # use opds_availability::datetime::DateTime;
/// let until = DateTime::parse("2023-01-25T10:11:35Z").unwrap();
/// let date = until.date();
/// let time = until.time();
///
/// assert_eq!("2023-01-25T10:11:35Z", until.to_string());
/// assert_eq!((2023, 1, 25), (date.year(), date.month(), date.day()));
/// assert_eq!((10, 11, 35), (time.hour(), time.minute(), time.second()));
/// assert!(time.is_utc());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// Construct a datetime from the given [`Date`] and [`Time`].
    ///
    /// # Examples
    /// ```
    /// # use opds_availability::datetime::{Date, DateTime, Time};
    /// let datetime = DateTime::new(
    ///     Date::new(2020, 2, 20),
    ///     Time::new(0, 14, 5, Some(-339)),
    /// );
    ///
    /// assert_eq!("2020-02-20T00:14:05-05:39", datetime.to_string());
    /// ```
    pub fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// Parses an ISO 8601 date or date-time.
    ///
    /// Returns [`None`] for malformed or out-of-range input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        let (date_str, time_str) = raw
            .split_once(['T', 't', ' '])
            .map(|(date, time)| (date, Some(time)))
            .unwrap_or((raw, None));

        Some(DateTime {
            date: Date::parse(date_str)?,
            // A date on its own starts at midnight
            time: match time_str {
                Some(time) => Time::parse(time)?,
                None => Time::EMPTY,
            },
        })
    }

    /// The [date](Date) (`2025-12-31`).
    pub fn date(&self) -> Date {
        self.date
    }

    /// The [time](Time) (`16:52:20Z`).
    pub fn time(&self) -> Time {
        self.time
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// The date, encompassing the [year](Self::year),
/// [month](Self::month), and [day](Self::day).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i16,
    month: u8,
    day: u8,
}

impl Date {
    /// Construct a date from the given parts.
    ///
    /// # Clamping
    /// - Year: `[0, 9999]`
    /// - Month: `[1, 12]`
    /// - Day: `[1, days in the month]`
    ///
    /// # Examples
    /// ```
    /// # use opds_availability::datetime::Date;
    /// assert_eq!("2012-07-08", Date::new(2012, 7, 8).to_string());
    /// assert_eq!("2023-02-28", Date::new(2023, 2, 31).to_string());
    /// ```
    pub fn new(year: i16, month: u8, day: u8) -> Self {
        let year = year.clamp(0, 9999);
        let month = month.clamp(1, 12);

        Self {
            year,
            month,
            day: day.clamp(1, days_in_month(year, month)),
        }
    }

    fn checked(year: u32, month: u32, day: u32) -> Option<Self> {
        let year = i16::try_from(year).ok()?;
        let month = u8::try_from(month).ok().filter(|m| (1..=12).contains(m))?;
        let day = u8::try_from(day)
            .ok()
            .filter(|d| (1..=days_in_month(year, month)).contains(d))?;

        Some(Self { year, month, day })
    }

    /// Supported formats:
    /// - `YYYY-MM-DD`
    /// - `YYYYMMDD`
    fn parse(raw: &str) -> Option<Self> {
        let mut chars = raw.chars().peekable();

        let year = take_num(&mut chars, 4)?;
        let extended = chars.next_if_eq(&'-').is_some();
        let month = take_num(&mut chars, 2)?;
        if extended {
            chars.next_if_eq(&'-')?;
        }
        let day = take_num(&mut chars, 2)?;

        // Trailing characters are not part of a date
        if chars.next().is_some() {
            return None;
        }
        Date::checked(year, month, day)
    }

    /// Create a [`DateTime`] with the given [`Time`].
    ///
    /// # Examples
    /// ```
    /// # use opds_availability::datetime::{Date, Time};
    /// let datetime = Date::new(2026, 2, 28).at(Time::utc(9, 45, 0));
    ///
    /// assert_eq!("2026-02-28T09:45:00Z", datetime.to_string());
    /// ```
    pub fn at(self, time: Time) -> DateTime {
        DateTime { date: self, time }
    }

    /// The year (`0000-9999`).
    pub fn year(&self) -> i16 {
        self.year
    }

    /// The month (`1-12`).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// The day (`1-31`).
    pub fn day(&self) -> u8 {
        self.day
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0>4}-{:0>2}-{:0>2}", self.year, self.month, self.day)
    }
}

/// The time, encompassing the [hour](Self::hour),
/// [minute](Self::minute), [second](Self::second), and [offset](Self::offset).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
    offset: Option<i16>,
}

impl Time {
    const EMPTY: Time = Time {
        hour: 0,
        minute: 0,
        second: 0,
        offset: None,
    };

    /// Construct a time from the given parts.
    ///
    /// # Clamping
    /// - Hour: `[0, 23]`
    /// - Minute: `[0, 59]`
    /// - Second: `[0, 59]`
    /// - UTC Offset: `[-1439, 1439]` \[-23:59, +23:59]
    ///
    /// The UTC offset is the total number of minutes (e.g., `+08:30` → `510`).
    /// [`None`] indicates local time.
    pub fn new(hour: u8, minute: u8, second: u8, utc_offset: Option<i16>) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
            second: second.min(59),
            offset: utc_offset.map(|minutes| minutes.clamp(-MAX_OFFSET, MAX_OFFSET)),
        }
    }

    /// Construct a UTC time from the given parts.
    ///
    /// # See Also
    /// - [`Self::new`] for clamping details.
    pub fn utc(hour: u8, minute: u8, second: u8) -> Self {
        Self::new(hour, minute, second, Some(0))
    }

    /// Supported formats:
    /// - `hh:mm[:ss[.fff]]`
    /// - `hhmm[ss[.fff]]`
    ///
    /// Followed by an optional offset:
    /// - `Z`
    /// - `±hh:mm`
    /// - `±hhmm`
    /// - `±hh`
    fn parse(raw: &str) -> Option<Self> {
        let mut chars = raw.chars().peekable();

        let hour = take_num(&mut chars, 2)?;
        let extended = chars.next_if_eq(&':').is_some();
        let minute = take_num(&mut chars, 2)?;
        let mut second = 0;

        let has_seconds = if extended {
            chars.next_if_eq(&':').is_some()
        } else {
            chars.peek().is_some_and(char::is_ascii_digit)
        };
        if has_seconds {
            second = take_num(&mut chars, 2)?;

            // Fractional seconds are accepted but not retained
            if chars.next_if(|c| matches!(c, '.' | ',')).is_some() {
                take_num(&mut chars, 1)?;
                while chars.next_if(char::is_ascii_digit).is_some() {}
            }
        }

        let offset = match chars.next() {
            None => None,
            Some('Z' | 'z') => Some(0),
            Some(sign @ ('+' | '-')) => {
                let hours = take_num(&mut chars, 2)?;
                let has_minutes = chars.next_if_eq(&':').is_some() || chars.peek().is_some();
                let minutes = if has_minutes {
                    take_num(&mut chars, 2)?
                } else {
                    0
                };
                if hours > 23 || minutes > 59 {
                    return None;
                }
                let total = i16::try_from(hours * 60 + minutes).ok()?;
                Some(if sign == '-' { -total } else { total })
            }
            Some(_) => return None,
        };

        // A leap second (`60`) is folded into the last regular second
        if chars.next().is_some() || hour > 23 || minute > 59 || second > 60 {
            return None;
        }
        Some(Time {
            hour: hour as u8,
            minute: minute as u8,
            second: second.min(59) as u8,
            offset,
        })
    }

    /// The number of hours (`0-23`).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The number of minutes (`0-59`).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The number of seconds (`0-59`).
    pub fn second(&self) -> u8 {
        self.second
    }

    /// The total UTC offset in minutes (e.g., `+08:30` → `510`).
    pub fn offset(&self) -> Option<i16> {
        self.offset
    }

    /// Returns `true` if the [offset](Self::offset) is [`None`]
    /// (no specified UTC offset).
    pub fn is_local(&self) -> bool {
        self.offset.is_none()
    }

    /// Returns `true` if the [offset](Self::offset) is `0`.
    pub fn is_utc(&self) -> bool {
        self.offset == Some(0)
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:0>2}:{:0>2}:{:0>2}",
            self.hour, self.minute, self.second,
        )?;

        // Write offset
        match self.offset {
            Some(0) => write!(f, "Z"),
            Some(offset) => {
                let sign = if offset < 0 { '-' } else { '+' };
                let offset = offset.abs();

                write!(f, "{sign}{:0>2}:{:0>2}", offset / 60, offset % 60)
            }
            _ => Ok(()),
        }
    }
}

const MAX_OFFSET: i16 = 23 * 60 + 59;

fn days_in_month(year: i16, month: u8) -> u8 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Takes exactly `count` ASCII digits.
fn take_num(chars: &mut Peekable<impl Iterator<Item = char>>, count: usize) -> Option<u32> {
    let mut num = 0;
    for _ in 0..count {
        let digit = chars.next_if(char::is_ascii_digit)?.to_digit(10)?;
        num = num * 10 + digit;
    }
    Some(num)
}
