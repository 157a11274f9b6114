//! Timestamp casts.
//!
//! Two text layouts are understood: `2006-01-02 15:04:05 -0700` and RFC 3339.

use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use vc_reflect::Reflect;

use crate::duration::parse_duration;
use crate::scalar::{Scalar, classify, unsupported};
use crate::{CastError, CastOptions};

const SECS_PER_DAY: i64 = 86_400;
const NANOS_PER_SEC: i128 = 1_000_000_000;

// -----------------------------------------------------------------------------
// Cast

/// Casts to [`SystemTime`].
///
/// Numbers count units of [`CastOptions::unit`] since the Unix epoch and may
/// be negative. Text is tried as a duration since the epoch, then as
/// `YYYY-MM-DD HH:MM:SS ±hhmm`, then as RFC 3339.
pub fn to_time(value: &dyn Reflect, options: &CastOptions) -> Result<SystemTime, CastError> {
    let unit = i128::from(options.unit().nanos());
    let nanos = match classify(value).widen() {
        Scalar::Nil => return Ok(UNIX_EPOCH),
        Scalar::Time(time) => return Ok(time),
        Scalar::Str(text) => return parse_time(text),
        Scalar::Int(number) => i128::from(number) * unit,
        Scalar::Uint(number) => i128::from(number) * unit,
        Scalar::Float(number) if number.is_finite() => (number * unit as f64) as i128,
        Scalar::Float(number) => return Err(CastError::overflow(number, "SystemTime")),
        _ => return Err(unsupported(value, "SystemTime")),
    };

    i64::try_from(nanos.div_euclid(NANOS_PER_SEC))
        .ok()
        .and_then(|secs| from_unix(secs, nanos.rem_euclid(NANOS_PER_SEC) as u32))
        .ok_or_else(|| CastError::overflow(nanos, "SystemTime"))
}

fn parse_time(text: &str) -> Result<SystemTime, CastError> {
    if let Ok(since_epoch) = parse_duration(text) {
        return Ok(UNIX_EPOCH + since_epoch);
    }
    parse_default(text)
        .or_else(|| parse_rfc3339(text))
        .and_then(|(secs, nanos)| from_unix(secs, nanos))
        .ok_or_else(|| CastError::ParseTime(text.to_owned()))
}

fn from_unix(secs: i64, nanos: u32) -> Option<SystemTime> {
    if secs >= 0 {
        UNIX_EPOCH.checked_add(Duration::new(secs.unsigned_abs(), nanos))
    } else {
        UNIX_EPOCH
            .checked_sub(Duration::from_secs(secs.unsigned_abs()))?
            .checked_add(Duration::from_nanos(u64::from(nanos)))
    }
}

// -----------------------------------------------------------------------------
// Layouts

struct Cursor<'a>(&'a [u8]);

impl Cursor<'_> {
    fn byte(&mut self) -> Option<u8> {
        let (&first, rest) = self.0.split_first()?;
        self.0 = rest;
        Some(first)
    }

    fn eat(&mut self, expected: u8) -> Option<()> {
        (self.byte()? == expected).then_some(())
    }

    fn number(&mut self, width: usize) -> Option<u32> {
        if self.0.len() < width {
            return None;
        }
        let (digits, rest) = self.0.split_at(width);
        self.0 = rest;
        digits.iter().try_fold(0, |acc, &b| {
            b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
        })
    }

    /// `YYYY-MM-DD?HH:MM:SS` as seconds since the epoch, before any offset.
    fn date_time(&mut self, separator: &[u8]) -> Option<i64> {
        let year = self.number(4)?;
        self.eat(b'-')?;
        let month = self.number(2)?;
        self.eat(b'-')?;
        let day = self.number(2)?;
        let sep = self.byte()?;
        if !separator.contains(&sep) {
            return None;
        }
        let hour = self.number(2)?;
        self.eat(b':')?;
        let minute = self.number(2)?;
        self.eat(b':')?;
        let second = self.number(2)?;

        let valid = (1..=12).contains(&month)
            && (1..=days_in_month(year, month)).contains(&day)
            && hour < 24
            && minute < 60
            && second < 60;
        valid.then(|| {
            days_from_civil(i64::from(year), month, day) * SECS_PER_DAY
                + i64::from(hour * 3600 + minute * 60 + second)
        })
    }

    /// `±hh` followed by `mm`, optionally separated, as signed seconds.
    fn offset(&mut self, colon: bool) -> Option<i64> {
        let sign = match self.byte()? {
            b'+' => 1,
            b'-' => -1,
            _ => return None,
        };
        let hours = self.number(2)?;
        if colon {
            self.eat(b':')?;
        }
        let minutes = self.number(2)?;
        (hours < 24 && minutes < 60).then(|| sign * i64::from(hours * 3600 + minutes * 60))
    }

    fn is_done(&self) -> bool {
        self.0.is_empty()
    }
}

/// `2006-01-02 15:04:05 -0700`
fn parse_default(text: &str) -> Option<(i64, u32)> {
    let mut cursor = Cursor(text.as_bytes());
    let local = cursor.date_time(b" ")?;
    cursor.eat(b' ')?;
    let offset = cursor.offset(false)?;
    cursor.is_done().then_some((local - offset, 0))
}

/// `2006-01-02T15:04:05.999999999Z07:00`
fn parse_rfc3339(text: &str) -> Option<(i64, u32)> {
    let mut cursor = Cursor(text.as_bytes());
    let local = cursor.date_time(b"Tt")?;

    let mut nanos = 0;
    if cursor.0.first() == Some(&b'.') {
        cursor.byte();
        let len = cursor.0.iter().take_while(|b| b.is_ascii_digit()).count();
        if len == 0 {
            return None;
        }
        let (digits, rest) = cursor.0.split_at(len);
        cursor.0 = rest;
        // Digits past nanoseconds are truncated.
        for (place, &digit) in digits.iter().take(9).enumerate() {
            nanos += u32::from(digit - b'0') * 10_u32.pow(8 - place as u32);
        }
    }

    let offset = match cursor.0.first() {
        Some(b'Z' | b'z') => {
            cursor.byte();
            0
        }
        _ => cursor.offset(true)?,
    };
    cursor.is_done().then_some((local - offset, nanos))
}

// -----------------------------------------------------------------------------
// Calendar

fn is_leap(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Days since 1970-01-01 of a proleptic Gregorian date.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year.rem_euclid(400);
    let month = i64::from(month);
    let day_of_year = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * shifted + 2) / 5 + 1) as u32;
    let month = (if shifted < 10 { shifted + 3 } else { shifted - 9 }) as u32;
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Renders a time as RFC 3339 in UTC, with the fraction only when non-zero.
pub(crate) fn format_time(time: SystemTime) -> String {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (
            i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
            after.subsec_nanos(),
        ),
        Err(before) => {
            let before = before.duration();
            let secs = -i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            match before.subsec_nanos() {
                0 => (secs, 0),
                nanos => (secs - 1, 1_000_000_000 - nanos),
            }
        }
    };

    let (year, month, day) = civil_from_days(secs.div_euclid(SECS_PER_DAY));
    let clock = secs.rem_euclid(SECS_PER_DAY);
    let (hour, minute, second) = (clock / 3600, clock / 60 % 60, clock % 60);
    let fraction = match nanos {
        0 => String::new(),
        nanos => format!(".{nanos:09}").trim_end_matches('0').to_owned(),
    };
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}{fraction}Z")
}
