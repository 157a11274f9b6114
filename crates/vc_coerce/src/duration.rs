//! Duration casts and the `1h2m3.5s` text form.

use core::time::Duration;

use vc_reflect::Reflect;

use crate::scalar::{Scalar, classify, unsupported};
use crate::{CastError, CastOptions, TimeUnit};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Casts to [`Duration`].
///
/// Numbers count units of [`CastOptions::unit`]. Text uses the
/// `[-+]?(<number><unit>)+` syntax, for example `"1h30m"`, `"1.5s"` or
/// `"300ms"`; a bare `"0"` is also accepted.
///
/// # Errors
///
/// Negative values are an [`Overflow`](CastError::Overflow), since a
/// `Duration` cannot hold them.
pub fn to_duration(value: &dyn Reflect, options: &CastOptions) -> Result<Duration, CastError> {
    let unit = options.unit().nanos();
    match classify(value).widen() {
        Scalar::Nil => Ok(Duration::ZERO),
        Scalar::Duration(duration) => Ok(duration),
        Scalar::Int(number) => match u64::try_from(number) {
            Ok(number) => scaled(number, unit),
            Err(_) => Err(CastError::overflow(number, "Duration")),
        },
        Scalar::Uint(number) => scaled(number, unit),
        Scalar::Float(number) => Duration::try_from_secs_f64(number * unit as f64 / 1e9)
            .map_err(|_| CastError::overflow(number, "Duration")),
        Scalar::Str(text) => parse_duration(text),
        _ => Err(unsupported(value, "Duration")),
    }
}

fn scaled(number: u64, unit: u64) -> Result<Duration, CastError> {
    number
        .checked_mul(unit)
        .map(Duration::from_nanos)
        .ok_or_else(|| CastError::overflow(number, "Duration"))
}

/// Parses the `1h2m3.5s` form.
///
/// The total is bounded by `i64::MAX` nanoseconds so that every parsed value
/// renders and parses back the same way.
pub(crate) fn parse_duration(input: &str) -> Result<Duration, CastError> {
    let invalid = |reason| CastError::ParseDuration {
        input: input.to_owned(),
        reason,
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = tail
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(invalid("missing unit"));
        }
        let unit = unit.parse::<TimeUnit>().map_err(|_| invalid("unknown unit"))?;

        total = component(whole, fraction, u128::from(unit.nanos()))
            .and_then(|nanos| total.checked_add(nanos))
            .filter(|&total| total <= i64::MAX as u128)
            .ok_or_else(|| invalid("out of range"))?;
        rest = tail;
    }

    if negative && total != 0 {
        return Err(CastError::overflow(input, "Duration"));
    }
    let nanos = u64::try_from(total).map_err(|_| invalid("out of range"))?;
    Ok(Duration::from_nanos(nanos))
}

fn split_digits(text: &str) -> (&str, &str) {
    let len = text.bytes().take_while(u8::is_ascii_digit).count();
    text.split_at(len)
}

/// `whole.fraction` units of `scale` nanoseconds. Fraction digits below one
/// nanosecond are dropped.
fn component(whole: &str, fraction: &str, scale: u128) -> Option<u128> {
    let whole = match whole {
        "" => 0,
        digits => digits.parse::<u128>().ok()?,
    };
    let mut nanos = whole.checked_mul(scale)?;
    let mut place = scale;
    for digit in fraction.bytes() {
        place /= 10;
        if place == 0 {
            break;
        }
        nanos += u128::from(digit - b'0') * place;
    }
    Some(nanos)
}

/// Renders a duration as `72h3m0.5s`, `1.5ms` or `0s`.
pub(crate) fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", decimal(nanos, 1_000));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", decimal(nanos, 1_000_000));
    }

    let secs = duration.as_secs();
    let seconds = decimal(
        u128::from(secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos()),
        NANOS_PER_SEC,
    );
    match (secs / 3600, secs / 60 % 60) {
        (0, 0) => format!("{seconds}s"),
        (0, minutes) => format!("{minutes}m{seconds}s"),
        (hours, minutes) => format!("{hours}h{minutes}m{seconds}s"),
    }
}

/// `value / scale` with the fraction's trailing zeros removed.
fn decimal(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::*;

    fn parse(text: &str) -> Duration {
        parse_duration(text).unwrap()
    }

    #[test]
    fn parses_text() {
        assert_eq!(parse("0"), Duration::ZERO);
        assert_eq!(parse("-0"), Duration::ZERO);
        assert_eq!(parse("300ms"), Duration::from_millis(300));
        assert_eq!(parse("1.5s"), Duration::from_millis(1500));
        assert_eq!(parse("+1h30m"), Duration::from_secs(5400));
        assert_eq!(parse(".5m"), Duration::from_secs(30));
        assert_eq!(parse("1.s"), Duration::from_secs(1));
        assert_eq!(parse("2us3ns"), Duration::from_nanos(2003));
        assert_eq!(parse("1µs"), parse("1μs"));
        assert_eq!(parse("1.0000000001s"), Duration::from_secs(1));
    }

    #[test]
    fn rejects_text() {
        for text in ["", "-", "1", "s", "1.5", ".s", "1d", "1h-2m"] {
            assert!(
                matches!(parse_duration(text), Err(CastError::ParseDuration { .. })),
                "{text:?}"
            );
        }
        assert!(matches!(parse_duration("-1s"), Err(CastError::Overflow { .. })));
        assert!(matches!(
            parse_duration("9223372037s"),
            Err(CastError::ParseDuration { reason: "out of range", .. })
        ));
    }

    #[test]
    fn formats() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(12)), "12ns");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(format_duration(Duration::from_micros(2_250)), "2.25ms");
        assert_eq!(format_duration(Duration::from_millis(3_500)), "3.5s");
        assert_eq!(format_duration(Duration::from_secs(120)), "2m0s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_millis(3_723_500)), "1h2m3.5s");

        let odd = Duration::new(259_380, 500_000_000);
        assert_eq!(parse(&format_duration(odd)), odd);
    }

    #[test]
    fn casts() {
        let options = CastOptions::new();
        let seconds = CastOptions::new().with_unit(TimeUnit::Seconds);

        assert_eq!(to_duration(&None::<u8>, &options).unwrap(), Duration::ZERO);
        assert_eq!(to_duration(&1500_i32, &options).unwrap(), Duration::from_nanos(1500));
        assert_eq!(to_duration(&90_u8, &seconds).unwrap(), Duration::from_secs(90));
        assert_eq!(to_duration(&1.5_f64, &seconds).unwrap(), Duration::from_millis(1500));
        assert_eq!(to_duration(&"2m", &seconds).unwrap(), Duration::from_secs(120));
        assert_eq!(
            to_duration(&Some(Duration::from_secs(4)), &options).unwrap(),
            Duration::from_secs(4)
        );

        assert!(matches!(to_duration(&-1_i64, &options), Err(CastError::Overflow { .. })));
        assert!(matches!(to_duration(&-0.5_f32, &options), Err(CastError::Overflow { .. })));
        assert!(matches!(to_duration(&u64::MAX, &seconds), Err(CastError::Overflow { .. })));
        assert!(matches!(to_duration(&true, &options), Err(CastError::Unsupported { .. })));
    }
}
