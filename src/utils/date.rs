// Date parsing for backend records and the --today override

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use anyhow::{anyhow, bail, Result};

/// Formats accepted for naive (offset-less) backend timestamps
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a backend date or timestamp into local wall-clock time
///
/// Supported:
/// - `2026-01-10` (midnight)
/// - `2026-01-10T14:30`, `2026-01-10T14:30:00`, `2026-01-10 14:30:00.123`
/// - RFC 3339 with offset, e.g. `2026-01-10T14:30:00Z`, converted to local time
pub fn parse_backend_datetime(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime);
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Local).naive_local());
    }

    bail!("Unrecognized date: '{}'", value)
}

/// Parse a date expression for "today" (used to pin the reference date)
///
/// Supported: `YYYY-MM-DD`, `today`, `yesterday`, `tomorrow`, `+Nd`, `-Nd`.
/// Relative forms are resolved against `now`.
pub fn parse_date_expr(expr: &str, now: NaiveDate) -> Result<NaiveDate> {
    let expr = expr.trim();

    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        return Ok(date);
    }

    match expr.to_lowercase().as_str() {
        "today" => return Ok(now),
        "yesterday" => return Ok(now - Duration::days(1)),
        "tomorrow" => return Ok(now + Duration::days(1)),
        _ => {}
    }

    if let Some(body) = expr.strip_suffix('d') {
        let (sign, digits) = if let Some(rest) = body.strip_prefix('+') {
            (1, rest)
        } else if let Some(rest) = body.strip_prefix('-') {
            (-1, rest)
        } else {
            bail!("Unsupported date expression: '{}'. Use YYYY-MM-DD, today, tomorrow, yesterday, +Nd or -Nd.", expr)
        };
        let days: i64 = digits
            .parse()
            .map_err(|_| anyhow!("Invalid day offset in date expression: '{}'", expr))?;
        return days
            .checked_mul(sign)
            .and_then(Duration::try_days)
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or_else(|| anyhow!("Date out of range: '{}'", expr));
    }

    bail!("Unsupported date expression: '{}'. Use YYYY-MM-DD, today, tomorrow, yesterday, +Nd or -Nd.", expr)
}

/// Local current date
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
