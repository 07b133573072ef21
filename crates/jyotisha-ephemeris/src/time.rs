//! Civil-time ↔ Julian Day conversions, grounded on
//! `aphrodite::ephemeris::adapter::{datetime_to_julian_day, julian_day_to_datetime}`
//! (which itself wraps `swisseph::swe::julday`/`revjul`), plus real IANA
//! timezone resolution via `chrono-tz` — absent from every grounding source,
//! added here because `spec.md` §4.C1 requires an unknown timezone to fail
//! with `InputError`, which a silent-default lookup table cannot do.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use jyotisha_core::JyotishaError;

const GREGORIAN_FLAG: i32 = 1;

/// Julian Day (UT) for a UTC instant, via `swisseph::swe::julday`.
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal = dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;
    swisseph::swe::julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, GREGORIAN_FLAG)
}

/// Inverse of [`datetime_to_julian_day`], via `swisseph::swe::revjul`.
pub fn julian_day_to_datetime(jd: f64) -> DateTime<Utc> {
    let (year, month, day, hour_decimal) = swisseph::swe::revjul(jd, GREGORIAN_FLAG);
    let hour = hour_decimal.floor() as u32;
    let minute_f = (hour_decimal - hour as f64) * 60.0;
    let minute = minute_f.floor() as u32;
    let second_f = (minute_f - minute as f64) * 60.0;
    let second = second_f.floor() as u32;
    let nanosecond = ((second_f - second as f64) * 1e9).round() as u32;
    let date = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1).expect("fixed fallback date is valid"));
    let time = NaiveTime::from_hms_nano_opt(hour.min(23), minute.min(59), second.min(59), nanosecond)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).expect("midnight is always valid"));
    Utc.from_utc_datetime(&NaiveDateTime::new(date, time))
}

/// Resolves an IANA timezone identifier. Unknown identifiers are an
/// `InputError`, not a silent default — several grounding sources in the
/// retrieval pack fall back to UTC on an unrecognized string; `spec.md`
/// §4.C1 explicitly forbids that here.
fn resolve_timezone(tz_name: &str) -> Result<Tz, JyotishaError> {
    tz_name
        .parse::<Tz>()
        .map_err(|_| JyotishaError::input(format!("unknown IANA timezone: {tz_name}")))
}

/// Parses `(date: "YYYY-MM-DD", time: "HH:MM" or "HH:MM:SS", timezone)` into
/// a Julian Day (UT), resolving the wall-clock instant against the real IANA
/// timezone database and converting to UTC before handing off to
/// [`datetime_to_julian_day`].
pub fn civil_to_julian_day(date: &str, time: &str, tz_name: &str) -> Result<f64, JyotishaError> {
    let naive_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| JyotishaError::input(format!("malformed date '{date}': {e}")))?;
    let naive_time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|e| JyotishaError::input(format!("malformed time '{time}': {e}")))?;
    let naive = NaiveDateTime::new(naive_date, naive_time);

    let tz = resolve_timezone(tz_name)?;
    let local = tz
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| JyotishaError::input(format!("ambiguous or nonexistent local time '{date} {time}' in {tz_name}")))?;
    let utc = local.with_timezone(&Utc);
    Ok(datetime_to_julian_day(utc))
}
