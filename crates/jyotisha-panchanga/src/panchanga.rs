//! C6 — the Pañcāṅga Engine. Consumes `(date, lat, lon, timezone)` and
//! produces the full calendar snapshot of `spec.md` §3/§4.C6: sunrise/
//! sunset, vāra, current+next tithi/nakṣatra/yoga, the karaṇa sequence
//! spanning sunrise-to-sunrise, amānta/pūrṇimānta month, adhika-māsa, moon/
//! sun sign, and the three Saṃvat years.

use chrono::{Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;
use jyotisha_chart::enrich_longitude;
use jyotisha_core::{JyotishaError, Planet, NAKSHATRA_TABLE};
use jyotisha_ephemeris::{civil_to_julian_day, julian_day_to_datetime, EphemerisAdapter};

use crate::bracketing::find_boundary_default;
use crate::tables::{karana_name, MONTH_NAMES, TITHI_NAMES, VARA_TABLE, YOGA_NAMES};

const NAKSHATRA_SEGMENT: f64 = 360.0 / 27.0;
const YOGA_SEGMENT: f64 = 360.0 / 27.0;
const TITHI_SEGMENT: f64 = 12.0;
const KARANA_SEGMENT: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TithiState {
    pub current_index: u8,
    pub current_name: String,
    pub paksha: String,
    pub current_end: String,
    pub next_index: u8,
    pub next_name: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NakshatraState {
    pub current_index: u8,
    pub current_name: String,
    pub pada: u8,
    pub current_end: String,
    pub next_index: u8,
    pub next_name: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct YogaState {
    pub current_index: u8,
    pub current_name: String,
    pub current_end: String,
    pub next_index: u8,
    pub next_name: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KaranaEntry {
    pub index: u8,
    pub name: String,
    pub end_instant: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MonthInfo {
    pub amanta: String,
    pub purnimanta: String,
    pub adhika_masa: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SamvatYears {
    pub shaka: i32,
    pub vikram: i32,
    pub gujarati: i32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanchangaSnapshot {
    pub date: String,
    pub sunrise: String,
    pub sunset: String,
    pub vara: String,
    pub vara_lord: String,
    pub tithi: TithiState,
    pub nakshatra: NakshatraState,
    pub yoga: YogaState,
    pub karana: Vec<KaranaEntry>,
    pub month: MonthInfo,
    pub moon_sign: String,
    pub sun_sign: String,
    pub samvat: SamvatYears,
}

fn sun_long(eph: &EphemerisAdapter, jd: f64) -> Result<f64, JyotishaError> {
    Ok(eph.calc_body(jd, Planet::Sun)?.longitude)
}

fn moon_long(eph: &EphemerisAdapter, jd: f64) -> Result<f64, JyotishaError> {
    Ok(eph.calc_body(jd, Planet::Moon)?.longitude)
}

/// Signed distance from `value` to the nearest representative of `target`
/// modulo 360 — continuous across the 360/0 wrap as long as `value` stays
/// within roughly 180 degrees of `target`, which always holds for the short
/// (sub-few-day) brackets every boundary search here operates over.
fn signed_offset(value: f64, target: f64) -> f64 {
    ((value - target + 180.0).rem_euclid(360.0)) - 180.0
}

fn wall_clock_label(jd: f64, tz: Tz, reference_date: NaiveDate) -> String {
    let utc_dt = julian_day_to_datetime(jd);
    let local_dt = tz.from_utc_datetime(&utc_dt.naive_utc());
    if local_dt.date_naive() != reference_date {
        format!(
            "{}, {}",
            local_dt.format("%-I:%M %p"),
            local_dt.format("%b %-d")
        )
    } else {
        local_dt.format("%-I:%M %p").to_string()
    }
}

fn tithi_index(sun: f64, moon: f64) -> usize {
    (((moon - sun).rem_euclid(360.0)) / TITHI_SEGMENT).floor() as usize % 30
}

fn yoga_index(sun: f64, moon: f64) -> usize {
    (((sun + moon).rem_euclid(360.0)) / YOGA_SEGMENT).floor() as usize % 27
}

fn karana_index(sun: f64, moon: f64) -> usize {
    (((moon - sun).rem_euclid(360.0)) / KARANA_SEGMENT).floor() as usize % 60
}

fn tithi_end(eph: &EphemerisAdapter, jd_start: f64, idx: usize) -> Result<f64, JyotishaError> {
    let target = ((idx + 1) as f64 * TITHI_SEGMENT).rem_euclid(360.0);
    find_boundary_default(
        |t| {
            let diff = (moon_long(eph, t)? - sun_long(eph, t)?).rem_euclid(360.0);
            Ok(signed_offset(diff, target))
        },
        jd_start,
        0.3,
    )
}

fn nakshatra_end(eph: &EphemerisAdapter, jd_start: f64, idx: usize) -> Result<f64, JyotishaError> {
    let target = ((idx + 1) as f64 * NAKSHATRA_SEGMENT).rem_euclid(360.0);
    find_boundary_default(
        |t| Ok(signed_offset(moon_long(eph, t)?, target)),
        jd_start,
        0.3,
    )
}

fn yoga_end(eph: &EphemerisAdapter, jd_start: f64, idx: usize) -> Result<f64, JyotishaError> {
    let target = ((idx + 1) as f64 * YOGA_SEGMENT).rem_euclid(360.0);
    find_boundary_default(
        |t| {
            let sum = (sun_long(eph, t)? + moon_long(eph, t)?).rem_euclid(360.0);
            Ok(signed_offset(sum, target))
        },
        jd_start,
        0.3,
    )
}

fn karana_end(eph: &EphemerisAdapter, jd_start: f64, idx: usize) -> Result<f64, JyotishaError> {
    let target = ((idx + 1) as f64 * KARANA_SEGMENT).rem_euclid(360.0);
    find_boundary_default(
        |t| {
            let diff = (moon_long(eph, t)? - sun_long(eph, t)?).rem_euclid(360.0);
            Ok(signed_offset(diff, target))
        },
        jd_start,
        0.15,
    )
}

/// Searches backward from `jd_start` for the most recent instant the Sun and
/// Moon were `target` degrees apart (0 = Amāvāsyā, 180 = Pūrṇimā),
/// `spec.md` §4.C6.
fn most_recent_conjunction(eph: &EphemerisAdapter, jd_start: f64, target: f64) -> Result<f64, JyotishaError> {
    find_boundary_default(
        |t| {
            let diff = (moon_long(eph, t)? - sun_long(eph, t)?).rem_euclid(360.0);
            Ok(signed_offset(diff, target))
        },
        jd_start,
        -0.5,
    )
}

fn samvat_years(gregorian_year: i32, amanta_month_sign_index: u8) -> SamvatYears {
    // Vikram/Śaka New Year falls near Chaitra (sign index 0); Gujarati New
    // Year falls near Kartika (sign index 7, post-Diwali). A Gregorian date
    // whose amānta month still precedes that sign hasn't crossed the lunar
    // new year yet this Gregorian year, so the running count is one behind
    // the plain additive formula. This is the documented approximation for
    // the Open Question in spec.md §9 (no external reference table was
    // available in the retrieval pack to do better).
    let before_chaitra = matches!(amanta_month_sign_index, 9 | 10 | 11);
    let before_kartika = amanta_month_sign_index < 7;

    SamvatYears {
        shaka: gregorian_year - 78 - i32::from(before_chaitra),
        vikram: gregorian_year + 57 - i32::from(before_chaitra),
        gujarati: gregorian_year + 56 - i32::from(before_kartika),
    }
}

/// Computes the full Pañcāṅga snapshot for one civil date and location.
pub fn compute_panchanga(
    eph: &EphemerisAdapter,
    date: &str,
    timezone: &str,
    lat: f64,
    lon: f64,
) -> Result<PanchangaSnapshot, JyotishaError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| JyotishaError::input(format!("unknown IANA timezone: {timezone}")))?;
    let reference_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| JyotishaError::input(format!("malformed date '{date}': {e}")))?;

    let jd_midnight = civil_to_julian_day(date, "00:00:00", timezone)?;
    let sunrise_jd = eph.calc_sunrise(jd_midnight, lat, lon)?;
    let sunset_jd = eph.calc_sunset(jd_midnight, lat, lon)?;
    let next_sunrise_jd = eph.calc_sunrise(jd_midnight + 1.0, lat, lon)?;

    let sun_at_sunrise = sun_long(eph, sunrise_jd)?;
    let moon_at_sunrise = moon_long(eph, sunrise_jd)?;

    // Vara: weekday at local sunrise.
    let local_sunrise_weekday_index = {
        let utc_dt = julian_day_to_datetime(sunrise_jd);
        let local_dt = tz.from_utc_datetime(&utc_dt.naive_utc());
        local_dt.weekday().num_days_from_sunday() as usize
    };
    let (vara_name, vara_lord) = VARA_TABLE[local_sunrise_weekday_index];

    // Tithi.
    let t_idx = tithi_index(sun_at_sunrise, moon_at_sunrise);
    let t_end_jd = tithi_end(eph, sunrise_jd, t_idx)?;
    let t_next_idx = (t_idx + 1) % 30;
    let tithi = TithiState {
        current_index: t_idx as u8,
        current_name: TITHI_NAMES[t_idx].to_string(),
        paksha: if t_idx < 15 { "Shukla" } else { "Krishna" }.to_string(),
        current_end: wall_clock_label(t_end_jd, tz, reference_date),
        next_index: t_next_idx as u8,
        next_name: TITHI_NAMES[t_next_idx].to_string(),
    };

    // Nakshatra.
    let n_idx = (moon_at_sunrise / NAKSHATRA_SEGMENT).floor() as usize % 27;
    let n_end_jd = nakshatra_end(eph, sunrise_jd, n_idx)?;
    let n_next_idx = (n_idx + 1) % 27;
    let pada = (((moon_at_sunrise - n_idx as f64 * NAKSHATRA_SEGMENT) / (NAKSHATRA_SEGMENT / 4.0))
        .floor() as u8)
        + 1;
    let nakshatra = NakshatraState {
        current_index: n_idx as u8,
        current_name: NAKSHATRA_TABLE[n_idx].0.to_string(),
        pada,
        current_end: wall_clock_label(n_end_jd, tz, reference_date),
        next_index: n_next_idx as u8,
        next_name: NAKSHATRA_TABLE[n_next_idx].0.to_string(),
    };

    // Yoga.
    let y_idx = yoga_index(sun_at_sunrise, moon_at_sunrise);
    let y_end_jd = yoga_end(eph, sunrise_jd, y_idx)?;
    let y_next_idx = (y_idx + 1) % 27;
    let yoga = YogaState {
        current_index: y_idx as u8,
        current_name: YOGA_NAMES[y_idx].to_string(),
        current_end: wall_clock_label(y_end_jd, tz, reference_date),
        next_index: y_next_idx as u8,
        next_name: YOGA_NAMES[y_next_idx].to_string(),
    };

    // Karana sequence spanning [sunrise, next_sunrise).
    let mut karana = Vec::new();
    let mut k_idx = karana_index(sun_at_sunrise, moon_at_sunrise);
    let mut cursor_jd = sunrise_jd;
    for _ in 0..6 {
        let end_jd = karana_end(eph, cursor_jd, k_idx)?;
        karana.push(KaranaEntry {
            index: k_idx as u8,
            name: karana_name(k_idx).to_string(),
            end_instant: wall_clock_label(end_jd, tz, reference_date),
        });
        if end_jd >= next_sunrise_jd {
            break;
        }
        cursor_jd = end_jd;
        k_idx = (k_idx + 1) % 60;
    }

    // Lunar month names and adhika-masa.
    let amavasya_prev_jd = most_recent_conjunction(eph, sunrise_jd, 0.0)?;
    let amavasya_next_jd = {
        // Search forward for the *next* Amavasya to test for an intervening
        // solar ingress (adhika-masa check).
        find_boundary_default(
            |t| {
                let diff = (moon_long(eph, t)? - sun_long(eph, t)?).rem_euclid(360.0);
                Ok(signed_offset(diff, 0.0))
            },
            sunrise_jd,
            0.5,
        )?
    };
    let purnima_jd = most_recent_conjunction(eph, sunrise_jd, 180.0)?;

    let amanta_sun_sign = enrich_longitude(sun_long(eph, amavasya_prev_jd)?)?.sign_index;
    let purnimanta_sun_sign = enrich_longitude(sun_long(eph, purnima_jd)?)?.sign_index;
    let amanta_sun_sign_next = enrich_longitude(sun_long(eph, amavasya_next_jd)?)?.sign_index;

    let month = MonthInfo {
        amanta: MONTH_NAMES[amanta_sun_sign as usize].to_string(),
        purnimanta: MONTH_NAMES[purnimanta_sun_sign as usize].to_string(),
        adhika_masa: amanta_sun_sign == amanta_sun_sign_next,
    };

    let moon_sign = enrich_longitude(moon_at_sunrise)?.sign;
    let sun_sign = enrich_longitude(sun_at_sunrise)?.sign;

    let samvat = samvat_years(reference_date.year(), amanta_sun_sign);

    Ok(PanchangaSnapshot {
        date: date.to_string(),
        sunrise: wall_clock_label(sunrise_jd, tz, reference_date),
        sunset: wall_clock_label(sunset_jd, tz, reference_date),
        vara: vara_name.to_string(),
        vara_lord: vara_lord.name().to_string(),
        tithi,
        nakshatra,
        yoga,
        karana,
        month,
        moon_sign,
        sun_sign,
        samvat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tithi_index_matches_the_floor_formula() {
        // moon - sun = 50 deg -> tithi index floor(50/12) = 4 (Shukla Panchami).
        assert_eq!(tithi_index(10.0, 60.0), 4);
    }

    #[test]
    fn tithi_index_wraps_across_the_zero_boundary() {
        assert_eq!(tithi_index(350.0, 10.0), 1);
    }

    #[test]
    fn yoga_index_matches_the_floor_formula() {
        // sun + moon = 40 deg -> index floor(40 / (360/27)) = 3.
        assert_eq!(yoga_index(20.0, 20.0), 3);
    }

    #[test]
    fn karana_index_is_twice_as_fine_as_tithi() {
        // Same diff should give karana index roughly 2x the tithi index
        // (within the same tithi, karana flips halfway through).
        assert_eq!(karana_index(10.0, 70.0), 5);
    }

    #[test]
    fn signed_offset_is_continuous_across_the_wrap() {
        let d = signed_offset(359.5, 0.0);
        assert!((d - (-0.5)).abs() < 1e-9);
    }

    #[test]
    fn samvat_years_apply_plain_formula_away_from_the_lunar_boundary() {
        // Sagittarius (index 8) is neither "before Chaitra" nor "before Kartika".
        let s = samvat_years(2026, 8);
        assert_eq!(s.shaka, 1948);
        assert_eq!(s.vikram, 2083);
        assert_eq!(s.gujarati, 2082);
    }
}
