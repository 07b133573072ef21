//! C8 — the Transit Engine (`spec.md` §4.C8): current sidereal positions on
//! demand, and sign-ingress scanning over an arbitrary window.
//!
//! `sign_ingresses` reuses `jyotisha_panchanga`'s root-bracketing primitive —
//! the one other place `spec.md` itself calls for the identical numerical
//! technique (§4.C6 and §4.C8). Slow planets (Mars, Jupiter, Saturn) are
//! sampled on a coarse grid since they rarely change sign; fast planets use
//! a 7-day grid, per `spec.md` §4.C8.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use jyotisha_chart::enrich_longitude;
use jyotisha_core::{EnrichedPosition, JyotishaError, Planet};
use jyotisha_ephemeris::{datetime_to_julian_day, julian_day_to_datetime, EphemerisAdapter};
use jyotisha_panchanga::find_boundary_default;

/// One sign-ingress event: the body moved from `from_sign` to `to_sign` at
/// `instant`, both as sign indices 0..11.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ingress {
    pub instant: DateTime<Utc>,
    pub from_sign: u8,
    pub to_sign: u8,
}

/// Grid step (in days) used to sample a planet before bracketing an exact
/// ingress instant. Slow planets change sign every several months to years
/// and are scanned coarsely; fast planets use the 7-day grid `spec.md`
/// §4.C8 names explicitly.
fn sample_step_days(planet: Planet) -> f64 {
    match planet {
        Planet::Mars | Planet::Jupiter | Planet::Saturn => 15.0,
        _ => 7.0,
    }
}

fn longitude_at(eph: &EphemerisAdapter, jd: f64, planet: Planet) -> Result<f64, JyotishaError> {
    Ok(eph.calc_body(jd, planet)?.longitude)
}

fn sign_index_at(eph: &EphemerisAdapter, jd: f64, planet: Planet) -> Result<u8, JyotishaError> {
    Ok((longitude_at(eph, jd, planet)? / 30.0).floor() as u8)
}

/// Signed distance from `value` to the nearest representative of `target`
/// modulo 360 — mirrors `jyotisha_panchanga::panchanga::signed_offset`,
/// duplicated here since that helper is private to its crate and this is
/// the one other place `spec.md` §4.C8/§9 calls for the same technique.
fn signed_offset(value: f64, target: f64) -> f64 {
    ((value - target + 180.0).rem_euclid(360.0)) - 180.0
}

/// Sidereal positions of all nine grahas at `instant`: a thin composition of
/// the ephemeris adapter and the sign/nakṣatra mapper (`spec.md` §4.C8).
pub fn current_positions(
    eph: &EphemerisAdapter,
    instant: DateTime<Utc>,
) -> Result<HashMap<Planet, EnrichedPosition>, JyotishaError> {
    let jd = datetime_to_julian_day(instant);
    let mut out = HashMap::with_capacity(9);
    for planet in Planet::ALL {
        let body = eph.calc_body(jd, planet)?;
        let mut pos = enrich_longitude(body.longitude)?;
        pos.retrograde = Some(body.retrograde);
        out.insert(planet, pos);
    }
    Ok(out)
}

/// Scans `[start, end]` for every sign-ingress of `planet`, sampling on a
/// grid sized per [`sample_step_days`] and root-bracketing each detected
/// sign change to its exact crossing instant. `start` must precede `end`.
pub fn sign_ingresses(
    eph: &EphemerisAdapter,
    planet: Planet,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Ingress>, JyotishaError> {
    if end <= start {
        return Err(JyotishaError::input(
            "sign_ingresses window end must be after start",
        ));
    }

    let start_jd = datetime_to_julian_day(start);
    let end_jd = datetime_to_julian_day(end);
    let step = sample_step_days(planet);

    let mut ingresses = Vec::new();
    let mut t = start_jd;
    let mut prev_sign = sign_index_at(eph, t, planet)?;

    while t < end_jd {
        let next_t = (t + step).min(end_jd);
        let next_sign = sign_index_at(eph, next_t, planet)?;

        if next_sign != prev_sign {
            // Forward motion crosses the lower boundary of the new sign;
            // retrograde motion crosses the lower boundary of the sign it
            // is leaving. Either way the crossing target is whichever sign
            // boundary lies between the two sampled signs.
            let forward = ((next_sign as i32 - prev_sign as i32 + 12) % 12) <= 6;
            let target_sign = if forward { next_sign } else { prev_sign };
            let target = target_sign as f64 * 30.0;

            let window_start = t;
            let crossing_jd = find_boundary_default(
                |s| Ok(signed_offset(longitude_at(eph, s, planet)?, target)),
                window_start,
                step / 8.0,
            )?;
            ingresses.push(Ingress {
                instant: julian_day_to_datetime(crossing_jd),
                from_sign: prev_sign,
                to_sign: next_sign,
            });
        }

        prev_sign = next_sign;
        t = next_t;
    }

    Ok(ingresses)
}
