//! C2 — the Sign/Nakṣatra Mapper. A pure function on a longitude, emitting
//! every derived identity of `spec.md` §3 exactly: sign index, degrees in
//! sign (and its DMS breakdown), nakṣatra index, pada, and lords. Ties at an
//! exact boundary resolve by `floor` — the boundary belongs to the lower
//! bucket for the *current* segment, i.e. the upper segment in absolute
//! terms (`spec.md` §4.C2, §8).

use jyotisha_core::{EnrichedPosition, JyotishaError, NAKSHATRA_TABLE, ZodiacSign};

const NAKSHATRA_SEGMENT: f64 = 360.0 / 27.0;
const PADA_SEGMENT: f64 = NAKSHATRA_SEGMENT / 4.0;

/// Enriches a raw sidereal longitude into a full [`EnrichedPosition`], with
/// `house` and `retrograde` left unset — the chart builder (C5) fills
/// `house` in once it knows the owning chart's ascendant, and the caller
/// (ephemeris layer) fills `retrograde` in from the body's own speed.
pub fn enrich_longitude(longitude: f64) -> Result<EnrichedPosition, JyotishaError> {
    if !(0.0..360.0).contains(&longitude) {
        return Err(JyotishaError::input(format!(
            "longitude {longitude} outside [0, 360)"
        )));
    }

    let sign_index = (longitude / 30.0).floor() as u8;
    let sign = ZodiacSign::from_index(sign_index as i32);
    let degrees_in_sign = longitude % 30.0;

    let degree_dms = degrees_in_sign.floor() as i32;
    let minutes_f = (degrees_in_sign - degree_dms as f64) * 60.0;
    let arcminutes = minutes_f.floor() as i32;
    let arcseconds = ((minutes_f - arcminutes as f64) * 60.0).floor() as i32;

    let nakshatra_index = (longitude / NAKSHATRA_SEGMENT).floor() as usize % 27;
    let offset_in_nakshatra = longitude - nakshatra_index as f64 * NAKSHATRA_SEGMENT;
    let pada = (offset_in_nakshatra / PADA_SEGMENT).floor() as u8 + 1;
    let (nakshatra_name, _sanskrit, lord) = NAKSHATRA_TABLE[nakshatra_index];

    Ok(EnrichedPosition {
        longitude,
        sign: sign.name().to_string(),
        sign_sanskrit: sign.sanskrit_name().to_string(),
        sign_index,
        degrees_in_sign,
        degree_dms,
        arcminutes,
        arcseconds,
        nakshatra: nakshatra_name.to_string(),
        nakshatra_index: nakshatra_index as u8,
        pada,
        nakshatra_lord: lord.name().to_string(),
        house: None,
        retrograde: None,
    })
}

/// Fraction of the current nakṣatra already traversed — the quantity
/// `jyotisha-dasha` needs to compute the Moon's elapsed Mahādaśā fraction at
/// birth (`spec.md` §4.C7). Exposed here since it is derived directly from
/// the same longitude this module already enriches.
pub fn nakshatra_fraction(longitude: f64) -> f64 {
    let offset = longitude % NAKSHATRA_SEGMENT;
    offset / NAKSHATRA_SEGMENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_boundary_is_assigned_to_the_upper_sign() {
        let pos = enrich_longitude(30.0).unwrap();
        assert_eq!(pos.sign_index, 1);
        assert_eq!(pos.degrees_in_sign, 0.0);
    }

    #[test]
    fn nakshatra_boundary_is_assigned_to_the_upper_nakshatra() {
        let pos = enrich_longitude(NAKSHATRA_SEGMENT).unwrap();
        assert_eq!(pos.nakshatra_index, 1);
    }

    #[test]
    fn all_indices_stay_within_spec_ranges_across_the_full_circle() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let pos = enrich_longitude(lon).unwrap();
            assert!(pos.sign_index <= 11);
            assert!((0.0..30.0).contains(&pos.degrees_in_sign));
            assert!(pos.nakshatra_index <= 26);
            assert!((1..=4).contains(&pos.pada));
            lon += 0.37;
        }
    }

    #[test]
    fn out_of_range_longitude_is_input_error() {
        assert!(enrich_longitude(360.0).is_err());
        assert!(enrich_longitude(-0.1).is_err());
    }

    #[test]
    fn scenario_a_moon_matches_jyeshtha_pada_three() {
        // Scenario A: D1 Moon longitude ~235.2501 -> Scorpio, Jyeshtha, pada 3.
        let pos = enrich_longitude(235.2501).unwrap();
        assert_eq!(pos.sign, "Scorpio");
        assert_eq!(pos.nakshatra, "Jyeshtha");
        assert_eq!(pos.pada, 3);
        assert_eq!(pos.nakshatra_lord, "Mercury");
    }
}
