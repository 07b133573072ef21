//! C5 — the Chart Builder. Composes Ascendant + Planets + Houses for D1 and
//! every Dn, and enforces the invariants of `spec.md` §4.C5 as hard, typed
//! failures rather than silent correction.
//!
//! [`build_chart`] is the *only* sanctioned entry point: it is the one place
//! that calls `jyotisha_varga::varga_sign` and `whole_sign_house` together,
//! so houses and signs are always produced atomically for a given Dn.
//! Callers outside this crate should never assemble a chart by calling the
//! varga engine and house assigner separately.

use std::collections::HashMap;

use jyotisha_core::{EnrichedPosition, JyotishaError, Planet};
use rayon::prelude::*;

use crate::houses::whole_sign_house;
use crate::sign::enrich_longitude;

/// One row of the twelve-entry houses list emitted by house-bearing charts
/// (`N <= 20`). Pure-sign charts (`N >= 24`) carry `houses: None` instead.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HouseEntry {
    pub house: u8,
    pub sign_index: u8,
    pub sign: String,
    pub lord: String,
}

/// A fully composed Dn chart: ascendant, all nine planets, and (for
/// house-bearing charts) the twelve houses. Field names on the wire are
/// the exact `"Ascendant"`/`"Planets"`/`"Houses"` keys `spec.md` §6
/// dictates per chart; `n` is an internal bookkeeping field (e.g. for
/// logging) and is not part of the §6 contract.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Chart {
    #[serde(skip)]
    pub n: u8,
    #[serde(rename = "Ascendant")]
    pub ascendant: EnrichedPosition,
    #[serde(rename = "Planets")]
    pub planets: HashMap<Planet, EnrichedPosition>,
    #[serde(rename = "Houses")]
    pub houses: Option<Vec<HouseEntry>>,
}

/// Maps a D1 `(longitude, degrees_in_sign)` pair into its Dn sign index and
/// re-enriches the synthetic `dn_sign * 30 + deg_in_sign` longitude — the
/// DMS-preservation invariant falls out of this construction automatically
/// rather than needing a separate copy step, since
/// `enrich_longitude(dn_sign*30 + d).degrees_in_sign == d` by arithmetic.
fn dn_position(d1_longitude: f64, n: u8) -> Result<EnrichedPosition, JyotishaError> {
    let d1 = enrich_longitude(d1_longitude)?;
    let dn_sign_index = if n == 1 {
        d1.sign_index
    } else {
        jyotisha_varga::varga_sign(d1.sign_index, d1.degrees_in_sign, n)?.index()
    };
    let dn_longitude = dn_sign_index as f64 * 30.0 + d1.degrees_in_sign;
    enrich_longitude(dn_longitude)
}

/// Builds the full Dn chart for a birth event's ascendant and nine planet
/// longitudes. `retrograde` supplies the per-planet retrograde flag (the
/// ascendant has none). Fails with `InputError` on a bad `n` or longitude,
/// and with `InvariantViolation` if the §4.C5 assertions somehow fail to
/// hold after construction — a defensive check, since the construction here
/// is designed to make that impossible, but the invariant is load-bearing
/// for every downstream consumer and must never be silently waived.
pub fn build_chart(
    ascendant_longitude: f64,
    planet_longitudes: &HashMap<Planet, f64>,
    retrograde: &HashMap<Planet, bool>,
    n: u8,
) -> Result<Chart, JyotishaError> {
    let mut ascendant = dn_position(ascendant_longitude, n)?;
    ascendant.house = Some(1);

    let planet_entries: Vec<(Planet, Result<EnrichedPosition, JyotishaError>)> = planet_longitudes
        .par_iter()
        .map(|(&planet, &lon)| (planet, dn_position(lon, n)))
        .collect();

    let mut planets = HashMap::with_capacity(planet_entries.len());
    for (planet, result) in planet_entries {
        let mut pos = result?;
        pos.house = Some(whole_sign_house(ascendant.sign_index, pos.sign_index));
        pos.retrograde = retrograde.get(&planet).copied();
        planets.insert(planet, pos);
    }

    let house_bearing = jyotisha_varga::is_house_bearing(n);
    let houses = if house_bearing {
        Some(
            (1..=12u8)
                .map(|house| {
                    let sign_index = ((ascendant.sign_index as i32 + house as i32 - 1) % 12) as u8;
                    let sign = jyotisha_core::ZodiacSign::from_index(sign_index as i32);
                    HouseEntry {
                        house,
                        sign_index,
                        sign: sign.name().to_string(),
                        lord: sign.lord().name().to_string(),
                    }
                })
                .collect(),
        )
    } else {
        None
    };

    assert_invariants(&ascendant, &planets, &houses, house_bearing)?;

    Ok(Chart {
        n,
        ascendant,
        planets,
        houses,
    })
}

fn assert_invariants(
    ascendant: &EnrichedPosition,
    planets: &HashMap<Planet, EnrichedPosition>,
    houses: &Option<Vec<HouseEntry>>,
    house_bearing: bool,
) -> Result<(), JyotishaError> {
    if ascendant.house != Some(1) {
        return Err(JyotishaError::invariant(
            "ascendant house must be 1 in every chart",
        ));
    }
    for (planet, pos) in planets {
        let expected = whole_sign_house(ascendant.sign_index, pos.sign_index);
        if pos.house != Some(expected) {
            return Err(JyotishaError::invariant(format!(
                "{planet} house {:?} does not match whole-sign formula (expected {expected})",
                pos.house
            )));
        }
    }
    match houses {
        Some(list) if house_bearing => {
            if list.len() != 12 {
                return Err(JyotishaError::invariant(format!(
                    "house-bearing chart must have exactly 12 house entries, got {}",
                    list.len()
                )));
            }
        }
        None if !house_bearing => {}
        _ => {
            return Err(JyotishaError::invariant(
                "houses presence must match the chart's house-bearing classification",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_planets() -> HashMap<Planet, f64> {
        let mut m = HashMap::new();
        m.insert(Planet::Sun, 31.0);
        m.insert(Planet::Moon, 235.2501);
        m.insert(Planet::Mars, 350.0);
        m.insert(Planet::Mercury, 40.0);
        m.insert(Planet::Jupiter, 100.0);
        m.insert(Planet::Venus, 310.0);
        m.insert(Planet::Saturn, 200.0);
        m.insert(Planet::Rahu, 10.0);
        m.insert(Planet::Ketu, 190.0);
        m
    }

    #[test]
    fn d1_chart_is_house_bearing_with_twelve_entries() {
        let chart = build_chart(222.2799, &sample_planets(), &HashMap::new(), 1).unwrap();
        assert_eq!(chart.ascendant.house, Some(1));
        assert_eq!(chart.houses.as_ref().unwrap().len(), 12);
    }

    #[test]
    fn pure_sign_charts_have_no_houses() {
        let chart = build_chart(222.2799, &sample_planets(), &HashMap::new(), 27).unwrap();
        assert!(chart.houses.is_none());
    }

    #[test]
    fn dms_is_preserved_across_every_divisional_chart() {
        let d1 = build_chart(222.2799, &sample_planets(), &HashMap::new(), 1).unwrap();
        let moon_d1_deg = d1.planets[&Planet::Moon].degrees_in_sign;
        for &n in &jyotisha_varga::SUPPORTED_VARGAS {
            let chart = build_chart(222.2799, &sample_planets(), &HashMap::new(), n).unwrap();
            let moon = &chart.planets[&Planet::Moon];
            assert!(
                (moon.degrees_in_sign - moon_d1_deg).abs() < 1e-9,
                "D{n} dropped DMS preservation: {} != {}",
                moon.degrees_in_sign,
                moon_d1_deg
            );
        }
    }

    #[test]
    fn every_planet_house_matches_whole_sign_formula() {
        let chart = build_chart(222.2799, &sample_planets(), &HashMap::new(), 9).unwrap();
        for pos in chart.planets.values() {
            let expected = whole_sign_house(chart.ascendant.sign_index, pos.sign_index);
            assert_eq!(pos.house, Some(expected));
        }
    }

    #[test]
    fn unsupported_n_is_input_error() {
        assert!(build_chart(0.0, &sample_planets(), &HashMap::new(), 5).is_err());
    }
}
