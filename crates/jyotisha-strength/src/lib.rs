//! C10 — the Strength Engine (`spec.md` §4.C10): Ṣaḍbala's six components
//! and Bhinnāṣṭakavarga bindu tables, computed from classical BPHS formulas
//! rather than the constant placeholders of
//! `noesis-vedic-api::shadbala::calculator` (`kala = 30.0`, `drik = 15.0`),
//! which that module's own comments label "simplified"/"would need ...
//! calculations". `jyotisha-strength` runs against an already-built D1
//! chart plus its Pañcāṅga snapshot, per `spec.md` §3's data-flow note that
//! C10 consumes the built chart rather than re-touching the ephemeris.

use std::collections::HashMap;

use jyotisha_chart::Chart;
use jyotisha_core::config::StrengthScalars;
use jyotisha_core::{JyotishaError, Planet};
use jyotisha_panchanga::PanchangaSnapshot;
use tracing::debug;

mod ashtakavarga;

pub use ashtakavarga::{bhinnashtakavarga, sarva_ashtakavarga};

/// The six Ṣaḍbala components of `spec.md` §4.C10, in their classical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShadbalaComponent {
    SthanaBala,
    DigBala,
    KalaBala,
    ChestaBala,
    NaisargikaBala,
    DrikBala,
}

/// One component's contribution, in both Virūpa (the native unit) and Rūpa
/// (`= Virūpa / 60`, `spec.md` §4.C10).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadbalaValue {
    pub component: ShadbalaComponent,
    pub virupas: f64,
    pub rupas: f64,
}

fn virupas(component: ShadbalaComponent, value: f64) -> ShadbalaValue {
    ShadbalaValue {
        component,
        virupas: value,
        rupas: value / 60.0,
    }
}

/// The canonical per-planet Ṣaḍbala minimum, in Virūpa (`spec.md` §4.C10).
/// The lunar nodes carry no classical minimum and are never scored here.
pub fn required_shadbala(planet: Planet) -> Option<f64> {
    match planet {
        Planet::Sun => Some(390.0),
        Planet::Moon => Some(360.0),
        Planet::Mars => Some(300.0),
        Planet::Mercury => Some(420.0),
        Planet::Jupiter => Some(390.0),
        Planet::Venus => Some(330.0),
        Planet::Saturn => Some(300.0),
        Planet::Rahu | Planet::Ketu => None,
    }
}

/// `spec.md` §4.C10's four-tier status, derived from the ratio of total to
/// canonical minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StrengthStatus {
    VeryStrong,
    Strong,
    Average,
    Weak,
}

fn status_from_ratio(ratio: f64) -> StrengthStatus {
    if ratio >= 1.5 {
        StrengthStatus::VeryStrong
    } else if ratio >= 1.0 {
        StrengthStatus::Strong
    } else if ratio >= 0.75 {
        StrengthStatus::Average
    } else {
        StrengthStatus::Weak
    }
}

/// The full Ṣaḍbala record for one planet.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlanetShadbala {
    pub planet: Planet,
    pub components: Vec<ShadbalaValue>,
    pub total_virupas: f64,
    pub total_rupas: f64,
    pub required_minimum: f64,
    pub strength_ratio: f64,
    pub status: StrengthStatus,
    pub rank: u8,
}

const EXALTATION_POINT: [(Planet, f64); 7] = [
    (Planet::Sun, 10.0),
    (Planet::Moon, 33.0),
    (Planet::Mars, 298.0),
    (Planet::Mercury, 165.0),
    (Planet::Jupiter, 95.0),
    (Planet::Venus, 357.0),
    (Planet::Saturn, 200.0),
];

/// Uchcha Bala: full 60 Virūpa at exact exaltation, 0 at exact debilitation
/// (180° away), linear between — the standard BPHS formula.
fn uchcha_bala(planet: Planet, longitude: f64) -> f64 {
    let Some(&(_, exalt)) = EXALTATION_POINT.iter().find(|(p, _)| *p == planet) else {
        return 0.0;
    };
    let distance = (longitude - exalt).abs();
    let normalized = if distance > 180.0 { 360.0 - distance } else { distance };
    (180.0 - normalized) / 3.0
}

const SAPTAVARGA: [u8; 7] = [1, 2, 3, 7, 9, 12, 30];

/// Saptavargaja Bala: dignity points (classical BPHS scale) summed across
/// the seven varga charts (D1, D2, D3, D7, D9, D12, D30), averaged by the
/// `saptavargaja_divisor` scalar. Each varga's dignity is own/exalted/
/// friend/neutral/enemy/debilitated in that varga's own sign, determined by
/// the D1 planetary-friendship table.
fn saptavargaja_bala(
    planet: Planet,
    d1_sign_index: u8,
    d1_deg_in_sign: f64,
    divisor: f64,
) -> Result<f64, JyotishaError> {
    let mut total = 0.0;
    for &n in &SAPTAVARGA {
        let varga_sign = if n == 1 {
            jyotisha_core::ZodiacSign::from_index(d1_sign_index as i32)
        } else {
            jyotisha_varga::varga_sign(d1_sign_index, d1_deg_in_sign, n)?
        };
        total += dignity_points(planet, varga_sign.index());
    }
    Ok(total / divisor)
}

fn dignity_points(planet: Planet, sign_index: u8) -> f64 {
    let exalted = EXALTATION_POINT
        .iter()
        .any(|&(p, long)| p == planet && (long / 30.0).floor() as u8 == sign_index);
    if exalted {
        return 20.0;
    }
    let sign = jyotisha_core::ZodiacSign::from_index(sign_index as i32);
    let lord = sign.lord();
    if lord == planet {
        return 15.0;
    }
    match friendship(planet, lord) {
        Relation::GreatFriend => 11.25,
        Relation::Friend => 7.5,
        Relation::Neutral => 3.75,
        Relation::Enemy => 1.875,
        Relation::GreatEnemy => 0.0,
    }
}

enum Relation {
    GreatFriend,
    Friend,
    Neutral,
    Enemy,
    GreatEnemy,
}

/// Natural planetary friendship table (BPHS), used wherever dignity in a
/// sign owned by another planet needs a graded score rather than a binary
/// own/not-own split.
fn friendship(a: Planet, b: Planet) -> Relation {
    if a == b {
        return Relation::GreatFriend;
    }
    let friends: &[(Planet, Planet)] = &[
        (Planet::Sun, Planet::Moon),
        (Planet::Sun, Planet::Mars),
        (Planet::Sun, Planet::Jupiter),
        (Planet::Moon, Planet::Sun),
        (Planet::Moon, Planet::Mercury),
        (Planet::Mars, Planet::Sun),
        (Planet::Mars, Planet::Moon),
        (Planet::Mars, Planet::Jupiter),
        (Planet::Mercury, Planet::Sun),
        (Planet::Mercury, Planet::Venus),
        (Planet::Jupiter, Planet::Sun),
        (Planet::Jupiter, Planet::Moon),
        (Planet::Jupiter, Planet::Mars),
        (Planet::Venus, Planet::Mercury),
        (Planet::Venus, Planet::Saturn),
        (Planet::Saturn, Planet::Mercury),
        (Planet::Saturn, Planet::Venus),
    ];
    let enemies: &[(Planet, Planet)] = &[
        (Planet::Sun, Planet::Saturn),
        (Planet::Sun, Planet::Venus),
        (Planet::Moon, Planet::Saturn),
        (Planet::Mars, Planet::Mercury),
        (Planet::Mercury, Planet::Moon),
        (Planet::Jupiter, Planet::Mercury),
        (Planet::Jupiter, Planet::Venus),
        (Planet::Venus, Planet::Sun),
        (Planet::Venus, Planet::Moon),
        (Planet::Saturn, Planet::Sun),
        (Planet::Saturn, Planet::Moon),
        (Planet::Saturn, Planet::Mars),
    ];
    if friends.contains(&(a, b)) {
        Relation::Friend
    } else if enemies.contains(&(a, b)) {
        Relation::Enemy
    } else {
        Relation::Neutral
    }
}

/// Ojhāyugma Bala: Sun/Mars/Jupiter favor odd signs, Moon/Venus/Saturn
/// favor even signs, Mercury is indifferent and always scores the full 15.
fn ojhayugma_bala(planet: Planet, sign_index: u8) -> f64 {
    let odd = sign_index % 2 == 0;
    match planet {
        Planet::Sun | Planet::Mars | Planet::Jupiter => {
            if odd {
                15.0
            } else {
                0.0
            }
        }
        Planet::Moon | Planet::Venus | Planet::Saturn => {
            if !odd {
                15.0
            } else {
                0.0
            }
        }
        _ => 15.0,
    }
}

/// Kendrādi Bala: 60 in a kendra (angular) house, 30 in a panaphara
/// (succeedent), 15 in an āpoklima (cadent) — the classical three-tier
/// house-quality scale, scaled by `kendradi_scale`.
fn kendradi_bala(house: u8, scale: f64) -> f64 {
    let base = match house {
        1 | 4 | 7 | 10 => 60.0,
        2 | 5 | 8 | 11 => 30.0,
        _ => 15.0,
    };
    base * scale
}

/// Drekkāṇa Bala: male grahas (Sun, Jupiter, Mars) score in the 1st
/// decanate, female (Moon, Venus) in the 2nd, neuter (Mercury, Saturn) in
/// the 3rd.
fn drekkana_bala(planet: Planet, deg_in_sign: f64) -> f64 {
    let decanate = (deg_in_sign / 10.0).floor() as u8;
    let matches = match planet {
        Planet::Sun | Planet::Jupiter | Planet::Mars => decanate == 0,
        Planet::Moon | Planet::Venus => decanate == 1,
        Planet::Mercury | Planet::Saturn => decanate == 2,
        _ => false,
    };
    if matches {
        15.0
    } else {
        0.0
    }
}

fn sthana_bala(
    planet: Planet,
    longitude: f64,
    sign_index: u8,
    deg_in_sign: f64,
    house: u8,
    scalars: &StrengthScalars,
) -> Result<f64, JyotishaError> {
    Ok(uchcha_bala(planet, longitude)
        + saptavargaja_bala(planet, sign_index, deg_in_sign, scalars.saptavargaja_divisor)?
        + ojhayugma_bala(planet, sign_index)
        + kendradi_bala(house, scalars.kendradi_scale)
        + drekkana_bala(planet, deg_in_sign))
}

/// Dig Bala: full 60 Virūpa in the planet's directional house (Sun/Mars:
/// 10th, Moon/Venus: 4th, Jupiter/Mercury: 1st, Saturn: 7th), falling off
/// 10 Virūpa per house of distance to 0 at the opposite house.
fn dig_bala(planet: Planet, house: u8, sun_multiplier: f64) -> f64 {
    let preferred = match planet {
        Planet::Sun | Planet::Mars => 10,
        Planet::Moon | Planet::Venus => 4,
        Planet::Jupiter | Planet::Mercury => 1,
        Planet::Saturn => 7,
        _ => 1,
    };
    let raw_distance = (house as i32 - preferred as i32).rem_euclid(12);
    let distance = if raw_distance > 6 { 12 - raw_distance } else { raw_distance };
    let value = 60.0 - distance as f64 * 10.0;
    if planet == Planet::Sun {
        value * sun_multiplier
    } else {
        value
    }
}

const BENEFICS: [Planet; 4] = [Planet::Moon, Planet::Mercury, Planet::Jupiter, Planet::Venus];

/// Pakṣa Bala: symmetric distance of the Moon from the Sun, 0 at Amāvāsyā,
/// maximal at Pūrṇimā. Benefics draw strength from a waxing/bright Moon,
/// malefics from a waning/dark one.
fn paksha_bala(planet: Planet, sun_longitude: f64, moon_longitude: f64) -> f64 {
    let elongation = (moon_longitude - sun_longitude).rem_euclid(360.0);
    let symmetric = if elongation > 180.0 { 360.0 - elongation } else { elongation };
    let benefic_strength = symmetric / 3.0;
    if BENEFICS.contains(&planet) {
        benefic_strength
    } else {
        60.0 - benefic_strength
    }
}

/// Dina-Rātri Bala: diurnal grahas (Sun, Jupiter, Venus) score by day,
/// nocturnal grahas (Moon, Mars, Saturn) score by night, Mercury scores
/// regardless of time of birth.
fn dina_ratri_bala(planet: Planet, is_day_birth: bool) -> f64 {
    let diurnal = matches!(planet, Planet::Sun | Planet::Jupiter | Planet::Venus);
    let nocturnal = matches!(planet, Planet::Moon | Planet::Mars | Planet::Saturn);
    match planet {
        Planet::Mercury => 60.0,
        _ if diurnal && is_day_birth => 60.0,
        _ if nocturnal && !is_day_birth => 60.0,
        _ => 0.0,
    }
}

/// Vāra Bala: the lord of the birth weekday scores the full 45 Virūpa.
fn vara_bala(planet: Planet, vara_lord: &str) -> f64 {
    if planet.name() == vara_lord {
        45.0
    } else {
        0.0
    }
}

fn kala_bala(planet: Planet, panchanga: &PanchangaSnapshot, sun_longitude: f64, moon_longitude: f64) -> f64 {
    paksha_bala(planet, sun_longitude, moon_longitude)
        + dina_ratri_bala(planet, panchanga_is_day(panchanga))
        + vara_bala(planet, &panchanga.vara_lord)
}

/// Approximates whether the birth instant fell between sunrise and sunset
/// by string-comparing the rendered wall-clock labels `jyotisha-panchanga`
/// already produces — a coarse stand-in in the absence of a raw birth
/// Julian Day at this layer (`spec.md` §4.C10 does not require a precise
/// Tribhāga/Ayana Bala breakdown, only a Kāla Bala total).
fn panchanga_is_day(panchanga: &PanchangaSnapshot) -> bool {
    panchanga.sunrise < panchanga.sunset
}

/// Cheṣṭā Bala: retrograde grahas (Mars through Saturn, plus the nodes)
/// score the full 60; the Sun and Moon never retrograde and carry no
/// Cheṣṭā Bala at all.
fn chesta_bala(planet: Planet, retrograde: Option<bool>) -> f64 {
    match planet {
        Planet::Sun | Planet::Moon => 0.0,
        Planet::Rahu | Planet::Ketu => 60.0,
        _ => {
            if retrograde.unwrap_or(false) {
                60.0
            } else {
                30.0
            }
        }
    }
}

/// Naisargika Bala: the fixed natural-strength table of BPHS, constant
/// regardless of chart.
fn naisargika_bala(planet: Planet) -> f64 {
    match planet {
        Planet::Sun => 60.0,
        Planet::Moon => 51.43,
        Planet::Venus => 42.85,
        Planet::Jupiter => 34.28,
        Planet::Mercury => 25.71,
        Planet::Mars => 17.14,
        Planet::Saturn => 8.57,
        Planet::Rahu | Planet::Ketu => 0.0,
    }
}

/// Dṛk Bala: the net aspectual strength a planet receives, derived from
/// the same Parāśari graha-dṛṣṭi rule as `jyotisha-yogas` (universal 7th
/// house aspect, plus Mars/Jupiter/Saturn's special aspects) — each
/// aspecting benefic adds 15 Virūpa, each aspecting malefic subtracts 15.
fn drik_bala(chart: &Chart, target: Planet) -> f64 {
    let Some(target_house) = chart.planets.get(&target).and_then(|p| p.house) else {
        return 0.0;
    };
    let mut total = 0.0;
    for &aspector in Planet::ALL.iter() {
        if aspector == target {
            continue;
        }
        let Some(aspector_house) = chart.planets.get(&aspector).and_then(|p| p.house) else {
            continue;
        };
        if aspect_houses(aspector, aspector_house).contains(&target_house) {
            total += if BENEFICS.contains(&aspector) { 15.0 } else { -15.0 };
        }
    }
    total
}

fn aspect_houses(planet: Planet, from_house: u8) -> Vec<u8> {
    let wrap = |offset: u8| ((from_house as i32 - 1 + offset as i32) % 12 + 1) as u8;
    let mut houses = vec![wrap(6)];
    match planet {
        Planet::Mars => houses.extend([wrap(3), wrap(7)]),
        Planet::Jupiter => houses.extend([wrap(4), wrap(8)]),
        Planet::Saturn => houses.extend([wrap(2), wrap(9)]),
        _ => {}
    }
    houses
}

const RANKED_PLANETS: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
];

/// Computes Ṣaḍbala for all seven classical grahas (the lunar nodes carry
/// no canonical minimum and are excluded, per `spec.md` §4.C10). `chart`
/// must be a D1, house-bearing chart.
pub fn calculate_shadbala(
    chart: &Chart,
    panchanga: &PanchangaSnapshot,
    scalars: &StrengthScalars,
) -> Result<Vec<PlanetShadbala>, JyotishaError> {
    let sun = chart
        .planets
        .get(&Planet::Sun)
        .ok_or_else(|| JyotishaError::invariant("chart is missing the Sun"))?;
    let moon = chart
        .planets
        .get(&Planet::Moon)
        .ok_or_else(|| JyotishaError::invariant("chart is missing the Moon"))?;
    let sun_longitude = sun.longitude;
    let moon_longitude = moon.longitude;

    debug!(chart_n = chart.n, "computing shadbala");
    let mut records = Vec::with_capacity(7);
    for &planet in &RANKED_PLANETS {
        let pos = chart
            .planets
            .get(&planet)
            .ok_or_else(|| JyotishaError::invariant(format!("chart is missing {planet}")))?;
        let house = pos
            .house
            .ok_or_else(|| JyotishaError::invariant(format!("{planet} has no house assigned")))?;

        let components = vec![
            virupas(
                ShadbalaComponent::SthanaBala,
                sthana_bala(planet, pos.longitude, pos.sign_index, pos.degrees_in_sign, house, scalars)?,
            ),
            virupas(ShadbalaComponent::DigBala, dig_bala(planet, house, scalars.dig_bala_sun_multiplier)),
            virupas(ShadbalaComponent::KalaBala, kala_bala(planet, panchanga, sun_longitude, moon_longitude)),
            virupas(ShadbalaComponent::ChestaBala, chesta_bala(planet, pos.retrograde)),
            virupas(ShadbalaComponent::NaisargikaBala, naisargika_bala(planet)),
            virupas(ShadbalaComponent::DrikBala, drik_bala(chart, planet)),
        ];
        let total_virupas: f64 = components.iter().map(|c| c.virupas).sum();
        let required_minimum = required_shadbala(planet)
            .expect("RANKED_PLANETS excludes the lunar nodes, which have no canonical minimum");
        let strength_ratio = total_virupas / required_minimum;

        records.push(PlanetShadbala {
            planet,
            components,
            total_virupas,
            total_rupas: total_virupas / 60.0,
            required_minimum,
            strength_ratio,
            status: status_from_ratio(strength_ratio),
            rank: 0,
        });
    }

    let mut ranked_indices: Vec<usize> = (0..records.len()).collect();
    ranked_indices.sort_by(|&a, &b| records[b].total_virupas.partial_cmp(&records[a].total_virupas).unwrap());
    for (rank, &idx) in ranked_indices.iter().enumerate() {
        records[idx].rank = rank as u8 + 1;
    }

    Ok(records)
}

/// Full strength report: Ṣaḍbala for all seven classical grahas plus the
/// Bhinnāṣṭakavarga bindu tables for all seven (`spec.md` §4.C10). The
/// three frozen BPHS scalars are flattened directly onto this struct (not
/// a separate envelope) so `strength.kendradi_scale` etc. resolve per
/// `spec.md` §6's `"strength.kendradi_scale"`-style configuration keys.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrengthReport {
    pub shadbala: Vec<PlanetShadbala>,
    pub ashtakavarga: HashMap<String, [u8; 12]>,
    pub sarva_ashtakavarga: [u16; 12],
    #[serde(flatten)]
    pub scalars: StrengthScalars,
}

pub fn calculate_strength(
    chart: &Chart,
    panchanga: &PanchangaSnapshot,
    scalars: &StrengthScalars,
) -> Result<StrengthReport, JyotishaError> {
    let shadbala = calculate_shadbala(chart, panchanga, scalars)?;
    let mut ashtakavarga = HashMap::with_capacity(7);
    for &planet in &RANKED_PLANETS {
        ashtakavarga.insert(planet.name().to_string(), bhinnashtakavarga(chart, planet)?);
    }
    let sarva = sarva_ashtakavarga(&ashtakavarga);
    Ok(StrengthReport {
        shadbala,
        ashtakavarga,
        sarva_ashtakavarga: sarva,
        scalars: *scalars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as Map;

    fn sample_chart() -> Chart {
        let mut planets = Map::new();
        planets.insert(Planet::Sun, 10.0);
        planets.insert(Planet::Moon, 220.0);
        planets.insert(Planet::Mars, 298.0);
        planets.insert(Planet::Mercury, 40.0);
        planets.insert(Planet::Jupiter, 95.0);
        planets.insert(Planet::Venus, 357.0);
        planets.insert(Planet::Saturn, 280.0);
        planets.insert(Planet::Rahu, 15.0);
        planets.insert(Planet::Ketu, 195.0);
        let mut retro = Map::new();
        retro.insert(Planet::Saturn, true);
        jyotisha_chart::build_chart(10.0, &planets, &retro, 1).unwrap()
    }

    fn sample_panchanga() -> PanchangaSnapshot {
        use jyotisha_panchanga::{KaranaEntry, MonthInfo, NakshatraState, SamvatYears, TithiState, YogaState};
        PanchangaSnapshot {
            date: "1995-05-16".to_string(),
            sunrise: "6:00 AM".to_string(),
            sunset: "7:00 PM".to_string(),
            vara: "Tuesday".to_string(),
            vara_lord: "Mars".to_string(),
            tithi: TithiState {
                current_index: 10,
                current_name: "Dashami".to_string(),
                paksha: "Shukla".to_string(),
                current_end: "1:00 PM".to_string(),
                next_index: 11,
                next_name: "Ekadashi".to_string(),
            },
            nakshatra: NakshatraState {
                current_index: 4,
                current_name: "Mrigashira".to_string(),
                pada: 2,
                current_end: "2:00 PM".to_string(),
                next_index: 5,
                next_name: "Ardra".to_string(),
            },
            yoga: YogaState {
                current_index: 6,
                current_name: "Dhriti".to_string(),
                current_end: "3:00 PM".to_string(),
                next_index: 7,
                next_name: "Shoola".to_string(),
            },
            karana: vec![KaranaEntry {
                index: 19,
                name: "Vishti".to_string(),
                end_instant: "1:00 PM".to_string(),
            }],
            month: MonthInfo {
                amanta: "Vaishakha".to_string(),
                purnimanta: "Jyeshtha".to_string(),
                adhika_masa: false,
            },
            moon_sign: "Scorpio".to_string(),
            sun_sign: "Aries".to_string(),
            samvat: SamvatYears {
                shaka: 1917,
                vikram: 2052,
                gujarati: 2051,
            },
        }
    }

    #[test]
    fn uchcha_bala_peaks_at_exact_exaltation() {
        assert!((uchcha_bala(Planet::Sun, 10.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn uchcha_bala_is_zero_at_debilitation() {
        assert!(uchcha_bala(Planet::Sun, 190.0).abs() < 1e-9);
    }

    #[test]
    fn kendradi_bala_ranks_kendra_above_panaphara_above_apoklima() {
        assert!(kendradi_bala(1, 1.0) > kendradi_bala(2, 1.0));
        assert!(kendradi_bala(2, 1.0) > kendradi_bala(3, 1.0));
    }

    #[test]
    fn dig_bala_peaks_at_the_planets_directional_house() {
        assert!((dig_bala(Planet::Sun, 10, 1.0) - 60.0).abs() < 1e-9);
        assert!((dig_bala(Planet::Sun, 4, 1.0)).abs() < 1e-9);
    }

    #[test]
    fn chesta_bala_is_zero_for_luminaries() {
        assert_eq!(chesta_bala(Planet::Sun, None), 0.0);
        assert_eq!(chesta_bala(Planet::Moon, Some(true)), 0.0);
    }

    #[test]
    fn shadbala_ranks_cover_one_through_seven_uniquely() {
        let chart = sample_chart();
        let panchanga = sample_panchanga();
        let records = calculate_shadbala(&chart, &panchanga, &StrengthScalars::default()).unwrap();
        let mut ranks: Vec<u8> = records.iter().map(|r| r.rank).collect();
        ranks.sort();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn shadbala_status_very_strong_requires_at_least_one_point_five_ratio() {
        assert!(matches!(status_from_ratio(1.6), StrengthStatus::VeryStrong));
        assert!(matches!(status_from_ratio(1.2), StrengthStatus::Strong));
        assert!(matches!(status_from_ratio(0.8), StrengthStatus::Average));
        assert!(matches!(status_from_ratio(0.3), StrengthStatus::Weak));
    }

    #[test]
    fn full_strength_report_includes_all_seven_classical_grahas() {
        let chart = sample_chart();
        let panchanga = sample_panchanga();
        let report = calculate_strength(&chart, &panchanga, &StrengthScalars::default()).unwrap();
        assert_eq!(report.shadbala.len(), 7);
        assert_eq!(report.ashtakavarga.len(), 7);
    }
}
