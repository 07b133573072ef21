//! C9 — the Yoga Detector (`spec.md` §4.C9). A declarative rule table
//! evaluated against a built D1 chart: each rule is a pure predicate over
//! the chart, producing zero or one [`DetectedYoga`]. The engine itself
//! carries no interpretation — rules are data, grounded on the teacher's
//! `noesis-vedic-api::yogas::raj_yogas` rule-table shape, generalized from
//! rāja yogas alone to the full category set `spec.md` §4.C9 names:
//! planetary, house-based, mahāpuruṣa, combination, rāja, dosha.

use jyotisha_chart::Chart;
use jyotisha_core::Planet;

/// The six yoga categories of `spec.md` §4.C9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YogaCategory {
    Planetary,
    HouseBased,
    Mahapurusha,
    Combination,
    Raja,
    Dosha,
}

/// One detected yoga: name, category, and a short explanation of why it
/// fired. `spec.md` §4.C9 asks for exactly these three fields per result.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DetectedYoga {
    pub name: String,
    pub category: YogaCategory,
    pub explanation: String,
}

const KENDRA_HOUSES: [u8; 4] = [1, 4, 7, 10];

/// Own signs (index 0..11) per planet. Rahu/Ketu carry no classical
/// own-sign dignity and are never consulted here.
fn own_signs(planet: Planet) -> &'static [u8] {
    match planet {
        Planet::Sun => &[4],
        Planet::Moon => &[3],
        Planet::Mars => &[0, 7],
        Planet::Mercury => &[2, 5],
        Planet::Jupiter => &[8, 11],
        Planet::Venus => &[1, 6],
        Planet::Saturn => &[9, 10],
        Planet::Rahu | Planet::Ketu => &[],
    }
}

/// Exaltation sign (index 0..11) per planet, sign-level (not degree-level —
/// the yoga rules below only need "exalted sign", not exact degree).
fn exaltation_sign(planet: Planet) -> Option<u8> {
    match planet {
        Planet::Sun => Some(0),
        Planet::Moon => Some(1),
        Planet::Mars => Some(9),
        Planet::Mercury => Some(5),
        Planet::Jupiter => Some(3),
        Planet::Venus => Some(11),
        Planet::Saturn => Some(6),
        Planet::Rahu | Planet::Ketu => None,
    }
}

fn is_own_or_exalted(planet: Planet, sign_index: u8) -> bool {
    own_signs(planet).contains(&sign_index) || exaltation_sign(planet) == Some(sign_index)
}

/// Houses a planet at `from_house` casts a full aspect (dṛṣṭi) onto. Every
/// planet aspects the 7th house from itself; Mars, Jupiter, and Saturn each
/// carry two additional special aspects, per the classical Parāśari scheme.
fn houses_aspected(planet: Planet, from_house: u8) -> Vec<u8> {
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

fn house_lord(chart: &Chart, house: u8) -> Option<Planet> {
    let entry = chart.houses.as_ref()?.iter().find(|h| h.house == house)?;
    Planet::ALL.into_iter().find(|p| p.name() == entry.lord)
}

/// Evaluates every rule in the table against a built D1 chart
/// (`spec.md` §4.C9). Pure-sign charts (D24-D60) carry no houses and
/// cannot be evaluated here — callers must pass a house-bearing chart.
pub fn detect_yogas(chart: &Chart) -> Vec<DetectedYoga> {
    let mut yogas = Vec::new();
    yogas.extend(detect_mahapurusha_yogas(chart));
    if let Some(y) = detect_gaja_kesari(chart) {
        yogas.push(y);
    }
    if let Some(y) = detect_guru_chandra(chart) {
        yogas.push(y);
    }
    if let Some(y) = detect_budhaditya(chart) {
        yogas.push(y);
    }
    if let Some(y) = detect_chandra_mangal(chart) {
        yogas.push(y);
    }
    if let Some(y) = detect_kendra_bali(chart) {
        yogas.push(y);
    }
    if let Some(y) = detect_vipareeta_raja(chart) {
        yogas.push(y);
    }
    if let Some(y) = detect_kemadruma(chart) {
        yogas.push(y);
    }
    if let Some(y) = detect_kala_sarpa(chart) {
        yogas.push(y);
    }
    yogas
}

/// Pañca Mahāpuruṣa yogas: Ruchaka (Mars), Bhadra (Mercury), Hamsa
/// (Jupiter), Malavya (Venus), Shasha (Saturn) — each fires when its planet
/// occupies its own or exalted sign while posited in a kendra house
/// (`spec.md` §4.C9's own worked example: "Mercury occupies an own or
/// exalted sign while in a Kendra").
fn detect_mahapurusha_yogas(chart: &Chart) -> Vec<DetectedYoga> {
    const CANDIDATES: [(Planet, &str); 5] = [
        (Planet::Mars, "Ruchaka Yoga"),
        (Planet::Mercury, "Bhadra Yoga"),
        (Planet::Jupiter, "Hamsa Yoga"),
        (Planet::Venus, "Malavya Yoga"),
        (Planet::Saturn, "Shasha Yoga"),
    ];
    CANDIDATES
        .iter()
        .filter_map(|&(planet, name)| {
            let pos = chart.planets.get(&planet)?;
            let house = pos.house?;
            if KENDRA_HOUSES.contains(&house) && is_own_or_exalted(planet, pos.sign_index) {
                Some(DetectedYoga {
                    name: name.to_string(),
                    category: YogaCategory::Mahapurusha,
                    explanation: format!(
                        "{planet} occupies its own or exalted sign ({}) in kendra house {house}",
                        pos.sign
                    ),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Gaja Kesari Yoga: Moon and Jupiter stand in mutual kendras (the house
/// distance between them is 1, 4, 7, or 10).
fn detect_gaja_kesari(chart: &Chart) -> Option<DetectedYoga> {
    let moon = chart.planets.get(&Planet::Moon)?;
    let jupiter = chart.planets.get(&Planet::Jupiter)?;
    let (mh, jh) = (moon.house?, jupiter.house?);
    let diff = ((jh as i32 - mh as i32).rem_euclid(12)) as u8;
    if matches!(diff, 0 | 3 | 6 | 9) {
        Some(DetectedYoga {
            name: "Gaja Kesari Yoga".to_string(),
            category: YogaCategory::Raja,
            explanation: format!(
                "Moon (house {mh}) and Jupiter (house {jh}) stand in mutual kendras"
            ),
        })
    } else {
        None
    }
}

/// `spec.md` §4.C9's own worked example: "Jupiter aspects Moon from a
/// Kendra".
fn detect_guru_chandra(chart: &Chart) -> Option<DetectedYoga> {
    let moon = chart.planets.get(&Planet::Moon)?;
    let jupiter = chart.planets.get(&Planet::Jupiter)?;
    let (mh, jh) = (moon.house?, jupiter.house?);
    if KENDRA_HOUSES.contains(&jh) && houses_aspected(Planet::Jupiter, jh).contains(&mh) {
        Some(DetectedYoga {
            name: "Guru-Chandra Yoga".to_string(),
            category: YogaCategory::Planetary,
            explanation: format!("Jupiter in kendra house {jh} aspects Moon in house {mh}"),
        })
    } else {
        None
    }
}

/// Budhāditya Yoga: Sun and Mercury conjunct in the same sign.
fn detect_budhaditya(chart: &Chart) -> Option<DetectedYoga> {
    let sun = chart.planets.get(&Planet::Sun)?;
    let mercury = chart.planets.get(&Planet::Mercury)?;
    if sun.sign_index == mercury.sign_index {
        Some(DetectedYoga {
            name: "Budhaditya Yoga".to_string(),
            category: YogaCategory::Combination,
            explanation: format!("Sun and Mercury conjunct in {}", sun.sign),
        })
    } else {
        None
    }
}

/// Chandra-Maṅgala Yoga: Moon and Mars conjunct in the same sign.
fn detect_chandra_mangal(chart: &Chart) -> Option<DetectedYoga> {
    let moon = chart.planets.get(&Planet::Moon)?;
    let mars = chart.planets.get(&Planet::Mars)?;
    if moon.sign_index == mars.sign_index {
        Some(DetectedYoga {
            name: "Chandra-Mangal Yoga".to_string(),
            category: YogaCategory::Combination,
            explanation: format!("Moon and Mars conjunct in {}", moon.sign),
        })
    } else {
        None
    }
}

/// Kendra Bali Yoga (house-based): a majority of the five non-node grahas
/// other than the Sun occupy kendra houses — a simple house-distribution
/// combination, not keyed to any single planet's dignity.
fn detect_kendra_bali(chart: &Chart) -> Option<DetectedYoga> {
    const BENEFIC_LIKE: [Planet; 5] = [
        Planet::Moon,
        Planet::Mercury,
        Planet::Jupiter,
        Planet::Venus,
        Planet::Mars,
    ];
    let in_kendra = BENEFIC_LIKE
        .iter()
        .filter(|p| {
            chart
                .planets
                .get(p)
                .and_then(|pos| pos.house)
                .is_some_and(|h| KENDRA_HOUSES.contains(&h))
        })
        .count();
    if in_kendra >= 3 {
        Some(DetectedYoga {
            name: "Kendra Bali Yoga".to_string(),
            category: YogaCategory::HouseBased,
            explanation: format!("{in_kendra} of 5 grahas occupy kendra houses (1, 4, 7, 10)"),
        })
    } else {
        None
    }
}

/// Vipareeta Rāja Yoga: the lords of the 6th, 8th, and 12th houses occupy
/// each other's houses (any of the three duṣṭhāna lords sits in another
/// duṣṭhāna).
fn detect_vipareeta_raja(chart: &Chart) -> Option<DetectedYoga> {
    const DUSTHANAS: [u8; 3] = [6, 8, 12];
    for &house in &DUSTHANAS {
        let lord = house_lord(chart, house)?;
        let lord_house = chart.planets.get(&lord)?.house?;
        if lord_house != house && DUSTHANAS.contains(&lord_house) {
            return Some(DetectedYoga {
                name: "Vipareeta Raja Yoga".to_string(),
                category: YogaCategory::Raja,
                explanation: format!(
                    "lord of house {house} ({lord}) is posited in duṣṭhāna house {lord_house}"
                ),
            });
        }
    }
    None
}

/// Kemadruma Doṣa: the Moon has no graha in the houses immediately before
/// or after its own, and none conjunct it.
fn detect_kemadruma(chart: &Chart) -> Option<DetectedYoga> {
    let moon = chart.planets.get(&Planet::Moon)?;
    let mh = moon.house?;
    let prev = if mh == 1 { 12 } else { mh - 1 };
    let next = if mh == 12 { 1 } else { mh + 1 };
    let supported = Planet::ALL.iter().any(|&p| {
        if p == Planet::Moon {
            return false;
        }
        chart
            .planets
            .get(&p)
            .and_then(|pos| pos.house)
            .is_some_and(|h| h == mh || h == prev || h == next)
    });
    if supported {
        None
    } else {
        Some(DetectedYoga {
            name: "Kemadruma Dosha".to_string(),
            category: YogaCategory::Dosha,
            explanation: format!(
                "no graha occupies house {mh}, {prev}, or {next} alongside the Moon"
            ),
        })
    }
}

/// Kāla Sarpa Doṣa: all seven classical grahas (excluding the nodes
/// themselves) fall within the houses spanned going forward from Rahu to
/// Ketu, with none on the reverse arc.
fn detect_kala_sarpa(chart: &Chart) -> Option<DetectedYoga> {
    let rahu_house = chart.planets.get(&Planet::Rahu)?.house?;
    let ketu_house = chart.planets.get(&Planet::Ketu)?.house?;

    let forward_arc: Vec<u8> = (0..6)
        .map(|i| ((rahu_house as i32 - 1 + i) % 12 + 1) as u8)
        .collect();

    const CLASSICAL: [Planet; 7] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mars,
        Planet::Mercury,
        Planet::Jupiter,
        Planet::Venus,
        Planet::Saturn,
    ];
    let all_on_forward_arc = CLASSICAL.iter().all(|p| {
        chart
            .planets
            .get(p)
            .and_then(|pos| pos.house)
            .is_some_and(|h| forward_arc.contains(&h))
    });

    if all_on_forward_arc {
        Some(DetectedYoga {
            name: "Kala Sarpa Dosha".to_string(),
            category: YogaCategory::Dosha,
            explanation: format!(
                "all seven classical grahas fall between Rahu (house {rahu_house}) and Ketu (house {ketu_house})"
            ),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn build(planet_longitudes: HashMap<Planet, f64>, retrograde: HashMap<Planet, bool>, asc_longitude: f64) -> Chart {
        jyotisha_chart::build_chart(asc_longitude, &planet_longitudes, &retrograde, 1).unwrap()
    }

    #[test]
    fn ruchaka_yoga_fires_for_mars_in_own_sign_in_a_kendra() {
        // Ascendant Aries (house 1 = sign 0); Mars in Aries too -> kendra, own sign.
        let mut planets = HashMap::new();
        planets.insert(Planet::Mars, 10.0); // Aries
        planets.insert(Planet::Sun, 40.0);
        planets.insert(Planet::Moon, 70.0);
        planets.insert(Planet::Mercury, 100.0);
        planets.insert(Planet::Jupiter, 130.0);
        planets.insert(Planet::Venus, 160.0);
        planets.insert(Planet::Saturn, 190.0);
        planets.insert(Planet::Rahu, 220.0);
        planets.insert(Planet::Ketu, 40.0);
        let chart = build(planets, HashMap::new(), 0.0);
        let yogas = detect_yogas(&chart);
        assert!(yogas.iter().any(|y| y.name == "Ruchaka Yoga"));
    }

    #[test]
    fn gaja_kesari_fires_when_moon_and_jupiter_share_a_kendra_distance() {
        let mut planets = HashMap::new();
        planets.insert(Planet::Moon, 10.0); // house 1 from Aries ascendant
        planets.insert(Planet::Jupiter, 100.0); // Cancer -> house 4
        planets.insert(Planet::Sun, 40.0);
        planets.insert(Planet::Mars, 250.0);
        planets.insert(Planet::Mercury, 70.0);
        planets.insert(Planet::Venus, 160.0);
        planets.insert(Planet::Saturn, 190.0);
        planets.insert(Planet::Rahu, 220.0);
        planets.insert(Planet::Ketu, 40.0);
        let chart = build(planets, HashMap::new(), 0.0);
        let yogas = detect_yogas(&chart);
        assert!(yogas.iter().any(|y| y.name == "Gaja Kesari Yoga"));
    }

    #[test]
    fn houses_aspected_wraps_correctly_for_saturn() {
        // Saturn at house 1 aspects houses 3, 7, 10 (its special aspects + the universal 7th).
        let mut aspects = houses_aspected(Planet::Saturn, 1);
        aspects.sort();
        assert_eq!(aspects, vec![3, 7, 10]);
    }

    #[test]
    fn kala_sarpa_fires_when_all_seven_grahas_sit_between_the_nodes() {
        let mut planets = HashMap::new();
        planets.insert(Planet::Rahu, 0.0); // house 1
        planets.insert(Planet::Ketu, 180.0); // house 7
        planets.insert(Planet::Sun, 10.0); // house 1
        planets.insert(Planet::Moon, 40.0); // house 2
        planets.insert(Planet::Mars, 70.0); // house 3
        planets.insert(Planet::Mercury, 100.0); // house 4
        planets.insert(Planet::Jupiter, 130.0); // house 5
        planets.insert(Planet::Venus, 160.0); // house 6
        planets.insert(Planet::Saturn, 10.0); // house 1
        let chart = build(planets, HashMap::new(), 0.0);
        let yogas = detect_yogas(&chart);
        assert!(yogas.iter().any(|y| y.name == "Kala Sarpa Dosha"));
    }
}
