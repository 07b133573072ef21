//! Bhinnāṣṭakavarga: per-planet, per-house bindu (point) tables
//! (`spec.md` §4.C10). The eight-contributor bindu tables below are the
//! standard classical Parāśari tables — no file in the retrieval pack
//! carries them verbatim (the teacher's `ashtakavarga::totals` module only
//! has the Sarva reduction logic, grounded via [`sarva_ashtakavarga`]
//! below), so they are reproduced here from classical BPHS convention.

use std::collections::HashMap;

use jyotisha_chart::Chart;
use jyotisha_core::{JyotishaError, Planet};

/// The eight bindu-contributors in the fixed classical order: the seven
/// classical grahas plus the Lagna (ascendant).
const CONTRIBUTORS: [Option<Planet>; 8] = [
    Some(Planet::Sun),
    Some(Planet::Moon),
    Some(Planet::Mars),
    Some(Planet::Mercury),
    Some(Planet::Jupiter),
    Some(Planet::Venus),
    Some(Planet::Saturn),
    None, // Lagna
];

/// For a given target planet's Ashtakavarga, the houses-counted-from-each-
/// contributor (1-based, 1 = the contributor's own sign) that receive a
/// bindu. Index order matches [`CONTRIBUTORS`].
fn bindu_houses(target: Planet) -> [&'static [u8]; 8] {
    match target {
        Planet::Sun => [
            &[1, 2, 4, 7, 8, 9, 10, 11],
            &[3, 6, 10, 11],
            &[1, 2, 4, 7, 8, 9, 10, 11],
            &[3, 5, 6, 9, 10, 11, 12],
            &[5, 6, 9, 11],
            &[6, 7, 12],
            &[1, 2, 4, 7, 8, 9, 10, 11],
            &[3, 4, 6, 10, 11, 12],
        ],
        Planet::Moon => [
            &[3, 6, 7, 8, 10, 11],
            &[1, 3, 6, 7, 10, 11],
            &[2, 3, 5, 6, 9, 10, 11],
            &[1, 3, 4, 5, 7, 8, 10, 11],
            &[1, 4, 7, 8, 10, 11, 12],
            &[3, 4, 5, 7, 9, 10, 11],
            &[3, 5, 6, 11],
            &[3, 6, 10, 11],
        ],
        Planet::Mars => [
            &[3, 5, 6, 10, 11],
            &[3, 6, 11],
            &[1, 2, 4, 7, 8, 10, 11],
            &[3, 5, 6, 11],
            &[6, 10, 11, 12],
            &[6, 8, 11, 12],
            &[1, 4, 7, 8, 9, 10, 11],
            &[1, 3, 6, 10, 11],
        ],
        Planet::Mercury => [
            &[5, 6, 9, 11, 12],
            &[2, 4, 6, 8, 10, 11],
            &[1, 2, 4, 7, 8, 9, 10, 11],
            &[1, 3, 5, 6, 9, 10, 11, 12],
            &[6, 8, 11, 12],
            &[1, 2, 3, 4, 5, 8, 9, 11],
            &[1, 2, 4, 7, 8, 9, 10, 11],
            &[1, 2, 4, 6, 8, 10, 11],
        ],
        Planet::Jupiter => [
            &[1, 2, 3, 4, 7, 8, 9, 10, 11],
            &[2, 5, 7, 9, 11],
            &[1, 2, 4, 7, 8, 10, 11],
            &[1, 2, 4, 5, 6, 9, 10, 11],
            &[1, 2, 3, 4, 7, 8, 10, 11],
            &[2, 5, 6, 9, 10, 11],
            &[3, 5, 6, 12],
            &[1, 2, 4, 5, 6, 7, 9, 10, 11],
        ],
        Planet::Venus => [
            &[8, 11, 12],
            &[1, 2, 3, 4, 5, 8, 9, 11, 12],
            &[3, 5, 6, 9, 11, 12],
            &[3, 5, 6, 9, 11],
            &[5, 8, 9, 10, 11],
            &[1, 2, 3, 4, 5, 8, 9, 10, 11],
            &[3, 4, 5, 8, 9, 10, 11],
            &[1, 2, 3, 4, 5, 8, 9, 11],
        ],
        Planet::Saturn => [
            &[1, 2, 4, 7, 8, 10, 11],
            &[3, 6, 11],
            &[3, 5, 6, 10, 11, 12],
            &[6, 8, 9, 10, 11, 12],
            &[5, 6, 11, 12],
            &[6, 11, 12],
            &[3, 5, 6, 11],
            &[1, 3, 4, 6, 10, 11],
        ],
        Planet::Rahu | Planet::Ketu => [&[]; 8],
    }
}

fn contributor_sign(chart: &Chart, contributor: Option<Planet>) -> Result<u8, JyotishaError> {
    match contributor {
        Some(planet) => Ok(chart
            .planets
            .get(&planet)
            .ok_or_else(|| JyotishaError::invariant(format!("chart is missing {planet}")))?
            .sign_index),
        None => Ok(chart.ascendant.sign_index),
    }
}

/// Computes one planet's Bhinnāṣṭakavarga: a 12-entry bindu count (0-8)
/// indexed by sign (`spec.md` §4.C10). The lunar nodes carry no classical
/// Ashtakavarga and return all zeros.
pub fn bhinnashtakavarga(chart: &Chart, target: Planet) -> Result<[u8; 12], JyotishaError> {
    let mut binned = [0u8; 12];
    if target.is_node() {
        return Ok(binned);
    }
    let table = bindu_houses(target);
    for (contributor, houses) in CONTRIBUTORS.iter().zip(table.iter()) {
        let base_sign = contributor_sign(chart, *contributor)?;
        for &offset in *houses {
            let sign = (base_sign as u32 + offset as u32 - 1) % 12;
            binned[sign as usize] += 1;
        }
    }
    Ok(binned)
}

/// Sarva Ashtakavarga: the sign-wise sum across all seven planetary
/// Bhinnāṣṭakavargas, grounded on the teacher's
/// `ashtakavarga::totals::calculate_analysis` aggregation shape.
pub fn sarva_ashtakavarga(per_planet: &HashMap<String, [u8; 12]>) -> [u16; 12] {
    let mut totals = [0u16; 12];
    for bindus in per_planet.values() {
        for (i, &b) in bindus.iter().enumerate() {
            totals[i] += b as u16;
        }
    }
    totals
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
        jyotisha_chart::build_chart(10.0, &planets, &Map::new(), 1).unwrap()
    }

    #[test]
    fn bindu_counts_never_exceed_eight_per_sign() {
        let chart = sample_chart();
        for &planet in &[
            Planet::Sun,
            Planet::Moon,
            Planet::Mars,
            Planet::Mercury,
            Planet::Jupiter,
            Planet::Venus,
            Planet::Saturn,
        ] {
            let bindus = bhinnashtakavarga(&chart, planet).unwrap();
            for &b in &bindus {
                assert!(b <= 8, "{planet} exceeded 8 bindus in a sign: {bindus:?}");
            }
        }
    }

    #[test]
    fn lunar_nodes_carry_no_ashtakavarga() {
        let chart = sample_chart();
        assert_eq!(bhinnashtakavarga(&chart, Planet::Rahu).unwrap(), [0u8; 12]);
    }

    #[test]
    fn sarva_ashtakavarga_sums_every_contributor() {
        let chart = sample_chart();
        let mut per_planet = HashMap::new();
        for &planet in &[Planet::Sun, Planet::Moon] {
            per_planet.insert(planet.name().to_string(), bhinnashtakavarga(&chart, planet).unwrap());
        }
        let sarva = sarva_ashtakavarga(&per_planet);
        let expected: u16 = per_planet.values().flatten().map(|&b| b as u16).sum();
        assert_eq!(sarva.iter().sum::<u16>(), expected);
    }
}
