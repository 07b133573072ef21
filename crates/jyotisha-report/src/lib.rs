//! The §6 JSON report facade: the only crate outside the core a caller
//! needs to depend on. [`build_report`] composes every compute crate over
//! one `(date, time, lat, lon, timezone)` birth input and assembles the
//! exact top-level shape `spec.md` §6 specifies — keyed by chart label
//! (`D1` .. `D60`) plus `panchanga`, `dasha`, `yogas`, and `strength`, with
//! `transits` available separately via [`current_transits`] since it keys
//! off "now", not the birth instant (`spec.md` §6).
//!
//! Grounded on the teacher's `noesis-core::types::{EngineOutput,
//! CalculationMetadata}` envelope pattern, minus the witness/consciousness
//! fields that have no place in a pure Jyotiṣa computation surface.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use jyotisha_chart::{build_chart, Chart};
use jyotisha_core::config::StrengthScalars;
use jyotisha_core::{BirthInput, EnrichedPosition, JyotishaError, Planet};
use jyotisha_dasha::DashaTimeline;
use jyotisha_ephemeris::{civil_to_julian_day, EphemerisAdapter};
use jyotisha_panchanga::PanchangaSnapshot;
use jyotisha_strength::StrengthReport;
use jyotisha_transits::Ingress;
use jyotisha_yogas::DetectedYoga;
use rayon::prelude::*;
use tracing::debug;

/// Metadata envelope carried alongside every report — grounded on the
/// teacher's `CalculationMetadata`, scoped to what a pure compute core can
/// actually attest to (no request IDs, no cache-hit flags). The frozen
/// BPHS scalars are not duplicated here: `spec.md` §6 names them as
/// `strength.kendradi_scale` etc., so they are carried on `strength`
/// directly (see `jyotisha_strength::StrengthReport`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReportMetadata {
    pub ayanamsa: String,
    pub node_policy: String,
    pub house_system: String,
}

impl ReportMetadata {
    fn from_config() -> Self {
        Self {
            ayanamsa: jyotisha_core::EngineConfig::AYANAMSA.to_string(),
            node_policy: jyotisha_core::EngineConfig::NODE_POLICY.to_string(),
            house_system: jyotisha_core::EngineConfig::HOUSE_SYSTEM.to_string(),
        }
    }
}

/// The full birth report: every divisional chart, the birth-date Pañcāṅga,
/// the Vimśottarī Daśā timeline, detected yogas, the Ṣaḍbala/Aṣṭakavarga
/// strength report, and the configuration metadata echoed verbatim
/// (`spec.md` §6). `charts` is flattened onto this struct's own JSON object
/// so each chart label (`D1`..`D60`) is a top-level key, a sibling of
/// `panchanga`/`dasha`/`yogas`/`strength`, per `spec.md` §6's exact wire
/// shape — not nested under a `"charts"` wrapper.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BirthReport {
    #[serde(flatten)]
    pub charts: HashMap<String, Chart>,
    pub panchanga: PanchangaSnapshot,
    pub dasha: DashaTimeline,
    pub yogas: Vec<DetectedYoga>,
    pub strength: StrengthReport,
    pub metadata: ReportMetadata,
}

fn dn_label(n: u8) -> String {
    format!("D{n}")
}

/// Computes the nine raw sidereal longitudes and retrograde flags for a
/// Julian Day, reused by both chart building and the Pañcāṅga/Daśā inputs
/// that need the Moon's longitude directly.
fn raw_positions(
    eph: &EphemerisAdapter,
    jd: f64,
) -> Result<(HashMap<Planet, f64>, HashMap<Planet, bool>), JyotishaError> {
    let mut longitudes = HashMap::with_capacity(9);
    let mut retrograde = HashMap::with_capacity(9);
    for planet in Planet::ALL {
        let body = eph.calc_body(jd, planet)?;
        longitudes.insert(planet, body.longitude);
        retrograde.insert(planet, body.retrograde);
    }
    Ok((longitudes, retrograde))
}

/// Builds the full birth report for one `(date, time, lat, lon, timezone)`
/// input (`spec.md` §6). Builds all sixteen divisional charts concurrently
/// via `rayon`, per `spec.md` §5's explicit license that Dn builds are
/// independent and may be parallelised.
pub fn build_report(
    eph: &EphemerisAdapter,
    input: &BirthInput,
    scalars: &StrengthScalars,
) -> Result<BirthReport, JyotishaError> {
    debug!(date = %input.date, time = %input.time, tz = %input.timezone, "building birth report");

    let jd = civil_to_julian_day(&input.date, &input.time, &input.timezone)?;
    let ascendant_longitude = eph.calc_ascendant(jd, input.latitude, input.longitude)?;
    let (longitudes, retrograde) = raw_positions(eph, jd)?;

    let chart_results: Vec<Result<(String, Chart), JyotishaError>> = jyotisha_varga::SUPPORTED_VARGAS
        .par_iter()
        .map(|&n| {
            build_chart(ascendant_longitude, &longitudes, &retrograde, n).map(|chart| (dn_label(n), chart))
        })
        .collect();

    let mut charts = HashMap::with_capacity(jyotisha_varga::SUPPORTED_VARGAS.len());
    for result in chart_results {
        let (label, chart) = result?;
        charts.insert(label, chart);
    }

    let panchanga = jyotisha_panchanga::compute_panchanga(
        eph,
        &input.date,
        &input.timezone,
        input.latitude,
        input.longitude,
    )?;

    let moon_longitude = longitudes[&Planet::Moon];
    let moon_nakshatra_index = jyotisha_chart::enrich_longitude(moon_longitude)?.nakshatra_index;
    let moon_nakshatra_fraction = jyotisha_chart::nakshatra_fraction(moon_longitude);
    let birth_instant = jyotisha_ephemeris::julian_day_to_datetime(jd);
    let dasha = jyotisha_dasha::vimshottari_timeline(moon_nakshatra_index, moon_nakshatra_fraction, birth_instant)?;

    let d1 = charts
        .get("D1")
        .ok_or_else(|| JyotishaError::invariant("D1 chart missing from freshly built report"))?;
    let yogas = jyotisha_yogas::detect_yogas(d1);
    let strength = jyotisha_strength::calculate_strength(d1, &panchanga, scalars)?;

    Ok(BirthReport {
        charts,
        panchanga,
        dasha,
        yogas,
        strength,
        metadata: ReportMetadata::from_config(),
    })
}

/// Current sidereal positions of all nine grahas "now" (`spec.md` §6's
/// on-request `transits` key), separate from [`build_report`] since it
/// keys off the current instant rather than the birth instant.
pub fn current_transits(eph: &EphemerisAdapter, instant: DateTime<Utc>) -> Result<HashMap<Planet, EnrichedPosition>, JyotishaError> {
    jyotisha_transits::current_positions(eph, instant)
}

/// Sign-ingress events for one planet over an arbitrary window, exposed at
/// the facade level for the same reason as [`current_transits`].
pub fn transit_ingresses(
    eph: &EphemerisAdapter,
    planet: Planet,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Ingress>, JyotishaError> {
    jyotisha_transits::sign_ingresses(eph, planet, start, end)
}

/// Serializes a [`BirthReport`] to the pretty-printed JSON document
/// `spec.md` §6 describes, via `serde_json`.
pub fn to_json(report: &BirthReport) -> Result<String, JyotishaError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| JyotishaError::invariant(format!("report failed to serialize: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyotisha_panchanga::{KaranaEntry, MonthInfo, NakshatraState, SamvatYears, TithiState, YogaState};

    #[test]
    fn dn_label_formats_the_chart_key() {
        assert_eq!(dn_label(1), "D1");
        assert_eq!(dn_label(60), "D60");
    }

    fn sample_longitudes() -> HashMap<Planet, f64> {
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

    fn sample_panchanga() -> PanchangaSnapshot {
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

    /// Anchors the `spec.md` §6 wire shape directly: `D1` must be a
    /// top-level key (not nested under `"charts"`), each chart's fields
    /// must use the exact `"Ascendant"`/`"Planets"`/`"Houses"` casing, and
    /// the frozen BPHS scalars must resolve at `strength.kendradi_scale`.
    #[test]
    fn report_json_matches_the_external_interface_contract() {
        let longitudes = sample_longitudes();
        let d1 = build_chart(222.2799, &longitudes, &HashMap::new(), 1).unwrap();
        let mut charts = HashMap::new();
        charts.insert("D1".to_string(), d1.clone());

        let panchanga = sample_panchanga();
        let birth = Utc::now();
        let dasha = jyotisha_dasha::vimshottari_timeline(4, 0.3, birth).unwrap();
        let yogas = jyotisha_yogas::detect_yogas(&d1);
        let scalars = StrengthScalars::default();
        let strength = jyotisha_strength::calculate_strength(&d1, &panchanga, &scalars).unwrap();

        let report = BirthReport {
            charts,
            panchanga,
            dasha,
            yogas,
            strength,
            metadata: ReportMetadata::from_config(),
        };

        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert_eq!(
            json["D1"]["Ascendant"]["sign_index"],
            serde_json::json!(d1.ascendant.sign_index)
        );
        assert!(json.get("charts").is_none());
        assert_eq!(json["strength"]["kendradi_scale"], serde_json::json!(1.0));
    }
}
