//! C7 — Vimśottarī Daśā. Builds the Mahādaśā/Antardaśā timeline from the
//! Moon's nakṣatra position at birth, per `spec.md` §4.C7.
//!
//! Grounded on `aphrodite::vedic::dashas::{VIMSHOTTARI_SEQUENCE,
//! compute_vimshottari_dasha}` for the nine-lord sequence and the
//! `nakshatra.progress`-driven partial-period formula, and on the teacher's
//! `engine-vimshottari::models::{Mahadasha, Antardasha}` for the two-level
//! struct shape (the teacher's further Pratyantardasha level has no
//! counterpart in `spec.md` §3, which stops at Antardaśā, and is dropped).

use chrono::{DateTime, Duration, Utc};
use jyotisha_core::{JyotishaError, Planet};

/// Total length of the Vimśottarī cycle in years (`spec.md` §4.C7).
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Days per Vimśottarī year. The spec fixes exact year lengths in years,
/// not days; a 365.25-day year (the teacher's `VIMSHOTTARI_YEAR_DAYS`
/// constant) is the standard convention used to turn a year count into a
/// calendar instant.
const DAYS_PER_YEAR: f64 = 365.25;

/// `(lord, period_years)` for the nine Vimśottarī Mahādaśās, in their fixed
/// cyclic order starting from Ketu (`spec.md` §4.C7). Total is exactly 120.
pub const VIMSHOTTARI_SEQUENCE: [(Planet, f64); 9] = [
    (Planet::Ketu, 7.0),
    (Planet::Venus, 20.0),
    (Planet::Sun, 6.0),
    (Planet::Moon, 10.0),
    (Planet::Mars, 7.0),
    (Planet::Rahu, 18.0),
    (Planet::Jupiter, 16.0),
    (Planet::Saturn, 19.0),
    (Planet::Mercury, 17.0),
];

fn years_to_duration(years: f64) -> Duration {
    Duration::milliseconds((years * DAYS_PER_YEAR * 86_400_000.0).round() as i64)
}

/// One Antardaśā sub-period within a Mahādaśā.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Antardasha {
    pub lord: Planet,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One Mahādaśā period, with its nine Antardaśā sub-periods.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mahadasha {
    pub lord: Planet,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub antardashas: Vec<Antardasha>,
}

/// The full Daśā timeline: an ordered sequence of Mahādaśā records covering
/// at least 120 years forward from birth (`spec.md` §4.C7).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DashaTimeline {
    pub start_lord: Planet,
    pub mahadashas: Vec<Mahadasha>,
}

fn sequence_index_of(lord: Planet) -> usize {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .position(|(p, _)| *p == lord)
        .expect("every nakshatra lord appears in the Vimshottari sequence")
}

/// Allocates the nine Antardaśā sub-periods of a Mahādaśā proportionally:
/// `antardasha_length = mahadasha_length * antardasha_lord_years / 120`
/// (`spec.md` §4.C7), starting the sub-cycle from the Mahādaśā's own lord
/// and cycling through all nine in order.
fn build_antardashas(mahadasha_lord: Planet, mahadasha_start: DateTime<Utc>, mahadasha_years: f64) -> Vec<Antardasha> {
    let start_index = sequence_index_of(mahadasha_lord);
    let mut cursor = mahadasha_start;
    (0..9)
        .map(|offset| {
            let (lord, lord_years) = VIMSHOTTARI_SEQUENCE[(start_index + offset) % 9];
            let duration_years = mahadasha_years * lord_years / VIMSHOTTARI_TOTAL_YEARS;
            let start = cursor;
            let end = start + years_to_duration(duration_years);
            cursor = end;
            Antardasha { lord, start, end }
        })
        .collect()
}

/// Builds the Vimśottarī timeline for a birth instant and the Moon's
/// nakṣatra state at birth.
///
/// `moon_nakshatra_index` selects the starting Mahādaśā lord (the ruler of
/// the Moon's birth nakṣatra, cycling Ketu/Venus/Sun/Moon/Mars/Rahu/
/// Jupiter/Saturn/Mercury every three nakṣatras). `moon_nakshatra_fraction`
/// is the fraction of that nakṣatra already elapsed
/// (`(moon_long mod (360/27)) / (360/27)`, `spec.md` §4.C7) — the starting
/// Mahādaśā is shortened by exactly this fraction, with the truncated
/// portion appearing only implicitly (the timeline starts already partway
/// through the first lord's period).
///
/// Emits Mahādaśā boundaries covering at least 120 years forward from
/// `birth_instant`, each carrying its nine Antardaśā sub-periods.
pub fn vimshottari_timeline(
    moon_nakshatra_index: u8,
    moon_nakshatra_fraction: f64,
    birth_instant: DateTime<Utc>,
) -> Result<DashaTimeline, JyotishaError> {
    if moon_nakshatra_index > 26 {
        return Err(JyotishaError::input(format!(
            "nakshatra_index {moon_nakshatra_index} outside [0, 26]"
        )));
    }
    if !(0.0..=1.0).contains(&moon_nakshatra_fraction) {
        return Err(JyotishaError::input(format!(
            "nakshatra_fraction {moon_nakshatra_fraction} outside [0, 1]"
        )));
    }

    // The ruling planet cycles through the nine Vimshottari lords every
    // three nakshatras, starting at Ketu (spec.md §3).
    let start_lord = VIMSHOTTARI_SEQUENCE[(moon_nakshatra_index as usize % 9)].0;
    let start_index = sequence_index_of(start_lord);

    let mut mahadashas = Vec::new();
    let mut cursor = birth_instant;
    let mut years_emitted = 0.0;

    for offset in 0.. {
        let (lord, full_years) = VIMSHOTTARI_SEQUENCE[(start_index + offset) % 9];
        let years = if offset == 0 {
            full_years * (1.0 - moon_nakshatra_fraction)
        } else {
            full_years
        };
        let start = cursor;
        let end = start + years_to_duration(years);
        let antardashas = build_antardashas(lord, start, years);
        mahadashas.push(Mahadasha {
            lord,
            start,
            end,
            antardashas,
        });
        cursor = end;
        years_emitted += years;
        if years_emitted >= VIMSHOTTARI_TOTAL_YEARS {
            break;
        }
    }

    Ok(DashaTimeline {
        start_lord,
        mahadashas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1995, 5, 16, 13, 8, 0).unwrap()
    }

    #[test]
    fn vimshottari_sequence_totals_120_years() {
        let total: f64 = VIMSHOTTARI_SEQUENCE.iter().map(|(_, y)| y).sum();
        assert!((total - 120.0).abs() < 1e-9);
    }

    #[test]
    fn moon_in_jyeshtha_starts_mercury_mahadasha() {
        // Jyeshtha is nakshatra index 17; 17 % 9 = 8 -> Mercury (scenario A).
        let timeline = vimshottari_timeline(17, 0.0, birth()).unwrap();
        assert_eq!(timeline.start_lord, Planet::Mercury);
        assert_eq!(timeline.mahadashas[0].lord, Planet::Mercury);
    }

    #[test]
    fn scenario_a_mercury_balance_is_about_six_years() {
        // Scenario A: Mercury balance at birth ~= 6.0559 years out of 17.
        let fraction = 1.0 - 6.0559 / 17.0;
        let timeline = vimshottari_timeline(17, fraction, birth()).unwrap();
        let first = &timeline.mahadashas[0];
        let elapsed_years = (first.end - first.start).num_seconds() as f64 / (DAYS_PER_YEAR * 86_400.0);
        assert!((elapsed_years - 6.0559).abs() < 0.01);
    }

    #[test]
    fn every_mahadasha_carries_nine_antardashas_summing_to_its_own_span() {
        let timeline = vimshottari_timeline(0, 0.0, birth()).unwrap();
        let first = &timeline.mahadashas[0];
        assert_eq!(first.antardashas.len(), 9);
        assert_eq!(first.antardashas[0].start, first.start);
        assert_eq!(first.antardashas.last().unwrap().end, first.end);
    }

    #[test]
    fn antardasha_cycle_starts_from_its_own_mahadasha_lord() {
        let timeline = vimshottari_timeline(17, 0.0, birth()).unwrap();
        let first = &timeline.mahadashas[0];
        assert_eq!(first.lord, Planet::Mercury);
        assert_eq!(first.antardashas[0].lord, Planet::Mercury);
    }

    #[test]
    fn timeline_covers_at_least_120_years_forward() {
        let timeline = vimshottari_timeline(0, 0.0, birth()).unwrap();
        let last_end = timeline.mahadashas.last().unwrap().end;
        let span_years = (last_end - birth()).num_seconds() as f64 / (DAYS_PER_YEAR * 86_400.0);
        assert!(span_years >= 120.0);
    }

    #[test]
    fn out_of_range_nakshatra_index_is_input_error() {
        assert!(vimshottari_timeline(27, 0.0, birth()).is_err());
    }

    #[test]
    fn out_of_range_fraction_is_input_error() {
        assert!(vimshottari_timeline(0, 1.5, birth()).is_err());
    }
}
