//! The Swiss Ephemeris adapter itself — API shape grounded on the teacher's
//! own `src/engines/swiss_ephemeris.rs` (`SweFlag` bitflags, `SweResult::Ok`/
//! `Err`, `swisseph::calc_ut(jd, id, flags)`), with sidereal/true-node
//! handling borrowed from `aphrodite::ephemeris::adapter` (which the
//! teacher's own file does not attempt at all).

use std::path::{Path, PathBuf};

use jyotisha_core::{JyotishaError, Planet};
use swisseph::{SweFlag, SweResult};
use tracing::{debug, warn};

/// Swiss Ephemeris body id for the true lunar node. The mean node (id 10)
/// is never used — `spec.md` §4.C1 fixes the node policy to true node.
const SE_TRUE_NODE: i32 = 11;

/// Swiss Ephemeris sidereal-mode constant for the Lahiri ayanāṃśa. Fixed —
/// no other ayanāṃśa is ever selected by this crate.
const SE_SIDM_LAHIRI: i32 = 1;

/// Swiss Ephemeris house-system byte for the Whole-Sign system.
const HOUSE_SYSTEM_WHOLE_SIGN: u8 = b'W';

const SE_SUN: i32 = 0;
/// `rise_trans` event-selector bit for a rise event.
const SE_CALC_RISE: i32 = 1;
/// `rise_trans` event-selector bit for a set event.
const SE_CALC_SET: i32 = 2;

/// Standard sea-level atmospheric conditions used for the refraction model
/// (`spec.md` §4.C6 fixes ~34' of refraction at sea level; Swiss Ephemeris'
/// default rise/set model already applies this for the upper limb, which is
/// the convention used here).
const STANDARD_ATM_PRESSURE_MBAR: f64 = 1013.25;
const STANDARD_ATM_TEMPERATURE_CELSIUS: f64 = 15.0;

fn planet_id(planet: Planet) -> Option<i32> {
    match planet {
        Planet::Sun => Some(0),
        Planet::Moon => Some(1),
        Planet::Mercury => Some(2),
        Planet::Venus => Some(3),
        Planet::Mars => Some(4),
        Planet::Jupiter => Some(5),
        Planet::Saturn => Some(6),
        Planet::Rahu => Some(SE_TRUE_NODE),
        // Ketu has no Swiss Ephemeris body id: it is always derived as
        // Rahu + 180°, never queried directly (spec.md §3).
        Planet::Ketu => None,
    }
}

/// A raw sidereal body position before sign/nakṣatra enrichment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub longitude_speed: f64,
    pub retrograde: bool,
}

/// The ephemeris adapter. Owns the Swiss Ephemeris data path and the
/// sidereal-mode configuration; every other component reaches the
/// underlying library only through this type.
pub struct EphemerisAdapter {
    data_path: PathBuf,
}

impl EphemerisAdapter {
    /// Opens the adapter against an ephemeris data directory. Fails with
    /// `EphemerisUnavailable` if the path does not exist — `spec.md` §4.C1
    /// and §7 both treat this as fatal (the process must not start).
    pub fn new(data_path: impl Into<PathBuf>) -> Result<Self, JyotishaError> {
        let data_path = data_path.into();
        if !Path::new(&data_path).exists() {
            return Err(JyotishaError::ephemeris_unavailable(format!(
                "ephemeris data path does not exist: {}",
                data_path.display()
            )));
        }
        swisseph::set_ephe_path(data_path.to_string_lossy().as_ref());
        // Lahiri is the only supported ayanāṃśa (spec.md §4.C1, §6); this is
        // set once, globally, at construction rather than per call.
        swisseph::set_sid_mode(SE_SIDM_LAHIRI, 0.0, 0.0);
        debug!(path = %data_path.display(), "ephemeris adapter initialised");
        Ok(Self { data_path })
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    fn calc_flags(&self) -> SweFlag {
        SweFlag::SEFLG_SWIEPH | SweFlag::SEFLG_SPEED | SweFlag::SEFLG_SIDEREAL
    }

    /// Sidereal longitude/latitude/distance/speed for one of the nine
    /// grahas at the given Julian Day. Ketu is synthesized from Rahu — it
    /// has no independent ephemeris entry.
    pub fn calc_body(&self, jd: f64, planet: Planet) -> Result<BodyPosition, JyotishaError> {
        if planet == Planet::Ketu {
            let rahu = self.calc_body(jd, Planet::Rahu)?;
            return Ok(BodyPosition {
                longitude: (rahu.longitude + 180.0).rem_euclid(360.0),
                latitude: -rahu.latitude,
                distance: rahu.distance,
                longitude_speed: rahu.longitude_speed,
                retrograde: rahu.retrograde,
            });
        }
        let id = planet_id(planet).expect("every non-Ketu planet has a Swiss Ephemeris id");
        match swisseph::calc_ut(jd, id, self.calc_flags()) {
            SweResult::Ok(result) => Ok(BodyPosition {
                longitude: result.longitude.rem_euclid(360.0),
                latitude: result.latitude,
                distance: result.distance,
                longitude_speed: result.longitude_speed,
                retrograde: result.longitude_speed < 0.0,
            }),
            SweResult::Err(e) => {
                warn!(planet = %planet, jd, error = %e, "swisseph calc_ut failed");
                Err(JyotishaError::ephemeris_unavailable(format!(
                    "calc_ut failed for {planet} at jd={jd}: {e}"
                )))
            }
        }
    }

    /// Julian Day of sunrise on or after `jd_search_start` (typically local
    /// midnight) at the given geographic location, against the Sun's upper
    /// limb with standard atmospheric refraction (`spec.md` §4.C6). Returns
    /// `AstroEventUnavailable` when no sunrise occurs (polar latitudes) —
    /// never a fabricated approximate time.
    pub fn calc_sunrise(&self, jd_search_start: f64, lat: f64, lon: f64) -> Result<f64, JyotishaError> {
        self.calc_rise_or_set(jd_search_start, lat, lon, SE_CALC_RISE)
    }

    /// Julian Day of sunset on or after `jd_search_start`. See
    /// [`Self::calc_sunrise`].
    pub fn calc_sunset(&self, jd_search_start: f64, lat: f64, lon: f64) -> Result<f64, JyotishaError> {
        self.calc_rise_or_set(jd_search_start, lat, lon, SE_CALC_SET)
    }

    fn calc_rise_or_set(
        &self,
        jd_search_start: f64,
        lat: f64,
        lon: f64,
        event: i32,
    ) -> Result<f64, JyotishaError> {
        let geopos = [lon, lat, 0.0];
        match swisseph::rise_trans(
            jd_search_start,
            SE_SUN,
            event,
            geopos,
            STANDARD_ATM_PRESSURE_MBAR,
            STANDARD_ATM_TEMPERATURE_CELSIUS,
        ) {
            SweResult::Ok(jd_event) => Ok(jd_event),
            SweResult::Err(e) => {
                warn!(jd_search_start, lat, lon, event, error = %e, "swisseph rise_trans found no event");
                Err(JyotishaError::astro_event_unavailable(format!(
                    "no rise/set event at lat={lat}, lon={lon} near jd={jd_search_start}: {e}"
                )))
            }
        }
    }

    /// Sidereal ascendant longitude for the given Julian Day and geographic
    /// location, via the Whole-Sign house computation (`spec.md` §4.C3: no
    /// cusp-based system is used anywhere in the core; the house byte here
    /// only selects how Swiss Ephemeris reports the ascendant angle itself).
    pub fn calc_ascendant(&self, jd: f64, lat: f64, lon: f64) -> Result<f64, JyotishaError> {
        match swisseph::houses_ex(jd, lat, lon, HOUSE_SYSTEM_WHOLE_SIGN as i32) {
            SweResult::Ok(result) => Ok(result.ascendant.rem_euclid(360.0)),
            SweResult::Err(e) => {
                warn!(jd, lat, lon, error = %e, "swisseph houses_ex failed");
                Err(JyotishaError::ephemeris_unavailable(format!(
                    "houses_ex failed at jd={jd}, lat={lat}, lon={lon}: {e}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_id_covers_all_seven_non_node_grahas() {
        for p in [
            Planet::Sun,
            Planet::Moon,
            Planet::Mercury,
            Planet::Venus,
            Planet::Mars,
            Planet::Jupiter,
            Planet::Saturn,
        ] {
            assert!(planet_id(p).is_some());
        }
    }

    #[test]
    fn ketu_has_no_direct_ephemeris_id() {
        assert_eq!(planet_id(Planet::Ketu), None);
    }

    #[test]
    fn rahu_uses_the_true_node_id_not_the_mean_node() {
        assert_eq!(planet_id(Planet::Rahu), Some(SE_TRUE_NODE));
        assert_ne!(planet_id(Planet::Rahu), Some(10));
    }

    #[test]
    fn missing_data_path_is_ephemeris_unavailable() {
        let err = EphemerisAdapter::new("/nonexistent/path/that/should/never/exist").unwrap_err();
        assert!(matches!(err, JyotishaError::EphemerisUnavailable(_)));
    }
}
