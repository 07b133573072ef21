//! Fixed name tables for the five limbs of the Pañcāṅga, grounded on the
//! teacher's `engine-panchanga::{TITHI_NAMES, YOGA_NAMES, KARANA_NAMES,
//! VARA_NAMES}` constant-table style.

use jyotisha_core::Planet;

/// Thirty tithi names, Śukla Pratipadā through Pūrṇimā then Kṛṣṇa
/// Pratipadā through Amāvāsyā. Pakṣa = Śukla for indices 0-14, Kṛṣṇa for
/// 15-29 (`spec.md` §4.C6).
pub const TITHI_NAMES: [&str; 30] = [
    "Shukla Pratipada",
    "Shukla Dwitiya",
    "Shukla Tritiya",
    "Shukla Chaturthi",
    "Shukla Panchami",
    "Shukla Shashthi",
    "Shukla Saptami",
    "Shukla Ashtami",
    "Shukla Navami",
    "Shukla Dashami",
    "Shukla Ekadashi",
    "Shukla Dwadashi",
    "Shukla Trayodashi",
    "Shukla Chaturdashi",
    "Purnima",
    "Krishna Pratipada",
    "Krishna Dwitiya",
    "Krishna Tritiya",
    "Krishna Chaturthi",
    "Krishna Panchami",
    "Krishna Shashthi",
    "Krishna Saptami",
    "Krishna Ashtami",
    "Krishna Navami",
    "Krishna Dashami",
    "Krishna Ekadashi",
    "Krishna Dwadashi",
    "Krishna Trayodashi",
    "Krishna Chaturdashi",
    "Amavasya",
];

pub const YOGA_NAMES: [&str; 27] = [
    "Vishkambha",
    "Priti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarma",
    "Dhriti",
    "Shoola",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyana",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

/// The seven "movable" karaṇas that repeat through indices 1-56 of the
/// 60-step half-tithi cycle, plus the four fixed karaṇas that occupy the
/// remaining four half-tithis once per lunar month (`spec.md` §4.C6).
pub const MOVABLE_KARANA_NAMES: [&str; 7] =
    ["Bava", "Balava", "Kaulava", "Taitila", "Gara", "Vanija", "Vishti"];
pub const FIXED_KARANA_NAMES: [&str; 4] = ["Kimstughna", "Shakuni", "Chatushpada", "Naga"];

/// Returns the karaṇa name for a half-tithi index `k` in `[0, 59]`, per the
/// classical cyclic-movable/fixed-endpoint arrangement: index 0 is always
/// Kiṃstughna; indices 57-59 are Śakuni, Catuṣpāda, Nāga; indices 1-56 cycle
/// through the seven movable karaṇas.
pub fn karana_name(k: usize) -> &'static str {
    match k {
        0 => FIXED_KARANA_NAMES[0],
        57 => FIXED_KARANA_NAMES[1],
        58 => FIXED_KARANA_NAMES[2],
        59 => FIXED_KARANA_NAMES[3],
        1..=56 => MOVABLE_KARANA_NAMES[(k - 1) % 7],
        _ => unreachable!("half-tithi index {k} outside [0, 59]"),
    }
}

/// `(english weekday, planetary lord)` for vāra index 0 (Sunday) .. 6
/// (Saturday), the standard Sun-Moon-Mars-Mercury-Jupiter-Venus-Saturn
/// assignment (`spec.md` §4.C6).
pub const VARA_TABLE: [(&str, Planet); 7] = [
    ("Sunday", Planet::Sun),
    ("Monday", Planet::Moon),
    ("Tuesday", Planet::Mars),
    ("Wednesday", Planet::Mercury),
    ("Thursday", Planet::Jupiter),
    ("Friday", Planet::Venus),
    ("Saturday", Planet::Saturn),
];

/// Canonical lunar month names keyed on the sidereal sign index (0 = Aries)
/// of the Sun at the reference instant (Amāvāsyā for amānta, Pūrṇimā for
/// pūrṇimānta), per `spec.md` §4.C6.
pub const MONTH_NAMES: [&str; 12] = [
    "Chaitra",
    "Vaishakha",
    "Jyeshtha",
    "Ashadha",
    "Shravana",
    "Bhadrapada",
    "Ashwin",
    "Kartika",
    "Margashirsha",
    "Pausha",
    "Magha",
    "Phalguna",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn karana_zero_is_always_kimstughna() {
        assert_eq!(karana_name(0), "Kimstughna");
    }

    #[test]
    fn karana_cycle_repeats_the_seven_movable_names() {
        assert_eq!(karana_name(1), "Bava");
        assert_eq!(karana_name(8), "Bava");
        assert_eq!(karana_name(56), MOVABLE_KARANA_NAMES[(56 - 1) % 7]);
    }

    #[test]
    fn final_three_half_tithis_are_the_remaining_fixed_karanas() {
        assert_eq!(karana_name(57), "Shakuni");
        assert_eq!(karana_name(58), "Chatushpada");
        assert_eq!(karana_name(59), "Naga");
    }

    #[test]
    fn month_names_table_has_twelve_entries_matching_scenario_b() {
        // Scenario B: Amanta month = Margashirsha -> Sagittarius (index 8).
        assert_eq!(MONTH_NAMES[8], "Margashirsha");
    }
}
