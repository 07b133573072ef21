//! Sign/nakṣatra mapping (C2), Whole-Sign house assignment (C3), and chart
//! composition with its construction invariants (C5). `spec.md` §4.C2,
//! §4.C3, §4.C5.

mod chart;
mod houses;
mod sign;

pub use chart::{build_chart, Chart, HouseEntry};
pub use houses::whole_sign_house;
pub use sign::{enrich_longitude, nakshatra_fraction};
