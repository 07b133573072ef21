//! C6 — the Pañcāṅga Engine: sunrise/sunset, the five limbs of the
//! traditional Hindu calendar, lunar months, and Saṃvat years.

pub mod bracketing;
pub mod panchanga;
pub mod tables;

pub use bracketing::{find_boundary, find_boundary_default};
pub use panchanga::{
    compute_panchanga, KaranaEntry, MonthInfo, NakshatraState, PanchangaSnapshot, SamvatYears,
    TithiState, YogaState,
};
