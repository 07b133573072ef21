//! The process-wide, read-only configuration record (`spec.md` §5, §9).
//!
//! Unlike the teacher's `ConfigManager` (an `Arc<RwLock<EngineConfig>>` with
//! `get_config`/`update_config`), there is no mutation path here once a
//! config is built: the spec requires the ephemeris path and the three
//! strength scalars frozen for the process lifetime, and forbids silently
//! rescaling them. `ayanamsa`, `node_policy`, and `house_system` are not even
//! fields — they are fixed by the spec to a single value each and are
//! exposed as associated constants so a report can echo them without a
//! config object ever offering to change them.

use serde::{Deserialize, Serialize};

/// The one configurable surface `spec.md` §6 actually enumerates: the
/// ephemeris data path, and the three BPHS scalars that must be reported
/// verbatim by the strength engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Filesystem path to the Swiss Ephemeris data files.
    pub ephemeris_path: String,
    pub strength: StrengthScalars,
}

/// The three scalars `spec.md` §6/§9 calls out by name, locked to 1.0 in
/// "Pure BPHS" mode. They are still struct fields (not bare constants)
/// because the response must surface them verbatim — a typed, cloneable
/// value is easier to thread through the strength engine and into the
/// report than a set of free-floating constants would be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthScalars {
    pub kendradi_scale: f64,
    pub dig_bala_sun_multiplier: f64,
    pub saptavargaja_divisor: f64,
}

impl Default for StrengthScalars {
    fn default() -> Self {
        // "Pure BPHS" mode: all three scalars frozen at 1.0, per spec.md §6.
        Self {
            kendradi_scale: 1.0,
            dig_bala_sun_multiplier: 1.0,
            saptavargaja_divisor: 1.0,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ephemeris_path: "data/ephemeris".to_string(),
            strength: StrengthScalars::default(),
        }
    }
}

impl EngineConfig {
    /// The only supported ayanāṃśa. Not a runtime choice.
    pub const AYANAMSA: &'static str = "Lahiri";
    /// The only supported node policy. Not a runtime choice.
    pub const NODE_POLICY: &'static str = "true";
    /// The only supported house system. Not a runtime choice.
    pub const HOUSE_SYSTEM: &'static str = "whole_sign";

    pub fn new(ephemeris_path: impl Into<String>) -> Self {
        Self {
            ephemeris_path: ephemeris_path.into(),
            strength: StrengthScalars::default(),
        }
    }

    /// Loads configuration from environment and an optional TOML file,
    /// falling back to defaults — the teacher's `config` + `dotenvy`
    /// pattern, minus the runtime-mutable manager wrapped around it.
    pub fn load(path: Option<&str>) -> Result<Self, crate::JyotishaError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default()).map_err(|e| {
                crate::JyotishaError::input(format!("default config is malformed: {e}"))
            })?);
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(config::Environment::with_prefix("JYOTISHA").separator("__"));
        let built = builder
            .build()
            .map_err(|e| crate::JyotishaError::input(format!("config load failed: {e}")))?;
        built
            .try_deserialize()
            .map_err(|e| crate::JyotishaError::input(format!("config deserialize failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strength_scalars_are_pure_bphs() {
        let s = StrengthScalars::default();
        assert_eq!(s.kendradi_scale, 1.0);
        assert_eq!(s.dig_bala_sun_multiplier, 1.0);
        assert_eq!(s.saptavargaja_divisor, 1.0);
    }

    #[test]
    fn fixed_selections_are_constants_not_fields() {
        assert_eq!(EngineConfig::AYANAMSA, "Lahiri");
        assert_eq!(EngineConfig::NODE_POLICY, "true");
        assert_eq!(EngineConfig::HOUSE_SYSTEM, "whole_sign");
    }

    #[test]
    fn load_with_no_file_falls_back_to_defaults() {
        let cfg = EngineConfig::load(None).expect("default config loads");
        assert_eq!(cfg, EngineConfig::default());
    }
}
