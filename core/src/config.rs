//! Engine configuration (ambient layer I): TOML-backed settings for the data
//! directory, syllable buffer cap, and scoring schedule (`spec.md` §3.1).
//!
//! File *location* is the caller's concern (`spec.md` §1 keeps persistence
//! mechanics out of scope for the engine itself); this module only loads and
//! saves a config from a path the caller supplies, mirroring the teacher's
//! `Config::load_toml`/`save_toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::layout::KeyboardLayoutCompat;

/// The maximum syllable buffer length matching `spec.md` §3's bound on `L`.
const DEFAULT_MAX_SYLLABLES: usize = 17;

/// Default `length_bonus` step (`spec.md` §4.G open question; see
/// `DESIGN.md` for why a flat per-syllable bonus was chosen over a
/// convex schedule).
const DEFAULT_LENGTH_BONUS_STEP: f64 = 0.8;

const DEFAULT_CONVERSION_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Directory containing the tree index and phrase dictionary files.
    pub data_directory: PathBuf,

    /// Keyboard layout used by new sessions unless overridden.
    pub default_layout: KeyboardLayoutCompat,

    /// Upper bound on the number of syllables held in one conversion buffer.
    pub max_syllables: usize,

    /// Step used by `length_bonus(n) = (n - 1) * length_bonus_step` (§4.G).
    pub length_bonus_step: f64,

    /// Capacity of the conversion core's segmentation cache.
    pub conversion_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("."),
            default_layout: KeyboardLayoutCompat::Default,
            max_syllables: DEFAULT_MAX_SYLLABLES,
            length_bonus_step: DEFAULT_LENGTH_BONUS_STEP,
            conversion_cache_capacity: DEFAULT_CONVERSION_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file at `path`.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves configuration to a TOML file at `path`.
    pub fn save_toml(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let mut config = EngineConfig::default();
        config.data_directory = PathBuf::from("/var/lib/example/dict");
        config.length_bonus_step = 1.25;

        let path = std::env::temp_dir().join(format!("engine_config_{}.toml", std::process::id()));
        config.save_toml(&path).unwrap();
        let loaded = EngineConfig::load_toml(&path).unwrap();

        assert_eq!(loaded.data_directory, config.data_directory);
        assert_eq!(loaded.length_bonus_step, config.length_bonus_step);
        assert_eq!(loaded.max_syllables, DEFAULT_MAX_SYLLABLES);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn defaults_match_spec_bound() {
        let config = EngineConfig::default();
        assert_eq!(config.max_syllables, 17);
    }
}
