//! Startup configuration for a morph session.
//!
//! Front-ends fill this from their own sources (command line, environment,
//! URL query) and hand it to [`crate::Stage::new`].

use crate::constants::{DEFAULT_PARTICLE_COUNT, MAX_PARTICLE_COUNT};
use crate::error::ConfigError;

pub const DEFAULT_NAME: &str = "Explorer";
pub const DEFAULT_REVEAL_PREFIX: &str = "Happy Birthday, ";

#[derive(Clone, Debug, PartialEq)]
pub struct MorphConfig {
    pub particle_count: usize,
    /// Text sampled into the final glyph shape.
    pub custom_name: String,
    /// Narrative shown before the name in the final scene.
    pub reveal_prefix: String,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            custom_name: DEFAULT_NAME.to_string(),
            reveal_prefix: DEFAULT_REVEAL_PREFIX.to_string(),
            seed: None,
        }
    }
}

impl MorphConfig {
    pub fn with_particle_count(mut self, count: usize) -> Result<Self, ConfigError> {
        if count > MAX_PARTICLE_COUNT {
            return Err(ConfigError::TooManyParticles {
                requested: count,
                max: MAX_PARTICLE_COUNT,
            });
        }
        self.particle_count = count;
        Ok(self)
    }

    /// Unset, empty or whitespace-only names keep the default.
    pub fn with_name(mut self, name: Option<&str>) -> Self {
        if let Some(n) = name.map(str::trim).filter(|n| !n.is_empty()) {
            self.custom_name = n.to_string();
        }
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn reveal_text(&self) -> String {
        format!("{}{}", self.reveal_prefix, self.custom_name)
    }
}
