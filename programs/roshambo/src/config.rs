//! Environment configuration

use std::env;

use thiserror::Error;

/// Pins the computer's random choices when set
pub const SEED_VAR: &str = "ROSHAMBO_SEED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ROSHAMBO_SEED must be an unsigned 64-bit integer, got '{0}'")]
    InvalidSeed(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_seed_var(env::var(SEED_VAR).ok().as_deref())
    }

    fn from_seed_var(raw: Option<&str>) -> Result<Self, ConfigError> {
        let seed = match raw.map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(
                text.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed(text.to_string()))?,
            ),
        };
        Ok(Self { seed })
    }

    /// Configured seed, or a fresh one from the OS
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
