//! Configuration loading and typed config structures for a Farmstead game.
//!
//! The default configuration lives in `farmstead-config.yaml` at the project
//! root. Every field has a default, so an empty file (or no file at all via
//! [`GameConfig::default`]) yields a playable two-player game.

use std::num::ParseIntError;
use std::path::Path;

use serde::Deserialize;

/// Environment variable overriding `game.seed`.
pub const SEED_ENV: &str = "FARMSTEAD_SEED";

/// Environment variable overriding `game.gold_to_win`.
pub const GOLD_TO_WIN_ENV: &str = "FARMSTEAD_GOLD_TO_WIN";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unplayable game.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong with it.
        reason: String,
    },

    /// An environment override is not a non-negative integer.
    #[error("{var}={value:?} is not a non-negative integer")]
    Override {
        /// The environment variable.
        var: &'static str,
        /// Its raw value.
        value: String,
        /// Why the integer parse failed.
        #[source]
        source: ParseIntError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Players and economy settings.
    #[serde(default)]
    pub game: GameSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `FARMSTEAD_SEED` overrides `game.seed`
    /// - `FARMSTEAD_GOLD_TO_WIN` overrides `game.gold_to_win`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Override`] if an override is not a number.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.game.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as null rather than an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Check that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()
    }
}

// ---------------------------------------------------------------------------
// Game section
// ---------------------------------------------------------------------------

/// Players and economy settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameSection {
    /// Player names in turn order. Names are ASCII letters only.
    #[serde(default = "default_players")]
    pub players: Vec<String>,

    /// Gold every player starts with.
    #[serde(default = "default_starting_gold")]
    pub starting_gold: u64,

    /// Gold needed to win, checked at the end of every round.
    #[serde(default = "default_gold_to_win")]
    pub gold_to_win: u64,

    /// Seed for shuffling the tile stack.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            players: default_players(),
            starting_gold: default_starting_gold(),
            gold_to_win: default_gold_to_win(),
            seed: default_seed(),
        }
    }
}

impl GameSection {
    /// Apply `FARMSTEAD_SEED` and `FARMSTEAD_GOLD_TO_WIN` if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Override`] if a set variable is not a number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var(SEED_ENV) {
            self.seed = parse_override(SEED_ENV, &val)?;
        }
        if let Ok(val) = std::env::var(GOLD_TO_WIN_ENV) {
            self.gold_to_win = parse_override(GOLD_TO_WIN_ENV, &val)?;
        }
        Ok(())
    }

    /// Check player names and the win threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(invalid("at least one player is required"));
        }
        if let Some(name) = self.players.iter().find(|name| !is_valid_name(name)) {
            return Err(invalid(format!(
                "player name {name:?} must consist of ASCII letters only"
            )));
        }
        if self.gold_to_win < 1 {
            return Err(invalid("gold_to_win must be at least 1"));
        }
        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

fn parse_override(var: &'static str, val: &str) -> Result<u64, ConfigError> {
    val.trim().parse().map_err(|source| ConfigError::Override {
        var,
        value: val.to_owned(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Logging section
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_players() -> Vec<String> {
    vec![String::from("Alice"), String::from("Bob")]
}

const fn default_starting_gold() -> u64 {
    20
}

const fn default_gold_to_win() -> u64 {
    100
}

const fn default_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    String::from("warn")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.game.players, vec!["Alice", "Bob"]);
        assert_eq!(config.game.starting_gold, 20);
        assert_eq!(config.game.gold_to_win, 100);
        assert_eq!(config.game.seed, 42);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
game:
  players:
    - Ada
    - Grace
    - Linus
  starting_gold: 50
  gold_to_win: 300
  seed: 7

logging:
  level: debug
";
        let config = GameConfig::parse_without_env(yaml).unwrap();
        assert_eq!(config.game.players.len(), 3);
        assert_eq!(config.game.starting_gold, 50);
        assert_eq!(config.game.gold_to_win, 300);
        assert_eq!(config.game.seed, 7);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let yaml = r"
game:
  seed: 9
";
        let config = GameConfig::parse_without_env(yaml).unwrap();
        assert_eq!(config.game.seed, 9);
        assert_eq!(config.game.starting_gold, 20);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = GameConfig::parse_without_env("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        let result = GameConfig::parse_without_env("game: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn validation_rejects_bad_names() {
        let mut config = GameConfig::default();
        config.game.players = vec![String::from("Ada"), String::from("R2D2")];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("R2D2"));

        config.game.players = vec![String::new()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_empty_roster_and_zero_goal() {
        let mut config = GameConfig::default();
        config.game.players.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        let mut config = GameConfig::default();
        config.game.gold_to_win = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn override_values_must_be_numbers() {
        assert_eq!(parse_override(SEED_ENV, " 12 ").unwrap(), 12);
        assert!(parse_override(SEED_ENV, "twelve").is_err());
        assert!(parse_override(GOLD_TO_WIN_ENV, "-3").is_err());
    }

    #[test]
    fn override_error_keeps_the_parse_failure() {
        use std::error::Error as _;

        let error = parse_override(GOLD_TO_WIN_ENV, "lots").unwrap_err();
        assert!(matches!(
            &error,
            ConfigError::Override { var, value, .. }
                if *var == GOLD_TO_WIN_ENV && value == "lots"
        ));
        assert_eq!(
            error.to_string(),
            "FARMSTEAD_GOLD_TO_WIN=\"lots\" is not a non-negative integer"
        );
        assert!(error.source().is_some());
    }
}
