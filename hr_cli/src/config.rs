//! Recorder configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use hand_recorder::{
    Chips, MIN_PLAYERS, constants::DEFAULT_NUM_PLAYERS, input::parse_number_list,
};

/// Blinds used when neither `--blinds` nor `HR_BLINDS` is given.
pub const DEFAULT_BLINDS: &str = "1, 2";

/// Complete recorder configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderConfig {
    /// Default export file name, used when `export` is given no name
    pub output: Option<String>,
    /// Seats created for the hand
    pub num_players: usize,
    /// Blinds and straddles in posting order
    pub blinds: Vec<Chips>,
    /// Ante posted by every seat
    pub ante: Chips,
}

/// Values given on the command line. They win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output: Option<String>,
    pub num_players: Option<usize>,
    pub blinds: Option<String>,
    pub ante: Option<String>,
}

impl RecorderConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if blinds or ante can't be parsed
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let output = overrides
            .output
            .or_else(|| std::env::var("HR_OUTPUT").ok())
            .filter(|output| !output.trim().is_empty());

        let num_players = overrides
            .num_players
            .unwrap_or_else(|| parse_env_or("HR_PLAYERS", DEFAULT_NUM_PLAYERS));

        let raw_blinds = overrides
            .blinds
            .or_else(|| std::env::var("HR_BLINDS").ok())
            .unwrap_or_else(|| DEFAULT_BLINDS.to_string());
        let blinds = parse_number_list(&raw_blinds).map_err(|err| ConfigError::Invalid {
            var: "HR_BLINDS".to_string(),
            reason: err.to_string(),
        })?;

        let ante = match overrides.ante.or_else(|| std::env::var("HR_ANTE").ok()) {
            Some(raw) => raw.parse::<Chips>().map_err(|err| ConfigError::Invalid {
                var: "HR_ANTE".to_string(),
                reason: err.to_string(),
            })?,
            None => Chips::ZERO,
        };

        Ok(RecorderConfig {
            output,
            num_players,
            blinds,
            ante,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_players < MIN_PLAYERS {
            return Err(ConfigError::Invalid {
                var: "HR_PLAYERS".to_string(),
                reason: format!("Must be at least {MIN_PLAYERS}"),
            });
        }

        if self.blinds.is_empty() {
            return Err(ConfigError::Invalid {
                var: "HR_BLINDS".to_string(),
                reason: "Must list at least one blind".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides() -> ConfigOverrides {
        ConfigOverrides {
            output: Some("hand.phh".to_string()),
            num_players: Some(6),
            blinds: Some("1, 2, 4".to_string()),
            ante: Some("0.5".to_string()),
        }
    }

    #[test]
    fn test_overrides_win() {
        let config = RecorderConfig::from_env(overrides()).unwrap();
        assert_eq!(config.output.as_deref(), Some("hand.phh"));
        assert_eq!(config.num_players, 6);
        assert_eq!(config.blinds, vec![Chips::from(1), Chips::from(2), Chips::from(4)]);
        assert_eq!(config.ante.to_string(), "0.5");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_blinds() {
        let err = RecorderConfig::from_env(ConfigOverrides {
            blinds: Some("1, two".to_string()),
            ..overrides()
        })
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("HR_BLINDS"));
        assert!(msg.contains("comma-separated"));
    }

    #[test]
    fn test_invalid_ante() {
        let err = RecorderConfig::from_env(ConfigOverrides {
            ante: Some("-1".to_string()),
            ..overrides()
        })
        .unwrap_err();
        assert!(err.to_string().contains("HR_ANTE"));
    }

    #[test]
    fn test_blank_output_ignored() {
        let config = RecorderConfig::from_env(ConfigOverrides {
            output: Some("  ".to_string()),
            ..overrides()
        })
        .unwrap();
        assert!(config.output.is_none());
    }

    #[test]
    fn test_config_validation_too_few_players() {
        let config = RecorderConfig {
            output: None,
            num_players: 1,
            blinds: vec![Chips::from(2)],
            ante: Chips::ZERO,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "HR_PLAYERS"));
    }

    #[test]
    fn test_config_validation_no_blinds() {
        let config = RecorderConfig {
            output: None,
            num_players: 2,
            blinds: Vec::new(),
            ante: Chips::ZERO,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env_or_default() {
        assert_eq!(parse_env_or("HR_TEST_SURELY_UNSET_VARIABLE", 7usize), 7);
    }
}
