use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Tunable rule constants for a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Chance that a rolled wheel shows ECLIPSE (0.0..=1.0)
    pub eclipse_chance: f64,
    /// Optional rerolls each player gets per round
    pub rerolls_per_round: u8,
    /// Round wins that end the match early
    pub wins_to_take_match: u8,
    /// Rounds played at most
    pub max_rounds: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            eclipse_chance: 0.10,
            rerolls_per_round: 2,
            wins_to_take_match: 2,
            max_rounds: 3,
        }
    }
}

impl RulesConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(0.0..=1.0).contains(&self.eclipse_chance) {
            return Err(GameError::InvalidConfig(format!(
                "eclipse_chance must be within 0..=1, got {}",
                self.eclipse_chance
            )));
        }
        if self.max_rounds == 0 {
            return Err(GameError::InvalidConfig("max_rounds must be >= 1".into()));
        }
        if self.wins_to_take_match == 0 {
            return Err(GameError::InvalidConfig(
                "wins_to_take_match must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RulesConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_eclipse_chance() {
        let cfg = RulesConfig {
            eclipse_chance: 1.5,
            ..RulesConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
        let nan = RulesConfig {
            eclipse_chance: f64::NAN,
            ..RulesConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: RulesConfig = serde_json::from_str(r#"{"eclipse_chance":0.5}"#).unwrap();
        assert_eq!(cfg.rerolls_per_round, 2);
        assert_eq!(cfg.max_rounds, 3);
    }
}
