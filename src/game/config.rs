use super::constants::{
    INIT_SPEED, INVINCIBILITY_BLINK_RATE, MAX_HITPOINTS, MAX_SPEED, MIN_SPEED,
    RESPAWN_INVINCIBILITY_SECS, SPAWN_INVINCIBILITY_SECS,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Tunables shared by every snake in a game. Injected at construction so tests
/// and alternative rule sets never reach for ambient constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnakeConfig {
    /// Seconds between visibility toggles while invincible.
    pub blink_rate: f64,
    pub max_hitpoints: i32,
    /// Cells per second on spawn and respawn.
    pub init_speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub spawn_invincibility: f64,
    pub respawn_invincibility: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("blink rate must be positive, got {0}")]
    BlinkRate(f64),
    #[error("max hitpoints must be positive, got {0}")]
    MaxHitpoints(i32),
    #[error("min speed must be positive, got {0}")]
    MinSpeed(f64),
    #[error("min speed {min} exceeds max speed {max}")]
    SpeedBounds { min: f64, max: f64 },
    #[error("initial speed {speed} outside [{min}, {max}]")]
    InitSpeed { speed: f64, min: f64, max: f64 },
    #[error("invincibility lifetime must not be negative, got {0}")]
    Lifetime(f64),
    #[error("invalid snake config json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            blink_rate: INVINCIBILITY_BLINK_RATE,
            max_hitpoints: MAX_HITPOINTS,
            init_speed: INIT_SPEED,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            spawn_invincibility: SPAWN_INVINCIBILITY_SECS,
            respawn_invincibility: RESPAWN_INVINCIBILITY_SECS,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl SnakeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Self {
            blink_rate: env_or("SNAKE_BLINK_RATE", defaults.blink_rate),
            max_hitpoints: env_or("SNAKE_MAX_HITPOINTS", defaults.max_hitpoints),
            init_speed: env_or("SNAKE_INIT_SPEED", defaults.init_speed),
            min_speed: env_or("SNAKE_MIN_SPEED", defaults.min_speed),
            max_speed: env_or("SNAKE_MAX_SPEED", defaults.max_speed),
            spawn_invincibility: env_or("SNAKE_SPAWN_INVINCIBILITY", defaults.spawn_invincibility),
            respawn_invincibility: env_or(
                "SNAKE_RESPAWN_INVINCIBILITY",
                defaults.respawn_invincibility,
            ),
        }
        .validate()
    }

    /// Missing keys fall back to the defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(self.blink_rate > 0.0) {
            return Err(ConfigError::BlinkRate(self.blink_rate));
        }
        if self.max_hitpoints <= 0 {
            return Err(ConfigError::MaxHitpoints(self.max_hitpoints));
        }
        if !(self.min_speed > 0.0) {
            return Err(ConfigError::MinSpeed(self.min_speed));
        }
        if self.min_speed > self.max_speed {
            return Err(ConfigError::SpeedBounds {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if !(self.min_speed..=self.max_speed).contains(&self.init_speed) {
            return Err(ConfigError::InitSpeed {
                speed: self.init_speed,
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        for lifetime in [self.spawn_invincibility, self.respawn_invincibility] {
            if !(lifetime >= 0.0) {
                return Err(ConfigError::Lifetime(lifetime));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SnakeConfig::default().validate().is_ok());
    }

    #[test]
    fn from_json_fills_missing_keys_with_defaults() {
        let config = SnakeConfig::from_json(r#"{"maxHitpoints": 3, "blinkRate": 0.25}"#)
            .expect("config should parse");
        assert_eq!(config.max_hitpoints, 3);
        assert_eq!(config.blink_rate, 0.25);
        assert_eq!(config.init_speed, INIT_SPEED);
    }

    #[test]
    fn validate_rejects_inverted_speed_bounds() {
        let config = SnakeConfig {
            min_speed: 8.0,
            max_speed: 4.0,
            ..SnakeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedBounds { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_min_speed() {
        let config = SnakeConfig {
            min_speed: 0.0,
            ..SnakeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MinSpeed(_))));
    }

    #[test]
    fn from_json_reports_malformed_input() {
        assert!(matches!(
            SnakeConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
