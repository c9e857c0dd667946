use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

const DEFAULT_SPEED: f64 = 8.0;
const DEFAULT_TIMESTEP: f64 = 0.02;

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_timestep() -> f64 {
    DEFAULT_TIMESTEP
}

/// Construction-time configuration of the rod tool.
///
/// `center` and `half_extents` are required; the rest default to the values
/// the engine scene ships with: speed 8.0, timestep 0.02, box-shaped rod.
#[derive(Clone, Debug, Deserialize)]
pub struct RodToolConfig {
    pub center: [f64; 3],
    pub half_extents: [f64; 3],
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_timestep")]
    pub dt: f64,
    #[serde(default)]
    pub rigid: bool,
}

impl RodToolConfig {
    pub fn new(center: [f64; 3], half_extents: [f64; 3]) -> Self {
        Self {
            center,
            half_extents,
            speed: DEFAULT_SPEED,
            dt: DEFAULT_TIMESTEP,
            rigid: false,
        }
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.center.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("center must be finite".to_string()));
        }
        if self.half_extents.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Invalid(
                "half_extents must be finite and non-negative".to_string(),
            ));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse config: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_fields_take_defaults() {
        let config: RodToolConfig = serde_json::from_str(
            r#"{"center": [-5.0, 2.0, 0.0], "half_extents": [0.12, 0.12, 2.5]}"#,
        )
        .unwrap();
        assert_eq!(config.speed, 8.0);
        assert_eq!(config.dt, 0.02);
        assert!(!config.rigid);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config: RodToolConfig = serde_json::from_str(
            r#"{"center": [0, 0, 0], "half_extents": [1, 1, 1],
                "speed": 2.0, "dt": 0.005, "rigid": true}"#,
        )
        .unwrap();
        assert_eq!(config.speed, 2.0);
        assert_eq!(config.dt, 0.005);
        assert!(config.rigid);
    }

    #[test]
    fn negative_half_extents_are_rejected() {
        let config = RodToolConfig {
            half_extents: [0.1, -0.1, 0.1],
            ..RodToolConfig::new([0.0; 3], [0.1; 3])
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn non_positive_timestep_is_rejected() {
        let mut config = RodToolConfig::new([0.0; 3], [1.0; 3]);
        config.dt = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.dt = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
