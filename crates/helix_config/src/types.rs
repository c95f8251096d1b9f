//! Configuration types deserialized from `helix.toml`.

use crate::error::ConfigError;
use serde::Deserialize;

/// The top-level configuration parsed from `helix.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct MappingConfig {
    /// Simulated annealing parameters.
    #[serde(default)]
    pub anneal: AnnealConfig,
}

/// Parameters for the simulated annealing gate-assignment search.
///
/// All fields have defaults matching the reference algorithm, so a missing
/// `[anneal]` section yields a usable configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    /// Number of independent search trajectories.
    pub trajectories: usize,
    /// Number of annealing steps per trajectory.
    pub steps: usize,
    /// Number of zero-temperature (hill-climbing) steps after annealing.
    pub t0_steps: usize,
    /// Starting temperature of the log-spaced cooling schedule.
    pub max_temp: f64,
    /// Final temperature of the log-spaced cooling schedule.
    pub min_temp: f64,
    /// Whether to gate acceptance on the growth (toxicity) threshold.
    pub check_toxicity: bool,
    /// Minimum acceptable relative growth for an assignment.
    pub toxicity_threshold: f64,
    /// Whether to gate acceptance on the circuit roadblock count.
    pub check_roadblocks: bool,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            trajectories: 50,
            steps: 500,
            t0_steps: 100,
            max_temp: 100.0,
            min_temp: 0.001,
            check_toxicity: true,
            toxicity_threshold: 0.75,
            check_roadblocks: true,
        }
    }
}

impl AnnealConfig {
    /// Validates the parameter values.
    ///
    /// Trajectory and step counts must be at least one, and the temperature
    /// range must be positive and properly ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trajectories < 1 {
            return Err(ConfigError::ValidationError(
                "invalid number of trajectories".into(),
            ));
        }
        if self.steps < 1 {
            return Err(ConfigError::ValidationError(
                "invalid number of steps".into(),
            ));
        }
        if self.min_temp <= 0.0 {
            return Err(ConfigError::ValidationError(
                "invalid minimum temperature".into(),
            ));
        }
        if self.max_temp <= self.min_temp {
            return Err(ConfigError::ValidationError(
                "maximum temperature must exceed minimum temperature".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference() {
        let config = AnnealConfig::default();
        assert_eq!(config.trajectories, 50);
        assert_eq!(config.steps, 500);
        assert_eq!(config.t0_steps, 100);
        assert_eq!(config.max_temp, 100.0);
        assert_eq!(config.min_temp, 0.001);
        assert!(config.check_toxicity);
        assert_eq!(config.toxicity_threshold, 0.75);
        assert!(config.check_roadblocks);
    }

    #[test]
    fn defaults_validate() {
        assert!(AnnealConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_trajectories() {
        let config = AnnealConfig {
            trajectories: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_steps() {
        let config = AnnealConfig {
            steps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nonpositive_min_temp() {
        let config = AnnealConfig {
            min_temp: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_temperature_range() {
        let config = AnnealConfig {
            max_temp: 0.0001,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
