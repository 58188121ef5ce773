//! SA configuration.

use std::time::Duration;

/// Configuration for the Simulated Annealing algorithm.
///
/// Temperature follows geometric cooling, `T_{k+1} = cooling_rate * T_k`,
/// with one neighbor evaluated per temperature step.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_cvrp::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.99)
///     .with_stop_temperature(0.01)
///     .with_time_budget(Duration::from_secs(10));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// The search stops once the temperature is at or below this.
    pub stop_temperature: f64,

    /// Optional wall-clock budget, checked between iterations.
    pub time_budget: Option<Duration>,

    /// Log progress every this many iterations (0 disables).
    pub log_every: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.995,
            stop_temperature: 0.1,
            time_budget: None,
            log_every: 500,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_stop_temperature(mut self, t: f64) -> Self {
        self.stop_temperature = t;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn with_log_every(mut self, n: usize) -> Self {
        self.log_every = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of temperature steps before `stop_temperature` is reached,
    /// ignoring any time budget. Zero for a configuration that fails
    /// [`validate`](Self::validate).
    pub fn planned_iterations(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let mut t = self.initial_temperature;
        let mut steps = 0;
        while t > self.stop_temperature {
            t *= self.cooling_rate;
            steps += 1;
        }
        steps
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err("initial_temperature must be positive and finite".into());
        }
        if self.stop_temperature.is_nan() || self.stop_temperature <= 0.0 {
            return Err("stop_temperature must be positive".into());
        }
        if self.stop_temperature >= self.initial_temperature {
            return Err("stop_temperature must be less than initial_temperature".into());
        }
        if self.cooling_rate.is_nan() || self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 1000.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.995).abs() < 1e-12);
        assert!((config.stop_temperature - 0.1).abs() < 1e-12);
        assert!(config.time_budget.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_initial_temperature(f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_stop_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_stop_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(SaConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(0.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_nan_stop_temperature() {
        let config = SaConfig::default().with_stop_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_planned_iterations() {
        let config = SaConfig::default()
            .with_initial_temperature(8.0)
            .with_cooling_rate(0.5)
            .with_stop_temperature(1.0);
        // 8 -> 4 -> 2 -> 1
        assert_eq!(config.planned_iterations(), 3);
    }

    #[test]
    fn test_planned_iterations_invalid_config() {
        assert_eq!(SaConfig::default().with_cooling_rate(1.0).planned_iterations(), 0);
        assert_eq!(SaConfig::default().with_cooling_rate(f64::NAN).planned_iterations(), 0);
        assert_eq!(SaConfig::default().with_stop_temperature(0.0).planned_iterations(), 0);
    }
}
