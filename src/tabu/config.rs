//! Tabu Search configuration.

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_cvrp::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_tabu_tenure(7)
///     .with_max_no_improve(200);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.tabu_tenure, 7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// How many iterations a swapped customer pair stays forbidden.
    pub tabu_tenure: usize,
    /// Whether a tabu move may be taken when it yields a new global best.
    pub aspiration: bool,
    /// Consecutive iterations without a new global best before stopping.
    pub max_no_improve: usize,
    /// Log progress every this many iterations (0 disables).
    pub log_every: usize,
    /// Random seed (None for an OS-drawn seed).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tabu_tenure: 10,
            aspiration: true,
            max_no_improve: 150,
            log_every: 50,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Sets maximum iterations without improvement.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Sets the progress logging interval (0 disables).
    pub fn with_log_every(mut self, n: usize) -> Self {
        self.log_every = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if self.max_no_improve == 0 {
            return Err("max_no_improve must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabu_config_defaults() {
        let config = TabuConfig::default();
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.tabu_tenure, 10);
        assert!(config.aspiration);
        assert_eq!(config.max_no_improve, 150);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tabu_config_builder() {
        let config = TabuConfig::default()
            .with_max_iterations(1000)
            .with_tabu_tenure(4)
            .with_aspiration(false)
            .with_max_no_improve(50)
            .with_log_every(0)
            .with_seed(123);

        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.tabu_tenure, 4);
        assert!(!config.aspiration);
        assert_eq!(config.max_no_improve, 50);
        assert_eq!(config.log_every, 0);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_validate_zero_caps() {
        assert!(TabuConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_err());
        assert!(TabuConfig::default()
            .with_max_no_improve(0)
            .validate()
            .is_err());
    }
}
