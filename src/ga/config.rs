//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_cvrp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 150);
/// assert_eq!(config.generations, 300);
/// assert_eq!(config.elitism_count, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_cvrp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_generations(100)
///     .with_tournament_size(4)
///     .with_local_refine(false)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Number of generations. The GA always runs exactly this many.
    pub generations: usize,

    /// Probability of recombining two parents (0.0–1.0).
    ///
    /// When crossover is not applied, the child is a copy of parent 1.
    pub crossover_rate: f64,

    /// Probability of applying one swap mutation to an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of best individuals copied unchanged into the next generation.
    pub elitism_count: usize,

    /// Contestants per tournament (drawn with replacement).
    pub tournament_size: usize,

    /// Whether offspring may be refined with 2-opt.
    pub use_local_refine: bool,

    /// Probability of refining an offspring, when refinement is enabled.
    ///
    /// Each refinement pass costs O(len²) fitness evaluations.
    pub local_refine_prob: f64,

    /// Upper bound on 2-opt passes per refined offspring.
    pub local_refine_max_passes: usize,

    /// Log progress every this many generations (0 disables).
    pub log_every: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 150,
            generations: 300,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            elitism_count: 1,
            tournament_size: 3,
            use_local_refine: true,
            local_refine_prob: 0.3,
            local_refine_max_passes: 50,
            log_every: 50,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Enables or disables 2-opt refinement of offspring.
    pub fn with_local_refine(mut self, enabled: bool) -> Self {
        self.use_local_refine = enabled;
        self
    }

    /// Sets the per-offspring refinement probability.
    pub fn with_local_refine_prob(mut self, prob: f64) -> Self {
        self.local_refine_prob = prob.clamp(0.0, 1.0);
        self
    }

    /// Sets the 2-opt pass cap.
    pub fn with_local_refine_max_passes(mut self, n: usize) -> Self {
        self.local_refine_max_passes = n;
        self
    }

    /// Sets the progress logging interval (0 disables).
    pub fn with_log_every(mut self, n: usize) -> Self {
        self.log_every = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.generations == 0 {
            return Err("generations must be at least 1".into());
        }
        if self.elitism_count >= self.population_size {
            return Err("elitism_count must be less than population_size".into());
        }
        if self.tournament_size == 0 {
            return Err("tournament_size must be at least 1".into());
        }
        for (name, p) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("local_refine_prob", self.local_refine_prob),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be in [0, 1], got {p}"));
            }
        }
        if self.use_local_refine && self.local_refine_max_passes == 0 {
            return Err("local_refine_max_passes must be at least 1 when refinement is on".into());
        }
        Ok(())
    }
}
