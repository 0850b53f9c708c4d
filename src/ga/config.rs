//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop,
//! including the ceilings that bound every retry loop.

use crate::error::{LineupError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the lineup genetic solver.
///
/// # Defaults
///
/// ```
/// use u_lineup::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.generations, 10);
/// assert_eq!(config.population_size, None); // 10 × pool size
/// assert_eq!(config.resolved_population_size(30), 300);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_lineup::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_generations(25)
///     .with_population_size(400)
///     .with_selection_proportion(0.3)
///     .with_mutation_rate(0.1)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of select → repopulate → mutate rounds.
    ///
    /// Zero is allowed: the best lineup of the initial population is
    /// returned.
    pub generations: usize,

    /// Lineups per generation. `None` means ten times the pool size.
    pub population_size: Option<usize>,

    /// Fraction of each generation retained as elites (0.0, 1.0].
    ///
    /// At least one lineup is always retained.
    pub selection_proportion: f64,

    /// Probability that a lineup in a new generation is mutated (0.0–1.0).
    pub mutation_rate: f64,

    /// Slot picks tried per mutation before the mutation is skipped.
    pub mutation_retry_limit: usize,

    /// Abandoned constructions tolerated while building one population.
    ///
    /// `None` means ten times the population size. When exceeded, the
    /// population is kept at whatever size it reached.
    pub max_construction_failures: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so the run may overshoot by
    /// one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generations: 10,
            population_size: None,
            selection_proportion: 0.5,
            mutation_rate: 0.2,
            mutation_retry_limit: 100,
            max_construction_failures: None,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets a fixed population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = Some(n);
        self
    }

    /// Sets the selection proportion.
    pub fn with_selection_proportion(mut self, proportion: f64) -> Self {
        self.selection_proportion = proportion.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-mutation retry ceiling.
    pub fn with_mutation_retry_limit(mut self, limit: usize) -> Self {
        self.mutation_retry_limit = limit;
        self
    }

    /// Sets the per-population construction failure ceiling.
    pub fn with_max_construction_failures(mut self, limit: usize) -> Self {
        self.max_construction_failures = Some(limit);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Population size for a pool of `pool_len` players.
    pub fn resolved_population_size(&self, pool_len: usize) -> usize {
        self.population_size.unwrap_or(pool_len * 10).max(1)
    }

    /// Construction failure ceiling for a population of `population_size`.
    pub fn resolved_construction_failures(&self, population_size: usize) -> usize {
        self.max_construction_failures
            .unwrap_or(population_size.saturating_mul(10))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`LineupError::InvalidConfig`] describing the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(LineupError::InvalidConfig(msg.into()));
        if self.population_size == Some(0) {
            return invalid("population_size must be at least 1");
        }
        if !(self.selection_proportion > 0.0 && self.selection_proportion <= 1.0) {
            return invalid("selection_proportion must be in (0, 1]");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid("mutation_rate must be in [0, 1]");
        }
        if self.mutation_retry_limit == 0 {
            return invalid("mutation_retry_limit must be at least 1");
        }
        if self.time_limit_ms == Some(0) {
            return invalid("time_limit_ms must be positive or None");
        }
        Ok(())
    }
}
