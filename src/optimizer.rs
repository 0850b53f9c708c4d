//! Strategy dispatch and optimizer configuration.
//!
//! [`Optimizer`] pairs a [`RosterTemplate`] with a [`Strategy`] and the
//! genetic parameters, and can be loaded from TOML:
//!
//! ```
//! use u_lineup::optimizer::{OptimizerConfig, Strategy};
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     strategy = "genetic"
//!     network = "fanduel"
//!
//!     [genetic]
//!     generations = 20
//!     mutation_rate = 0.1
//!     seed = 42
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, Strategy::Genetic);
//! assert_eq!(config.resolve_template().unwrap().len(), 9);
//! assert_eq!(config.genetic.generations, 20);
//! ```
//!
//! A template can also be given inline instead of `network`:
//!
//! ```
//! use u_lineup::optimizer::OptimizerConfig;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     strategy = "dynamic"
//!
//!     [template]
//!     name = "showdown"
//!     budget = 50000
//!
//!     [[template.slots]]
//!     name = "captain"
//!     eligibility = "any"
//!
//!     [[template.slots]]
//!     name = "flex"
//!     eligibility = "any"
//! "#).unwrap();
//!
//! assert_eq!(config.resolve_template().unwrap().name(), "showdown");
//! ```

use crate::error::{LineupError, Result};
use crate::ga::{GaConfig, GaRunner};
use crate::knapsack::{BranchAndBound, DynamicProgramming, KnapsackSolution, Traversal};
use crate::roster::{CandidatePool, Lineup, Network, RosterTemplate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Which solver produces the lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Exact budget-only branch-and-bound, then slot placement.
    BranchAndBound,
    /// Exact budget-only dynamic programming, then slot placement.
    Dynamic,
    /// Slot-aware genetic search.
    #[default]
    Genetic,
}

/// File-level optimizer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub strategy: Strategy,

    /// Built-in scheme, used when `template` is absent.
    #[serde(default)]
    pub network: Option<Network>,

    /// Inline template; takes precedence over `network`.
    #[serde(default)]
    pub template: Option<RosterTemplate>,

    /// Frontier order for the branch-and-bound strategy.
    #[serde(default)]
    pub traversal: Traversal,

    #[serde(default)]
    pub genetic: GaConfig,
}

impl OptimizerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.genetic.validate()?;
        Ok(config)
    }

    /// The template to optimize against.
    ///
    /// # Errors
    /// [`LineupError::InvalidConfig`] if neither `template` nor `network`
    /// is set.
    pub fn resolve_template(&self) -> Result<RosterTemplate> {
        match (&self.template, self.network) {
            (Some(template), _) => Ok(template.clone()),
            (None, Some(network)) => Ok(network.template()),
            (None, None) => Err(LineupError::InvalidConfig(
                "either `template` or `network` must be set".into(),
            )),
        }
    }

    /// Builds an [`Optimizer`] from this configuration.
    pub fn build(&self) -> Result<Optimizer> {
        Ok(Optimizer::new(self.resolve_template()?)
            .with_strategy(self.strategy)
            .with_traversal(self.traversal)
            .with_genetic(self.genetic.clone()))
    }
}

/// Produces a lineup for one template with one strategy.
#[derive(Debug, Clone)]
pub struct Optimizer {
    template: RosterTemplate,
    strategy: Strategy,
    traversal: Traversal,
    genetic: GaConfig,
}

impl Optimizer {
    pub fn new(template: RosterTemplate) -> Self {
        Self {
            template,
            strategy: Strategy::default(),
            traversal: Traversal::default(),
            genetic: GaConfig::default(),
        }
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(network.template())
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn with_genetic(mut self, config: GaConfig) -> Self {
        self.genetic = config;
        self
    }

    pub fn template(&self) -> &RosterTemplate {
        &self.template
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Runs the configured strategy over `pool`.
    ///
    /// The exact strategies solve the budget-only relaxation and place the
    /// chosen subset with [`KnapsackSolution::place`]; their lineup may be
    /// incomplete. The genetic strategy always returns a complete lineup or
    /// an error.
    pub fn generate_lineup<'a>(&'a self, pool: &'a CandidatePool) -> Result<Lineup<'a>> {
        let lineup = match self.strategy {
            Strategy::BranchAndBound | Strategy::Dynamic => {
                self.exact(pool)?.place(pool.players(), &self.template)
            }
            Strategy::Genetic => GaRunner::run(pool, &self.template, &self.genetic)?.best,
        };
        info!(
            strategy = ?self.strategy,
            scheme = self.template.name(),
            total_cost = lineup.total_cost(),
            total_value = lineup.total_value(),
            complete = lineup.is_complete(),
            "lineup generated"
        );
        Ok(lineup)
    }

    /// Solves the budget-only knapsack with the configured exact solver.
    ///
    /// # Errors
    /// - [`LineupError::InvalidConfig`] when the strategy is
    ///   [`Strategy::Genetic`], which has no exact solver
    /// - [`LineupError::TableTooLarge`] from dynamic programming
    pub fn exact(&self, pool: &CandidatePool) -> Result<KnapsackSolution> {
        let budget = self.template.budget();
        match self.strategy {
            Strategy::BranchAndBound => Ok(BranchAndBound::new()
                .with_traversal(self.traversal)
                .solve(pool.players(), budget)),
            Strategy::Dynamic => DynamicProgramming::solve(pool.players(), budget),
            Strategy::Genetic => Err(LineupError::InvalidConfig(
                "the genetic strategy has no exact solver".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Player, Slot};

    fn p(id: u64, pos: &str, cost: u32, value: f64) -> Player {
        Player::from_position(id, pos, cost, value).unwrap()
    }

    fn gc_template(budget: u32) -> RosterTemplate {
        RosterTemplate::new(
            "gc",
            budget,
            vec![Slot::accepting("g", ["G"]), Slot::accepting("c", ["C"])],
        )
        .unwrap()
    }

    fn scenario_pool() -> CandidatePool {
        CandidatePool::new(vec![
            p(1, "G", 4000, 40.0),
            p(2, "G", 3000, 25.0),
            p(3, "C", 5000, 45.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_strategies_agree() {
        let pool = scenario_pool();
        let bb = Optimizer::new(gc_template(7000)).with_strategy(Strategy::BranchAndBound);
        let dp = Optimizer::new(gc_template(7000)).with_strategy(Strategy::Dynamic);
        let a = bb.exact(&pool).unwrap();
        let b = dp.exact(&pool).unwrap();
        assert_eq!(a.player_ids, vec![1, 2]);
        assert_eq!(a.player_ids, b.player_ids);
        assert!((a.value - b.value).abs() < 1e-9);
    }

    #[test]
    fn test_exact_placement_may_be_incomplete() {
        let pool = scenario_pool();
        let optimizer = Optimizer::new(gc_template(7000)).with_strategy(Strategy::Dynamic);
        let lineup = optimizer.generate_lineup(&pool).unwrap();
        // Both chosen players are guards; only one fits the single G slot.
        assert_eq!(lineup.filled_count(), 1);
        assert_eq!(lineup.by_name("g").map(Player::id), Some(1));
        assert!(!lineup.is_complete());
    }

    #[test]
    fn test_exact_placement_complete_when_subset_matches() {
        let pool = scenario_pool();
        let optimizer = Optimizer::new(gc_template(9000)).with_strategy(Strategy::BranchAndBound);
        let lineup = optimizer.generate_lineup(&pool).unwrap();
        assert!(lineup.is_valid());
        assert!((lineup.total_value() - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_genetic_strategy() {
        let pool = scenario_pool();
        let optimizer = Optimizer::new(gc_template(9000))
            .with_genetic(GaConfig::default().with_seed(3));
        let lineup = optimizer.generate_lineup(&pool).unwrap();
        assert!(lineup.is_valid());

        let infeasible = Optimizer::new(gc_template(7000));
        assert!(matches!(
            infeasible.generate_lineup(&pool),
            Err(LineupError::InfeasibleBudget { .. })
        ));
    }

    #[test]
    fn test_exact_refused_for_genetic_strategy() {
        let pool = scenario_pool();
        let optimizer = Optimizer::new(gc_template(9000)).with_strategy(Strategy::Genetic);
        assert!(matches!(
            optimizer.exact(&pool),
            Err(LineupError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_dynamic_strategy_reports_oversized_budget() {
        let config = OptimizerConfig::from_toml_str(
            r#"
            strategy = "dynamic"

            [template]
            name = "huge"
            budget = 4000000000

            [[template.slots]]
            name = "flex"
            eligibility = "any"
            "#,
        )
        .unwrap();
        let optimizer = config.build().unwrap();
        let pool = scenario_pool();
        assert!(matches!(
            optimizer.generate_lineup(&pool),
            Err(LineupError::TableTooLarge { .. })
        ));
    }

    #[test]
    fn test_config_requires_template_or_network() {
        let config = OptimizerConfig::from_toml_str("strategy = \"branch_and_bound\"").unwrap();
        assert_eq!(config.strategy, Strategy::BranchAndBound);
        assert!(config.resolve_template().is_err());
        assert!(config.build().is_err());
    }

    #[test]
    fn test_config_rejects_bad_genetic_section() {
        let err = OptimizerConfig::from_toml_str(
            "network = \"draftkings\"\n[genetic]\nselection_proportion = 0.0",
        )
        .unwrap_err();
        assert!(matches!(err, LineupError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_builds_optimizer() {
        let config = OptimizerConfig::from_toml_str(
            "strategy = \"branch_and_bound\"\nnetwork = \"draftkings\"\ntraversal = \"best_first\"",
        )
        .unwrap();
        let optimizer = config.build().unwrap();
        assert_eq!(optimizer.strategy(), Strategy::BranchAndBound);
        assert_eq!(optimizer.template().budget(), 50_000);
    }

    #[test]
    fn test_config_malformed_toml() {
        let err = OptimizerConfig::from_toml_str("strategy = ").unwrap_err();
        assert!(matches!(err, LineupError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = OptimizerConfig::load("/nonexistent/u-lineup.toml").unwrap_err();
        assert!(matches!(err, LineupError::Io(_)));
    }
}
