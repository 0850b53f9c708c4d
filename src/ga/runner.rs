//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete process:
//! feasibility check → initial population → (selection → repopulation →
//! mutation) × generations → best-ever lineup.

use super::config::GaConfig;
use super::construction::{check_feasible, Constructor};
use super::operators::{elite_players, mutate, sort_by_value};
use crate::error::{LineupError, Result};
use crate::random::rng_from_seed;
use crate::roster::{CandidatePool, Lineup, RosterTemplate};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Result of a GA optimization run.
///
/// Contains the best lineup found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult<'a> {
    /// The best lineup seen during the entire run. Always complete.
    pub best: Lineup<'a>,

    /// Total value of `best`.
    pub best_value: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the wall-clock limit stopped the run.
    pub timed_out: bool,

    /// Best-ever value after the initial population and after each
    /// generation's selection step.
    pub value_history: Vec<f64>,

    /// Abandoned construction attempts across all populations.
    pub construction_failures: usize,

    /// Mutations that replaced a player.
    pub mutations: usize,
}

/// Executes the lineup GA.
///
/// # Usage
///
/// ```
/// use u_lineup::ga::{GaConfig, GaRunner};
/// use u_lineup::roster::{CandidatePool, Player, RosterTemplate, Slot};
///
/// let pool = CandidatePool::new(vec![
///     Player::from_position(1, "G", 4000, 40.0).unwrap(),
///     Player::from_position(2, "G", 3000, 25.0).unwrap(),
///     Player::from_position(3, "C", 5000, 45.0).unwrap(),
/// ])
/// .unwrap();
/// let template = RosterTemplate::new(
///     "gc",
///     9000,
///     vec![Slot::accepting("g", ["G"]), Slot::accepting("c", ["C"])],
/// )
/// .unwrap();
///
/// let result = GaRunner::run(&pool, &template, &GaConfig::default().with_seed(42)).unwrap();
/// assert!(result.best.is_valid());
/// assert_eq!(result.best_value, 85.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    ///
    /// # Errors
    /// - [`LineupError::InvalidConfig`] for a bad configuration
    /// - [`LineupError::InfeasibleSlot`] / [`LineupError::InfeasibleBudget`]
    ///   when the pool cannot fill the template at all
    /// - [`LineupError::NoSolutionFound`] when no complete lineup was built
    pub fn run<'a>(
        pool: &'a CandidatePool,
        template: &'a RosterTemplate,
        config: &GaConfig,
    ) -> Result<GaResult<'a>> {
        Self::run_with_cancel(pool, template, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops at
    /// the start of the next generation and returns the best lineup so far.
    pub fn run_with_cancel<'a>(
        pool: &'a CandidatePool,
        template: &'a RosterTemplate,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<'a>> {
        let mut rng = rng_from_seed(config.seed);
        evolve(pool, template, config, &mut rng, cancel)
    }

    /// Runs the GA drawing from a caller-supplied generator.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<'a, R: Rng>(
        pool: &'a CandidatePool,
        template: &'a RosterTemplate,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<'a>> {
        evolve(pool, template, config, rng, None)
    }
}

fn evolve<'a, R: Rng>(
    pool: &'a CandidatePool,
    template: &'a RosterTemplate,
    config: &GaConfig,
    rng: &mut R,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<GaResult<'a>> {
    config.validate()?;

    let subpools = pool.subpools();
    check_feasible(template, &subpools)?;

    let population_size = config.resolved_population_size(pool.len());
    let max_failures = config.resolved_construction_failures(population_size);
    let started = Instant::now();

    // 1. Initial population over the full pool
    let mut constructor = Constructor::new(template, pool.players().iter().collect());
    let initial = constructor.populate(population_size, max_failures, rng);
    let mut construction_failures = initial.failures;
    let mut population = initial.lineups;
    if population.is_empty() {
        return Err(LineupError::NoSolutionFound(format!(
            "no complete lineup after {construction_failures} construction attempts"
        )));
    }

    // 2. Best of the initial population
    sort_by_value(&mut population);
    let mut best = population[0].clone();
    let mut value_history = Vec::with_capacity(config.generations + 1);
    value_history.push(best.total_value());

    let mut generations = 0usize;
    let mut mutations = 0usize;
    let mut cancelled = false;
    let mut timed_out = false;

    // 3. Evolutionary loop
    for gen in 0..config.generations {
        if let Some(ref flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
        }
        if let Some(limit) = config.time_limit_ms {
            if started.elapsed().as_millis() >= limit as u128 {
                timed_out = true;
                break;
            }
        }

        // Selection: keep the top fraction, at least one
        sort_by_value(&mut population);
        let keep = ((population.len() as f64 * config.selection_proportion).floor() as usize)
            .clamp(1, population.len());
        population.truncate(keep);
        if population[0].total_value() > best.total_value() {
            best = population[0].clone();
        }
        value_history.push(best.total_value());

        // Repopulation from the elites' players
        let reduced = elite_players(&population);
        let mut constructor = Constructor::new(template, reduced);
        let next = constructor.populate(population_size, max_failures, rng);
        construction_failures += next.failures;
        if next.lineups.is_empty() {
            warn!(
                generation = gen + 1,
                elites = population.len(),
                "reduced pool produced no lineup; stopping early"
            );
            generations = gen + 1;
            break;
        }
        population = next.lineups;

        // Mutation against the full pool
        for lineup in population.iter_mut() {
            if rng.random_bool(config.mutation_rate)
                && mutate(lineup, &subpools, config.mutation_retry_limit, rng)
            {
                mutations += 1;
            }
        }

        generations = gen + 1;
        debug!(
            generation = generations,
            population = population.len(),
            best_value = best.total_value(),
            "generation complete"
        );
    }

    // The last population never went through selection.
    if let Some(top) = population
        .iter()
        .max_by(|a, b| a.total_value().total_cmp(&b.total_value()))
    {
        if top.total_value() > best.total_value() {
            best = top.clone();
        }
    }

    if !best.is_valid() {
        return Err(LineupError::NoSolutionFound(format!(
            "best lineup fills {} of {} slots",
            best.filled_count(),
            template.len()
        )));
    }

    debug!(
        generations,
        best_value = best.total_value(),
        best_cost = best.total_cost(),
        construction_failures,
        mutations,
        cancelled,
        timed_out,
        "genetic search finished"
    );

    Ok(GaResult {
        best_value: best.total_value(),
        best,
        generations,
        cancelled,
        timed_out,
        value_history,
        construction_failures,
        mutations,
    })
}

// ============================================================================
// Tests
// ============================================================================
