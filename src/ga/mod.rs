//! Slot-aware genetic search.
//!
//! The only strategy that treats the problem as what it is: a
//! multiple-slot assignment with category eligibility under one budget.
//! Every individual is a complete [`Lineup`](crate::roster::Lineup) built
//! by randomized construction, so eligibility and budget hold for the whole
//! population at all times.
//!
//! # Loop
//!
//! 1. **Construction**: round-robin seed player, then uniform draws of
//!    affordable eligible players slot by slot; abandoned attempts are
//!    retried up to a ceiling
//! 2. **Selection**: truncation to the best `selection_proportion`, with
//!    the best-ever lineup kept outside the population (elitism)
//! 3. **Repopulation**: a fresh population constructed only from players
//!    that appear in the retained lineups
//! 4. **Mutation**: single-slot replacement from the full pool, with a
//!    bounded number of retries
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters and ceilings
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best lineup with run statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Chu & Beasley (1998), "A Genetic Algorithm for the Multidimensional
//!   Knapsack Problem"

mod config;
mod construction;
pub mod operators;
mod runner;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineupError;
    use crate::roster::{CandidatePool, Player, RosterTemplate, Slot};
    use proptest::prelude::*;
    use std::collections::HashSet;

    const POSITIONS: [&str; 4] = ["G", "F", "C", "G/F"];

    fn arb_pool() -> impl Strategy<Value = CandidatePool> {
        prop::collection::vec((0usize..4, 1u32..30, 1.0f64..50.0), 1..16).prop_map(|items| {
            let players = items
                .into_iter()
                .enumerate()
                .map(|(i, (pos, cost, value))| {
                    Player::from_position(i as u64 + 1, POSITIONS[pos], cost * 100, value)
                        .unwrap()
                })
                .collect();
            CandidatePool::new(players).unwrap()
        })
    }

    fn template(budget: u32) -> RosterTemplate {
        RosterTemplate::new(
            "gfc",
            budget,
            vec![
                Slot::accepting("g", ["G"]),
                Slot::accepting("f", ["F"]),
                Slot::accepting("c", ["C"]),
                Slot::any("util"),
            ],
        )
        .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_result_is_always_a_legal_lineup(
            pool in arb_pool(),
            budget in 1000u32..8000,
            seed in any::<u64>(),
        ) {
            let template = template(budget);
            let config = GaConfig::default()
                .with_generations(3)
                .with_population_size(20)
                .with_seed(seed);

            match GaRunner::run(&pool, &template, &config) {
                Ok(result) => {
                    let lineup = &result.best;
                    prop_assert!(lineup.is_complete());
                    prop_assert!(lineup.total_cost() <= budget as u64);
                    let ids: HashSet<u64> = lineup.players().map(Player::id).collect();
                    prop_assert_eq!(ids.len(), template.len());
                    for (slot, player) in lineup.iter() {
                        prop_assert!(slot.accepts(player.unwrap()));
                    }
                }
                Err(err) => {
                    let expected = matches!(
                        err,
                        LineupError::InfeasibleSlot { .. }
                            | LineupError::InfeasibleBudget { .. }
                            | LineupError::NoSolutionFound(_)
                    );
                    prop_assert!(expected, "unexpected error: {}", err);
                }
            }
        }
    }
}
