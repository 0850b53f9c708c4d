//! Exact budget-only solvers.
//!
//! Both solvers treat the pool as a plain 0/1 knapsack: maximize summed
//! value subject to summed cost ≤ budget, ignoring slots entirely. They are
//! exact and deterministic, and must agree on the optimal value for the
//! same input.
//!
//! - [`BranchAndBound`]: density-ordered include/exclude tree with a
//!   fractional-relaxation bound, breadth-first by default
//! - [`DynamicProgramming`]: dense `(n + 1) × (budget + 1)` table with a
//!   skip-on-tie reconstruction, refused above [`MAX_TABLE_CELLS`]
//!
//! Use [`KnapsackSolution::place`] to push a subset into a roster template.

mod branch_bound;
mod dynamic;
mod types;

pub use branch_bound::BranchAndBound;
pub use dynamic::{DpTable, DynamicProgramming, MAX_TABLE_CELLS};
pub use types::{KnapsackSolution, Traversal};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Player;
    use proptest::prelude::*;

    fn arb_players(max: usize) -> impl Strategy<Value = Vec<Player>> {
        prop::collection::vec((1u32..200, 0.5f64..100.0), 0..max).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (cost, value))| {
                    Player::from_position(i as u64 + 1, "U", cost, value).unwrap()
                })
                .collect()
        })
    }

    fn brute_force(players: &[Player], budget: u32) -> f64 {
        let mut best = 0.0f64;
        for mask in 0u32..(1 << players.len()) {
            let (cost, value) = players
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .fold((0u64, 0.0f64), |(c, v), (_, p)| {
                    (c + p.cost() as u64, v + p.value())
                });
            if cost <= budget as u64 && value > best {
                best = value;
            }
        }
        best
    }

    fn check_subset(players: &[Player], solution: &KnapsackSolution, budget: u32) {
        let cost: u64 = players
            .iter()
            .filter(|p| solution.contains(p.id()))
            .map(|p| p.cost() as u64)
            .sum();
        assert_eq!(cost, solution.total_cost);
        assert!(solution.total_cost <= budget as u64);
        assert!(solution.player_ids.windows(2).all(|w| w[0] < w[1]));
    }

    proptest! {
        #[test]
        fn test_solvers_agree_on_optimum(players in arb_players(12), budget in 0u32..800) {
            let bfs = BranchAndBound::new().solve(&players, budget);
            let best_first = BranchAndBound::new()
                .with_traversal(Traversal::BestFirst)
                .solve(&players, budget);
            let (dp, table) = DynamicProgramming::solve_with_table(&players, budget).unwrap();

            prop_assert!((bfs.value - dp.value).abs() < 1e-6);
            prop_assert!((best_first.value - dp.value).abs() < 1e-6);
            prop_assert!((dp.value - table.optimum()).abs() < 1e-6);
            for solution in [&bfs, &best_first, &dp] {
                check_subset(&players, solution, budget);
            }
        }

        #[test]
        fn test_solvers_match_exhaustive_search(players in arb_players(10), budget in 0u32..600) {
            let expected = brute_force(&players, budget);
            let bb = BranchAndBound::new().solve(&players, budget);
            let dp = DynamicProgramming::solve(&players, budget).unwrap();
            prop_assert!((bb.value - expected).abs() < 1e-6);
            prop_assert!((dp.value - expected).abs() < 1e-6);
        }
    }
}
