//! Shared result types for the exact solvers.

use crate::roster::{Lineup, Player, PlayerId, RosterTemplate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Optimal subset under the budget alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnapsackSolution {
    /// Summed value of the chosen players.
    pub value: f64,
    /// Chosen player ids, ascending.
    pub player_ids: Vec<PlayerId>,
    /// Summed cost of the chosen players.
    pub total_cost: u64,
}

impl KnapsackSolution {
    /// The zero solution returned for empty pools and zero budgets.
    pub fn empty() -> Self {
        Self {
            value: 0.0,
            player_ids: Vec::new(),
            total_cost: 0,
        }
    }

    pub(crate) fn from_chosen(players: &[Player], chosen: &[usize]) -> Self {
        let mut player_ids: Vec<PlayerId> = chosen.iter().map(|&i| players[i].id()).collect();
        player_ids.sort_unstable();
        Self {
            value: chosen.iter().map(|&i| players[i].value()).sum(),
            player_ids,
            total_cost: chosen.iter().map(|&i| players[i].cost() as u64).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.player_ids.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.player_ids.binary_search(&id).is_ok()
    }

    /// Places the chosen players into `template` through
    /// [`Lineup::assign`], most valuable first (ties by id).
    ///
    /// The exact solvers ignore slot multiplicity, so players that find no
    /// open eligible slot are dropped and the lineup may be incomplete.
    pub fn place<'a>(&self, players: &'a [Player], template: &'a RosterTemplate) -> Lineup<'a> {
        let mut chosen: Vec<&'a Player> = players.iter().filter(|p| self.contains(p.id())).collect();
        chosen.sort_by(|a, b| b.value().total_cmp(&a.value()).then(a.id().cmp(&b.id())));

        let mut lineup = Lineup::new(template);
        let mut dropped = 0usize;
        for player in chosen {
            if lineup.assign(player).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!(dropped, scheme = template.name(), "knapsack players left unplaced");
        }
        lineup
    }
}

/// Frontier ordering for branch-and-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// First-in-first-out queue.
    #[default]
    BreadthFirst,
    /// Highest relaxation bound first.
    BestFirst,
}
