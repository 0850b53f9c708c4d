//! Genetic operators on lineups.
//!
//! - [`mutate`]: random single-slot replacement with bounded retries
//! - [`elite_players`]: the reduced pool regenerated from after selection
//! - [`sort_by_value`]: stable descending sort used for truncation selection

use crate::roster::{Lineup, Player, Subpools};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::trace;

/// Replaces the occupant of one random slot with a random eligible player.
///
/// Candidates come from `subpools` (the full, unreduced pool), must fit the
/// budget once the outgoing player's cost is credited back, and must not
/// already be in the lineup. Up to `retry_limit` slot picks are tried;
/// returns `false` and leaves the lineup untouched if none succeeds.
pub fn mutate<'a, R: Rng>(
    lineup: &mut Lineup<'a>,
    subpools: &Subpools<'a>,
    retry_limit: usize,
    rng: &mut R,
) -> bool {
    let template = lineup.template();
    if template.is_empty() {
        return false;
    }

    for _ in 0..retry_limit {
        let index = rng.random_range(0..template.len());
        let slot = &template.slots()[index];
        let outgoing = lineup.get(index).map_or(0, |p| p.cost() as u64);
        let max_cost = template.budget() as u64 - (lineup.total_cost() - outgoing);

        let eligible: Vec<&'a Player> = subpools
            .for_slot(slot)
            .into_iter()
            .filter(|p| p.cost() as u64 <= max_cost && !lineup.contains(p.id()))
            .collect();

        if let Some(&pick) = eligible.choose(rng) {
            if lineup.replace(index, pick).is_ok() {
                return true;
            }
        }
    }

    trace!(retry_limit, "mutation skipped");
    false
}

/// Players appearing in any of `lineups`, deduplicated by id, in order of
/// first appearance.
pub fn elite_players<'a>(lineups: &[Lineup<'a>]) -> Vec<&'a Player> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for lineup in lineups {
        for player in lineup.players() {
            if seen.insert(player.id()) {
                out.push(player);
            }
        }
    }
    out
}

/// Sorts by total value, best first. Equal lineups keep their order.
pub fn sort_by_value(population: &mut [Lineup<'_>]) {
    population.sort_by(|a, b| b.total_value().total_cmp(&a.total_value()));
}
