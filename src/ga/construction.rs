//! Randomized lineup construction.
//!
//! One construction attempt seeds a lineup with the next round-robin
//! player, then fills each open slot in assignment order with a uniform draw
//! from that slot's eligible players who still fit under the budget. When
//! some slot has no affordable candidate left, the attempt is abandoned.

use crate::error::{LineupError, Result};
use crate::roster::{Lineup, Player, RosterTemplate, Subpools};
use rand::Rng;
use tracing::{trace, warn};

/// Checks that every slot can be filled at all, and that the cheapest
/// eligible player per slot fits the budget in sum.
///
/// The second check is a lower bound: it ignores that one player cannot
/// fill two slots, so passing it does not prove feasibility.
pub(crate) fn check_feasible(template: &RosterTemplate, subpools: &Subpools<'_>) -> Result<()> {
    let mut cheapest = 0u64;
    for slot in template.slots() {
        let min_cost = subpools
            .for_slot(slot)
            .iter()
            .map(|p| p.cost() as u64)
            .min()
            .ok_or_else(|| LineupError::InfeasibleSlot {
                slot: slot.name().to_string(),
            })?;
        cheapest += min_cost;
    }
    if cheapest > template.budget() as u64 {
        return Err(LineupError::InfeasibleBudget {
            cheapest,
            budget: template.budget(),
        });
    }
    Ok(())
}

/// Lineups produced by one [`Constructor::populate`] call.
#[derive(Debug)]
pub(crate) struct Population<'a> {
    pub lineups: Vec<Lineup<'a>>,
    pub failures: usize,
}

/// Builds lineups from one construction pool.
///
/// The round-robin cursor lives here, so successive attempts on the same
/// constructor seed successive players and a population at least as large
/// as the pool seeds every player once.
pub(crate) struct Constructor<'a> {
    template: &'a RosterTemplate,
    players: Vec<&'a Player>,
    subpools: Subpools<'a>,
    cursor: usize,
}

impl<'a> Constructor<'a> {
    pub fn new(template: &'a RosterTemplate, players: Vec<&'a Player>) -> Self {
        let subpools = Subpools::partition(players.iter().copied());
        Self {
            template,
            players,
            subpools,
            cursor: 0,
        }
    }

    /// One construction attempt. `None` means the attempt was abandoned.
    pub fn construct<R: Rng>(&mut self, rng: &mut R) -> Option<Lineup<'a>> {
        let mut lineup = Lineup::new(self.template);
        let mut remaining = self.subpools.clone();

        if let Some(seed) = self.next_seed() {
            match lineup.assign(seed) {
                Ok(_) => remaining.remove(seed.id()),
                Err(reason) => trace!(player = seed.id(), %reason, "seed player not placed"),
            }
        }

        while let Some(index) = lineup.first_open_slot() {
            let slot = &self.template.slots()[index];
            let headroom = lineup.remaining_budget();
            let mut eligible: Vec<&'a Player> = remaining
                .for_slot(slot)
                .into_iter()
                .filter(|p| p.cost() as u64 <= headroom)
                .collect();

            let placed = loop {
                if eligible.is_empty() {
                    break None;
                }
                let pick = eligible.swap_remove(rng.random_range(0..eligible.len()));
                if lineup.assign(pick).is_ok() {
                    break Some(pick);
                }
            };

            match placed {
                Some(player) => remaining.remove(player.id()),
                None => {
                    trace!(slot = slot.name(), headroom, "construction abandoned");
                    return None;
                }
            }
        }

        Some(lineup)
    }

    /// Builds up to `size` complete lineups, tolerating at most
    /// `max_failures` abandoned attempts.
    pub fn populate<R: Rng>(
        &mut self,
        size: usize,
        max_failures: usize,
        rng: &mut R,
    ) -> Population<'a> {
        let mut lineups = Vec::with_capacity(size);
        let mut failures = 0usize;

        while lineups.len() < size {
            match self.construct(rng) {
                Some(lineup) => lineups.push(lineup),
                None => {
                    failures += 1;
                    if failures > max_failures {
                        warn!(
                            built = lineups.len(),
                            requested = size,
                            failures,
                            "construction failure ceiling reached"
                        );
                        break;
                    }
                }
            }
        }

        Population { lineups, failures }
    }

    fn next_seed(&mut self) -> Option<&'a Player> {
        if self.players.is_empty() {
            return None;
        }
        let seed = self.players[self.cursor];
        self.cursor = (self.cursor + 1) % self.players.len();
        Some(seed)
    }
}
