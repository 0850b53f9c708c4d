//! The lineup accumulator.
//!
//! A [`Lineup`] maps each slot of a [`RosterTemplate`] to an optional
//! player. Its only mutators, [`Lineup::assign`] and [`Lineup::replace`],
//! refuse any change that would break one of the three invariants:
//!
//! 1. every filled slot holds a player its eligibility accepts;
//! 2. no player id appears twice;
//! 3. the summed cost never exceeds the template budget.
//!
//! Because intermediate states are always valid, a lineup is valid exactly
//! when it is complete.

use super::player::{Player, PlayerId};
use super::template::{RosterTemplate, Slot};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a player could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("player {id} costs {cost}, only {remaining} left under the budget")]
    OverBudget { id: PlayerId, cost: u32, remaining: u64 },

    #[error("player {0} is already in the lineup")]
    AlreadyAssigned(PlayerId),

    #[error("no open slot accepts player {0}")]
    NoOpenSlot(PlayerId),

    #[error("slot `{slot}` does not accept player {id}")]
    Ineligible { slot: String, id: PlayerId },

    #[error("slot index {0} is out of range")]
    UnknownSlot(usize),
}

/// A partially or fully assigned roster for one template.
#[derive(Debug, Clone)]
pub struct Lineup<'a> {
    template: &'a RosterTemplate,
    slots: Vec<Option<&'a Player>>,
    total_cost: u64,
}

impl<'a> Lineup<'a> {
    /// Creates an empty lineup.
    pub fn new(template: &'a RosterTemplate) -> Self {
        Self {
            template,
            slots: vec![None; template.len()],
            total_cost: 0,
        }
    }

    pub fn template(&self) -> &'a RosterTemplate {
        self.template
    }

    /// Commits `player` to the first open slot, in the template's
    /// precedence order, whose eligibility accepts it.
    ///
    /// Returns the index of the committed slot. On rejection the lineup is
    /// left untouched.
    pub fn assign(&mut self, player: &'a Player) -> Result<usize, AssignError> {
        let remaining = self.remaining_budget();
        if player.cost() as u64 > remaining {
            return Err(AssignError::OverBudget {
                id: player.id(),
                cost: player.cost(),
                remaining,
            });
        }
        if self.contains(player.id()) {
            return Err(AssignError::AlreadyAssigned(player.id()));
        }

        let index = self
            .template
            .assignment_order()
            .iter()
            .copied()
            .find(|&i| self.slots[i].is_none() && self.template.slots()[i].accepts(player))
            .ok_or(AssignError::NoOpenSlot(player.id()))?;

        self.slots[index] = Some(player);
        self.total_cost += player.cost() as u64;
        Ok(index)
    }

    /// Puts `player` into slot `index`, returning the previous occupant.
    ///
    /// The same invariants as [`assign`](Self::assign) apply, with the
    /// outgoing player's cost credited back before the budget check.
    pub fn replace(
        &mut self,
        index: usize,
        player: &'a Player,
    ) -> Result<Option<&'a Player>, AssignError> {
        let slot = self
            .template
            .slot(index)
            .ok_or(AssignError::UnknownSlot(index))?;
        if !slot.accepts(player) {
            return Err(AssignError::Ineligible {
                slot: slot.name().to_string(),
                id: player.id(),
            });
        }
        if self.contains(player.id()) {
            return Err(AssignError::AlreadyAssigned(player.id()));
        }

        let outgoing = self.slots[index].map_or(0, |p| p.cost() as u64);
        let remaining = self.template.budget() as u64 - (self.total_cost - outgoing);
        if player.cost() as u64 > remaining {
            return Err(AssignError::OverBudget {
                id: player.id(),
                cost: player.cost(),
                remaining,
            });
        }

        let previous = self.slots[index].replace(player);
        self.total_cost = self.total_cost - outgoing + player.cost() as u64;
        Ok(previous)
    }

    /// Player in slot `index`, if any.
    pub fn get(&self, index: usize) -> Option<&'a Player> {
        self.slots.get(index).copied().flatten()
    }

    /// Player in the named slot, if any.
    pub fn by_name(&self, slot: &str) -> Option<&'a Player> {
        self.template.slot_index(slot).and_then(|i| self.get(i))
    }

    /// First unfilled slot in assignment order.
    pub fn first_open_slot(&self) -> Option<usize> {
        self.template
            .assignment_order()
            .iter()
            .copied()
            .find(|&i| self.slots[i].is_none())
    }

    /// `(slot, occupant)` pairs in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Slot, Option<&'a Player>)> + '_ {
        self.template.slots().iter().zip(self.slots.iter().copied())
    }

    /// Assigned players in template order.
    pub fn players(&self) -> impl Iterator<Item = &'a Player> + '_ {
        self.slots.iter().filter_map(|p| *p)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players().any(|p| p.id() == id)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|p| p.is_some()).count()
    }

    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    pub fn total_value(&self) -> f64 {
        self.players().map(Player::value).sum()
    }

    pub fn remaining_budget(&self) -> u64 {
        (self.template.budget() as u64).saturating_sub(self.total_cost)
    }

    /// Every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_under_budget(&self) -> bool {
        self.total_cost <= self.template.budget() as u64
    }

    /// Complete and under budget.
    pub fn is_valid(&self) -> bool {
        self.is_complete() && self.is_under_budget()
    }

    /// Owned snapshot for downstream consumers.
    pub fn summary(&self) -> LineupSummary {
        LineupSummary {
            scheme: self.template.name().to_string(),
            slots: self
                .iter()
                .filter_map(|(slot, p)| p.map(|p| (slot.name().to_string(), p.id())))
                .collect(),
            player_ids: self.players().map(Player::id).collect(),
            total_cost: self.total_cost,
            total_value: self.total_value(),
        }
    }
}

impl fmt::Display for Lineup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.players().map(|p| format!("{}", p.value())).collect();
        let per_k: Vec<String> = self
            .players()
            .map(|p| format!("{:.2}", p.value_per_k()))
            .collect();
        write!(
            f,
            "Total value: {}, Total salary: {}, Values: [{}], PerKs: [{}]",
            self.total_value(),
            self.total_cost,
            values.join(", "),
            per_k.join(", ")
        )
    }
}

/// Owned, serializable form of a lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSummary {
    /// Template name.
    pub scheme: String,
    /// Filled `(slot name, player id)` pairs in template order.
    pub slots: Vec<(String, PlayerId)>,
    pub player_ids: Vec<PlayerId>,
    pub total_cost: u64,
    pub total_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u64, pos: &str, cost: u32, value: f64) -> Player {
        Player::from_position(id, pos, cost, value).unwrap()
    }

    #[test]
    fn test_assign_primary_then_flex_then_util() {
        let t = RosterTemplate::draftkings();
        let a = p(1, "PG", 5000, 30.0);
        let b = p(2, "PG", 5000, 30.0);
        let c = p(3, "PG", 5000, 30.0);
        let d = p(4, "PG", 5000, 30.0);
        let mut lineup = Lineup::new(&t);

        assert_eq!(lineup.assign(&a), Ok(t.slot_index("pg1").unwrap()));
        assert_eq!(lineup.assign(&b), Ok(t.slot_index("g1").unwrap()));
        assert_eq!(lineup.assign(&c), Ok(t.slot_index("u1").unwrap()));
        assert_eq!(lineup.assign(&d), Err(AssignError::NoOpenSlot(4)));
        assert_eq!(lineup.filled_count(), 3);
        assert_eq!(lineup.total_cost(), 15_000);
    }

    #[test]
    fn test_assign_multi_position_uses_first_open() {
        let t = RosterTemplate::draftkings();
        let a = p(1, "PG", 4000, 20.0);
        let b = p(2, "PG/SG", 4000, 20.0);
        let mut lineup = Lineup::new(&t);
        lineup.assign(&a).unwrap();
        assert_eq!(lineup.assign(&b), Ok(t.slot_index("sg1").unwrap()));
    }

    #[test]
    fn test_assign_over_budget_does_not_mutate() {
        let t = RosterTemplate::draftkings();
        let a = p(1, "C", 45_000, 50.0);
        let b = p(2, "PG", 6000, 30.0);
        let mut lineup = Lineup::new(&t);
        lineup.assign(&a).unwrap();
        let err = lineup.assign(&b).unwrap_err();
        assert!(matches!(err, AssignError::OverBudget { id: 2, remaining: 5000, .. }));
        assert_eq!(lineup.filled_count(), 1);
        assert_eq!(lineup.total_cost(), 45_000);
    }

    #[test]
    fn test_assign_rejects_duplicate_id() {
        let t = RosterTemplate::draftkings();
        let a = p(1, "PG", 4000, 20.0);
        let mut lineup = Lineup::new(&t);
        lineup.assign(&a).unwrap();
        assert_eq!(lineup.assign(&a), Err(AssignError::AlreadyAssigned(1)));
    }

    #[test]
    fn test_exact_budget_is_allowed() {
        let t = RosterTemplate::new("tiny", 7000, vec![Slot::any("a"), Slot::any("b")]).unwrap();
        let a = p(1, "G", 4000, 40.0);
        let b = p(2, "G", 3000, 25.0);
        let mut lineup = Lineup::new(&t);
        lineup.assign(&a).unwrap();
        lineup.assign(&b).unwrap();
        assert!(lineup.is_valid());
        assert_eq!(lineup.remaining_budget(), 0);
    }

    #[test]
    fn test_replace_checks_invariants() {
        let t = RosterTemplate::new(
            "gc",
            9000,
            vec![Slot::accepting("g", ["G"]), Slot::accepting("c", ["C"])],
        )
        .unwrap();
        let g1 = p(1, "G", 4000, 40.0);
        let g2 = p(2, "G", 3000, 25.0);
        let c = p(3, "C", 5000, 45.0);
        let pricey = p(4, "G", 4500, 60.0);
        let mut lineup = Lineup::new(&t);
        lineup.assign(&g1).unwrap();
        lineup.assign(&c).unwrap();

        assert!(matches!(lineup.replace(0, &c), Err(AssignError::Ineligible { .. })));
        assert!(matches!(lineup.replace(0, &pricey), Err(AssignError::OverBudget { .. })));
        assert_eq!(lineup.replace(7, &g2), Err(AssignError::UnknownSlot(7)));

        let previous = lineup.replace(0, &g2).unwrap();
        assert_eq!(previous.map(Player::id), Some(1));
        assert_eq!(lineup.total_cost(), 8000);
        assert!((lineup.total_value() - 70.0).abs() < 1e-12);
        assert!(lineup.is_valid());
    }

    #[test]
    fn test_complete_and_valid() {
        let t = RosterTemplate::new(
            "gc",
            9000,
            vec![Slot::accepting("g", ["G"]), Slot::accepting("c", ["C"])],
        )
        .unwrap();
        let g = p(1, "G", 4000, 40.0);
        let c = p(3, "C", 5000, 45.0);
        let mut lineup = Lineup::new(&t);
        assert!(!lineup.is_complete());
        assert_eq!(lineup.first_open_slot(), Some(0));
        lineup.assign(&c).unwrap();
        assert_eq!(lineup.first_open_slot(), Some(0));
        lineup.assign(&g).unwrap();
        assert!(lineup.is_complete());
        assert!(lineup.is_valid());
        assert_eq!(lineup.by_name("c").map(Player::id), Some(3));
    }

    #[test]
    fn test_summary() {
        let t = RosterTemplate::new(
            "gc",
            9000,
            vec![Slot::accepting("g", ["G"]), Slot::accepting("c", ["C"])],
        )
        .unwrap();
        let g = p(1, "G", 4000, 40.0);
        let c = p(3, "C", 5000, 45.0);
        let mut lineup = Lineup::new(&t);
        lineup.assign(&g).unwrap();
        lineup.assign(&c).unwrap();
        let summary = lineup.summary();
        assert_eq!(summary.scheme, "gc");
        assert_eq!(summary.slots, vec![("g".into(), 1), ("c".into(), 3)]);
        assert_eq!(summary.player_ids, vec![1, 3]);
        assert_eq!(summary.total_cost, 9000);
        assert!((summary.total_value - 85.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let t = RosterTemplate::new("one", 5000, vec![Slot::any("u")]).unwrap();
        let a = p(1, "C", 4000, 30.0);
        let mut lineup = Lineup::new(&t);
        lineup.assign(&a).unwrap();
        assert_eq!(
            lineup.to_string(),
            "Total value: 30, Total salary: 4000, Values: [30], PerKs: [7.50]"
        );
    }
}
