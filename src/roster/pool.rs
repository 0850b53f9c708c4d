//! Candidate pools and per-category partitioning.

use super::player::{Player, PlayerId};
use super::template::{Eligibility, Slot};
use crate::error::{LineupError, Result};
use crate::source::PlayerRecord;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// An immutable list of uniquely identified players.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    players: Vec<Player>,
}

impl CandidatePool {
    /// Wraps `players`, keeping their order.
    ///
    /// # Errors
    /// [`LineupError::DuplicatePlayer`] if two players share an id.
    pub fn new(players: Vec<Player>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(players.len());
        for p in &players {
            if !seen.insert(p.id()) {
                return Err(LineupError::DuplicatePlayer(p.id()));
            }
        }
        Ok(Self { players })
    }

    /// Builds a pool from normalized source records.
    ///
    /// Records without a position, salary or value, or with a zero salary
    /// or value, are skipped. The resulting pool runs from most to least
    /// valuable, ties by id.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = PlayerRecord>,
    {
        let mut players = Vec::new();
        let mut skipped = 0usize;
        for record in records {
            match record.into_player() {
                Some(player) => players.push(player),
                None => skipped += 1,
            }
        }
        players.sort_by(|a, b| b.value().total_cmp(&a.value()).then(a.id().cmp(&b.id())));
        debug!(kept = players.len(), skipped, "built candidate pool from records");
        Self::new(players)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Fresh per-category partition of this pool.
    pub fn subpools(&self) -> Subpools<'_> {
        Subpools::partition(&self.players)
    }
}

/// Players grouped by category tag.
///
/// A player with several tags sits in each matching subpool. Slot unions
/// are deduplicated by id, so such a player is still drawn at most once
/// per slot. Each partition is owned by the caller that built it; removing
/// a player from one never affects another.
#[derive(Debug, Clone, Default)]
pub struct Subpools<'p> {
    by_category: BTreeMap<String, Vec<&'p Player>>,
}

impl<'p> Subpools<'p> {
    pub fn partition<I>(players: I) -> Self
    where
        I: IntoIterator<Item = &'p Player>,
    {
        let mut by_category: BTreeMap<String, Vec<&'p Player>> = BTreeMap::new();
        for player in players {
            for tag in player.categories() {
                by_category.entry(tag.clone()).or_default().push(player);
            }
        }
        Self { by_category }
    }

    /// Members of one category, in pool order.
    pub fn category(&self, category: &str) -> &[&'p Player] {
        self.by_category
            .get(&category.to_ascii_uppercase())
            .map_or(&[], Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_category.keys().map(String::as_str)
    }

    /// Union of the subpools the slot draws from, deduplicated by id.
    pub fn for_slot(&self, slot: &Slot) -> Vec<&'p Player> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut push_all = |members: &[&'p Player]| {
            for &p in members {
                if seen.insert(p.id()) {
                    out.push(p);
                }
            }
        };
        match slot.eligibility() {
            Eligibility::Any => {
                for members in self.by_category.values() {
                    push_all(members);
                }
            }
            Eligibility::Categories(cats) => {
                for cat in cats {
                    push_all(self.category(cat));
                }
            }
        }
        out
    }

    /// Drops `id` from every subpool.
    pub fn remove(&mut self, id: PlayerId) {
        for members in self.by_category.values_mut() {
            members.retain(|p| p.id() != id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.values().all(Vec::is_empty)
    }
}
