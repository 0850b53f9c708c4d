//! Roster templates.
//!
//! A [`RosterTemplate`] describes a scheme as data: an ordered list of
//! [`Slot`]s, each with an [`Eligibility`] predicate over category tags and
//! an optional assignment precedence, plus the total budget. The two
//! built-in schemes are available through [`Network`].

use super::player::Player;
use crate::error::{LineupError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Which players a slot accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    /// Any player, whatever the tags.
    Any,
    /// Players carrying at least one of these category tags.
    Categories(Vec<String>),
}

impl Eligibility {
    /// Eligibility for a union of categories.
    pub fn categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Eligibility::Categories(
            categories
                .into_iter()
                .map(|c| c.as_ref().trim().to_ascii_uppercase())
                .collect(),
        )
    }

    pub fn accepts(&self, player: &Player) -> bool {
        match self {
            Eligibility::Any => true,
            Eligibility::Categories(cats) => cats.iter().any(|c| player.has_category(c)),
        }
    }
}

/// A named lineup position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    name: String,
    eligibility: Eligibility,
    /// Lower values are tried first by `Lineup::assign`. Defaults to the
    /// slot's position in the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    precedence: Option<u32>,
}

impl Slot {
    pub fn new(name: impl Into<String>, eligibility: Eligibility) -> Self {
        Self {
            name: name.into(),
            eligibility,
            precedence: None,
        }
    }

    /// A slot accepting any of the given categories.
    pub fn accepting<I, S>(name: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(name, Eligibility::categories(categories))
    }

    /// A fully-open slot.
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, Eligibility::Any)
    }

    pub fn with_precedence(mut self, precedence: u32) -> Self {
        self.precedence = Some(precedence);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn eligibility(&self) -> &Eligibility {
        &self.eligibility
    }

    pub fn accepts(&self, player: &Player) -> bool {
        self.eligibility.accepts(player)
    }
}

/// An ordered set of slots plus a budget.
///
/// # Examples
///
/// ```
/// use u_lineup::roster::{RosterTemplate, Slot};
///
/// let template = RosterTemplate::new(
///     "two-man",
///     7000,
///     vec![Slot::accepting("g", ["G"]), Slot::accepting("c", ["C"])],
/// )
/// .unwrap();
/// assert_eq!(template.len(), 2);
/// assert_eq!(template.slot_index("c"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTemplate")]
pub struct RosterTemplate {
    name: String,
    budget: u32,
    slots: Vec<Slot>,
    #[serde(skip)]
    assignment_order: Vec<usize>,
}

impl RosterTemplate {
    /// Builds and validates a template.
    ///
    /// # Errors
    /// [`LineupError::InvalidTemplate`] if the budget is zero, there are no
    /// slots, a slot name is empty or repeated, or a slot's category list
    /// is empty.
    pub fn new(name: impl Into<String>, budget: u32, slots: Vec<Slot>) -> Result<Self> {
        let name = name.into();
        if budget == 0 {
            return Err(invalid(format!("{name}: budget must be positive")));
        }
        if slots.is_empty() {
            return Err(invalid(format!("{name}: at least one slot is required")));
        }
        let mut seen = HashSet::new();
        for slot in &slots {
            if slot.name.trim().is_empty() {
                return Err(invalid(format!("{name}: slot names must be non-empty")));
            }
            if !seen.insert(slot.name.as_str()) {
                return Err(invalid(format!("{name}: duplicate slot `{}`", slot.name)));
            }
            if let Eligibility::Categories(cats) = &slot.eligibility {
                if cats.iter().all(|c| c.trim().is_empty()) {
                    return Err(invalid(format!(
                        "{name}: slot `{}` accepts no category",
                        slot.name
                    )));
                }
            }
        }
        Ok(Self::build(name, budget, slots))
    }

    fn build(name: String, budget: u32, slots: Vec<Slot>) -> Self {
        let mut assignment_order: Vec<usize> = (0..slots.len()).collect();
        assignment_order.sort_by_key(|&i| (slots[i].precedence.unwrap_or(i as u32), i));
        Self {
            name,
            budget,
            slots,
            assignment_order,
        }
    }

    /// The 8-slot scheme: one slot per category, a guard flex (PG/SG), a
    /// forward flex (SF/PF) and a utility slot. Budget 50000.
    pub fn draftkings() -> Self {
        Self::build(
            "draftkings".into(),
            50_000,
            vec![
                Slot::accepting("pg1", ["PG"]),
                Slot::accepting("sg1", ["SG"]),
                Slot::accepting("sf1", ["SF"]),
                Slot::accepting("pf1", ["PF"]),
                Slot::accepting("c1", ["C"]),
                Slot::accepting("g1", ["PG", "SG"]),
                Slot::accepting("f1", ["SF", "PF"]),
                Slot::any("u1"),
            ],
        )
    }

    /// The 9-slot scheme: two slots for each of PG, SG, SF and PF, one for
    /// C. Budget 60000.
    pub fn fanduel() -> Self {
        Self::build(
            "fanduel".into(),
            60_000,
            vec![
                Slot::accepting("pg1", ["PG"]),
                Slot::accepting("pg2", ["PG"]),
                Slot::accepting("sg1", ["SG"]),
                Slot::accepting("sg2", ["SG"]),
                Slot::accepting("sf1", ["SF"]),
                Slot::accepting("sf2", ["SF"]),
                Slot::accepting("pf1", ["PF"]),
                Slot::accepting("pf2", ["PF"]),
                Slot::accepting("c1", ["C"]),
            ],
        )
    }

    /// Returns a copy with a different budget.
    pub fn with_budget(&self, budget: u32) -> Result<Self> {
        Self::new(self.name.clone(), budget, self.slots.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot_index(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.name == name)
    }

    /// Slot indices in the order `Lineup::assign` tries them.
    pub fn assignment_order(&self) -> &[usize] {
        &self.assignment_order
    }
}

#[derive(Deserialize)]
struct RawTemplate {
    name: String,
    budget: u32,
    slots: Vec<Slot>,
}

impl TryFrom<RawTemplate> for RosterTemplate {
    type Error = LineupError;

    fn try_from(raw: RawTemplate) -> Result<Self> {
        RosterTemplate::new(raw.name, raw.budget, raw.slots)
    }
}

fn invalid(msg: String) -> LineupError {
    LineupError::InvalidTemplate(msg)
}

/// The built-in contest schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    DraftKings,
    FanDuel,
}

impl Network {
    pub fn template(self) -> RosterTemplate {
        match self {
            Network::DraftKings => RosterTemplate::draftkings(),
            Network::FanDuel => RosterTemplate::fanduel(),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Network::DraftKings => "draftkings",
            Network::FanDuel => "fanduel",
        })
    }
}

impl FromStr for Network {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draftkings" | "dk" => Ok(Network::DraftKings),
            "fanduel" | "fd" => Ok(Network::FanDuel),
            other => Err(LineupError::InvalidConfig(format!(
                "unknown network `{other}`"
            ))),
        }
    }
}
