//! Candidate players.

use crate::error::{LineupError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique player identifier.
pub type PlayerId = u64;

/// A candidate for a lineup slot.
///
/// Players are immutable once constructed: an id, one or more category
/// tags (position codes such as `"PG"` or `"C"`), a positive integer cost
/// in the budget's unit, and a non-negative projected value.
///
/// # Examples
///
/// ```
/// use u_lineup::roster::Player;
///
/// let p = Player::from_position(7, "PG/SG", 6200, 41.5).unwrap();
/// assert!(p.has_category("SG"));
/// assert_eq!(p.cost(), 6200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayer")]
pub struct Player {
    id: PlayerId,
    categories: Vec<String>,
    cost: u32,
    value: f64,
}

impl Player {
    /// Creates a player from an explicit tag set.
    ///
    /// Tags are trimmed and uppercased; empty tags are dropped.
    ///
    /// # Errors
    /// Returns [`LineupError::InvalidPlayer`] if there is no tag, the cost
    /// is zero, or the value is negative or not finite.
    pub fn new<I, S>(id: PlayerId, categories: I, cost: u32, value: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = Vec::new();
        for tag in categories {
            let tag = tag.as_ref().trim().to_ascii_uppercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let invalid = |reason: &str| LineupError::InvalidPlayer {
            id,
            reason: reason.into(),
        };
        if tags.is_empty() {
            return Err(invalid("at least one category tag is required"));
        }
        if cost == 0 {
            return Err(invalid("cost must be positive"));
        }
        if !value.is_finite() || value < 0.0 {
            return Err(invalid("value must be finite and non-negative"));
        }

        Ok(Self {
            id,
            categories: tags,
            cost,
            value,
        })
    }

    /// Creates a player from a position string such as `"PG/SG"`.
    ///
    /// The string is split on `/`, `,` and whitespace.
    pub fn from_position(id: PlayerId, position: &str, cost: u32, value: f64) -> Result<Self> {
        Self::new(id, split_position(position), cost, value)
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Category tags, uppercased, in the order they were given.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether the player carries the given category tag (case-insensitive).
    pub fn has_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }

    /// Value per unit of cost.
    pub fn value_density(&self) -> f64 {
        self.value / self.cost as f64
    }

    /// Value per thousand cost units.
    pub fn value_per_k(&self) -> f64 {
        self.value / (self.cost as f64 / 1000.0)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ${} ({:.2})",
            self.id,
            self.categories.join("/"),
            self.cost,
            self.value
        )
    }
}

/// Unvalidated wire form; deserialization goes through [`Player::new`].
#[derive(Deserialize)]
struct RawPlayer {
    id: PlayerId,
    categories: Vec<String>,
    cost: u32,
    value: f64,
}

impl TryFrom<RawPlayer> for Player {
    type Error = LineupError;

    fn try_from(raw: RawPlayer) -> Result<Self> {
        Player::new(raw.id, raw.categories, raw.cost, raw.value)
    }
}

fn split_position(position: &str) -> impl Iterator<Item = &str> {
    position
        .split(|c: char| c == '/' || c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_splits_tags() {
        let p = Player::from_position(1, "pg/sg", 5000, 30.0).unwrap();
        assert_eq!(p.categories(), &["PG".to_string(), "SG".to_string()]);
        assert!(p.has_category("PG"));
        assert!(p.has_category("sg"));
        assert!(!p.has_category("C"));
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let p = Player::new(1, ["C", "c", " C "], 3000, 10.0).unwrap();
        assert_eq!(p.categories().len(), 1);
    }

    #[test]
    fn test_rejects_zero_cost() {
        let err = Player::from_position(3, "C", 0, 10.0).unwrap_err();
        assert!(matches!(err, LineupError::InvalidPlayer { id: 3, .. }));
    }

    #[test]
    fn test_rejects_negative_or_nan_value() {
        assert!(Player::from_position(1, "C", 1000, -1.0).is_err());
        assert!(Player::from_position(1, "C", 1000, f64::NAN).is_err());
        assert!(Player::from_position(1, "C", 1000, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_missing_category() {
        assert!(Player::from_position(1, " / ", 1000, 1.0).is_err());
    }

    #[test]
    fn test_value_per_k() {
        let p = Player::from_position(1, "SF", 4000, 30.0).unwrap();
        assert!((p.value_per_k() - 7.5).abs() < 1e-12);
        assert!((p.value_density() - 0.0075).abs() < 1e-12);
    }
}
