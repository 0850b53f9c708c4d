//! Collaborator interfaces.
//!
//! The optimizer performs no I/O. Candidate data arrives through a
//! [`PoolSource`] as normalized [`PlayerRecord`]s; results leave as a
//! borrowed [`Lineup`](crate::roster::Lineup) or an owned
//! [`LineupSummary`](crate::roster::LineupSummary).

use crate::error::Result;
use crate::roster::{CandidatePool, Network, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One normalized row from the upstream data collaborator.
///
/// Missing fields are allowed; such records are skipped when a pool is
/// built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<u32>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, position: Option<&str>, salary: Option<u32>, value: Option<f64>) -> Self {
        Self {
            id,
            position: position.map(str::to_string),
            salary,
            value,
        }
    }

    /// Converts to a player, or `None` if any field is missing or zero.
    pub fn into_player(self) -> Option<Player> {
        let position = self.position.filter(|p| !p.trim().is_empty())?;
        let salary = self.salary.filter(|&s| s > 0)?;
        let value = self.value.filter(|&v| v > 0.0)?;
        Player::from_position(self.id, &position, salary, value).ok()
    }
}

/// Supplies candidate records for a logical date and scheme.
pub trait PoolSource {
    fn fetch(&self, date: &str, network: Network) -> Result<Vec<PlayerRecord>>;

    /// Fetches and builds a [`CandidatePool`].
    fn fetch_pool(&self, date: &str, network: Network) -> Result<CandidatePool> {
        CandidatePool::from_records(self.fetch(date, network)?)
    }
}

/// In-memory [`PoolSource`] keyed by `(date, network)`.
#[derive(Debug, Clone, Default)]
pub struct StaticPoolSource {
    records: HashMap<(String, Network), Vec<PlayerRecord>>,
}

impl StaticPoolSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(
        mut self,
        date: impl Into<String>,
        network: Network,
        records: Vec<PlayerRecord>,
    ) -> Self {
        self.records.insert((date.into(), network), records);
        self
    }
}

impl PoolSource for StaticPoolSource {
    fn fetch(&self, date: &str, network: Network) -> Result<Vec<PlayerRecord>> {
        Ok(self
            .records
            .get(&(date.to_string(), network))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineupError;

    #[test]
    fn test_record_into_player() {
        let rec = PlayerRecord::new(9, Some("SF/PF"), Some(5500), Some(31.0));
        let player = rec.into_player().unwrap();
        assert_eq!(player.id(), 9);
        assert!(player.has_category("PF"));

        assert!(PlayerRecord::new(1, Some(""), Some(1), Some(1.0)).into_player().is_none());
        assert!(PlayerRecord::new(1, Some("C"), None, Some(1.0)).into_player().is_none());
        assert!(PlayerRecord::new(1, Some("C"), Some(1), Some(-2.0)).into_player().is_none());
    }

    #[test]
    fn test_static_source_fetch_pool() {
        let source = StaticPoolSource::new().with_records(
            "2016-10-25",
            Network::DraftKings,
            vec![
                PlayerRecord::new(1, Some("PG"), Some(5000), Some(20.0)),
                PlayerRecord::new(2, Some("C"), Some(6000), Some(40.0)),
            ],
        );
        let pool = source.fetch_pool("2016-10-25", Network::DraftKings).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.players()[0].id(), 2);

        let empty = source.fetch_pool("2016-10-25", Network::FanDuel).unwrap();
        assert!(empty.is_empty());
    }

    struct OfflineSource;

    impl PoolSource for OfflineSource {
        fn fetch(&self, date: &str, network: Network) -> Result<Vec<PlayerRecord>> {
            Err(LineupError::Source(format!("no slate for {network} on {date}")))
        }
    }

    #[test]
    fn test_source_failure_propagates_through_fetch_pool() {
        let err = OfflineSource
            .fetch_pool("2016-10-25", Network::FanDuel)
            .unwrap_err();
        assert!(matches!(err, LineupError::Source(ref msg) if msg.contains("2016-10-25")));
        assert_eq!(
            err.to_string(),
            format!("pool source error: no slate for {} on 2016-10-25", Network::FanDuel)
        );
    }

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let rec: PlayerRecord = toml::from_str("id = 4\nposition = \"C\"").unwrap();
        assert_eq!(rec.salary, None);
        assert!(rec.into_player().is_none());
    }
}
