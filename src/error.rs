//! Error types for lineup optimization.

use thiserror::Error;

/// Main error type for lineup operations.
#[derive(Debug, Error)]
pub enum LineupError {
    /// A player failed construction-time validation.
    #[error("invalid player {id}: {reason}")]
    InvalidPlayer { id: u64, reason: String },

    /// Two players in a pool share the same id.
    #[error("duplicate player id {0} in pool")]
    DuplicatePlayer(u64),

    /// A roster template is malformed.
    #[error("invalid roster template: {0}")]
    InvalidTemplate(String),

    /// A solver configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No pool member is eligible for the named slot.
    #[error("no player in the pool is eligible for slot `{slot}`")]
    InfeasibleSlot { slot: String },

    /// Even the cheapest eligible player per slot exceeds the budget.
    #[error("cheapest possible lineup costs {cheapest}, over the budget of {budget}")]
    InfeasibleBudget { cheapest: u64, budget: u32 },

    /// The search finished without a complete, valid lineup.
    #[error("no feasible lineup found: {0}")]
    NoSolutionFound(String),

    /// The dynamic-programming table would exceed its size ceiling.
    #[error("knapsack table needs {cells} cells, limit is {limit}")]
    TableTooLarge { cells: u128, limit: usize },

    /// The pool-fetch collaborator failed.
    #[error("pool source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for lineup operations.
pub type Result<T> = std::result::Result<T, LineupError>;
