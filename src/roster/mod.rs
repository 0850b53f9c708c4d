//! Roster data model.
//!
//! - [`Player`]: an immutable candidate (id, category tags, cost, value)
//! - [`RosterTemplate`]: ordered slots with eligibility predicates, plus a budget
//! - [`Lineup`]: the slot-to-player accumulator that enforces eligibility,
//!   uniqueness and budget on every mutation
//! - [`CandidatePool`] and [`Subpools`]: the pool and its per-category partition

mod lineup;
mod player;
mod pool;
mod template;

pub use lineup::{AssignError, Lineup, LineupSummary};
pub use player::{Player, PlayerId};
pub use pool::{CandidatePool, Subpools};
pub use template::{Eligibility, Network, RosterTemplate, Slot};
