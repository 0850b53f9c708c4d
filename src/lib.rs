//! Budget-constrained lineup optimization.
//!
//! Picks a roster of candidates, each with a cost, a value, and one or more
//! categories, so that every slot of a [`RosterTemplate`](roster::RosterTemplate)
//! is filled by an eligible candidate, the total cost stays within the
//! template's budget, and the total value is as high as possible.
//!
//! - **Roster model**: players, slot templates with category eligibility,
//!   lineups that enforce eligibility, uniqueness, and budget on every
//!   assignment.
//! - **Branch-and-bound**: Exact 0/1 knapsack over the budget only, bounded
//!   by the fractional relaxation.
//! - **Dynamic programming**: Exact 0/1 knapsack over the budget only, with
//!   the full value table available for inspection.
//! - **Genetic search (GA)**: Slot-aware population search over complete
//!   lineups, with truncation selection and repopulation from the elites.
//! - **Optimizer**: Strategy dispatch, loadable from TOML.
//!
//! The two exact solvers ignore slots and categories; their result is a
//! subset of players that [`KnapsackSolution::place`](knapsack::KnapsackSolution::place)
//! maps onto a template as far as it goes.
//!
//! # Quick Start
//!
//! ```
//! use u_lineup::optimizer::{Optimizer, Strategy};
//! use u_lineup::roster::{CandidatePool, Player, RosterTemplate, Slot};
//!
//! let pool = CandidatePool::new(vec![
//!     Player::from_position(1, "G", 4000, 40.0).unwrap(),
//!     Player::from_position(2, "G", 3000, 25.0).unwrap(),
//!     Player::from_position(3, "C", 5000, 45.0).unwrap(),
//! ])
//! .unwrap();
//! let template = RosterTemplate::new(
//!     "gc",
//!     9000,
//!     vec![Slot::accepting("g", ["G"]), Slot::accepting("c", ["C"])],
//! )
//! .unwrap();
//!
//! let optimizer = Optimizer::new(template).with_strategy(Strategy::Dynamic);
//! let lineup = optimizer.generate_lineup(&pool).unwrap();
//! assert!(lineup.is_valid());
//! assert_eq!(lineup.total_cost(), 9000);
//! ```

pub mod error;
pub mod ga;
pub mod knapsack;
pub mod optimizer;
pub mod random;
pub mod roster;
pub mod source;

pub use error::{LineupError, Result};
