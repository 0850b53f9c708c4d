//! Dynamic-programming 0/1 knapsack.
//!
//! `table[i][w]` is the best value reachable with the first `i` players and
//! capacity `w`. The include branch is taken only when strictly better, so
//! on a tie the cheaper (skip) solution is kept, and reconstruction includes
//! player `i - 1` exactly when `table[i][w] != table[i - 1][w]`.
//!
//! The table is dense, `(n + 1) × (budget + 1)` cells of `f64`, stored
//! row-major in one allocation. Tables above [`MAX_TABLE_CELLS`] are refused
//! before anything is allocated.

use super::types::KnapsackSolution;
use crate::error::{LineupError, Result};
use crate::roster::Player;
use tracing::debug;

/// Largest table the solver will allocate (8 bytes per cell, 1 GiB).
///
/// About 2600 players at a 50000 budget.
pub const MAX_TABLE_CELLS: usize = 1 << 27;

/// Dense knapsack table.
#[derive(Debug, Clone)]
pub struct DpTable {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl DpTable {
    fn zeroed(items: usize, budget: u32) -> Result<Self> {
        let rows = items + 1;
        let cols = budget as usize + 1;
        let cells = rows as u128 * cols as u128;
        if cells > MAX_TABLE_CELLS as u128 {
            return Err(LineupError::TableTooLarge {
                cells,
                limit: MAX_TABLE_CELLS,
            });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        })
    }

    #[inline]
    fn at(&self, i: usize, w: usize) -> f64 {
        self.cells[i * self.cols + w]
    }

    #[inline]
    fn set(&mut self, i: usize, w: usize, value: f64) {
        self.cells[i * self.cols + w] = value;
    }

    /// `table[i][w]`, or `None` outside the table.
    pub fn value_at(&self, i: usize, w: usize) -> Option<f64> {
        (i < self.rows && w < self.cols).then(|| self.at(i, w))
    }

    /// `table[n][budget]`.
    pub fn optimum(&self) -> f64 {
        self.at(self.rows - 1, self.cols - 1)
    }

    /// Number of players the table covers (`n`).
    pub fn items(&self) -> usize {
        self.rows - 1
    }

    pub fn budget(&self) -> u32 {
        (self.cols - 1) as u32
    }
}

/// Dynamic-programming solver.
///
/// # Examples
///
/// ```
/// use u_lineup::knapsack::DynamicProgramming;
/// use u_lineup::roster::Player;
///
/// let players = vec![
///     Player::from_position(1, "G", 4000, 40.0).unwrap(),
///     Player::from_position(2, "G", 3000, 25.0).unwrap(),
///     Player::from_position(3, "C", 5000, 45.0).unwrap(),
/// ];
/// let solution = DynamicProgramming::solve(&players, 7000).unwrap();
/// assert_eq!(solution.player_ids, vec![1, 2]);
/// ```
pub struct DynamicProgramming;

impl DynamicProgramming {
    /// Finds a value-maximizing subset of `players` whose cost fits `budget`.
    ///
    /// # Errors
    /// [`LineupError::TableTooLarge`] if `(players.len() + 1) × (budget + 1)`
    /// exceeds [`MAX_TABLE_CELLS`].
    pub fn solve(players: &[Player], budget: u32) -> Result<KnapsackSolution> {
        Ok(Self::solve_with_table(players, budget)?.0)
    }

    /// Like [`solve`](Self::solve), also returning the filled table.
    pub fn solve_with_table(
        players: &[Player],
        budget: u32,
    ) -> Result<(KnapsackSolution, DpTable)> {
        let table = Self::build_table(players, budget)?;
        let chosen = reconstruct(players, &table);
        debug!(
            items = players.len(),
            budget,
            optimum = table.optimum(),
            chosen = chosen.len(),
            "dynamic programming finished"
        );
        Ok((KnapsackSolution::from_chosen(players, &chosen), table))
    }

    /// Fills `table[i][w]` for `i in 0..=n`, `w in 0..=budget`.
    pub fn build_table(players: &[Player], budget: u32) -> Result<DpTable> {
        let mut table = DpTable::zeroed(players.len(), budget)?;
        for i in 1..=players.len() {
            let cost = players[i - 1].cost() as usize;
            let value = players[i - 1].value();
            for w in 1..table.cols {
                let skip = table.at(i - 1, w);
                let best = if cost <= w {
                    let include = value + table.at(i - 1, w - cost);
                    if include > skip {
                        include
                    } else {
                        skip
                    }
                } else {
                    skip
                };
                table.set(i, w, best);
            }
        }
        Ok(table)
    }
}

/// Walks the table back from `[n][budget]`, returning chosen indices.
fn reconstruct(players: &[Player], table: &DpTable) -> Vec<usize> {
    let mut chosen = Vec::new();
    let mut w = table.cols - 1;
    for i in (1..table.rows).rev() {
        if table.at(i, w) != table.at(i - 1, w) {
            chosen.push(i - 1);
            w -= players[i - 1].cost() as usize;
        }
    }
    chosen.reverse();
    chosen
}
