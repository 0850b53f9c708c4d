//! Branch-and-bound 0/1 knapsack.
//!
//! Items are sorted by value density (value per unit cost, descending, ties
//! by player id ascending) and the implicit include/exclude tree over that
//! order is searched. Each node carries its fractional-relaxation bound:
//! items are taken greedily while they fit, plus the fractional share of
//! the first one that does not. A child is kept only if its bound strictly
//! exceeds the incumbent.
//!
//! # References
//!
//! - Kolesar (1967), "A Branch and Bound Algorithm for the Knapsack Problem"
//! - Martello & Toth (1990), *Knapsack Problems: Algorithms and Computer
//!   Implementations*, ch. 2

use super::types::{KnapsackSolution, Traversal};
use crate::roster::Player;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use tracing::debug;

/// Branch-and-bound solver configuration.
///
/// # Examples
///
/// ```
/// use u_lineup::knapsack::{BranchAndBound, Traversal};
/// use u_lineup::roster::Player;
///
/// let players = vec![
///     Player::from_position(1, "G", 4000, 40.0).unwrap(),
///     Player::from_position(2, "G", 3000, 25.0).unwrap(),
///     Player::from_position(3, "C", 5000, 45.0).unwrap(),
/// ];
/// let solution = BranchAndBound::new().solve(&players, 7000);
/// assert_eq!(solution.player_ids, vec![1, 2]);
///
/// let best_first = BranchAndBound::new()
///     .with_traversal(Traversal::BestFirst)
///     .solve(&players, 7000);
/// assert_eq!(best_first.value, solution.value);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound {
    pub traversal: Traversal,
}

impl BranchAndBound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Finds a value-maximizing subset of `players` whose cost fits `budget`.
    pub fn solve(&self, players: &[Player], budget: u32) -> KnapsackSolution {
        let order = density_order(players);
        let budget = budget as u64;
        let bounds = Bounder {
            players,
            order: &order,
            budget,
        };

        let mut frontier = Frontier::new(self.traversal);
        let mut best_value = 0.0;
        let mut best_chosen: Vec<usize> = Vec::new();
        let mut expanded = 0usize;

        frontier.push(Node {
            level: 0,
            cost: 0,
            value: 0.0,
            bound: bounds.bound(0, 0, 0.0),
            chosen: Vec::new(),
        });

        while let Some(node) = frontier.pop() {
            if node.level == order.len() || node.bound <= best_value {
                continue;
            }
            expanded += 1;

            let index = order[node.level];
            let item = &players[index];
            let level = node.level + 1;

            // Include the item.
            let cost = node.cost + item.cost() as u64;
            if cost <= budget {
                let value = node.value + item.value();
                let mut chosen = node.chosen.clone();
                chosen.push(index);
                if value > best_value {
                    best_value = value;
                    best_chosen = chosen.clone();
                }
                let bound = bounds.bound(level, cost, value);
                if bound > best_value {
                    frontier.push(Node {
                        level,
                        cost,
                        value,
                        bound,
                        chosen,
                    });
                }
            }

            // Exclude it.
            let bound = bounds.bound(level, node.cost, node.value);
            if bound > best_value {
                frontier.push(Node {
                    level,
                    bound,
                    ..node
                });
            }
        }

        debug!(
            items = players.len(),
            budget,
            expanded,
            best_value,
            traversal = ?self.traversal,
            "branch-and-bound finished"
        );
        KnapsackSolution::from_chosen(players, &best_chosen)
    }
}

/// Indices of `players` by value density descending, ties by id ascending.
pub(crate) fn density_order(players: &[Player]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (&players[a], &players[b]);
        pb.value_density()
            .total_cmp(&pa.value_density())
            .then(pa.id().cmp(&pb.id()))
    });
    order
}

/// One decision point: the first `level` items in density order are decided.
#[derive(Debug, Clone)]
struct Node {
    level: usize,
    cost: u64,
    value: f64,
    bound: f64,
    chosen: Vec<usize>,
}

struct Bounder<'a> {
    players: &'a [Player],
    order: &'a [usize],
    budget: u64,
}

impl Bounder<'_> {
    /// Fractional-relaxation bound for a node at `level`.
    fn bound(&self, level: usize, cost: u64, value: f64) -> f64 {
        if cost > self.budget {
            return 0.0;
        }
        let mut bound = value;
        let mut weight = cost;
        let mut j = level;
        while j < self.order.len() {
            let item = &self.players[self.order[j]];
            if weight + item.cost() as u64 > self.budget {
                break;
            }
            weight += item.cost() as u64;
            bound += item.value();
            j += 1;
        }
        if j < self.order.len() {
            let item = &self.players[self.order[j]];
            bound += (self.budget - weight) as f64 * item.value_density();
        }
        bound
    }
}

/// Heap entry ordered by bound, then by insertion for determinism.
struct Ranked {
    seq: u64,
    node: Node,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .bound
            .total_cmp(&other.node.bound)
            .then(other.seq.cmp(&self.seq))
    }
}

enum Frontier {
    Fifo(VecDeque<Node>),
    Best { heap: BinaryHeap<Ranked>, seq: u64 },
}

impl Frontier {
    fn new(traversal: Traversal) -> Self {
        match traversal {
            Traversal::BreadthFirst => Frontier::Fifo(VecDeque::new()),
            Traversal::BestFirst => Frontier::Best {
                heap: BinaryHeap::new(),
                seq: 0,
            },
        }
    }

    fn push(&mut self, node: Node) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(node),
            Frontier::Best { heap, seq } => {
                heap.push(Ranked { seq: *seq, node });
                *seq += 1;
            }
        }
    }

    fn pop(&mut self) -> Option<Node> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Best { heap, .. } => heap.pop().map(|r| r.node),
        }
    }
}
