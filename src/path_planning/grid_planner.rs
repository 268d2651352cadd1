//! Anytime grid path planner
//!
//! Best-first search over a planimetry with a unit step cost and a squared
//! Euclidean heuristic. The search is bounded by a wall-clock budget, an
//! iteration budget of `(rows / 2)^2` and a forward depth cutoff; whenever a
//! bound fires it returns the path to the node being expanded instead of
//! failing. Callers that need to know whether the goal was reached check the
//! returned [`Termination`] or [`PlannedPath::reaches`].
//!
//! The open set is a plain vector scanned linearly for the minimum `f`, so
//! the first node with the lowest `f` wins ties and results are
//! deterministic. Nodes already on the open set are never relaxed.

use std::collections::HashSet;
use std::time::Instant;

use log::{debug, warn};

use crate::common::{GridCell, GridPath};
use crate::config::PlannerConfig;
use crate::path_planning::node::{Node, NodeArena};
use crate::utils::OccupancyGrid;

const ADJACENT_4: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const ADJACENT_8: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Why a search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Expanded the goal cell itself
    GoalReached,
    /// Expanded a cell closer to the goal than the tolerance
    WithinTolerance,
    TimeBudgetExceeded,
    IterationBudgetExceeded,
    /// A child went past the forward exploration depth
    DepthCutoff,
    /// Nothing left to expand
    OpenSetExhausted,
}

impl Termination {
    pub fn is_success(&self) -> bool {
        matches!(self, Termination::GoalReached | Termination::WithinTolerance)
    }
}

/// Best path found by one search
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPath {
    pub path: GridPath,
    pub termination: Termination,
    pub iterations: usize,
    /// Search nodes created, start included
    pub nodes: usize,
}

impl PlannedPath {
    pub fn last(&self) -> Option<GridCell> {
        self.path.last().copied()
    }

    /// Whether the final cell is the goal or strictly within `tolerance` of it
    pub fn reaches(&self, goal: GridCell, tolerance: f64) -> bool {
        self.last()
            .map_or(false, |last| last == goal || last.distance(&goal) < tolerance)
    }
}

/// Time- and iteration-bounded grid planner
#[derive(Debug, Clone, Default)]
pub struct GridPathPlanner {
    config: PlannerConfig,
}

impl GridPathPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn calc_heuristic(&self, from: GridCell, goal: GridCell) -> f64 {
        from.distance_squared(&goal) as f64
    }

    /// Search a path from `start` to `end` over the free cells of `grid`.
    ///
    /// Never fails: the returned path always begins at `start` and ends at
    /// the cell where the search stopped.
    pub fn compute(
        &self,
        grid: &OccupancyGrid,
        start: GridCell,
        end: GridCell,
        allow_diagonal: bool,
    ) -> PlannedPath {
        let start_time = Instant::now();
        let time_budget = self.config.time_budget();
        let max_iterations = (grid.rows() / 2).pow(2);
        let adjacent: &[(i32, i32)] = if allow_diagonal { &ADJACENT_8 } else { &ADJACENT_4 };

        let mut arena = NodeArena::new();
        let start_index = arena.push(Node::new(start, None));
        let mut open_list: Vec<usize> = vec![start_index];
        let mut closed_set: HashSet<GridCell> = HashSet::new();

        let mut current = start_index;
        let mut iterations = 0;

        let finish = |arena: &NodeArena, index: usize, termination: Termination, iterations: usize| {
            let path = arena.path_to(index);
            debug!(
                "grid search {:?} -> {:?}: {:?} after {} iterations, {} nodes, path of {}",
                start,
                end,
                termination,
                iterations,
                arena.len(),
                path.len()
            );
            PlannedPath {
                path,
                termination,
                iterations,
                nodes: arena.len(),
            }
        };

        while !open_list.is_empty() {
            if start_time.elapsed() > time_budget {
                return finish(&arena, current, Termination::TimeBudgetExceeded, iterations);
            }

            iterations += 1;

            // Lowest f, earliest entry on ties
            let mut current_pos = 0;
            current = open_list[0];
            for (pos, &index) in open_list.iter().enumerate() {
                if arena.get(index).f < arena.get(current).f {
                    current = index;
                    current_pos = pos;
                }
            }

            if iterations > max_iterations {
                warn!(
                    "giving up grid search after {} iterations, returning partial path",
                    max_iterations
                );
                return finish(&arena, current, Termination::IterationBudgetExceeded, iterations);
            }

            open_list.remove(current_pos);
            let position = arena.get(current).position;
            let current_g = arena.get(current).g;
            closed_set.insert(position);

            if position.distance(&end) < self.config.goal_tolerance {
                return finish(&arena, current, Termination::WithinTolerance, iterations);
            }

            if position == end {
                return finish(&arena, current, Termination::GoalReached, iterations);
            }

            for &(dr, dc) in adjacent {
                let child = position.offset(dr, dc);

                // Bounds and collision check
                if !grid.is_free(child) {
                    continue;
                }

                if closed_set.contains(&child) {
                    continue;
                }

                let g = current_g + 1.0;
                let h = self.calc_heuristic(child, end);

                if open_list.iter().any(|&i| {
                    let open_node = arena.get(i);
                    open_node.position == child && open_node.g <= g
                }) {
                    continue;
                }

                let child_index = arena.push(Node::with_costs(child, Some(current), g, h));
                open_list.push(child_index);

                if child.row > self.config.max_forward_depth {
                    return finish(&arena, current, Termination::DepthCutoff, iterations);
                }
            }
        }

        finish(&arena, current, Termination::OpenSetExhausted, iterations)
    }

    /// [`compute`](Self::compute) with the configured diagonal setting
    pub fn plan(&self, grid: &OccupancyGrid, start: GridCell, end: GridCell) -> PlannedPath {
        self.compute(grid, start, end, self.config.allow_diagonal)
    }
}
