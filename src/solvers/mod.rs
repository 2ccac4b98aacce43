//! Cell-by-cell maze solvers.
//!
//! Every solver shares one step algorithm ([`FrontierSolver`]) and differs only
//! in the discipline of its frontier: a stack gives depth-first search, a queue
//! breadth-first search. [`Solver::step`] explores exactly one frontier element
//! so callers can animate the search; [`Solver::solve`] repeats it with a
//! drawing-speed pause until the maze is solved, proven unsolvable, or the run
//! is cancelled.

pub mod bfs;
pub mod dfs;
pub mod runner;

use std::fmt;

use log::{debug, info, trace};

use crate::config::ConfigError;
use crate::grids::{CellKind, Point, SharedMaze};
use crate::pacing::Pacer;

pub use bfs::{QueueFrontier, QueueSolver};
pub use dfs::{StackFrontier, StackSolver};
pub use runner::SolveRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Status {
    #[display("unsolved")]
    Unsolved,
    #[display("solved")]
    Solved,
    #[display("no solution")]
    NoSolution,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::Unsolved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverKind {
    /// Stack frontier.
    #[default]
    DepthFirst,
    /// Queue frontier.
    BreadthFirst,
}

/// Progress every solver keeps, whatever its frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverState {
    status: Status,
    visited: usize,
}

impl SolverState {
    pub fn new() -> Self {
        Self {
            status: Status::Unsolved,
            visited: 0,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// What `step` answers once the search is over, `None` while unsolved.
    pub fn terminal_answer(&self) -> Option<bool> {
        match self.status {
            Status::Unsolved => None,
            Status::Solved => Some(true),
            Status::NoSolution => Some(false),
        }
    }

    /// Counts a visit and returns its visit order, starting at 1.
    fn record_visit(&mut self) -> usize {
        self.visited += 1;
        self.visited
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
    }
}

impl Default for SolverState {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Solver: Send + fmt::Debug {
    /// Explores one frontier element. Returns `true` iff it was the goal.
    ///
    /// Once the status is terminal this changes nothing and answers `true`
    /// for solved, `false` for no solution.
    fn step(&mut self) -> bool;

    fn state(&self) -> &SolverState;

    fn kind(&self) -> SolverKind;

    fn status(&self) -> Status {
        self.state().status()
    }

    fn visited_count(&self) -> usize {
        self.state().visited_count()
    }

    /// Steps until the status is terminal or `pacer` is cancelled, pausing
    /// between steps but not after the last one.
    ///
    /// Cancellation is only observed between steps, so a stopped run leaves
    /// the solver exactly as some completed step left it and can be resumed.
    fn solve(&mut self, pacer: &mut Pacer) -> Status {
        while self.status() == Status::Unsolved {
            if pacer.is_cancelled() {
                debug!("solve cancelled after {} visits", self.visited_count());
                break;
            }

            self.step();
            if self.status().is_terminal() {
                break;
            }

            if !pacer.pause() {
                debug!("solve cancelled after {} visits", self.visited_count());
                break;
            }
        }

        self.status()
    }
}

pub type BoxedSolver = Box<dyn Solver>;

/// Ordering policy of the cells waiting to be explored.
pub trait Frontier: Default + Send + fmt::Debug {
    const KIND: SolverKind;

    /// Whether the next element leaves the frontier before it is inspected.
    /// Otherwise it is removed only when skipped or expanded.
    const EAGER_REMOVAL: bool;

    fn push(&mut self, point: Point);

    fn peek(&self) -> Option<Point>;

    fn pop(&mut self) -> Option<Point>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The shared step algorithm over any frontier discipline.
#[derive(Debug)]
pub struct FrontierSolver<F> {
    maze: SharedMaze,
    frontier: F,
    state: SolverState,
}

impl<F: Frontier> FrontierSolver<F> {
    /// Seeds the frontier with the maze's start cell.
    pub fn new(maze: SharedMaze) -> Result<Self, ConfigError> {
        let start = maze.read().start().ok_or(ConfigError::MissingStart)?;

        let mut frontier = F::default();
        frontier.push(start);
        debug!("{:?} solver bound, starting at {}", F::KIND, start);

        Ok(Self {
            maze,
            frontier,
            state: SolverState::new(),
        })
    }

    pub fn maze(&self) -> &SharedMaze {
        &self.maze
    }

    pub fn frontier(&self) -> &F {
        &self.frontier
    }
}

impl<F: Frontier> Solver for FrontierSolver<F> {
    fn step(&mut self) -> bool {
        if let Some(answer) = self.state.terminal_answer() {
            return answer;
        }

        let Some(point) = self.frontier.peek() else {
            self.state.finish(Status::NoSolution);
            info!(
                "{:?}: no solution after {} visits",
                F::KIND,
                self.state.visited_count()
            );
            return false;
        };
        if F::EAGER_REMOVAL {
            self.frontier.pop();
        }

        let mut maze = self.maze.write();
        let Some(cell) = maze.get_cell_mut(point) else {
            // frontier entries always come from the maze itself
            if !F::EAGER_REMOVAL {
                self.frontier.pop();
            }
            return false;
        };

        if !cell.is_walkable_unexplored() {
            trace!("skipping stale {}", point);
            if !F::EAGER_REMOVAL {
                self.frontier.pop();
            }
            return false;
        }

        let order = self.state.record_visit();
        cell.mark_explored(order);
        trace!("visit #{} at {}", order, point);

        if cell.kind() == CellKind::Goal {
            self.state.finish(Status::Solved);
            info!("{:?}: solved after {} visits", F::KIND, order);
            return true;
        }

        if !F::EAGER_REMOVAL {
            self.frontier.pop();
        }
        for ((kind, next), _) in maze.get_neighborhood_of(point) {
            if kind != CellKind::Wall && !maze[next].is_explored() {
                self.frontier.push(next);
            }
        }

        false
    }

    fn state(&self) -> &SolverState {
        &self.state
    }

    fn kind(&self) -> SolverKind {
        F::KIND
    }
}

/// Binds a solver of the requested kind to `maze`.
pub fn new_solver(kind: SolverKind, maze: &SharedMaze) -> Result<BoxedSolver, ConfigError> {
    let solver: BoxedSolver = match kind {
        SolverKind::DepthFirst => Box::new(StackSolver::new(maze.clone())?),
        SolverKind::BreadthFirst => Box::new(QueueSolver::new(maze.clone())?),
    };

    Ok(solver)
}


#[cfg(test)]
mod test_solvers {
    use super::testing::{shared, visit_orders};
    use super::*;
    use crate::grids::{Maze, Point};
    use proptest::prelude::*;
    use std::time::{Duration, Instant};

    const SPLIT: &str = "6 5
######
#S...#
######
#..G.#
######
";

    #[test]
    fn binding_needs_a_start() {
        let maze = SharedMaze::new(Maze::filled(10, 10));
        assert!(matches!(
            new_solver(SolverKind::BreadthFirst, &maze),
            Err(ConfigError::MissingStart)
        ));
    }

    #[test]
    fn unreachable_goal_means_no_solution() {
        for kind in [SolverKind::DepthFirst, SolverKind::BreadthFirst] {
            let maze = shared(SPLIT);
            let mut solver = new_solver(kind, &maze).unwrap();

            let mut pacer = Pacer::uncancellable(Duration::ZERO);
            assert_eq!(solver.solve(&mut pacer), Status::NoSolution);
            // start plus the three open cells of its corridor
            assert_eq!(solver.visited_count(), 4);
            assert_eq!(maze.read().count_explored(), 4);
        }
    }

    #[test]
    fn terminal_solver_is_idempotent() {
        for kind in [SolverKind::DepthFirst, SolverKind::BreadthFirst] {
            let maze = shared(SPLIT);
            let mut solver = new_solver(kind, &maze).unwrap();
            let mut pacer = Pacer::uncancellable(Duration::ZERO);
            solver.solve(&mut pacer);

            let before = maze.snapshot();
            let visited = solver.visited_count();
            for _ in 0..5 {
                assert!(!solver.step());
            }
            assert_eq!(solver.solve(&mut pacer), Status::NoSolution);
            assert_eq!(solver.visited_count(), visited);
            assert_eq!(maze.snapshot(), before);
        }
    }

    #[test]
    fn solved_solver_is_idempotent() {
        let maze = shared("3 2\nSG#\n###\n");
        let mut solver = StackSolver::new(maze.clone()).unwrap();

        assert!(!solver.step());
        assert!(solver.step());
        assert_eq!(solver.status(), Status::Solved);

        let before = maze.snapshot();
        let frontier = solver.frontier().clone();
        for _ in 0..5 {
            assert!(solver.step());
        }
        assert_eq!(solver.solve(&mut Pacer::uncancellable(Duration::ZERO)), Status::Solved);
        assert_eq!(solver.visited_count(), 2);
        assert_eq!(solver.frontier(), &frontier);
        assert_eq!(maze.snapshot(), before);
        assert_eq!(maze.read()[Point::new(1, 0)].visit_order(), 2);
    }

    #[test]
    fn no_pause_after_the_final_step() {
        // one step visits S, the next finds the frontier empty
        let maze = shared("3 1\nS#G\n");
        let mut solver = new_solver(SolverKind::BreadthFirst, &maze).unwrap();
        let delay = Duration::from_millis(400);

        let begun = Instant::now();
        assert_eq!(solver.solve(&mut Pacer::uncancellable(delay)), Status::NoSolution);
        let elapsed = begun.elapsed();
        assert!(elapsed >= delay, "{:?}", elapsed);
        assert!(elapsed < delay * 2, "{:?}", elapsed);
    }

    #[test]
    fn cancelled_before_first_step_changes_nothing() {
        let maze = shared(SPLIT);
        let mut solver = new_solver(SolverKind::BreadthFirst, &maze).unwrap();
        let (mut pacer, cancel) = Pacer::new(Duration::ZERO);
        cancel.cancel();

        assert_eq!(solver.solve(&mut pacer), Status::Unsolved);
        assert_eq!(solver.visited_count(), 0);
        assert_eq!(maze.read().count_explored(), 0);
    }

    #[test]
    fn start_on_the_grid_edge_is_fine() {
        let maze = shared("4 1\nS..G\n");
        let mut solver = new_solver(SolverKind::BreadthFirst, &maze).unwrap();
        let mut pacer = Pacer::uncancellable(Duration::ZERO);

        assert_eq!(solver.solve(&mut pacer), Status::Solved);
        assert_eq!(visit_orders(&maze), vec![vec![1, 2, 3, 4]]);
    }

    fn open_room(rows: usize, columns: usize, walls: &[bool]) -> String {
        let mut text = format!("{} {}\n", columns, rows);
        for row in 0..rows {
            for column in 0..columns {
                let index = row * columns + column;
                let symbol = if index == 0 {
                    'S'
                } else if index == rows * columns - 1 {
                    'G'
                } else if walls[index % walls.len()] {
                    '#'
                } else {
                    '.'
                };
                text.push(symbol);
            }
            text.push('\n');
        }
        text
    }

    proptest! {
        #[test]
        fn visited_count_is_independent_of_step_or_solve(
            rows in 1usize..8,
            columns in 2usize..8,
            walls in proptest::collection::vec(prop::bool::weighted(0.3), 1..20),
            manual_steps in 0usize..30,
            breadth_first in any::<bool>(),
        ) {
            let kind = if breadth_first { SolverKind::BreadthFirst } else { SolverKind::DepthFirst };
            let text = open_room(rows, columns, &walls);

            let stepped = shared(&text);
            let mut by_steps = new_solver(kind, &stepped).unwrap();
            while !by_steps.status().is_terminal() {
                by_steps.step();
            }

            let mixed = shared(&text);
            let mut by_mix = new_solver(kind, &mixed).unwrap();
            for _ in 0..manual_steps {
                by_mix.step();
            }
            by_mix.solve(&mut Pacer::uncancellable(Duration::ZERO));

            prop_assert_eq!(by_steps.status(), by_mix.status());
            prop_assert_eq!(by_steps.visited_count(), by_mix.visited_count());
            prop_assert_eq!(by_mix.visited_count(), mixed.read().count_explored());
            prop_assert_eq!(visit_orders(&stepped), visit_orders(&mixed));
        }
    }
}
