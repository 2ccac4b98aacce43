use std::collections::VecDeque;

use crate::grids::Point;
use crate::solvers::{Frontier, FrontierSolver, SolverKind};

/// First in, first out. The head is dequeued before it is inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueFrontier {
    queue: VecDeque<Point>,
}

impl Frontier for QueueFrontier {
    const KIND: SolverKind = SolverKind::BreadthFirst;
    const EAGER_REMOVAL: bool = true;

    fn push(&mut self, point: Point) {
        self.queue.push_back(point);
    }

    fn peek(&self) -> Option<Point> {
        self.queue.front().copied()
    }

    fn pop(&mut self) -> Option<Point> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Breadth-first search. The goal is found at its shortest hop distance.
pub type QueueSolver = FrontierSolver<QueueFrontier>;

#[cfg(test)]
mod test_bfs {
    use super::*;
    use crate::pacing::Pacer;
    use crate::solvers::testing::{shared, visit_orders};
    use crate::solvers::{Solver, Status};
    use std::time::Duration;

    #[test]
    fn solves_the_small_corridor() {
        let maze = shared("3 2\nS.#\n#.G\n");
        let mut solver = QueueSolver::new(maze.clone()).unwrap();
        let mut pacer = Pacer::uncancellable(Duration::ZERO);

        assert_eq!(solver.solve(&mut pacer), Status::Solved);
        assert_eq!(solver.visited_count(), 4);
        assert_eq!(visit_orders(&maze), vec![vec![1, 2, 0], vec![0, 3, 4]]);
        assert!(solver.frontier().is_empty());
    }

    #[test]
    fn duplicates_are_counted_once() {
        let maze = shared("3 2\nS..\n..G\n");
        let mut solver = QueueSolver::new(maze.clone()).unwrap();
        let mut steps = 0;
        while !solver.status().is_terminal() {
            solver.step();
            steps += 1;
        }

        assert_eq!(solver.status(), Status::Solved);
        assert_eq!(solver.visited_count(), 6);
        // one step dropped the second copy of the middle bottom cell
        assert_eq!(steps, 7);
        assert_eq!(visit_orders(&maze), vec![vec![1, 3, 5], vec![2, 4, 6]]);
    }

    #[test]
    fn explores_in_order_of_hop_distance() {
        let maze = shared(
            "5 5
S....
.#.#.
.....
.#.#.
....G
",
        );
        let mut solver = QueueSolver::new(maze.clone()).unwrap();
        assert_eq!(solver.solve(&mut Pacer::uncancellable(Duration::ZERO)), Status::Solved);

        let maze = maze.read();
        // every open cell here is reachable by a path as short as its
        // manhattan distance from the corner
        let explored: Vec<_> = maze.cells().filter(|cell| cell.is_explored()).collect();
        for a in &explored {
            for b in &explored {
                let distance_a = a.point().row + a.point().column;
                let distance_b = b.point().row + b.point().column;
                if distance_a < distance_b {
                    assert!(a.visit_order() < b.visit_order(), "{} before {}", a.point(), b.point());
                }
            }
        }

        let goal = maze.goal().unwrap();
        let open = maze.cells().filter(|cell| !cell.is_wall()).count();
        assert_eq!(maze[goal].visit_order(), open);
    }
}
