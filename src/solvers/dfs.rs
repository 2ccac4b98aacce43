use crate::grids::Point;
use crate::solvers::{Frontier, FrontierSolver, SolverKind};

/// Last in, first out. The top stays on the stack while it is inspected and
/// leaves only when skipped or expanded, so a found goal remains on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackFrontier {
    stack: Vec<Point>,
}

impl Frontier for StackFrontier {
    const KIND: SolverKind = SolverKind::DepthFirst;
    const EAGER_REMOVAL: bool = false;

    fn push(&mut self, point: Point) {
        self.stack.push(point);
    }

    fn peek(&self) -> Option<Point> {
        self.stack.last().copied()
    }

    fn pop(&mut self) -> Option<Point> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

/// Depth-first search.
pub type StackSolver = FrontierSolver<StackFrontier>;
