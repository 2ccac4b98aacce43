use crate::grids::{CellKind, CellStatus, Point};

/// A single square of the maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    kind: CellKind,
    status: CellStatus,
    point: Point,
    // 0 until a solver explores this cell
    visit_order: usize,
}

impl Cell {
    pub fn new(kind: CellKind, point: Point) -> Self {
        Self {
            kind,
            status: CellStatus::Unexplored,
            point,
            visit_order: 0,
        }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn status(&self) -> CellStatus {
        self.status
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn visit_order(&self) -> usize {
        self.visit_order
    }

    pub fn is_wall(&self) -> bool {
        self.kind == CellKind::Wall
    }

    pub fn is_explored(&self) -> bool {
        self.status == CellStatus::Explored
    }

    /// Whether a solver may still put this cell on its frontier.
    pub fn is_walkable_unexplored(&self) -> bool {
        !self.is_wall() && !self.is_explored()
    }

    pub(crate) fn set_kind(&mut self, kind: CellKind) -> CellKind {
        std::mem::replace(&mut self.kind, kind)
    }

    pub(crate) fn mark_explored(&mut self, visit_order: usize) {
        self.status = CellStatus::Explored;
        self.visit_order = visit_order;
    }

    pub(crate) fn reset(&mut self) {
        self.status = CellStatus::Unexplored;
        self.visit_order = 0;
    }
}
