use std::fmt;
use std::ops::Index;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::DEFAULT_DIMS;
use crate::grids::{Cell, CellKind, CellStatus, Dimensions, Direction, Neighborhood, Point};

/// Row-major grid of cells with O(1) access to the start and goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    dims: Dimensions,
    cells: Vec<Cell>,

    start: Option<usize>,
    goal: Option<usize>,
}

impl Maze {
    pub fn new() -> Self {
        Self::with_dims(DEFAULT_DIMS.0, DEFAULT_DIMS.1)
    }

    /// Open grid without start or goal.
    pub fn with_dims(rows: usize, columns: usize) -> Self {
        let dims = Dimensions::new(rows, columns);
        let cells = (0..dims.area())
            .map(|index| Cell::new(CellKind::Open, dims.point_of(index)))
            .collect();

        Self {
            dims,
            cells,
            start: None,
            goal: None,
        }
    }

    /// Solid grid, the starting point for carving.
    pub fn filled(rows: usize, columns: usize) -> Self {
        let mut maze = Self::with_dims(rows, columns);
        maze.fill();
        maze
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn columns(&self) -> usize {
        self.dims.columns
    }

    pub fn get_cell(&self, point: Point) -> Option<&Cell> {
        if self.dims.contains(point) {
            self.cells.get(self.dims.index_of(point))
        } else {
            None
        }
    }

    pub(crate) fn get_cell_mut(&mut self, point: Point) -> Option<&mut Cell> {
        if self.dims.contains(point) {
            let index = self.dims.index_of(point);
            self.cells.get_mut(index)
        } else {
            None
        }
    }

    pub fn kind_at(&self, point: Point) -> Option<CellKind> {
        self.get_cell(point).map(Cell::kind)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let begin = row * self.dims.columns;
        &self.cells[begin..begin + self.dims.columns]
    }

    pub fn start(&self) -> Option<Point> {
        self.start.map(|index| self.dims.point_of(index))
    }

    pub fn goal(&self) -> Option<Point> {
        self.goal.map(|index| self.dims.point_of(index))
    }

    pub fn start_cell(&self) -> Option<&Cell> {
        self.start.map(|index| &self.cells[index])
    }

    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| cell.kind() == kind).count()
    }

    pub fn count_explored(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.status() == CellStatus::Explored)
            .count()
    }

    /// Changes the kind of one cell and returns the previous kind.
    ///
    /// Placing a start or goal demotes the previous start or goal to open, so
    /// there is never more than one of each.
    ///
    /// # Panics
    ///
    /// Panics if `point` is outside the grid.
    pub fn set_cell(&mut self, point: Point, kind: CellKind) -> CellKind {
        assert!(self.dims.contains(point), "{} outside maze", point);
        let index = self.dims.index_of(point);

        let prev_kind = self.cells[index].set_kind(kind);

        if prev_kind == CellKind::Start && self.start == Some(index) {
            self.start = None;
        }
        if prev_kind == CellKind::Goal && self.goal == Some(index) {
            self.goal = None;
        }

        match kind {
            CellKind::Start => {
                if let Some(old) = self.start.replace(index) {
                    self.cells[old].set_kind(CellKind::Open);
                }
            }
            CellKind::Goal => {
                if let Some(old) = self.goal.replace(index) {
                    self.cells[old].set_kind(CellKind::Open);
                }
            }
            CellKind::Wall | CellKind::Open => {}
        }

        prev_kind
    }

    /// In-bounds neighbors of `point` with their kinds.
    pub fn get_neighborhood_of(&self, point: Point) -> Neighborhood {
        let mut neighbors = Neighborhood::new();
        let lookup = |next: Option<Point>| {
            next.and_then(|next| self.get_cell(next))
                .map(|cell| (cell.kind(), cell.point()))
        };

        neighbors.north = lookup(point.step(Direction::North));
        neighbors.south = lookup(point.step(Direction::South));
        neighbors.west = lookup(point.step(Direction::West));
        neighbors.east = lookup(point.step(Direction::East));

        neighbors
    }

    /// Forget any solution: every cell back to unexplored with no visit order.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    /// Turn every cell into a wall.
    pub fn fill(&mut self) {
        for cell in &mut self.cells {
            cell.set_kind(CellKind::Wall);
            cell.reset();
        }
        self.start = None;
        self.goal = None;
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Point> for Maze {
    type Output = Cell;

    fn index(&self, point: Point) -> &Self::Output {
        &self.cells[self.dims.index_of(point)]
    }
}

/// Rows of cell symbols, one line per row.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dims.rows {
            let line: String = self.row(row).iter().map(|cell| cell.kind().symbol()).collect();
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}

/// A maze shared between one writer (generator or solver) and any number of
/// readers.
///
/// Writers hold the lock for one cell or one solver step at a time, so readers
/// see every intermediate state but never a half-applied step.
#[derive(Debug, Clone, Default)]
pub struct SharedMaze(Arc<RwLock<Maze>>);

impl SharedMaze {
    pub fn new(maze: Maze) -> Self {
        Self(Arc::new(RwLock::new(maze)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Maze> {
        // a panicking writer leaves at most one cell updated
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Maze> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Maze {
        self.read().clone()
    }

    pub fn ptr_eq(&self, other: &SharedMaze) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Maze> for SharedMaze {
    fn from(maze: Maze) -> Self {
        Self::new(maze)
    }
}

#[cfg(test)]
mod test_maze {
    use super::*;

    #[test]
    fn it_works() {
        let mut maze = Maze::filled(12, 15);
        assert_eq!(maze.rows(), 12);
        assert_eq!(maze.columns(), 15);
        assert_eq!(maze.count_kind(CellKind::Wall), 12 * 15);

        assert_eq!(maze.set_cell(Point::new(1, 2), CellKind::Open), CellKind::Wall);
        assert_eq!(maze.kind_at(Point::new(1, 2)), Some(CellKind::Open));
        assert_eq!(maze.kind_at(Point::new(2, 1)), Some(CellKind::Wall));
        assert_eq!(maze.kind_at(Point::new(15, 0)), None);
        assert_eq!(maze[Point::new(14, 11)].point(), Point::new(14, 11));
    }

    #[test]
    fn start_and_goal_stay_unique() {
        let mut maze = Maze::filled(10, 10);

        maze.set_cell(Point::new(2, 2), CellKind::Start);
        maze.set_cell(Point::new(3, 3), CellKind::Start);
        assert_eq!(maze.start(), Some(Point::new(3, 3)));
        assert_eq!(maze.kind_at(Point::new(2, 2)), Some(CellKind::Open));
        assert_eq!(maze.count_kind(CellKind::Start), 1);

        maze.set_cell(Point::new(5, 5), CellKind::Goal);
        maze.set_cell(Point::new(5, 5), CellKind::Wall);
        assert_eq!(maze.goal(), None);
        assert_eq!(maze.count_kind(CellKind::Goal), 0);

        maze.set_cell(Point::new(3, 3), CellKind::Goal);
        assert_eq!(maze.start(), None);
        assert_eq!(maze.goal(), Some(Point::new(3, 3)));
        assert_eq!(maze.start_cell(), None);
    }

    #[test]
    fn neighborhood_respects_edges() {
        let maze = Maze::with_dims(3, 3);

        let corner: Vec<Direction> = maze
            .get_neighborhood_of(Point::new(0, 0))
            .map(|(_, dir)| dir)
            .collect();
        assert_eq!(corner, vec![Direction::South, Direction::East]);

        let center = maze.get_neighborhood_of(Point::new(1, 1));
        assert_eq!(center.count(), 4);
        assert_eq!(
            center.north.map(|(_, point)| point),
            Some(Point::new(1, 0))
        );
    }

    #[test]
    fn clear_resets_solver_marks_only() {
        let mut maze = Maze::with_dims(3, 4);
        maze.set_cell(Point::new(0, 0), CellKind::Start);
        maze.get_cell_mut(Point::new(0, 0)).unwrap().mark_explored(1);
        maze.get_cell_mut(Point::new(1, 0)).unwrap().mark_explored(2);
        assert_eq!(maze.count_explored(), 2);

        maze.clear();
        assert_eq!(maze.count_explored(), 0);
        assert!(maze.cells().all(|cell| cell.visit_order() == 0));
        assert_eq!(maze.start(), Some(Point::new(0, 0)));
    }

    #[test]
    fn displays_symbol_rows() {
        let mut maze = Maze::filled(2, 3);
        maze.set_cell(Point::new(0, 0), CellKind::Start);
        maze.set_cell(Point::new(1, 0), CellKind::Open);
        maze.set_cell(Point::new(1, 1), CellKind::Open);
        maze.set_cell(Point::new(2, 1), CellKind::Goal);

        assert_eq!(maze.to_string(), "S.#\n#.G\n");
    }

    #[test]
    fn shared_maze_sees_writes() {
        let shared = SharedMaze::new(Maze::filled(10, 10));
        let reader = shared.clone();

        shared.write().set_cell(Point::new(4, 4), CellKind::Open);
        assert_eq!(reader.read().kind_at(Point::new(4, 4)), Some(CellKind::Open));
        assert!(reader.ptr_eq(&shared));
    }
}
