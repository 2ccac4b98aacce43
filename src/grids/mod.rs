pub mod cell;
pub mod maze;

pub use cell::Cell;
pub use maze::{Maze, SharedMaze};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.rows && point.column < self.columns
    }

    pub fn is_border(&self, point: Point) -> bool {
        point.row == 0
            || point.column == 0
            || point.row + 1 >= self.rows
            || point.column + 1 >= self.columns
    }

    pub(crate) fn index_of(&self, point: Point) -> usize {
        self.columns * point.row + point.column
    }

    pub(crate) fn point_of(&self, index: usize) -> Point {
        Point::new(index % self.columns, index / self.columns)
    }
}

/// A cell position, `column` is x and `row` is y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("({column}, {row})")]
pub struct Point {
    pub column: usize,
    pub row: usize,
}

impl Point {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Neighbor one step away, `None` when it would leave the grid on the low side.
    pub fn step(self, direction: Direction) -> Option<Point> {
        let (column, row) = match direction {
            Direction::North => (Some(self.column), self.row.checked_sub(1)),
            Direction::South => (Some(self.column), self.row.checked_add(1)),
            Direction::West => (self.column.checked_sub(1), Some(self.row)),
            Direction::East => (self.column.checked_add(1), Some(self.row)),
        };

        Some(Point::new(column?, row?))
    }
}

/// Row 0 is the top of the grid, so north is `row - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Neighbor check order used by the solvers: up, down, left, right.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The two directions at right angles to this one.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::North | Direction::South => [Direction::West, Direction::East],
            Direction::West | Direction::East => [Direction::North, Direction::South],
        }
    }
}

pub type Neighbor = (CellKind, Point);

/// In-bounds neighbors of one cell, iterated north, south, west, east.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood {
    pub north: Option<Neighbor>,
    pub south: Option<Neighbor>,
    pub west: Option<Neighbor>,
    pub east: Option<Neighbor>,

    counter: usize,
}

impl Neighborhood {
    pub fn new() -> Self {
        Self {
            north: None,
            south: None,
            west: None,
            east: None,
            counter: 0,
        }
    }

    pub fn get(&self, direction: Direction) -> Option<Neighbor> {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::West => self.west,
            Direction::East => self.east,
        }
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Neighborhood {
    type Item = (Neighbor, Direction);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&direction) = Direction::ALL.get(self.counter) {
            self.counter += 1;
            if let Some(neighbor) = self.get(direction) {
                return Some((neighbor, direction));
            }
        }

        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Wall,
    Open,
    Start,
    Goal,
}

impl CellKind {
    pub fn symbol(self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Open => '.',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
        }
    }
}

/// Character that does not encode any cell kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown cell symbol {_0:?}")]
pub struct UnknownSymbol(#[error(not(source))] pub char);

impl TryFrom<char> for CellKind {
    type Error = UnknownSymbol;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '#' => Ok(CellKind::Wall),
            '.' => Ok(CellKind::Open),
            'S' => Ok(CellKind::Start),
            'G' => Ok(CellKind::Goal),
            other => Err(UnknownSymbol(other)),
        }
    }
}

impl From<CellKind> for char {
    fn from(kind: CellKind) -> Self {
        kind.symbol()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStatus {
    Unexplored,
    Explored,
}

#[cfg(test)]
mod test_grids {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for kind in [
            CellKind::Wall,
            CellKind::Open,
            CellKind::Start,
            CellKind::Goal,
        ] {
            assert_eq!(CellKind::try_from(kind.symbol()), Ok(kind));
        }
        assert_eq!(CellKind::try_from('x'), Err(UnknownSymbol('x')));
    }

    #[test]
    fn step_stays_non_negative() {
        let origin = Point::new(0, 0);
        assert_eq!(origin.step(Direction::North), None);
        assert_eq!(origin.step(Direction::West), None);
        assert_eq!(origin.step(Direction::South), Some(Point::new(0, 1)));
        assert_eq!(origin.step(Direction::East), Some(Point::new(1, 0)));
    }

    #[test]
    fn neighborhood_iterates_up_down_left_right() {
        let mut neighbors = Neighborhood::new();
        neighbors.east = Some((CellKind::Open, Point::new(2, 1)));
        neighbors.north = Some((CellKind::Wall, Point::new(1, 0)));
        neighbors.west = Some((CellKind::Goal, Point::new(0, 1)));

        let order: Vec<Direction> = neighbors.map(|(_, dir)| dir).collect();
        assert_eq!(
            order,
            vec![Direction::North, Direction::West, Direction::East]
        );
    }

    #[test]
    fn border_detection() {
        let dims = Dimensions::new(4, 5);
        assert!(dims.is_border(Point::new(0, 2)));
        assert!(dims.is_border(Point::new(4, 2)));
        assert!(dims.is_border(Point::new(2, 3)));
        assert!(!dims.is_border(Point::new(2, 2)));
        assert_eq!(dims.point_of(dims.index_of(Point::new(3, 2))), Point::new(3, 2));
    }

    #[test]
    fn perpendicular_directions() {
        assert_eq!(
            Direction::North.perpendicular(),
            [Direction::West, Direction::East]
        );
        for dir in Direction::ALL {
            assert!(!dir.perpendicular().contains(&dir));
        }
    }
}
