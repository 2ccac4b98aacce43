use rand::rngs::StdRng;
use rand::Rng;

use crate::generators::{GenerationReport, Generator, GeneratorKind};
use crate::grids::{CellKind, Dimensions, Maze, Point};

/// Chance that an interior cell becomes a wall.
pub const WALL_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fill { next: usize },
    PlaceStart,
    PlaceGoal,
    Done,
}

/// Scatters walls independently over the interior. The goal may be unreachable.
pub struct RandomFill {
    dims: Dimensions,
    rng: StdRng,
    phase: Phase,

    start: Option<Point>,
    goal: Option<Point>,
    cells_touched: usize,
}

impl RandomFill {
    /// # Panics
    ///
    /// Panics during generation if the grid has fewer than two interior rows
    /// or no interior column.
    pub fn new(dims: Dimensions, rng: StdRng) -> Self {
        Self {
            dims,
            rng,
            phase: Phase::Fill { next: 0 },
            start: None,
            goal: None,
            cells_touched: 0,
        }
    }

    fn interior_row(&mut self) -> usize {
        self.rng.gen_range(1, self.dims.rows - 1)
    }

    fn interior_column(&mut self) -> usize {
        self.rng.gen_range(1, self.dims.columns - 1)
    }
}

impl Generator for RandomFill {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::RandomFill
    }

    fn step_generation(&mut self, maze: &mut Maze) {
        match self.phase {
            Phase::Fill { next } => {
                let point = self.dims.point_of(next);
                let kind = if self.dims.is_border(point) || self.rng.gen_bool(WALL_PROBABILITY) {
                    CellKind::Wall
                } else {
                    CellKind::Open
                };
                maze.set_cell(point, kind);

                self.phase = if next + 1 < self.dims.area() {
                    Phase::Fill { next: next + 1 }
                } else {
                    Phase::PlaceStart
                };
            }
            Phase::PlaceStart => {
                let row = self.interior_row();
                let column = self.interior_column();
                let start = Point::new(column, row);
                maze.set_cell(start, CellKind::Start);

                self.start = Some(start);
                self.phase = Phase::PlaceGoal;
            }
            Phase::PlaceGoal => {
                let start_row = self.start.map_or(0, |start| start.row);
                // only the row is re-rolled, the goal may share the start's column
                let row = loop {
                    let row = self.interior_row();
                    if row != start_row {
                        break row;
                    }
                };
                let column = self.interior_column();
                let goal = Point::new(column, row);
                maze.set_cell(goal, CellKind::Goal);

                self.goal = Some(goal);
                self.phase = Phase::Done;
            }
            Phase::Done => return,
        }

        self.cells_touched += 1;
    }

    fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    fn report(&self) -> GenerationReport {
        let origin = Point::new(0, 0);
        GenerationReport {
            kind: GeneratorKind::RandomFill,
            cells_touched: self.cells_touched,
            start: self.start.unwrap_or(origin),
            goal: self.goal.unwrap_or(origin),
            max_depth: None,
        }
    }
}

#[cfg(test)]
mod test_random_fill {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn fill(rows: usize, columns: usize, seed: u64) -> (Maze, GenerationReport) {
        let mut generator = RandomFill::new(Dimensions::new(rows, columns), StdRng::seed_from_u64(seed));
        let mut maze = Maze::filled(rows, columns);
        generator.generate_maze(&mut maze);
        (maze, generator.report())
    }

    #[test]
    fn touches_every_cell_once_then_start_and_goal() {
        let (_, report) = fill(10, 13, 5);
        assert_eq!(report.cells_touched, 10 * 13 + 2);
    }

    #[test]
    fn wall_density_is_near_thirty_percent() {
        let (maze, _) = fill(100, 100, 1234);
        let interior = 98 * 98;
        let interior_walls = maze
            .cells()
            .filter(|cell| !maze.dims().is_border(cell.point()) && cell.is_wall())
            .count();

        let ratio = interior_walls as f64 / interior as f64;
        assert!((0.25..0.35).contains(&ratio), "wall ratio {}", ratio);
    }

    #[test]
    fn stepping_changes_cells_in_row_major_order() {
        let dims = Dimensions::new(10, 10);
        let mut generator = RandomFill::new(dims, StdRng::seed_from_u64(77));
        let mut maze = Maze::with_dims(10, 10);

        for _ in 0..15 {
            generator.step_generation(&mut maze);
        }
        // first row and the start of the second row are border walls
        assert!(maze.row(0).iter().all(|cell| cell.is_wall()));
        assert!(maze[Point::new(0, 1)].is_wall());
        assert!(!maze[Point::new(0, 2)].is_wall());
        assert!(!generator.is_done());
    }

    proptest! {
        #[test]
        fn border_is_walled_and_goal_row_differs(
            rows in 10usize..=30,
            columns in 10usize..=30,
            seed in any::<u64>(),
        ) {
            let (maze, report) = fill(rows, columns, seed);
            let dims = maze.dims();

            prop_assert_eq!(maze.count_kind(CellKind::Start), 1);
            prop_assert_eq!(maze.count_kind(CellKind::Goal), 1);
            prop_assert_eq!(maze.start(), Some(report.start));
            prop_assert_eq!(maze.goal(), Some(report.goal));
            prop_assert_ne!(report.start.row, report.goal.row);
            prop_assert!(!dims.is_border(report.start));
            prop_assert!(!dims.is_border(report.goal));
            prop_assert!(maze
                .cells()
                .filter(|cell| dims.is_border(cell.point()))
                .all(|cell| cell.is_wall()));
        }
    }
}
