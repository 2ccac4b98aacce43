use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::generators::{GenerationReport, Generator, GeneratorKind};
use crate::grids::{CellKind, Dimensions, Direction, Maze, Point};

/// One opened cell still trying its directions.
#[derive(Debug, Clone)]
struct Frame {
    point: Point,
    depth: usize,
    order: [Direction; 4],
    next: usize,
}

/// Growing-tree carver that always leaves a path from start to goal.
///
/// A neighbor is opened only when the neighbor and the two cells beside it
/// (seen from the mover) are all still walls, which keeps corridors one cell
/// wide. The cell first reached at the greatest depth becomes the goal.
pub struct RecursiveBacktracker {
    dims: Dimensions,
    rng: StdRng,
    frames: Vec<Frame>,

    start: Point,
    started: bool,
    deepest: Point,
    max_depth: usize,
    goal: Option<Point>,

    cells_touched: usize,
    pub done: bool,
}

impl RecursiveBacktracker {
    /// Picks the start at least two cells away from every border.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below 5.
    pub fn new(dims: Dimensions, mut rng: StdRng) -> Self {
        let row = rng.gen_range(2, dims.rows - 2);
        let column = rng.gen_range(2, dims.columns - 2);
        let start = Point::new(column, row);

        Self {
            dims,
            rng,
            frames: Vec::new(),
            start,
            started: false,
            deepest: start,
            max_depth: 0,
            goal: None,
            cells_touched: 0,
            done: false,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    fn open(&mut self, maze: &mut Maze, point: Point, depth: usize) {
        if depth > self.max_depth {
            self.max_depth = depth;
            self.deepest = point;
        }

        if maze.kind_at(point) != Some(CellKind::Start) {
            maze.set_cell(point, CellKind::Open);
        }

        let mut order = Direction::ALL;
        order.shuffle(&mut self.rng);
        self.frames.push(Frame {
            point,
            depth,
            order,
            next: 0,
        });
        self.cells_touched += 1;
    }

    /// The neighbor in `direction` if it and the cells beside it are all walls.
    fn carvable(maze: &Maze, from: Point, direction: Direction) -> Option<Point> {
        let next = from.step(direction)?;
        let [left, right] = direction.perpendicular();
        let front = [Some(next), next.step(left), next.step(right)];

        let all_walls = front
            .iter()
            .all(|cell| cell.and_then(|point| maze.kind_at(point)) == Some(CellKind::Wall));

        if all_walls {
            Some(next)
        } else {
            None
        }
    }
}

impl Generator for RecursiveBacktracker {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Backtracker
    }

    fn step_generation(&mut self, maze: &mut Maze) {
        if self.done {
            return;
        }

        if !self.started {
            self.started = true;
            maze.set_cell(self.start, CellKind::Start);
            self.open(maze, self.start, 1);
            return;
        }

        // unwind until some frame can open a new cell
        loop {
            let Some(frame) = self.frames.last_mut() else {
                break;
            };
            if frame.next >= frame.order.len() || self.dims.is_border(frame.point) {
                self.frames.pop();
                continue;
            }

            let direction = frame.order[frame.next];
            frame.next += 1;
            let (point, depth) = (frame.point, frame.depth);

            if let Some(next) = Self::carvable(maze, point, direction) {
                self.open(maze, next, depth + 1);
                return;
            }
        }

        debug_assert_ne!(self.deepest, self.start);
        maze.set_cell(self.deepest, CellKind::Goal);
        self.goal = Some(self.deepest);
        self.cells_touched += 1;
        self.done = true;
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn report(&self) -> GenerationReport {
        GenerationReport {
            kind: GeneratorKind::Backtracker,
            cells_touched: self.cells_touched,
            start: self.start,
            goal: self.goal.unwrap_or(self.deepest),
            max_depth: Some(self.max_depth),
        }
    }
}
