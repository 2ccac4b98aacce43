//! Maze generation.
//!
//! A [`Generator`] changes at most one cell per [`Generator::step_generation`]
//! call so a renderer can watch the maze appear. [`spawn_generation`] drives a
//! generator on a background thread, pausing one drawing-speed interval after
//! every step, and hands back a [`GenerationHandle`] to poll or wait on.

pub mod backtracker;
pub mod random_fill;

use std::thread::{self, JoinHandle};

use futures::channel::oneshot;
use futures::executor::block_on;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConfigError, MazeConfig};
use crate::grids::{Dimensions, Maze, Point, SharedMaze};
use crate::pacing::{CancelHandle, Pacer};

pub use backtracker::RecursiveBacktracker;
pub use random_fill::RandomFill;

pub trait Generator: Send {
    fn kind(&self) -> GeneratorKind;

    /// Carves at most one cell.
    fn step_generation(&mut self, maze: &mut Maze);

    fn is_done(&self) -> bool;

    fn report(&self) -> GenerationReport;

    /// One step under the maze's write lock.
    fn next_step(&mut self, maze: &SharedMaze) {
        self.step_generation(&mut maze.write());
    }

    /// Runs to completion without pausing.
    fn generate_maze(&mut self, maze: &mut Maze) {
        while !self.is_done() {
            self.step_generation(maze);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Recursive backtracker, the goal is always reachable.
    Backtracker,
    /// Independent 30% walls, no reachability guarantee.
    RandomFill,
}

impl GeneratorKind {
    pub fn for_solvable(ensure_solvable: bool) -> Self {
        if ensure_solvable {
            GeneratorKind::Backtracker
        } else {
            GeneratorKind::RandomFill
        }
    }
}

/// What a finished generation produced.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{kind:?} maze: {cells_touched} cells touched, start {start}, goal {goal}")]
pub struct GenerationReport {
    pub kind: GeneratorKind,
    pub cells_touched: usize,
    pub start: Point,
    pub goal: Point,
    /// Deepest carving level, only tracked by the backtracker.
    pub max_depth: Option<usize>,
}

pub fn new_generator(kind: GeneratorKind, dims: Dimensions, rng: StdRng) -> Box<dyn Generator> {
    match kind {
        GeneratorKind::Backtracker => Box::new(RecursiveBacktracker::new(dims, rng)),
        GeneratorKind::RandomFill => Box::new(RandomFill::new(dims, rng)),
    }
}

pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Builds a maze on the calling thread without any pauses.
pub fn generate_now(config: &MazeConfig) -> Result<(Maze, GenerationReport), ConfigError> {
    config.validate()?;

    let kind = GeneratorKind::for_solvable(config.ensure_solvable);
    let dims = Dimensions::new(config.rows, config.columns);
    let mut generator = new_generator(kind, dims, rng_for(config.seed));
    let mut maze = Maze::filled(dims.rows, dims.columns);
    generator.generate_maze(&mut maze);

    Ok((maze, generator.report()))
}

/// Starts generating on a background thread.
///
/// Dimensions are checked before the thread starts. The returned handle shares
/// the maze being carved, so it can be rendered while it grows.
pub fn spawn_generation(config: &MazeConfig) -> Result<GenerationHandle, ConfigError> {
    config.validate()?;

    let kind = GeneratorKind::for_solvable(config.ensure_solvable);
    let dims = Dimensions::new(config.rows, config.columns);
    let mut generator = new_generator(kind, dims, rng_for(config.seed));
    let maze = SharedMaze::new(Maze::filled(dims.rows, dims.columns));
    let (mut pacer, cancel) = Pacer::new(config.drawing_speed);
    let (done_tx, done_rx) = oneshot::channel();

    info!(
        "generating {}x{} maze with {:?}",
        dims.rows, dims.columns, kind
    );

    let worker_maze = maze.clone();
    let worker = thread::spawn(move || {
        while !generator.is_done() {
            generator.next_step(&worker_maze);
            // once cancelled this returns immediately, carving still completes
            pacer.pause();
        }

        let report = generator.report();
        info!("{}", report);
        let _ = done_tx.send(report.clone());
        report
    });

    Ok(GenerationHandle {
        maze,
        done: done_rx,
        report: None,
        cancel,
        worker,
    })
}

/// A generation running in the background.
///
/// Dropping the handle stops the pauses; the worker then finishes carving on
/// its own.
#[derive(Debug)]
pub struct GenerationHandle {
    maze: SharedMaze,
    done: oneshot::Receiver<GenerationReport>,
    report: Option<GenerationReport>,
    cancel: CancelHandle,
    worker: JoinHandle<GenerationReport>,
}

impl GenerationHandle {
    /// The maze as it is being carved. Not ready for solving until completion.
    pub fn maze(&self) -> &SharedMaze {
        &self.maze
    }

    /// Stops pausing between cells so generation finishes as fast as possible.
    pub fn skip_pacing(&self) {
        debug!("skipping generation pauses");
        self.cancel.cancel();
    }

    /// Non-blocking completion check.
    pub fn try_complete(&mut self) -> Option<&GenerationReport> {
        if self.report.is_none() {
            if let Ok(Some(report)) = self.done.try_recv() {
                self.report = Some(report);
            }
        }

        self.report.as_ref()
    }

    pub fn is_done(&mut self) -> bool {
        self.try_complete().is_some()
    }

    /// Blocks until the maze is complete.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from the generator thread.
    pub fn wait(self) -> (SharedMaze, GenerationReport) {
        if self.report.is_none() {
            // a dropped sender means the worker panicked, join reports it below
            let _ = block_on(self.done);
        }

        match self.worker.join() {
            Ok(report) => (self.maze, report),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
