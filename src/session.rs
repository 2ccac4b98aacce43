//! The controller tying one maze, one solver and one background run together.

use std::io;
use std::path::Path;

use log::{debug, info, warn};

use crate::codec::{self, LoadError};
use crate::config::{ConfigError, MazeConfig};
use crate::generators::{self, GenerationHandle, GenerationReport};
use crate::grids::SharedMaze;
use crate::solvers::{new_solver, BoxedSolver, SolveRunner, SolverKind, Status};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    #[display("{_0}")]
    Config(#[from] ConfigError),
    #[display("{_0}")]
    Load(#[from] LoadError),
    #[display("cannot write maze file: {_0}")]
    Io(#[from] io::Error),
    #[display("a solve is already running, pause it first")]
    SolveInProgress,
}

/// Generates, loads, saves and solves mazes.
///
/// The solver is bound lazily on the first `step` or `play` and dropped
/// whenever the maze is replaced or cleared.
#[derive(Debug, Default)]
pub struct MazeSession {
    config: MazeConfig,
    solver_kind: SolverKind,

    maze: Option<SharedMaze>,
    solver: Option<BoxedSolver>,
    runner: SolveRunner,
}

impl MazeSession {
    pub fn new(config: MazeConfig, solver_kind: SolverKind) -> Self {
        Self {
            config,
            solver_kind,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn maze(&self) -> Option<&SharedMaze> {
        self.maze.as_ref()
    }

    pub fn solver_kind(&self) -> SolverKind {
        self.solver_kind
    }

    pub fn is_solving(&self) -> bool {
        self.runner.is_running()
    }

    /// `None` until a solver is bound. A solver out on a run reports unsolved
    /// until the run is reclaimed.
    pub fn solver_status(&self) -> Option<Status> {
        if self.is_solving() {
            return Some(Status::Unsolved);
        }

        self.solver.as_ref().map(|solver| solver.status())
    }

    pub fn visited_count(&self) -> usize {
        match (&self.solver, &self.maze) {
            (Some(solver), _) => solver.visited_count(),
            // every visit marks exactly one cell
            (None, Some(maze)) if self.is_solving() => maze.read().count_explored(),
            _ => 0,
        }
    }

    /// Builds a new maze from the session config, blocking until it is done.
    pub fn generate(&mut self) -> Result<GenerationReport, SessionError> {
        let (maze, report) = generators::generate_now(&self.config)?;
        self.install(maze);

        Ok(report)
    }

    /// Starts a paced generation from the session config on a background
    /// thread and stops any solve in progress.
    ///
    /// The current maze stays in place until the finished one is handed to
    /// [`MazeSession::install`], so a half-carved maze is never solved.
    pub fn spawn_generate(&mut self) -> Result<GenerationHandle, SessionError> {
        self.reclaim();
        let handle = generators::spawn_generation(&self.config)?;

        Ok(handle)
    }

    /// Replaces the maze and forgets the solver.
    pub fn install(&mut self, maze: impl Into<SharedMaze>) {
        self.halt();
        self.maze = Some(maze.into());
        debug!("maze installed");
    }

    /// Parses `text` into the new maze. On error nothing changes.
    pub fn load_str(&mut self, text: &str) -> Result<(), SessionError> {
        match codec::parse_maze(text) {
            Ok(maze) => {
                self.install(maze);
                Ok(())
            }
            Err(err) => {
                warn!("rejected maze: {}", err);
                Err(LoadError::from(err).into())
            }
        }
    }

    /// Loads the maze at `path`. On error nothing changes.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        match codec::load(path.as_ref()) {
            Ok(maze) => {
                self.install(maze);
                Ok(())
            }
            Err(err) => {
                warn!("rejected {}: {}", path.as_ref().display(), err);
                Err(err.into())
            }
        }
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let maze = self.maze.as_ref().ok_or(ConfigError::NoMaze)?;
        codec::save(&maze.read(), path)?;

        Ok(())
    }

    /// Stops any run and wipes all solver progress from the maze.
    pub fn clear(&mut self) {
        self.halt();
        if let Some(maze) = &self.maze {
            maze.write().clear();
        }
    }

    /// Switching strategy starts over on a clean maze.
    pub fn set_solver_kind(&mut self, kind: SolverKind) {
        debug!("solver kind {:?} -> {:?}", self.solver_kind, kind);
        self.solver_kind = kind;
        self.clear();
    }

    /// Advances the search by one step unless it is already over.
    pub fn step(&mut self) -> Result<Status, SessionError> {
        if self.is_solving() {
            return Err(SessionError::SolveInProgress);
        }

        let mut solver = self.take_solver()?;
        if solver.status() == Status::Unsolved {
            solver.step();
        }
        let status = solver.status();
        self.solver = Some(solver);

        Ok(status)
    }

    /// Solves in the background at the configured drawing speed.
    pub fn play(&mut self) -> Result<(), SessionError> {
        self.reclaim();
        let solver = self.take_solver()?;

        info!(
            "solving with {:?} at {:?} per step",
            self.solver_kind, self.config.drawing_speed
        );
        self.runner.start(solver, self.config.drawing_speed);
        Ok(())
    }

    /// Stops the background run, keeping its progress for a later resume.
    pub fn pause(&mut self) -> Option<Status> {
        self.reclaim();
        self.solver_status()
    }

    /// The final status if the background run has just ended. Never blocks.
    pub fn poll(&mut self) -> Option<Status> {
        let (solver, status) = self.runner.try_finish()?;
        self.finish_run(solver, status);

        Some(status)
    }

    /// Blocks until the background run ends on its own.
    pub fn wait(&mut self) -> Option<Status> {
        let (solver, status) = self.runner.wait()?;
        self.finish_run(solver, status);

        Some(status)
    }

    fn finish_run(&mut self, solver: BoxedSolver, status: Status) {
        info!("{:?} run ended: {} after {} visits", solver.kind(), status, solver.visited_count());
        self.solver = Some(solver);
    }

    fn reclaim(&mut self) {
        if let Some(solver) = self.runner.stop() {
            self.solver = Some(solver);
        }
    }

    /// Stops any run and drops the solver.
    fn halt(&mut self) {
        self.runner.stop();
        self.solver = None;
    }

    fn take_solver(&mut self) -> Result<BoxedSolver, ConfigError> {
        match self.solver.take() {
            Some(solver) => Ok(solver),
            None => {
                let maze = self.maze.as_ref().ok_or(ConfigError::NoMaze)?;
                new_solver(self.solver_kind, maze)
            }
        }
    }
}
