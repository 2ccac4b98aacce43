//! Step-by-step maze generation and solving on a grid of cells.
//!
//! A [`Maze`] is carved by a generator (a recursive backtracker that always
//! leaves the goal reachable, or a random 30% wall fill that may not), or read
//! from the text format in [`codec`]. A depth-first or breadth-first solver
//! then explores it one cell per step, marking visit order on the cells, either
//! driven by hand or on a paced background thread.
//!
//! [`MazeSession`] ties these together the way an interactive front end uses
//! them.

pub mod codec;
pub mod config;
pub mod generators;
pub mod grids;
pub mod pacing;
pub mod session;
pub mod solvers;

pub use config::{ConfigError, MazeConfig};
pub use grids::{CellKind, CellStatus, Maze, Point, SharedMaze};
pub use session::{MazeSession, SessionError};
pub use solvers::{new_solver, Solver, SolverKind, Status};
