use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{error, info};

use maze_solver::codec;
use maze_solver::config::{MazeConfig, DEFAULT_DIMS};
use maze_solver::session::{MazeSession, SessionError};
use maze_solver::solvers::{SolverKind, Status};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverArg {
    DepthFirst,
    BreadthFirst,
}

impl From<SolverArg> for SolverKind {
    fn from(arg: SolverArg) -> Self {
        match arg {
            SolverArg::DepthFirst => SolverKind::DepthFirst,
            SolverArg::BreadthFirst => SolverKind::BreadthFirst,
        }
    }
}

/// Generate or load a maze, then search it for the goal.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Rows of a generated maze.
    #[arg(long, default_value_t = DEFAULT_DIMS.0)]
    rows: usize,

    /// Columns of a generated maze.
    #[arg(long, default_value_t = DEFAULT_DIMS.1)]
    columns: usize,

    /// Scatter walls at random instead of carving; the goal may be unreachable.
    #[arg(long)]
    random: bool,

    /// Search strategy.
    #[arg(long, value_name = "KIND", value_enum, default_value = "depth-first")]
    solver: SolverArg,

    /// Read the maze from a file instead of generating one.
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Write the unsolved maze to a file.
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Pause after every carved cell and solver step, in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Seed for reproducible generation.
    #[arg(long)]
    seed: Option<u64>,

    /// Take at most this many single steps instead of solving to the end.
    #[arg(long, value_name = "N")]
    steps: Option<usize>,
}

fn run(args: Args) -> Result<(), SessionError> {
    let config = MazeConfig {
        ensure_solvable: !args.random,
        drawing_speed: Duration::from_millis(args.delay_ms),
        seed: args.seed,
        ..MazeConfig::with_dims(args.rows, args.columns)
    };
    let mut session = MazeSession::new(config, args.solver.into());

    match &args.load {
        Some(path) => session.load_file(path)?,
        None => {
            let (maze, report) = session.spawn_generate()?.wait();
            info!("{}", report);
            session.install(maze);
        }
    }

    if let Some(path) = &args.save {
        session.save_file(path)?;
    }

    match args.steps {
        Some(steps) => {
            for _ in 0..steps {
                if session.step()?.is_terminal() {
                    break;
                }
            }
        }
        None => {
            session.play()?;
            session.wait();
        }
    }

    if let Some(maze) = session.maze() {
        print!("{}", codec::serialize_maze(&maze.read()));
    }
    println!(
        "status: {}",
        session.solver_status().unwrap_or(Status::Unsolved)
    );
    println!("visited: {}", session.visited_count());

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Args::parse()) {
        error!("{}", err);
        process::exit(1);
    }
}
