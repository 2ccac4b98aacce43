use std::thread::{self, JoinHandle};
use std::time::Duration;

use futures::channel::oneshot;
use futures::executor::block_on;
use log::{debug, warn};

use crate::pacing::{CancelHandle, Pacer};
use crate::solvers::{BoxedSolver, Status};

/// Runs one solver at a time on a background thread.
///
/// The solver moves into the worker for the length of the run and comes back
/// when the run is stopped or finishes, keeping whatever progress it made.
#[derive(Debug, Default)]
pub struct SolveRunner {
    active: Option<ActiveRun>,
}

#[derive(Debug)]
struct ActiveRun {
    cancel: CancelHandle,
    done: oneshot::Receiver<Status>,
    worker: JoinHandle<BoxedSolver>,
}

impl ActiveRun {
    fn join(self) -> BoxedSolver {
        match self.worker.join() {
            Ok(solver) => solver,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

impl SolveRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Starts solving in the background, pausing `delay` after every step.
    ///
    /// A run already in progress is cancelled and joined first; its solver is
    /// returned.
    pub fn start(&mut self, mut solver: BoxedSolver, delay: Duration) -> Option<BoxedSolver> {
        let previous = self.stop();

        let (mut pacer, cancel) = Pacer::new(delay);
        let (done_tx, done_rx) = oneshot::channel();
        debug!("starting {:?} run", solver.kind());

        let worker = thread::spawn(move || {
            let status = solver.solve(&mut pacer);
            let _ = done_tx.send(status);
            solver
        });

        self.active = Some(ActiveRun {
            cancel,
            done: done_rx,
            worker,
        });

        previous
    }

    /// Cancels the current run and waits for its solver to come back.
    ///
    /// The solver stops between two steps, so it can be resumed later.
    pub fn stop(&mut self) -> Option<BoxedSolver> {
        let run = self.active.take()?;
        run.cancel.cancel();

        let solver = run.join();
        debug!(
            "stopped {:?} run at {} visits",
            solver.kind(),
            solver.visited_count()
        );
        Some(solver)
    }

    /// Hands the solver back if the run has ended on its own. Never blocks.
    pub fn try_finish(&mut self) -> Option<(BoxedSolver, Status)> {
        let run = self.active.as_mut()?;
        let status = match run.done.try_recv() {
            Ok(Some(status)) => status,
            Ok(None) => return None,
            // the worker dropped its sender without reporting, join surfaces why
            Err(oneshot::Canceled) => Status::Unsolved,
        };

        let run = self.active.take()?;
        Some((run.join(), status))
    }

    /// Blocks until the current run ends on its own.
    pub fn wait(&mut self) -> Option<(BoxedSolver, Status)> {
        let mut run = self.active.take()?;
        let status = block_on(&mut run.done).unwrap_or(Status::Unsolved);

        Some((run.join(), status))
    }
}

impl Drop for SolveRunner {
    fn drop(&mut self) {
        if let Some(run) = self.active.take() {
            run.cancel.cancel();
            if run.worker.join().is_err() {
                warn!("solver thread panicked during shutdown");
            }
        }
    }
}
