//! Drawing-speed pauses with cooperative cancellation.
//!
//! Background generation and solving pause once per cell so an observer can
//! watch the maze change. A [`Pacer`] owns the waiting side and a
//! [`CancelHandle`] the signalling side; a cancel wakes a pending pause
//! immediately. Dropping the handle counts as a cancel.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    signal: Option<Receiver<()>>,
    cancelled: bool,
}

#[derive(Debug, Clone)]
pub struct CancelHandle(Sender<()>);

impl CancelHandle {
    pub fn cancel(&self) {
        // the pacer may already be gone, nothing left to stop then
        let _ = self.0.send(());
    }
}

impl Pacer {
    pub fn new(delay: Duration) -> (Self, CancelHandle) {
        let (tx, rx) = mpsc::channel();
        let pacer = Self {
            delay,
            signal: Some(rx),
            cancelled: false,
        };

        (pacer, CancelHandle(tx))
    }

    /// A pacer nobody can cancel, for driving work synchronously.
    pub fn uncancellable(delay: Duration) -> Self {
        Self {
            delay,
            signal: None,
            cancelled: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_cancelled(&mut self) -> bool {
        if !self.cancelled {
            if let Some(signal) = &self.signal {
                match signal.try_recv() {
                    Ok(()) | Err(TryRecvError::Disconnected) => self.cancelled = true,
                    Err(TryRecvError::Empty) => {}
                }
            }
        }

        self.cancelled
    }

    /// Waits one drawing-speed interval. Returns `false` once cancelled.
    pub fn pause(&mut self) -> bool {
        if self.cancelled {
            return false;
        }

        match &self.signal {
            None => {
                if !self.delay.is_zero() {
                    std::thread::sleep(self.delay);
                }
            }
            Some(signal) => match signal.recv_timeout(self.delay) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => self.cancelled = true,
            },
        }

        !self.cancelled
    }
}
