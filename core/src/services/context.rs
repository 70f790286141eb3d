//! Per-request cancellation and deadline propagation

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::errors::{CancelReason, DomainError, DomainResult};

/// Carries the cancellation signal and optional deadline of one request
///
/// Cheap to clone; clones observe the same signal.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Fires the cancellation signal of the [`RequestContext`] it came from
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // No receivers left means nobody is waiting on the signal.
        let _ = self.sender.send(true);
    }
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// A context whose deadline is `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().deadline_at(Instant::now() + timeout)
    }

    /// Set an absolute deadline
    pub fn deadline_at(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach a cancellation signal, returning the handle that fires it
    pub fn cancellable(mut self) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        self.cancel = Some(receiver);
        (self, CancelHandle { sender })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the signal already fired or the deadline already passed
    pub fn check(&self) -> DomainResult<()> {
        if let Some(receiver) = &self.cancel {
            if *receiver.borrow() {
                return Err(cancelled(CancelReason::Cancelled));
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(cancelled(CancelReason::DeadlineExceeded));
            }
        }
        Ok(())
    }

    /// Drive `fut` until it completes, the signal fires, or the deadline passes
    ///
    /// When the signal or deadline wins, `fut` is dropped unfinished and a
    /// `Cancelled` error is returned.
    pub async fn run<F, T>(&self, fut: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        self.check()?;

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(cancelled(CancelReason::Cancelled)),
            _ = self.deadline_elapsed() => Err(cancelled(CancelReason::DeadlineExceeded)),
            result = fut => result,
        }
    }

    async fn cancelled(&self) {
        let Some(receiver) = &self.cancel else {
            return std::future::pending().await;
        };

        let mut receiver = receiver.clone();
        loop {
            let fired = *receiver.borrow_and_update();
            if fired {
                return;
            }
            if receiver.changed().await.is_err() {
                // Handle dropped without firing.
                return std::future::pending().await;
            }
        }
    }

    async fn deadline_elapsed(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

fn cancelled(reason: CancelReason) -> DomainError {
    DomainError::Cancelled { reason }
}
