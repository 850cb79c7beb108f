// Cancellable, time-limited submissions with a double-submit guard

use crate::client_errors::{ClientError, ClientResult};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// How often a waiting caller checks for cancellation
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// At most one pending submission per component
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> ClientResult<InFlightGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::AlreadyInFlight)?;
        Ok(InFlightGuard {
            busy: self.busy.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the in-flight slot when dropped
#[derive(Debug)]
pub struct InFlightGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A request running on its own worker thread.
///
/// `wait` returns the job's result, or gives up once the deadline passes or
/// the task is cancelled. A worker that finishes after that is ignored.
pub struct SubmissionTask<T> {
    rx: mpsc::Receiver<ClientResult<T>>,
    cancel: CancelHandle,
    timeout: Duration,
    _guard: InFlightGuard,
}

impl<T: Send + 'static> SubmissionTask<T> {
    pub fn spawn<F>(guard: InFlightGuard, timeout: Duration, job: F) -> Self
    where
        F: FnOnce() -> ClientResult<T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let cancel = CancelHandle::default();
        let worker_cancel = cancel.clone();

        thread::spawn(move || {
            if worker_cancel.is_cancelled() {
                return;
            }
            let result = job();
            if tx.send(result).is_err() {
                debug!("🗑️ Submission finished after its caller stopped waiting");
            }
        });

        Self {
            rx,
            cancel,
            timeout,
            _guard: guard,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn wait(self) -> ClientResult<T> {
        let deadline = Instant::now() + self.timeout;

        loop {
            if self.cancel.is_cancelled() {
                return Err(ClientError::Cancelled);
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(ClientError::Timeout {
                    after_ms: self.timeout.as_millis() as u64,
                });
            }

            match self.rx.recv_timeout((deadline - now).min(POLL_INTERVAL)) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(ClientError::Transport(
                        "submission worker stopped without a result".into(),
                    ))
                }
            }
        }
    }
}
