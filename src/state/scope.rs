//! Screen-lifetime task scope
//!
//! Every screen the user enters gets a [`ScreenScope`]. Service calls started on
//! the screen run through [`ScreenScope::run`] and periodic tasks through
//! [`ScreenScope::spawn`]; closing the scope (leaving the screen, logging out or
//! dropping the client) aborts both, so no late result or timer outlives the screen.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::{abortable, AbortHandle, Aborted};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::navigation::Screen;
use crate::utils::errors::{Result, UniVoteError};

#[derive(Debug, Default)]
struct InFlight {
    next_id: u64,
    handles: HashMap<u64, AbortHandle>,
}

impl InFlight {
    fn register(&mut self, handle: AbortHandle) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.handles.insert(id, handle);
        id
    }

    fn abort_all(&mut self) -> usize {
        let count = self.handles.len();
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
        count
    }
}

fn lock(inflight: &Mutex<InFlight>) -> MutexGuard<'_, InFlight> {
    inflight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Removes an operation's abort handle once its `run` future settles or is dropped
struct Registration<'a> {
    inflight: &'a Mutex<InFlight>,
    id: u64,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        lock(self.inflight).handles.remove(&self.id);
    }
}

/// Work owned by the screen currently shown
#[derive(Debug)]
pub struct ScreenScope {
    screen: Screen,
    inflight: Arc<Mutex<InFlight>>,
    tasks: Vec<JoinHandle<()>>,
}

impl ScreenScope {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            inflight: Arc::new(Mutex::new(InFlight::default())),
            tasks: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Handle that cancels this scope's in-flight operations from elsewhere
    pub fn canceller(&self) -> ScopeCanceller {
        ScopeCanceller {
            screen: self.screen,
            inflight: self.inflight.clone(),
        }
    }

    /// Spawn a background task that lives until the scope closes.
    ///
    /// Outside a tokio runtime the task is dropped without running and `false` is returned.
    pub fn spawn<F>(&mut self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(screen = %self.screen, "No tokio runtime, background task not started");
                return false;
            }
        };

        self.tasks.retain(|handle| !handle.is_finished());
        self.tasks.push(runtime.spawn(task));
        true
    }

    /// Number of spawned tasks still running
    pub fn running_tasks(&self) -> usize {
        self.tasks.iter().filter(|handle| !handle.is_finished()).count()
    }

    /// Number of operations currently awaited through [`ScreenScope::run`]
    pub fn in_flight(&self) -> usize {
        lock(&self.inflight).handles.len()
    }

    /// Await `operation` under a deadline, abortable through the scope.
    ///
    /// Resolves to `Timeout` when the deadline passes and `Cancelled` when the
    /// scope or a [`ScopeCanceller`] aborts it first.
    pub async fn run<T, F>(&self, operation: &str, deadline: Duration, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let (future, handle) = abortable(future);
        let id = lock(&self.inflight).register(handle);
        let registration = Registration {
            inflight: &self.inflight,
            id,
        };

        let outcome = tokio::time::timeout(deadline, future).await;
        drop(registration);

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(Aborted)) => {
                debug!(operation = operation, screen = %self.screen, "Operation cancelled");
                Err(UniVoteError::Cancelled {
                    operation: operation.to_string(),
                })
            }
            Err(_) => Err(UniVoteError::Timeout {
                operation: operation.to_string(),
                after_ms: deadline.as_millis() as u64,
            }),
        }
    }

    /// Abort everything the scope owns
    pub fn close(&mut self) {
        let operations = lock(&self.inflight).abort_all();
        let tasks = self.tasks.len();
        for handle in self.tasks.drain(..) {
            handle.abort();
        }

        if operations > 0 || tasks > 0 {
            debug!(screen = %self.screen, operations, tasks, "Closed screen scope");
        }
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.close();
    }
}

/// Cloneable canceller for a scope's in-flight operations
#[derive(Debug, Clone)]
pub struct ScopeCanceller {
    screen: Screen,
    inflight: Arc<Mutex<InFlight>>,
}

impl ScopeCanceller {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Abort every operation in flight; returns how many were aborted
    pub fn cancel(&self) -> usize {
        lock(&self.inflight).abort_all()
    }
}
