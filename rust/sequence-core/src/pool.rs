//! Bounded fan-out/fan-in over a rayon thread pool.
//!
//! The calling thread is the only producer and the only consumer: it pulls
//! items from the source, keeps at most `capacity` tasks in flight, and folds
//! each completed result itself. Workers hand results back through a
//! `sync_channel` of the same capacity, so any state touched by the fold has
//! exactly one writer.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{Result, SequenceError};

/// Twice the available parallelism, falling back to 2 when unknown.
pub fn default_capacity() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 2
}

/// A worker pool admitting at most `capacity` concurrent tasks.
pub struct WorkerPool {
    capacity: usize,
    pool: ThreadPool,
}

impl WorkerPool {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SequenceError::invalid_input(
                "worker pool capacity must be at least 1",
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(capacity)
            .thread_name(|i| format!("sequence-worker-{}", i))
            .build()
            .map_err(|e| SequenceError::WorkerPool(e.to_string()))?;
        Ok(Self { capacity, pool })
    }

    /// A pool sized by [`default_capacity`].
    pub fn with_default_capacity() -> Result<Self> {
        Self::new(default_capacity())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Run `task` over every item of `source`, folding results on the
    /// calling thread as they complete (in completion order).
    ///
    /// The first `Err` from the source or from `fold` stops further dispatch;
    /// tasks already in flight are drained (and their results dropped) before
    /// that error is returned. A panicking task is re-raised here.
    ///
    /// Returns the number of results folded.
    pub fn run<I, T, R, E, F, G>(
        &self,
        source: I,
        task: F,
        mut fold: G,
    ) -> std::result::Result<usize, E>
    where
        I: IntoIterator<Item = std::result::Result<T, E>>,
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync,
        G: FnMut(R) -> std::result::Result<(), E>,
    {
        let (tx, rx) = mpsc::sync_channel::<thread::Result<R>>(self.capacity);
        let task = &task;
        let mut items = source.into_iter().fuse();

        self.pool.in_place_scope(|scope| {
            let mut in_flight = 0usize;
            let mut folded = 0usize;
            let mut outcome = Ok(());

            loop {
                while outcome.is_ok() && in_flight < self.capacity {
                    match items.next() {
                        Some(Ok(item)) => {
                            let tx = tx.clone();
                            scope.spawn(move |_| {
                                let result = panic::catch_unwind(AssertUnwindSafe(|| task(item)));
                                // The receiver outlives every task in the scope.
                                let _ = tx.send(result);
                            });
                            in_flight += 1;
                        }
                        Some(Err(e)) => outcome = Err(e),
                        None => break,
                    }
                }

                if in_flight == 0 {
                    break;
                }

                let completed = match rx.recv() {
                    Ok(completed) => completed,
                    Err(_) => break,
                };
                in_flight -= 1;

                match completed {
                    Ok(result) => {
                        if outcome.is_ok() {
                            outcome = fold(result);
                            folded += 1;
                        }
                    }
                    Err(payload) => panic::resume_unwind(payload),
                }
            }

            log::debug!("worker pool drained after {} results", folded);
            outcome.map(|()| folded)
        })
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("capacity", &self.capacity)
            .finish()
    }
}
