//! Fixed-size worker pool for asynchronous commands

use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::info;

use crate::error::PoolClosed;

/// Thread name of pool workers
pub const WORKER_THREAD_NAME: &str = "herald-worker";

/// A dedicated runtime running submitted jobs on its blocking pool
///
/// Independent of whatever runtime (if any) the caller runs on. Jobs are
/// plain blocking closures; at most `threads` of them run at once and the
/// rest wait in the queue.
pub struct WorkerPool {
    handle: Handle,
    runtime: Mutex<Option<Runtime>>,
    closed: AtomicBool,
    in_flight: Arc<AtomicUsize>,
    threads: usize,
}

/// Decrements the in-flight counter when the job ends, however it ends
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl WorkerPool {
    /// Start a pool with `threads` workers (at least one)
    pub fn new(threads: usize) -> io::Result<Self> {
        let threads = threads.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(threads)
            .thread_name(WORKER_THREAD_NAME)
            .enable_time()
            .build()?;

        Ok(Self {
            handle: runtime.handle().clone(),
            runtime: Mutex::new(Some(runtime)),
            closed: AtomicBool::new(false),
            in_flight: Arc::new(AtomicUsize::new(0)),
            threads,
        })
    }

    /// Queue a job; returns immediately
    pub fn submit<F>(&self, job: F) -> Result<(), PoolClosed>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_closed() {
            return Err(PoolClosed);
        }

        let guard = InFlightGuard::new(Arc::clone(&self.in_flight));
        self.handle.spawn_blocking(move || {
            let _guard = guard;
            job();
        });
        Ok(())
    }

    /// Jobs submitted and not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Number of worker threads
    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stop accepting jobs and release the runtime
    ///
    /// Best effort: running jobs are not awaited and queued jobs may never
    /// start. Safe to call more than once.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::Release);
        if let Some(runtime) = self.runtime.lock().take() {
            info!(in_flight = self.in_flight(), "shutting down worker pool");
            runtime.shutdown_background();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads)
            .field("in_flight", &self.in_flight())
            .field("closed", &self.is_closed())
            .finish()
    }
}
