//! Long-running integrations on a background thread.
//!
//! A task is *busy* from the moment it is spawned until its job has returned
//! and the completion callback has run. Front ends use the flag to disable
//! inputs while a computation is in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use super::overlap::{integrate, IntegralResult};
use crate::config::IntegrationConfig;
use crate::error::{OverlapError, Result};

/// Clears the busy flag even if the job or callback panics.
struct IdleOnDrop(Arc<AtomicBool>);

impl Drop for IdleOnDrop {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Handle to a computation running on its own thread.
pub struct IntegrationTask<T = IntegralResult> {
    busy: Arc<AtomicBool>,
    handle: JoinHandle<Result<T>>,
}

impl IntegrationTask<IntegralResult> {
    /// Run [`integrate`] on `config` in the background.
    pub fn spawn<F>(config: IntegrationConfig, on_complete: F) -> Self
    where
        F: FnOnce(&Result<IntegralResult>) + Send + 'static,
    {
        Self::spawn_job(move || integrate(&config), on_complete)
    }
}

impl<T: Send + 'static> IntegrationTask<T> {
    /// Run an arbitrary job in the background. `on_complete` is called on the
    /// worker thread with the job's result, before the task turns idle.
    pub fn spawn_job<J, F>(job: J, on_complete: F) -> Self
    where
        J: FnOnce() -> Result<T> + Send + 'static,
        F: FnOnce(&Result<T>) + Send + 'static,
    {
        let busy = Arc::new(AtomicBool::new(true));
        let guard = IdleOnDrop(Arc::clone(&busy));
        let handle = thread::spawn(move || {
            let _guard = guard;
            debug!("background integration started");
            let result = job();
            on_complete(&result);
            debug!("background integration finished");
            result
        });
        Self { busy, handle }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Block until the job finishes and return its result.
    pub fn wait(self) -> Result<T> {
        self.handle.join().map_err(|_| OverlapError::WorkerPanicked)?
    }
}
