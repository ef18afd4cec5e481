//! Cancelable periodic tasks.
//!
//! Each task runs on its own named thread and waits on a shutdown channel
//! between ticks, so cancelling never has to wait out a full interval.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::StorefrontError;

/// Handle to a running periodic task.
///
/// Dropping the handle cancels the task and joins its thread.
#[derive(Debug)]
pub struct TaskHandle {
    name: String,
    shutdown: Option<mpsc::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
}

impl TaskHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the task thread is still running.
    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Stop the task and wait for its thread to exit.
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(j) = self.join.take() {
            let _ = j.join();
            debug!(task = %self.name, "scheduled task stopped");
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawner for periodic tasks.
#[derive(Debug)]
pub struct ScheduledTask;

impl ScheduledTask {
    /// Run `tick` every `interval` until the returned handle is cancelled or dropped.
    ///
    /// The first tick happens one interval after spawning.
    pub fn spawn<F>(
        name: impl Into<String>,
        interval: Duration,
        mut tick: F,
    ) -> Result<TaskHandle, StorefrontError>
    where
        F: FnMut() + Send + 'static,
    {
        let name = name.into();
        if interval.is_zero() {
            return Err(StorefrontError::ZeroInterval(name));
        }

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let task_name = name.clone();
        let join = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                info!(task = %task_name, ?interval, "scheduled task started");
                loop {
                    match shutdown_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => tick(),
                        // Explicit shutdown or the handle went away.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .map_err(|source| StorefrontError::Spawn {
                task: name.clone(),
                source,
            })?;

        Ok(TaskHandle {
            name,
            shutdown: Some(shutdown_tx),
            join: Some(join),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    #[test]
    fn ticks_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let handle = ScheduledTask::spawn("test-ticker", Duration::from_millis(5), move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while count.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(count.load(Ordering::SeqCst) >= 3);
        assert!(handle.is_running());
        assert_eq!(handle.name(), "test-ticker");

        handle.cancel();
        let after_cancel = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn cancel_does_not_wait_for_the_interval() {
        let handle = ScheduledTask::spawn("slow", Duration::from_secs(3600), || {}).unwrap();
        let started = Instant::now();
        handle.cancel();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn dropping_the_handle_stops_the_task() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        {
            let _handle = ScheduledTask::spawn("dropped", Duration::from_millis(5), move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
            thread::sleep(Duration::from_millis(20));
        }
        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = ScheduledTask::spawn("zero", Duration::ZERO, || {}).unwrap_err();
        match err {
            StorefrontError::ZeroInterval(task) => assert_eq!(task, "zero"),
            other => panic!("Expected ZeroInterval error, got {other:?}"),
        }
    }
}
