//! Fixed-interval background tasks
//!
//! A small worker abstraction for the engine's periodic jobs: position
//! refresh, terminator recomputation, and TLE staleness checks each
//! run on their own named thread at a fixed cadence. The task runs
//! once immediately on spawn, then on every tick until stopped or
//! dropped. The next tick is not scheduled until the current run
//! finishes, so a slow run delays rather than overlaps the next one.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::Result;

/// A background thread running a closure at a fixed interval.
pub struct RepeatingTask {
    name: String,
    stop_tx: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RepeatingTask {
    /// Spawn a named worker thread running `task` every `interval`.
    ///
    /// The first run happens immediately. Stopping is cooperative: the
    /// current run finishes before the thread exits, so `task` should
    /// not block for long relative to the interval.
    pub fn spawn<F>(name: &str, interval: Duration, mut task: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread_name = name.to_string();
        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                debug!("task {} started, interval {:?}", thread_name, interval);
                task();
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(mpsc::RecvTimeoutError::Timeout) => task(),
                        Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("task {} stopped", thread_name);
            })?;
        Ok(RepeatingTask {
            name: name.to_string(),
            stop_tx,
            handle: Some(handle),
        })
    }

    /// Name the task was spawned with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop the task and wait for its thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            // The receiver may already be gone if the thread exited.
            let _ = self.stop_tx.send(());
            let _ = handle.join();
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_runs_immediately_and_repeats() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let task = RepeatingTask::spawn("test-tick", Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        thread::sleep(Duration::from_millis(100));
        task.stop();
        let runs = count.load(Ordering::SeqCst);
        assert!(runs >= 2, "expected several runs, got {}", runs);
    }

    #[test]
    fn test_stop_halts_execution() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let task = RepeatingTask::spawn("test-stop", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        thread::sleep(Duration::from_millis(30));
        task.stop();
        let after_stop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_drop_stops_thread() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        {
            let _task = RepeatingTask::spawn("test-drop", Duration::from_millis(5), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
            thread::sleep(Duration::from_millis(20));
        }
        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
        assert!(after_drop >= 1);
    }
}
