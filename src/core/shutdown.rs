use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::belt::ConveyorBelt;

struct FlagInner {
    running: AtomicBool,
    // Only used to park `sleep` callers until stop or their deadline
    lock: Mutex<()>,
    wake: Condvar,
}

/// Shared running/stopped flag for one actor
///
/// Cloning gives another handle on the same flag. Reads use `Acquire` and the
/// stop store uses `Release`, so an actor sees a stop request on its next check.
#[derive(Clone)]
pub struct RunFlag {
    inner: Arc<FlagInner>,
}

impl RunFlag {
    /// Create a flag in the running state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FlagInner {
                running: AtomicBool::new(true),
                lock: Mutex::new(()),
                wake: Condvar::new(),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// Flip to stopped and wake anyone parked in [`RunFlag::sleep`]
    pub fn stop(&self) {
        let _guard = self.inner.lock.lock();
        self.inner.running.store(false, Ordering::Release);
        self.inner.wake.notify_all();
    }

    /// Sleep for `duration` unless stopped first
    ///
    /// Returns true if the full duration elapsed while still running. A
    /// duration too large to express as an `Instant` sleeps until stopped.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now().checked_add(duration);
        let mut guard = self.inner.lock.lock();
        while self.is_running() {
            match deadline {
                Some(deadline) => {
                    if self.inner.wake.wait_until(&mut guard, deadline).timed_out() {
                        return self.is_running();
                    }
                }
                None => self.inner.wake.wait(&mut guard),
            }
        }
        false
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RunFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunFlag")
            .field("running", &self.is_running())
            .finish()
    }
}

/// Stops one actor from another thread.
///
/// Stopping clears the actor's flag and then broadcasts on the belt, so an
/// actor blocked waiting for the belt wakes up, sees the flag and exits.
#[derive(Clone, Debug)]
pub struct StopHandle {
    name: String,
    flag: RunFlag,
    belt: Arc<ConveyorBelt>,
}

impl StopHandle {
    pub(crate) fn new(name: String, flag: RunFlag, belt: Arc<ConveyorBelt>) -> Self {
        Self { name, flag, belt }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stop(&self) {
        self.flag.stop();
        self.belt.wake_all();
    }

    pub fn is_stopped(&self) -> bool {
        !self.flag.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_flag_starts_running() {
        let flag = RunFlag::new();
        assert!(flag.is_running());
        flag.stop();
        assert!(!flag.is_running());
        // Clones share state
        assert!(!flag.clone().is_running());
    }

    #[test]
    fn test_sleep_runs_to_completion() {
        let flag = RunFlag::new();
        let started = Instant::now();
        assert!(flag.sleep(Duration::from_millis(50)));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_stop_cuts_sleep_short() {
        let flag = RunFlag::new();
        let sleeper = flag.clone();
        let started = Instant::now();
        let handle = thread::spawn(move || sleeper.sleep(Duration::from_secs(30)));

        thread::sleep(Duration::from_millis(50));
        flag.stop();

        assert!(!handle.join().unwrap());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_unbounded_sleep_ends_on_stop() {
        let flag = RunFlag::new();
        let sleeper = flag.clone();
        let handle = thread::spawn(move || sleeper.sleep(Duration::MAX));

        thread::sleep(Duration::from_millis(50));
        flag.stop();

        assert!(!handle.join().unwrap());
    }
}
