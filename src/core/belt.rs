//! The shared, bounded conveyor belt.
//!
//! A FIFO of components behind one mutex with a single condition variable.
//! Every change to the belt contents is followed by a broadcast: a worker woken
//! up may find a head it has no use for and goes straight back to waiting, so
//! waking a single waiter could leave the one thread that wants the head asleep.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use super::config::FactoryConfig;
use super::errors::{FactoryError, Result};
use super::shutdown::RunFlag;
use super::types::ComponentType;

/// Outcome of a supplier insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplied {
    /// Component that was put on the belt
    pub component: ComponentType,
    /// Head removed to make room after the full-belt timeout
    pub evicted: Option<ComponentType>,
    /// Belt contents right after the insertion, head first
    pub belt: Vec<ComponentType>,
}

/// Outcome of a worker take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taken {
    pub component: ComponentType,
    /// Items left on the belt after the take
    pub remaining: usize,
}

#[derive(Debug)]
pub struct ConveyorBelt {
    items: Mutex<VecDeque<ComponentType>>,
    changed: Condvar,
    capacity: usize,
    full_wait_timeout: Duration,
}

impl ConveyorBelt {
    /// Create an empty belt
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of components, at least 1
    /// * `full_wait_timeout` - How long an insertion waits on a full belt before evicting the head
    pub fn new(capacity: usize, full_wait_timeout: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(FactoryError::InvalidConfig(
                "belt capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            changed: Condvar::new(),
            capacity,
            full_wait_timeout,
        })
    }

    pub fn from_config(config: &FactoryConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.belt_capacity, config.full_wait_timeout)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn full_wait_timeout(&self) -> Duration {
        self.full_wait_timeout
    }

    /// Head of the belt without removing it. Never blocks on the condition.
    pub fn try_peek_head(&self) -> Option<ComponentType> {
        self.items.lock().front().copied()
    }

    pub fn size(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.lock().len() >= self.capacity
    }

    /// Belt contents, head first
    pub fn snapshot(&self) -> Vec<ComponentType> {
        self.items.lock().iter().copied().collect()
    }

    /// Insert without waiting; refuses when the belt is full
    pub fn try_push(&self, component: ComponentType) -> bool {
        let mut items = self.items.lock();
        if items.len() >= self.capacity {
            return false;
        }
        items.push_back(component);
        drop(items);
        self.changed.notify_all();
        true
    }

    /// Insert `component`, waiting for room and evicting the head if the belt
    /// stays full past the timeout. Always ends up inserting.
    pub fn offer(&self, component: ComponentType) -> bool {
        self.supply(&RunFlag::new(), || component).is_some()
    }

    /// Make room, then insert whatever `make` produces, in one critical section
    ///
    /// While the belt is full the caller waits on the belt condition. If it is
    /// still full once `full_wait_timeout` has passed since the wait began, the
    /// head is dropped. Returns `None` without inserting if `running` is
    /// cleared while waiting. A timeout too large to express as an `Instant`
    /// never evicts.
    pub fn supply<F>(&self, running: &RunFlag, make: F) -> Option<Supplied>
    where
        F: FnOnce() -> ComponentType,
    {
        let mut items = self.items.lock();
        let mut evicted = None;
        let mut deadline: Option<Option<Instant>> = None;

        while items.len() >= self.capacity {
            if !running.is_running() {
                return None;
            }
            let until = *deadline
                .get_or_insert_with(|| Instant::now().checked_add(self.full_wait_timeout));
            let timed_out = match until {
                Some(until) => self.changed.wait_until(&mut items, until).timed_out(),
                None => {
                    self.changed.wait(&mut items);
                    false
                }
            };
            if !running.is_running() {
                return None;
            }
            if timed_out && items.len() >= self.capacity {
                evicted = items.pop_front();
            }
        }

        let component = make();
        items.push_back(component);
        let belt = items.iter().copied().collect();
        drop(items);
        self.changed.notify_all();

        Some(Supplied {
            component,
            evicted,
            belt,
        })
    }

    /// Take the head if `wanted` accepts it, waiting until it does
    ///
    /// The head is inspected and removed under one lock acquisition, so two
    /// workers can never both claim the same item. When the belt is empty or
    /// the head is refused the caller waits for the next change and looks
    /// again. Returns `None` only when `running` is cleared; the flag is
    /// checked before every wait and right after every wake-up.
    pub fn take_if_matches<F>(&self, running: &RunFlag, mut wanted: F) -> Option<Taken>
    where
        F: FnMut(ComponentType) -> bool,
    {
        let mut items = self.items.lock();
        loop {
            if !running.is_running() {
                return None;
            }
            if let Some(&head) = items.front() {
                if wanted(head) {
                    items.pop_front();
                    let remaining = items.len();
                    drop(items);
                    self.changed.notify_all();
                    return Some(Taken {
                        component: head,
                        remaining,
                    });
                }
            }
            self.changed.wait(&mut items);
        }
    }

    /// Broadcast to every waiter so they re-check their stop flags
    ///
    /// Takes the lock first: a waiter that read its flag before the stop
    /// is already parked by the time this notifies.
    pub fn wake_all(&self) {
        let _items = self.items.lock();
        self.changed.notify_all();
    }

    #[cfg(test)]
    pub(crate) fn clear(&self) {
        self.items.lock().clear();
        self.changed.notify_all();
    }
}

/// Render belt contents as `MAIN_UNIT-BROOM-MOP`
pub fn describe(items: &[ComponentType]) -> String {
    if items.is_empty() {
        return "<empty>".to_string();
    }
    items
        .iter()
        .map(ComponentType::name)
        .collect::<Vec<_>>()
        .join("-")
}

impl fmt::Display for ConveyorBelt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe(&self.snapshot()))
    }
}
