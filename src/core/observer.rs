use log::{debug, info, warn};
use parking_lot::Mutex;

use super::belt::describe;
use super::types::ComponentType;

/// Something that happened on the factory floor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryEvent {
    /// Supplier put a component on the belt
    Supplied {
        supplier: String,
        component: ComponentType,
        belt: Vec<ComponentType>,
    },
    /// Supplier dropped the head of a belt that stayed full too long
    Evicted {
        supplier: String,
        component: ComponentType,
    },
    /// Worker took the head of the belt
    Taken {
        worker: String,
        component: ComponentType,
        remaining: usize,
    },
    /// Worker looked at the head and left it there
    Refused {
        worker: String,
        component: ComponentType,
        held: u32,
    },
    /// Worker finished a robot
    Assembled { worker: String, total: u64 },
    /// Actor left its loop
    Stopped { actor: String },
}

/// Observer trait for factory events
///
/// Shared by every actor thread. `Refused` events are reported while the belt
/// lock is held, so implementations must not touch the belt.
pub trait FactoryObserver: Send + Sync {
    fn on_event(&self, event: &FactoryEvent);
}

/// Writes every event to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl FactoryObserver for LogObserver {
    fn on_event(&self, event: &FactoryEvent) {
        match event {
            FactoryEvent::Supplied {
                supplier,
                component,
                belt,
            } => {
                info!("[Supplier {}] Added {} to the belt", supplier, component);
                info!("Belt: {}", describe(belt));
            }
            FactoryEvent::Evicted {
                supplier,
                component,
            } => {
                warn!(
                    "[Supplier {}] Belt stayed full, removing {} from the head",
                    supplier, component
                );
            }
            FactoryEvent::Taken {
                worker,
                component,
                remaining,
            } => {
                info!(
                    "[Worker {}] Took {} from the belt. Belt size is now {}",
                    worker, component, remaining
                );
            }
            FactoryEvent::Refused {
                worker,
                component,
                held,
            } => {
                debug!(
                    "[Worker {}] Does not need {} (holding {})",
                    worker, component, held
                );
            }
            FactoryEvent::Assembled { worker, total } => {
                info!("[Worker {}] Assembled a robot, {} in total", worker, total);
            }
            FactoryEvent::Stopped { actor } => {
                info!("[{}] Stopped", actor);
            }
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<FactoryEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FactoryEvent> {
        self.events.lock().clone()
    }

    /// Number of recorded events matching `predicate`
    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&FactoryEvent) -> bool,
    {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }

    pub fn evictions(&self) -> usize {
        self.count(|e| matches!(e, FactoryEvent::Evicted { .. }))
    }
}

impl FactoryObserver for EventRecorder {
    fn on_event(&self, event: &FactoryEvent) {
        self.events.lock().push(event.clone());
    }
}
