use log::info;
use std::sync::Arc;
use std::time::Duration;

use super::belt::ConveyorBelt;
use super::generator::ComponentGenerator;
use super::observer::{FactoryEvent, FactoryObserver};
use super::shutdown::{RunFlag, StopHandle};

/// Counters kept by a supplier over its lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupplierStats {
    pub supplied: u64,
    pub evicted: u64,
}

/// Puts a freshly generated component on the belt once per interval.
///
/// When the belt is full it waits for a worker to make room, and drops the
/// head of the belt if nobody does within the belt's full-wait timeout.
pub struct Supplier {
    name: String,
    belt: Arc<ConveyorBelt>,
    generator: Arc<dyn ComponentGenerator>,
    observer: Arc<dyn FactoryObserver>,
    interval: Duration,
    running: RunFlag,
    stats: SupplierStats,
}

impl Supplier {
    pub fn new(
        name: impl Into<String>,
        belt: Arc<ConveyorBelt>,
        generator: Arc<dyn ComponentGenerator>,
        observer: Arc<dyn FactoryObserver>,
        interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            belt,
            generator,
            observer,
            interval,
            running: RunFlag::new(),
            stats: SupplierStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> SupplierStats {
        self.stats
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle::new(self.name.clone(), self.running.clone(), Arc::clone(&self.belt))
    }

    /// Run one supply step: make room, generate, insert
    ///
    /// Returns false if a stop was observed before anything was inserted.
    pub fn tick(&mut self) -> bool {
        let generator = &self.generator;
        let Some(supplied) = self.belt.supply(&self.running, || generator.generate()) else {
            return false;
        };

        if let Some(component) = supplied.evicted {
            self.stats.evicted += 1;
            self.observer.on_event(&FactoryEvent::Evicted {
                supplier: self.name.clone(),
                component,
            });
        }
        self.stats.supplied += 1;
        self.observer.on_event(&FactoryEvent::Supplied {
            supplier: self.name.clone(),
            component: supplied.component,
            belt: supplied.belt,
        });
        true
    }

    /// Supply until stopped, then return the lifetime counters
    pub fn run(&mut self) -> SupplierStats {
        info!("[Supplier {}] Started", self.name);

        while self.running.is_running() {
            if !self.tick() {
                break;
            }
            // Pause outside the belt lock; a stop request ends it early
            if !self.running.sleep(self.interval) {
                break;
            }
        }

        self.observer.on_event(&FactoryEvent::Stopped {
            actor: format!("Supplier {}", self.name),
        });
        self.stats
    }
}
