use log::{info, warn};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::belt::ConveyorBelt;
use super::observer::{FactoryEvent, FactoryObserver};
use super::recipe::{RecipeRequirement, RecipeState};
use super::shutdown::{RunFlag, StopHandle};

/// Takes the parts its recipe needs off the belt and assembles robots.
///
/// A worker only ever looks at the head of the belt. If the head is something
/// it does not need (wrong kind, or that quota is already met) it leaves it
/// for someone else and waits for the belt to change. Assembly happens outside
/// the belt lock and cannot be interrupted once started.
pub struct Worker {
    name: String,
    belt: Arc<ConveyorBelt>,
    observer: Arc<dyn FactoryObserver>,
    assembly_time: Duration,
    state: RecipeState,
    assembled: u64,
    running: RunFlag,
}

impl Worker {
    pub fn new(
        name: impl Into<String>,
        belt: Arc<ConveyorBelt>,
        observer: Arc<dyn FactoryObserver>,
        requirement: RecipeRequirement,
        assembly_time: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            belt,
            observer,
            assembly_time,
            state: RecipeState::new(requirement),
            assembled: 0,
            running: RunFlag::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Robots assembled over the worker's lifetime
    pub fn assembled(&self) -> u64 {
        self.assembled
    }

    pub fn state(&self) -> &RecipeState {
        &self.state
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle::new(self.name.clone(), self.running.clone(), Arc::clone(&self.belt))
    }

    /// Wait for a needed head, take it, and assemble if that completed the recipe
    ///
    /// Returns false when a stop was observed; nothing is taken in that case.
    pub fn step(&mut self) -> bool {
        let state = &self.state;
        let name = &self.name;
        let observer = &self.observer;

        let taken = self.belt.take_if_matches(&self.running, |head| {
            let needed = state.needs(head);
            if !needed {
                observer.on_event(&FactoryEvent::Refused {
                    worker: name.clone(),
                    component: head,
                    held: state.held(head),
                });
            }
            needed
        });
        let Some(taken) = taken else {
            return false;
        };

        if !self.state.add(taken.component) {
            warn!(
                "[Worker {}] Took {} it had no room for",
                self.name,
                taken.component.name()
            );
        }
        self.observer.on_event(&FactoryEvent::Taken {
            worker: self.name.clone(),
            component: taken.component,
            remaining: taken.remaining,
        });

        if self.state.is_complete() {
            self.assemble();
        }
        true
    }

    /// Work until stopped
    pub fn run(&mut self) {
        info!("[Worker {}] Started", self.name);

        while self.running.is_running() {
            if !self.step() {
                break;
            }
        }

        self.observer.on_event(&FactoryEvent::Stopped {
            actor: format!("Worker {}", self.name),
        });
    }

    fn assemble(&mut self) {
        thread::sleep(self.assembly_time);
        self.assembled += 1;
        self.state.reset();
        self.observer.on_event(&FactoryEvent::Assembled {
            worker: self.name.clone(),
            total: self.assembled,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::EventRecorder;
    use crate::core::types::{ComponentType, RobotType};
    use std::time::Instant;

    fn dry_worker(belt: &Arc<ConveyorBelt>, recorder: &Arc<EventRecorder>) -> Worker {
        Worker::new(
            "DRY2000-test",
            Arc::clone(belt),
            recorder.clone(),
            RecipeRequirement::for_robot(RobotType::Dry2000),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_step_takes_needed_head() {
        let belt = Arc::new(ConveyorBelt::new(10, Duration::from_secs(1)).unwrap());
        belt.try_push(ComponentType::Broom);
        belt.try_push(ComponentType::Mop);
        let recorder = Arc::new(EventRecorder::new());
        let mut worker = dry_worker(&belt, &recorder);

        assert!(worker.step());
        assert_eq!(worker.state().held(ComponentType::Broom), 1);
        assert_eq!(belt.snapshot(), vec![ComponentType::Mop]);
        assert_eq!(
            recorder.events(),
            vec![FactoryEvent::Taken {
                worker: "DRY2000-test".to_string(),
                component: ComponentType::Broom,
                remaining: 1,
            }]
        );
    }

    #[test]
    fn test_step_assembles_and_resets() {
        let belt = Arc::new(ConveyorBelt::new(10, Duration::from_secs(1)).unwrap());
        for component in [
            ComponentType::Broom,
            ComponentType::MainUnit,
            ComponentType::Broom,
        ] {
            belt.try_push(component);
        }
        let recorder = Arc::new(EventRecorder::new());
        let mut worker = dry_worker(&belt, &recorder);

        for _ in 0..3 {
            assert!(worker.step());
        }

        assert_eq!(worker.assembled(), 1);
        assert!(worker.state().is_empty());
        assert!(belt.is_empty());
        assert_eq!(
            recorder.count(|e| matches!(e, FactoryEvent::Assembled { total: 1, .. })),
            1
        );
    }

    #[test]
    fn test_unneeded_head_is_left_and_worker_stops_cleanly() {
        let belt = Arc::new(ConveyorBelt::new(10, Duration::from_secs(1)).unwrap());
        belt.try_push(ComponentType::Mop);
        belt.try_push(ComponentType::Broom);
        let recorder = Arc::new(EventRecorder::new());
        let mut worker = dry_worker(&belt, &recorder);
        let stop = worker.stop_handle();

        let started = Instant::now();
        let handle = thread::spawn(move || {
            worker.run();
            worker
        });
        thread::sleep(Duration::from_millis(100));
        stop.stop();
        let worker = handle.join().unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        // The broom behind the mop is out of reach
        assert_eq!(worker.state().held(ComponentType::Broom), 0);
        assert_eq!(belt.snapshot(), vec![ComponentType::Mop, ComponentType::Broom]);
        assert!(recorder.count(|e| matches!(e, FactoryEvent::Refused { .. })) >= 1);
    }

    #[test]
    fn test_met_quota_is_never_overfilled() {
        let belt = Arc::new(ConveyorBelt::new(10, Duration::from_secs(1)).unwrap());
        for _ in 0..3 {
            belt.try_push(ComponentType::Broom);
        }
        let recorder = Arc::new(EventRecorder::new());
        let mut worker = dry_worker(&belt, &recorder);
        let stop = worker.stop_handle();

        let handle = thread::spawn(move || {
            worker.run();
            worker
        });
        thread::sleep(Duration::from_millis(100));
        stop.stop();
        let worker = handle.join().unwrap();

        assert_eq!(worker.state().held(ComponentType::Broom), 2);
        assert_eq!(belt.snapshot(), vec![ComponentType::Broom]);
        assert_eq!(
            recorder.count(|e| matches!(e, FactoryEvent::Taken { .. })),
            2
        );
        assert!(recorder.count(|e| matches!(
            e,
            FactoryEvent::Refused {
                component: ComponentType::Broom,
                held: 2,
                ..
            }
        )) >= 1);
    }

    #[test]
    fn test_stopped_worker_takes_nothing() {
        let belt = Arc::new(ConveyorBelt::new(10, Duration::from_secs(1)).unwrap());
        belt.try_push(ComponentType::MainUnit);
        let recorder = Arc::new(EventRecorder::new());
        let mut worker = dry_worker(&belt, &recorder);

        let stop = worker.stop_handle();
        stop.stop();
        assert!(stop.is_stopped());
        assert!(!worker.step());
        assert_eq!(belt.size(), 1);
        assert!(worker.state().is_empty());
    }
}
