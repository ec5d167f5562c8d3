use std::sync::Arc;

use super::belt::ConveyorBelt;
use super::config::FactoryConfig;
use super::errors::Result;
use super::generator::{ComponentGenerator, RandomComponentGenerator};
use super::observer::{FactoryObserver, LogObserver};
use super::recipe::RecipeRequirement;
use super::supplier::Supplier;
use super::types::RobotType;
use super::worker::Worker;

/// Builds the actors of one factory line.
///
/// Owns the single belt of the line plus the generator and observer every
/// actor shares, and hands out suppliers and workers already wired to them.
pub struct Factory {
    config: FactoryConfig,
    belt: Arc<ConveyorBelt>,
    generator: Arc<dyn ComponentGenerator>,
    observer: Arc<dyn FactoryObserver>,
}

impl Factory {
    /// Create a factory with a random generator and a logging observer
    pub fn new(config: FactoryConfig) -> Result<Self> {
        let belt = Arc::new(ConveyorBelt::from_config(&config)?);
        let generator: Arc<dyn ComponentGenerator> = match config.random_seed {
            Some(seed) => Arc::new(RandomComponentGenerator::with_seed(seed)),
            None => Arc::new(RandomComponentGenerator::new()),
        };
        Ok(Self {
            config,
            belt,
            generator,
            observer: Arc::new(LogObserver),
        })
    }

    /// Replace the component generator used by suppliers built afterwards
    pub fn with_generator(mut self, generator: Arc<dyn ComponentGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the observer used by actors built afterwards
    pub fn with_observer(mut self, observer: Arc<dyn FactoryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn belt(&self) -> &Arc<ConveyorBelt> {
        &self.belt
    }

    pub fn supplier(&self, name: impl Into<String>) -> Supplier {
        Supplier::new(
            name,
            Arc::clone(&self.belt),
            Arc::clone(&self.generator),
            Arc::clone(&self.observer),
            self.config.supply_interval,
        )
    }

    /// Build a worker from a robot selector such as `"DRY2000"`
    ///
    /// Fails with `InvalidRobotType` before anything is created if the
    /// selector names no known robot.
    pub fn worker(&self, selector: &str, suffix: &str) -> Result<Worker> {
        let robot: RobotType = selector.parse()?;
        Ok(self.worker_for(robot, suffix))
    }

    /// Build a worker for a built-in robot, named `<ROBOT>-<suffix>`
    pub fn worker_for(&self, robot: RobotType, suffix: &str) -> Worker {
        let name = if suffix.is_empty() {
            robot.to_string()
        } else {
            format!("{}-{}", robot, suffix)
        };
        self.worker_with_recipe(name, RecipeRequirement::for_robot(robot))
    }

    pub fn worker_with_recipe(
        &self,
        name: impl Into<String>,
        requirement: RecipeRequirement,
    ) -> Worker {
        Worker::new(
            name,
            Arc::clone(&self.belt),
            Arc::clone(&self.observer),
            requirement,
            self.config.assembly_time,
        )
    }
}
