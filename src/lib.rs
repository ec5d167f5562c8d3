pub mod core;

// Re-export commonly used types
pub use crate::core::belt::ConveyorBelt;
pub use crate::core::config::{FactoryConfig, SimulationConfig};
pub use crate::core::errors::{FactoryError, Result};
pub use crate::core::factory::Factory;
pub use crate::core::generator::{
    ComponentGenerator, FixedComponentGenerator, RandomComponentGenerator,
};
pub use crate::core::observer::{EventRecorder, FactoryEvent, FactoryObserver, LogObserver};
pub use crate::core::recipe::{RecipeRequirement, RecipeState};
pub use crate::core::shutdown::{RunFlag, StopHandle};
pub use crate::core::simulation::{Simulation, SimulationReport, WorkerReport};
pub use crate::core::supplier::{Supplier, SupplierStats};
pub use crate::core::types::{ComponentType, RobotType};
pub use crate::core::worker::Worker;
