use thiserror::Error;

/// Result alias used across the factory
pub type Result<T> = std::result::Result<T, FactoryError>;

/// Errors surfaced while wiring up or running the factory.
///
/// Everything here is raised on the caller's thread before any actor starts,
/// or while joining actors at the end of a run. Evictions and stop requests
/// are ordinary control flow and never show up as errors.
#[derive(Error, Debug)]
pub enum FactoryError {
    /// Robot selector did not name a known recipe
    #[error("Invalid robot type: {0:?}")]
    InvalidRobotType(String),

    /// Custom recipe is empty or asks for zero of something
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// OS refused to spawn an actor thread
    #[error("Failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// An actor thread panicked before it could be joined
    #[error("Thread {0} panicked")]
    WorkerPanicked(String),
}
