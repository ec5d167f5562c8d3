//! Configuration for the conveyor belt factory
//!
//! This module provides the tunables for one factory line (belt size and the
//! three timings that drive the actors) and for a whole timed simulation run.
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::{FactoryError, Result};

pub const DEFAULT_BELT_CAPACITY: usize = 10;
pub const DEFAULT_SUPPLY_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_FULL_WAIT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_ASSEMBLY_TIME: Duration = Duration::from_millis(3000);

/// Configuration for one factory line
///
/// Holds the belt capacity, the supplier's cadence and eviction timeout, the
/// time a worker spends assembling one robot, and the seed used by the
/// default random generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Maximum number of components on the belt
    pub belt_capacity: usize,
    /// Pause between two supplier insertions, taken outside the belt lock
    pub supply_interval: Duration,
    /// How long the supplier waits on a full belt before evicting the head
    pub full_wait_timeout: Duration,
    /// Simulated build time for one robot
    pub assembly_time: Duration,
    /// Seed for the random generator, entropy when unset
    pub random_seed: Option<u64>,
}

impl FactoryConfig {
    /// Create a factory configuration with default values
    pub fn new() -> Self {
        Self {
            belt_capacity: DEFAULT_BELT_CAPACITY,
            supply_interval: DEFAULT_SUPPLY_INTERVAL,
            full_wait_timeout: DEFAULT_FULL_WAIT_TIMEOUT,
            assembly_time: DEFAULT_ASSEMBLY_TIME,
            random_seed: None,
        }
    }

    /// Set the belt capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of components the belt holds
    pub fn with_belt_capacity(mut self, capacity: usize) -> Self {
        self.belt_capacity = capacity;
        self
    }

    /// Set the delay between two supplier insertions
    pub fn with_supply_interval(mut self, interval: Duration) -> Self {
        self.supply_interval = interval;
        self
    }

    /// Set how long the supplier tolerates a full belt before evicting
    pub fn with_full_wait_timeout(mut self, timeout: Duration) -> Self {
        self.full_wait_timeout = timeout;
        self
    }

    /// Set the time a worker needs to assemble one robot
    pub fn with_assembly_time(mut self, time: Duration) -> Self {
        self.assembly_time = time;
        self
    }

    /// Seed the default random component generator
    ///
    /// # Note
    /// Only used when the factory builds its own generator
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Check that the configuration describes a usable belt
    pub fn validate(&self) -> Result<()> {
        if self.belt_capacity == 0 {
            return Err(FactoryError::InvalidConfig(
                "belt capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a timed simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of workers assembling DRY2000 robots
    pub dry_workers: usize,
    /// Number of workers assembling WET2000 robots
    pub wet_workers: usize,
    /// Wall-clock time before every actor is asked to stop
    pub duration: Duration,
    pub factory: FactoryConfig,
}

impl SimulationConfig {
    /// Create a run configuration with no workers and a default factory
    pub fn new(duration: Duration) -> Self {
        Self {
            dry_workers: 0,
            wet_workers: 0,
            duration,
            factory: FactoryConfig::default(),
        }
    }

    pub fn with_dry_workers(mut self, count: usize) -> Self {
        self.dry_workers = count;
        self
    }

    pub fn with_wet_workers(mut self, count: usize) -> Self {
        self.wet_workers = count;
        self
    }

    pub fn with_factory(mut self, factory: FactoryConfig) -> Self {
        self.factory = factory;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FactoryConfig::default();
        assert_eq!(config.belt_capacity, 10);
        assert_eq!(config.supply_interval, Duration::from_millis(1000));
        assert_eq!(config.full_wait_timeout, Duration::from_millis(10_000));
        assert_eq!(config.assembly_time, Duration::from_millis(3000));
        assert_eq!(config.random_seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = FactoryConfig::new()
            .with_belt_capacity(4)
            .with_supply_interval(Duration::from_millis(10))
            .with_full_wait_timeout(Duration::from_millis(50))
            .with_assembly_time(Duration::from_millis(20))
            .with_random_seed(7);

        assert_eq!(config.belt_capacity, 4);
        assert_eq!(config.supply_interval, Duration::from_millis(10));
        assert_eq!(config.full_wait_timeout, Duration::from_millis(50));
        assert_eq!(config.assembly_time, Duration::from_millis(20));
        assert_eq!(config.random_seed, Some(7));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let config = FactoryConfig::new().with_belt_capacity(0);
        assert!(matches!(config.validate(), Err(FactoryError::InvalidConfig(_))));
    }

    #[test]
    fn test_unbounded_timings_are_accepted() {
        let config = FactoryConfig::new()
            .with_supply_interval(Duration::MAX)
            .with_full_wait_timeout(Duration::MAX);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_simulation_config_builder() {
        let config = SimulationConfig::new(Duration::from_secs(5))
            .with_dry_workers(2)
            .with_wet_workers(3);

        assert_eq!(config.dry_workers, 2);
        assert_eq!(config.wet_workers, 3);
        assert_eq!(config.duration, Duration::from_secs(5));
        assert_eq!(config.factory, FactoryConfig::default());
    }
}
