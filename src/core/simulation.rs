use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::config::SimulationConfig;
use super::errors::{FactoryError, Result};
use super::factory::Factory;
use super::shutdown::StopHandle;
use super::supplier::SupplierStats;
use super::types::{ComponentType, RobotType};
use super::worker::Worker;

/// Final tally for one worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub name: String,
    pub assembled: u64,
    pub held: BTreeMap<ComponentType, u32>,
}

impl From<&Worker> for WorkerReport {
    fn from(worker: &Worker) -> Self {
        Self {
            name: worker.name().to_string(),
            assembled: worker.assembled(),
            held: worker.state().held_counts(),
        }
    }
}

/// Outcome of a timed run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub elapsed: Duration,
    pub supplied: u64,
    pub evicted: u64,
    pub workers: Vec<WorkerReport>,
    /// Belt contents once every actor stopped, head first
    pub belt: Vec<ComponentType>,
}

impl SimulationReport {
    pub fn total_assembled(&self) -> u64 {
        self.workers.iter().map(|w| w.assembled).sum()
    }
}

/// Runs one supplier and the configured workers for a fixed wall-clock time
pub struct Simulation {
    config: SimulationConfig,
    run_id: Uuid,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            run_id: Uuid::new_v4(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run against a factory built from the configuration
    pub fn run(&self) -> Result<SimulationReport> {
        let factory = Factory::new(self.config.factory.clone())?;
        self.run_in(&factory)
    }

    /// Run against an existing factory, e.g. one with a custom generator
    ///
    /// Only the worker counts and the duration are read from this run's
    /// configuration. Belt size and timings are whatever `factory` was built
    /// with; `SimulationConfig::factory` is used by [`Simulation::run`] alone.
    ///
    /// Every actor is built before the first thread starts. Once the duration
    /// has elapsed all actors are stopped and joined; a worker in the middle
    /// of an assembly finishes it first.
    pub fn run_in(&self, factory: &Factory) -> Result<SimulationReport> {
        let mut workers = Vec::with_capacity(self.config.dry_workers + self.config.wet_workers);
        for i in 0..self.config.dry_workers {
            workers.push(factory.worker_for(RobotType::Dry2000, &i.to_string()));
        }
        for i in 0..self.config.wet_workers {
            workers.push(factory.worker_for(RobotType::Wet2000, &i.to_string()));
        }
        let mut supplier = factory.supplier("Supplier");

        let mut stops: Vec<StopHandle> = workers.iter().map(Worker::stop_handle).collect();
        stops.push(supplier.stop_handle());

        info!(
            "Run {} starting: {} DRY2000 worker(s), {} WET2000 worker(s), {:?}",
            self.run_id, self.config.dry_workers, self.config.wet_workers, self.config.duration
        );
        let started = Instant::now();

        let mut worker_threads: Vec<(String, JoinHandle<Worker>)> = Vec::new();
        for mut worker in workers {
            let name = worker.name().to_string();
            let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
                worker.run();
                worker
            });
            match spawned {
                Ok(handle) => worker_threads.push((name, handle)),
                Err(err) => {
                    stop_all(&stops);
                    for (_, handle) in worker_threads {
                        let _ = handle.join();
                    }
                    return Err(FactoryError::Spawn(err));
                }
            }
        }

        let supplier_name = supplier.name().to_string();
        let supplier_thread = match thread::Builder::new()
            .name(supplier_name.clone())
            .spawn(move || supplier.run())
        {
            Ok(handle) => handle,
            Err(err) => {
                stop_all(&stops);
                for (_, handle) in worker_threads {
                    let _ = handle.join();
                }
                return Err(FactoryError::Spawn(err));
            }
        };

        thread::sleep(self.config.duration);
        debug!("Run {} stopping {} actor(s)", self.run_id, stops.len());
        stop_all(&stops);

        let stats: SupplierStats = supplier_thread
            .join()
            .map_err(|_| FactoryError::WorkerPanicked(supplier_name))?;

        let mut reports = Vec::with_capacity(worker_threads.len());
        for (name, handle) in worker_threads {
            let worker = handle.join().map_err(|_| FactoryError::WorkerPanicked(name))?;
            reports.push(WorkerReport::from(&worker));
        }

        let report = SimulationReport {
            run_id: self.run_id,
            elapsed: started.elapsed(),
            supplied: stats.supplied,
            evicted: stats.evicted,
            workers: reports,
            belt: factory.belt().snapshot(),
        };
        info!(
            "Run {} finished: {} supplied, {} evicted, {} robot(s) assembled",
            self.run_id,
            report.supplied,
            report.evicted,
            report.total_assembled()
        );
        Ok(report)
    }
}

fn stop_all(stops: &[StopHandle]) {
    for stop in stops {
        stop.stop();
    }
}
