pub mod belt;
pub mod config;
pub mod errors;
pub mod factory;
pub mod generator;
pub mod observer;
pub mod recipe;
pub mod shutdown;
pub mod simulation;
pub mod supplier;
pub mod types;
pub mod worker;
