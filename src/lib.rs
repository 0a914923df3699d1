pub mod config;
pub mod distance;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod geocoder;
pub mod orchestrator;
pub mod presenter;
pub mod solver;
