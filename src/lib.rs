//! JSON-backed record store for a vehicle workshop.
//!
//! Clients, vehicles and repair jobs are persisted as pretty-printed JSON
//! arrays, one file per collection. The job store enforces the workshop's
//! scheduling rules: one open job per client and per vehicle, and no new job
//! starting on or before the end of a prior job for the same client or
//! vehicle.

pub mod config;
pub mod errors;
pub mod models;
pub mod storage;
pub mod workshop;

pub use config::WorkshopConfig;
pub use errors::WorkshopError;
pub use models::{Client, Job, JobKind, JobType, Vehicle};
pub use storage::{ClientStore, JobStore, VehicleStore};
pub use workshop::Workshop;
