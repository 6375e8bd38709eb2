pub mod client;
pub mod job;
pub mod vehicle;

pub use client::Client;
pub use job::{Job, JobKind, JobType};
pub use vehicle::Vehicle;
