pub mod clients;
pub mod jobs;
pub mod vehicles;

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::WorkshopError;
use crate::models::{Client, Job, JobType, Vehicle};

pub use clients::JsonClientStore;
pub use jobs::JsonJobStore;
pub use vehicles::JsonVehicleStore;

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Client>, WorkshopError>;
    async fn insert(&self, client: Client) -> Result<(), WorkshopError>;
    async fn update(
        &self,
        client: &Client,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Client, WorkshopError>;
    async fn find(&self, client: &Client) -> Result<Option<Client>, WorkshopError>;
    async fn delete(&self, client: &Client) -> Result<(), WorkshopError>;
}

#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Vehicle>, WorkshopError>;
    async fn insert(&self, vehicle: Vehicle) -> Result<(), WorkshopError>;
    async fn find(&self, vehicle: &Vehicle) -> Result<Option<Vehicle>, WorkshopError>;
    async fn delete(&self, vehicle: &Vehicle) -> Result<(), WorkshopError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Job>, WorkshopError>;
    async fn list_by_client(&self, client: &Client) -> Result<Vec<Job>, WorkshopError>;
    async fn list_by_vehicle(&self, vehicle: &Vehicle) -> Result<Vec<Job>, WorkshopError>;
    async fn monthly_statistics(
        &self,
        month: NaiveDate,
    ) -> Result<BTreeMap<JobType, u32>, WorkshopError>;
    async fn insert(&self, job: Job) -> Result<(), WorkshopError>;
    async fn add_hours(&self, job: &Job, hours: u32) -> Result<Job, WorkshopError>;
    async fn add_material_cost(&self, job: &Job, cost: f64) -> Result<Job, WorkshopError>;
    async fn close(&self, job: &Job, end_date: NaiveDate) -> Result<Job, WorkshopError>;
    async fn find(&self, job: &Job) -> Result<Option<Job>, WorkshopError>;
    async fn delete(&self, job: &Job) -> Result<(), WorkshopError>;
}

/// Load a JSON collection from disk. An absent file is an empty collection;
/// a file that exists but does not parse is a fatal storage error.
pub(crate) async fn read_collection<T: DeserializeOwned>(
    path: &Path,
) -> Result<Vec<T>, WorkshopError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = tokio::fs::read_to_string(path).await?;
    let items = serde_json::from_str(&content).map_err(|e| {
        WorkshopError::Storage(format!("{} is not valid JSON: {}", path.display(), e))
    })?;
    Ok(items)
}

/// Atomically rewrite a JSON collection: serialize pretty, write to a .tmp
/// sibling, then rename over the target.
pub(crate) async fn write_collection<T: Serialize>(
    path: &Path,
    items: &[T],
) -> Result<(), WorkshopError> {
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(items)?;
    tokio::fs::write(&tmp_path, json.as_bytes()).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    Ok(())
}
