use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::WorkshopError;
use crate::models::Vehicle;
use crate::storage::{read_collection, write_collection, VehicleStore};

const VEHICLES_FILE: &str = "vehicles.json";

/// JSON-file-backed vehicle store, keyed by plate.
pub struct JsonVehicleStore {
    file_path: PathBuf,
    cache: RwLock<Vec<Vehicle>>,
}

impl JsonVehicleStore {
    pub async fn new(data_dir: PathBuf) -> Result<Self, WorkshopError> {
        tokio::fs::create_dir_all(&data_dir).await?;
        let file_path = data_dir.join(VEHICLES_FILE);
        let vehicles: Vec<Vehicle> = read_collection(&file_path).await?;
        tracing::debug!(count = vehicles.len(), "loaded vehicle collection");
        Ok(Self {
            file_path,
            cache: RwLock::new(vehicles),
        })
    }

    async fn persist(&self, vehicles: &[Vehicle]) -> Result<(), WorkshopError> {
        write_collection(&self.file_path, vehicles).await
    }
}

#[async_trait]
impl VehicleStore for JsonVehicleStore {
    async fn list(&self) -> Result<Vec<Vehicle>, WorkshopError> {
        let cache = self.cache.read().await;
        Ok(cache.clone())
    }

    async fn insert(&self, vehicle: Vehicle) -> Result<(), WorkshopError> {
        let mut cache = self.cache.write().await;
        if cache.contains(&vehicle) {
            return Err(WorkshopError::DuplicateVehicle);
        }
        cache.push(vehicle);
        self.persist(&cache).await?;
        Ok(())
    }

    async fn find(&self, vehicle: &Vehicle) -> Result<Option<Vehicle>, WorkshopError> {
        let cache = self.cache.read().await;
        Ok(cache.iter().find(|v| *v == vehicle).cloned())
    }

    async fn delete(&self, vehicle: &Vehicle) -> Result<(), WorkshopError> {
        let mut cache = self.cache.write().await;
        let idx = cache
            .iter()
            .position(|v| v == vehicle)
            .ok_or(WorkshopError::VehicleNotFound)?;
        cache.remove(idx);
        self.persist(&cache).await?;
        Ok(())
    }
}
