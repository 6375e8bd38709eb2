use crate::config::WorkshopConfig;
use crate::errors::WorkshopError;
use crate::storage::{JsonClientStore, JsonJobStore, JsonVehicleStore};

/// Composition root: constructs the three JSON stores over one data
/// directory, once, for the rest of the application to borrow. There is no
/// other way to obtain a store, so all access to a given data file goes
/// through a single instance.
pub struct Workshop {
    pub clients: JsonClientStore,
    pub vehicles: JsonVehicleStore,
    pub jobs: JsonJobStore,
}

impl Workshop {
    pub async fn open(config: &WorkshopConfig) -> Result<Self, WorkshopError> {
        let data_dir = config.resolve_data_dir();
        tracing::info!(data_dir = %data_dir.display(), "opening workshop stores");
        Ok(Self {
            clients: JsonClientStore::new(data_dir.clone()).await?,
            vehicles: JsonVehicleStore::new(data_dir.clone()).await?,
            jobs: JsonJobStore::new(data_dir).await?,
        })
    }
}
