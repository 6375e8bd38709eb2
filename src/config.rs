use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the workshop keeps its data files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkshopConfig {
    /// Directory holding `clients.json`, `vehicles.json` and `jobs.json`.
    /// When unset, a `workshop-records` directory under the platform's
    /// local-data directory is used.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl WorkshopConfig {
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir: Some(data_dir),
        }
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("workshop-records"),
        }
    }
}
