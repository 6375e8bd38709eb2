use serde::{Deserialize, Serialize};

use crate::errors::WorkshopError;

/// A vehicle on the workshop's books, keyed by plate.
///
/// Vehicles are immutable once created; there is no update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    pub plate: String,
}

impl Vehicle {
    pub fn new(make: &str, model: &str, plate: &str) -> Result<Self, WorkshopError> {
        if make.trim().is_empty() {
            return Err(WorkshopError::Validation(
                "Vehicle make cannot be blank".to_string(),
            ));
        }
        if model.trim().is_empty() {
            return Err(WorkshopError::Validation(
                "Vehicle model cannot be blank".to_string(),
            ));
        }
        if plate.trim().is_empty() {
            return Err(WorkshopError::Validation(
                "Vehicle plate cannot be blank".to_string(),
            ));
        }
        Ok(Self {
            make: make.to_string(),
            model: model.to_string(),
            plate: plate.to_string(),
        })
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.plate == other.plate
    }
}

impl Eq for Vehicle {}
