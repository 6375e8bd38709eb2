use thiserror::Error;

/// Errors surfaced by the workshop stores.
///
/// Everything except `Storage` is a recoverable domain error: the caller
/// decides whether to retry or report it. `Storage` wraps infrastructure
/// failures (unreadable files, malformed JSON) and is not recoverable at
/// this layer.
#[derive(Debug, Error)]
pub enum WorkshopError {
    #[error("A client with that national id already exists")]
    DuplicateClient,

    #[error("A vehicle with that plate already exists")]
    DuplicateVehicle,

    #[error("The client already has a job in progress")]
    ClientBusy,

    #[error("The vehicle is currently in the workshop")]
    VehicleBusy,

    #[error("The client has a later job on record")]
    ClientHasLaterJob,

    #[error("The vehicle has a later job on record")]
    VehicleHasLaterJob,

    #[error("There is no open job for that vehicle")]
    NoOpenJobForVehicle,

    #[error("This type of job does not take a material cost")]
    MaterialCostNotSupported,

    #[error("No matching job exists")]
    JobNotFound,

    #[error("No client with that national id exists")]
    ClientNotFound,

    #[error("No vehicle with that plate exists")]
    VehicleNotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for WorkshopError {
    fn from(err: std::io::Error) -> Self {
        WorkshopError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for WorkshopError {
    fn from(err: serde_json::Error) -> Self {
        WorkshopError::Storage(err.to_string())
    }
}
