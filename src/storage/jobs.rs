use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::errors::WorkshopError;
use crate::models::{Client, Job, JobType, Vehicle};
use crate::storage::{read_collection, write_collection, JobStore};

const JOBS_FILE: &str = "jobs.json";

/// JSON-file-backed job store.
///
/// The full collection lives behind a write lock; every mutating operation
/// validates against the whole collection and rewrites the whole file before
/// returning, so the one-open-job-per-client/vehicle invariants hold across
/// concurrent in-process callers.
pub struct JsonJobStore {
    file_path: PathBuf,
    cache: RwLock<Vec<Job>>,
}

impl JsonJobStore {
    /// Create a new JsonJobStore, loading existing data from disk if present.
    ///
    /// A missing `jobs.json` means an empty collection; a malformed one is a
    /// fatal [`WorkshopError::Storage`].
    pub async fn new(data_dir: PathBuf) -> Result<Self, WorkshopError> {
        tokio::fs::create_dir_all(&data_dir).await?;
        let file_path = data_dir.join(JOBS_FILE);
        let jobs: Vec<Job> = read_collection(&file_path).await?;
        tracing::debug!(count = jobs.len(), "loaded job collection");
        Ok(Self {
            file_path,
            cache: RwLock::new(jobs),
        })
    }

    async fn persist(&self, jobs: &[Job]) -> Result<(), WorkshopError> {
        write_collection(&self.file_path, jobs).await
    }
}

/// Scan the existing collection, in order, for a conflict with the job about
/// to be inserted. Within each entry the client is checked before the
/// vehicle. A start date equal to a prior end date counts as a conflict.
fn check_conflicts(job: &Job, jobs: &[Job]) -> Result<(), WorkshopError> {
    for existing in jobs {
        match existing.end_date {
            None => {
                if existing.client == job.client {
                    return Err(WorkshopError::ClientBusy);
                } else if existing.vehicle == job.vehicle {
                    return Err(WorkshopError::VehicleBusy);
                }
            }
            Some(end_date) => {
                if existing.client == job.client && job.start_date <= end_date {
                    return Err(WorkshopError::ClientHasLaterJob);
                } else if existing.vehicle == job.vehicle && job.start_date <= end_date {
                    return Err(WorkshopError::VehicleHasLaterJob);
                }
            }
        }
    }
    Ok(())
}

/// Locate the unique open job for a vehicle. The lookup key is the vehicle
/// alone, not the full job identity.
fn open_job_position(vehicle: &Vehicle, jobs: &[Job]) -> Result<usize, WorkshopError> {
    jobs.iter()
        .position(|j| j.vehicle == *vehicle && !j.is_closed())
        .ok_or(WorkshopError::NoOpenJobForVehicle)
}

#[async_trait]
impl JobStore for JsonJobStore {
    async fn list(&self) -> Result<Vec<Job>, WorkshopError> {
        let cache = self.cache.read().await;
        Ok(cache.clone())
    }

    async fn list_by_client(&self, client: &Client) -> Result<Vec<Job>, WorkshopError> {
        let cache = self.cache.read().await;
        Ok(cache.iter().filter(|j| j.client == *client).cloned().collect())
    }

    async fn list_by_vehicle(&self, vehicle: &Vehicle) -> Result<Vec<Job>, WorkshopError> {
        let cache = self.cache.read().await;
        Ok(cache
            .iter()
            .filter(|j| j.vehicle == *vehicle)
            .cloned()
            .collect())
    }

    async fn monthly_statistics(
        &self,
        month: NaiveDate,
    ) -> Result<BTreeMap<JobType, u32>, WorkshopError> {
        let cache = self.cache.read().await;
        let mut statistics: BTreeMap<JobType, u32> =
            JobType::ALL.iter().map(|t| (*t, 0)).collect();
        for job in cache.iter().filter(|j| j.started_in_month(month)) {
            *statistics.entry(job.job_type()).or_insert(0) += 1;
        }
        Ok(statistics)
    }

    async fn insert(&self, job: Job) -> Result<(), WorkshopError> {
        let mut cache = self.cache.write().await;
        if let Err(conflict) = check_conflicts(&job, &cache) {
            tracing::debug!(
                plate = %job.vehicle.plate,
                start = %job.start_date,
                %conflict,
                "job insert rejected"
            );
            return Err(conflict);
        }
        cache.push(job);
        self.persist(&cache).await?;
        Ok(())
    }

    async fn add_hours(&self, job: &Job, hours: u32) -> Result<Job, WorkshopError> {
        let mut cache = self.cache.write().await;
        let idx = open_job_position(&job.vehicle, &cache)?;
        cache[idx].add_hours(hours)?;
        let updated = cache[idx].clone();
        self.persist(&cache).await?;
        Ok(updated)
    }

    async fn add_material_cost(&self, job: &Job, cost: f64) -> Result<Job, WorkshopError> {
        let mut cache = self.cache.write().await;
        let idx = open_job_position(&job.vehicle, &cache)?;
        cache[idx].add_material_cost(cost)?;
        let updated = cache[idx].clone();
        self.persist(&cache).await?;
        Ok(updated)
    }

    async fn close(&self, job: &Job, end_date: NaiveDate) -> Result<Job, WorkshopError> {
        let mut cache = self.cache.write().await;
        let idx = open_job_position(&job.vehicle, &cache)?;
        cache[idx].close(end_date)?;
        let updated = cache[idx].clone();
        self.persist(&cache).await?;
        Ok(updated)
    }

    async fn find(&self, job: &Job) -> Result<Option<Job>, WorkshopError> {
        let cache = self.cache.read().await;
        Ok(cache.iter().find(|j| *j == job).cloned())
    }

    async fn delete(&self, job: &Job) -> Result<(), WorkshopError> {
        let mut cache = self.cache.write().await;
        let idx = cache
            .iter()
            .position(|j| j == job)
            .ok_or(WorkshopError::JobNotFound)?;
        cache.remove(idx);
        self.persist(&cache).await?;
        Ok(())
    }
}
