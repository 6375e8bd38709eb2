use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::WorkshopError;
use crate::models::{Client, Vehicle};

/// Variant-specific data for a job.
///
/// Mechanical work accumulates a material cost on top of labor hours;
/// a service takes labor hours only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum JobKind {
    Mechanical {
        #[serde(default)]
        material_cost: f64,
    },
    Service,
}

/// Fieldless discriminant for [`JobKind`], used as the key of the monthly
/// statistics map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobType {
    Mechanical,
    Service,
}

impl JobType {
    /// Every job variant, in display order.
    pub const ALL: [JobType; 2] = [JobType::Mechanical, JobType::Service];
}

impl JobKind {
    pub fn job_type(&self) -> JobType {
        match self {
            JobKind::Mechanical { .. } => JobType::Mechanical,
            JobKind::Service => JobType::Service,
        }
    }
}

/// One repair engagement: a client brings a vehicle in on a start date, the
/// job accumulates hours (and material cost, if mechanical) while open, and
/// is closed exactly once by recording an end date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub client: Client,
    pub vehicle: Vehicle,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub hours: u32,
    pub kind: JobKind,
}

impl Job {
    /// Create an open job starting on the given date.
    pub fn new(client: Client, vehicle: Vehicle, start_date: NaiveDate, job_type: JobType) -> Self {
        let kind = match job_type {
            JobType::Mechanical => JobKind::Mechanical { material_cost: 0.0 },
            JobType::Service => JobKind::Service,
        };
        Self {
            client,
            vehicle,
            start_date,
            end_date: None,
            hours: 0,
            kind,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end_date.is_some()
    }

    pub fn job_type(&self) -> JobType {
        self.kind.job_type()
    }

    /// Accumulate worked hours. The job must still be open and `hours`
    /// must be greater than zero.
    pub fn add_hours(&mut self, hours: u32) -> Result<(), WorkshopError> {
        if self.is_closed() {
            return Err(WorkshopError::Validation(
                "Cannot add hours to a closed job".to_string(),
            ));
        }
        if hours == 0 {
            return Err(WorkshopError::Validation(
                "Hours must be greater than zero".to_string(),
            ));
        }
        self.hours += hours;
        Ok(())
    }

    /// Accumulate material cost. Only mechanical jobs take a material cost.
    pub fn add_material_cost(&mut self, cost: f64) -> Result<(), WorkshopError> {
        if self.is_closed() {
            return Err(WorkshopError::Validation(
                "Cannot add material cost to a closed job".to_string(),
            ));
        }
        if cost <= 0.0 {
            return Err(WorkshopError::Validation(
                "Material cost must be greater than zero".to_string(),
            ));
        }
        match &mut self.kind {
            JobKind::Mechanical { material_cost } => {
                *material_cost += cost;
                Ok(())
            }
            JobKind::Service => Err(WorkshopError::MaterialCostNotSupported),
        }
    }

    /// Close the job. The end date must fall strictly after the start date,
    /// and a closed job cannot be closed again.
    pub fn close(&mut self, end_date: NaiveDate) -> Result<(), WorkshopError> {
        if self.is_closed() {
            return Err(WorkshopError::Validation(
                "The job is already closed".to_string(),
            ));
        }
        if end_date <= self.start_date {
            return Err(WorkshopError::Validation(
                "The end date must be after the start date".to_string(),
            ));
        }
        self.end_date = Some(end_date);
        Ok(())
    }

    /// Whether the job started in the given calendar month.
    pub fn started_in_month(&self, month: NaiveDate) -> bool {
        self.start_date.year() == month.year() && self.start_date.month() == month.month()
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.client == other.client
            && self.vehicle == other.vehicle
            && self.start_date == other.start_date
        // end_date, hours and kind are lifecycle state, not identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn make_client() -> Client {
        Client::new("11223344B", "Bob", "600123456").unwrap()
    }

    fn make_vehicle() -> Vehicle {
        Vehicle::new("Seat", "Leon", "1234BCD").unwrap()
    }

    fn make_job(job_type: JobType) -> Job {
        Job::new(make_client(), make_vehicle(), date(2024, 1, 10), job_type)
    }

    #[test]
    fn test_new_job_is_open() {
        let job = make_job(JobType::Mechanical);
        assert!(!job.is_closed());
        assert_eq!(job.hours, 0);
        assert_eq!(job.kind, JobKind::Mechanical { material_cost: 0.0 });
    }

    #[test]
    fn test_add_hours_accumulates() {
        let mut job = make_job(JobType::Service);
        job.add_hours(3).expect("add hours");
        job.add_hours(2).expect("add hours");
        assert_eq!(job.hours, 5);
    }

    #[test]
    fn test_add_zero_hours_rejected() {
        let mut job = make_job(JobType::Service);
        let result = job.add_hours(0);
        assert!(matches!(result, Err(WorkshopError::Validation(_))));
    }

    #[test]
    fn test_add_hours_to_closed_job_rejected() {
        let mut job = make_job(JobType::Service);
        job.close(date(2024, 1, 20)).expect("close");
        let result = job.add_hours(1);
        assert!(matches!(result, Err(WorkshopError::Validation(_))));
    }

    #[test]
    fn test_add_material_cost_accumulates() {
        let mut job = make_job(JobType::Mechanical);
        job.add_material_cost(100.5).expect("add cost");
        job.add_material_cost(49.5).expect("add cost");
        assert_eq!(job.kind, JobKind::Mechanical { material_cost: 150.0 });
    }

    #[test]
    fn test_add_material_cost_to_service_rejected() {
        let mut job = make_job(JobType::Service);
        let result = job.add_material_cost(10.0);
        assert!(matches!(
            result,
            Err(WorkshopError::MaterialCostNotSupported)
        ));
    }

    #[test]
    fn test_add_non_positive_material_cost_rejected() {
        let mut job = make_job(JobType::Mechanical);
        assert!(job.add_material_cost(0.0).is_err());
        assert!(job.add_material_cost(-5.0).is_err());
    }

    #[test]
    fn test_close_sets_end_date() {
        let mut job = make_job(JobType::Mechanical);
        job.close(date(2024, 1, 20)).expect("close");
        assert!(job.is_closed());
        assert_eq!(job.end_date, Some(date(2024, 1, 20)));
    }

    #[test]
    fn test_close_on_or_before_start_rejected() {
        let mut job = make_job(JobType::Mechanical);
        assert!(job.close(date(2024, 1, 10)).is_err());
        assert!(job.close(date(2024, 1, 9)).is_err());
    }

    #[test]
    fn test_close_twice_rejected() {
        let mut job = make_job(JobType::Mechanical);
        job.close(date(2024, 1, 20)).expect("close");
        let result = job.close(date(2024, 1, 25));
        assert!(matches!(result, Err(WorkshopError::Validation(_))));
    }

    #[test]
    fn test_identity_ignores_lifecycle_state() {
        let mut a = make_job(JobType::Mechanical);
        let b = make_job(JobType::Service);
        a.add_hours(4).expect("add hours");
        a.close(date(2024, 2, 1)).expect("close");
        // same client, vehicle and start date: equal despite different state
        assert_eq!(a, b);
    }

    #[test]
    fn test_identity_differs_on_start_date() {
        let a = make_job(JobType::Mechanical);
        let b = Job::new(
            make_client(),
            make_vehicle(),
            date(2024, 3, 1),
            JobType::Mechanical,
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_started_in_month() {
        let job = make_job(JobType::Service);
        assert!(job.started_in_month(date(2024, 1, 1)));
        assert!(job.started_in_month(date(2024, 1, 31)));
        assert!(!job.started_in_month(date(2024, 2, 10)));
        assert!(!job.started_in_month(date(2023, 1, 10)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut job = make_job(JobType::Mechanical);
        job.add_hours(7).expect("add hours");
        job.add_material_cost(120.0).expect("add cost");
        job.close(date(2024, 1, 20)).expect("close");

        let json = serde_json::to_string(&job).expect("serialize");
        let deserialized: Job = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(job, deserialized);
        assert_eq!(deserialized.hours, 7);
        assert_eq!(
            deserialized.kind,
            JobKind::Mechanical { material_cost: 120.0 }
        );
        assert_eq!(deserialized.end_date, Some(date(2024, 1, 20)));
    }

    #[test]
    fn test_dates_serialize_as_iso_calendar_days() {
        let job = make_job(JobType::Service);
        let json = serde_json::to_string(&job).expect("serialize");
        assert!(json.contains("\"2024-01-10\""));
    }

    #[test]
    fn test_kind_serializes_with_type_tag() {
        let mechanical = make_job(JobType::Mechanical);
        let json = serde_json::to_string(&mechanical.kind).expect("serialize");
        assert!(json.contains("\"type\":\"Mechanical\""));
        assert!(json.contains("\"material_cost\":0.0"));

        let service = make_job(JobType::Service);
        let json = serde_json::to_string(&service.kind).expect("serialize");
        assert!(json.contains("\"type\":\"Service\""));
    }

    #[test]
    fn test_job_type_discriminant() {
        assert_eq!(
            make_job(JobType::Mechanical).job_type(),
            JobType::Mechanical
        );
        assert_eq!(make_job(JobType::Service).job_type(), JobType::Service);
    }
}
